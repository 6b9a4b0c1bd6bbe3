//! `cycle` — nodes arranged evenly around a circle.

use super::context::LayoutContext;
use super::types::{Bounds, DiagramTreeNode, LayoutNode, LayoutResult};
use crate::layout::error::Result;

pub fn layout(nodes: &[DiagramTreeNode], ctx: &LayoutContext) -> Result<LayoutResult> {
    if nodes.is_empty() {
        return Ok(LayoutResult::empty());
    }

    let ctr_shp_map = ctx.get_param_str("ctrShpMap", "none");
    let (center, ring): (Option<&DiagramTreeNode>, &[DiagramTreeNode]) =
        if ctr_shp_map == "fNode" && nodes.len() > 1 {
            (Some(&nodes[0]), &nodes[1..])
        } else {
            (None, nodes)
        };

    // Start angle is measured from the top (the vector (0, -1)), clockwise.
    let start_angle_deg = ctx.get_param_f64("stAng", 0.0);
    let span_deg = ctx.get_param_f64("span", 360.0);
    let rot_path = ctx.get_param_str("rotPath", "none");

    let node_w = ctx.get_constraint("nodeWidth", ctx.bounds.w * 0.2);
    let node_h = ctx.get_constraint("nodeHeight", ctx.bounds.h * 0.2);
    let default_radius = (ctx.bounds.w.min(ctx.bounds.h) / 2.0 - node_w.max(node_h) / 2.0).max(0.0);
    let radius = ctx.get_constraint("radius", default_radius);

    let cx = ctx.bounds.x + ctx.bounds.w / 2.0;
    let cy = ctx.bounds.y + ctx.bounds.h / 2.0;

    let n = ring.len();
    let step_deg = if n > 0 { span_deg / n as f64 } else { 0.0 };

    let mut out = Vec::with_capacity(nodes.len());
    if let Some(center_node) = center {
        out.push(LayoutNode::leaf(
            center_node.id.clone(),
            Bounds::new(cx - node_w / 2.0, cy - node_h / 2.0, node_w, node_h),
        ));
    }

    for (i, node) in ring.iter().enumerate() {
        let angle_deg = start_angle_deg + step_deg * i as f64;
        let angle_rad = angle_deg.to_radians();
        // From-top vector (0,-1) rotated clockwise by angle_deg: (sin, -cos).
        let x = cx + radius * angle_rad.sin() - node_w / 2.0;
        let y = cy - radius * angle_rad.cos() - node_h / 2.0;
        let rotation = (rot_path == "alongPath").then_some(angle_deg);

        out.push(LayoutNode {
            tree_node_id: node.id.clone(),
            x,
            y,
            w: node_w,
            h: node_h,
            rotation,
            is_connector: false,
            children: Vec::new(),
        });
    }

    let bounds = Bounds::from_nodes(&out).unwrap_or(ctx.bounds);
    Ok(LayoutResult { nodes: out, bounds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::diagram::types::DiagramNodeType;

    fn node(id: &str) -> DiagramTreeNode {
        DiagramTreeNode::new(id, DiagramNodeType::Node)
    }

    #[test]
    fn first_node_starts_at_top_by_default() {
        let nodes = vec![node("a"), node("b"), node("c"), node("d")];
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 400.0, 400.0))
            .with_constraint("nodeWidth", 40.0)
            .with_constraint("nodeHeight", 40.0)
            .with_constraint("radius", 100.0);
        let result = layout(&nodes, &ctx).unwrap();
        let first = &result.nodes[0];
        let cx = 200.0;
        // top of circle: x centred on cx, y above centre by radius.
        assert!((first.x + first.w / 2.0 - cx).abs() < 1e-6);
        assert!(first.y < 200.0 - 50.0);
    }

    #[test]
    fn center_node_maps_first_point_to_centre() {
        let nodes = vec![node("center"), node("a"), node("b")];
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 400.0, 400.0))
            .with_param("ctrShpMap", "fNode")
            .with_constraint("nodeWidth", 40.0)
            .with_constraint("nodeHeight", 40.0);
        let result = layout(&nodes, &ctx).unwrap();
        assert_eq!(result.nodes.len(), 3);
        assert_eq!(result.nodes[0].tree_node_id, "center");
        assert!((result.nodes[0].x + 20.0 - 200.0).abs() < 1e-6);
        assert!((result.nodes[0].y + 20.0 - 200.0).abs() < 1e-6);
    }
}
