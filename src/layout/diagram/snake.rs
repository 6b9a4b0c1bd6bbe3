//! `snake` — row/column flow that wraps at a breakpoint, optionally
//! reversing alternating rows (a "boustrophedon" layout).

use super::context::LayoutContext;
use super::types::{Bounds, DiagramTreeNode, LayoutNode, LayoutResult};
use crate::layout::error::Result;

/// Growth corner a snake layout starts from (`dgm:alg/@grDir`); determines
/// the sign of the per-column and per-row step.
fn grow_origin(grow_dir: &str, bounds: Bounds, node_w: f64, node_h: f64) -> (f64, f64, f64, f64) {
    match grow_dir {
        "tR" => (bounds.right() - node_w, bounds.y, -1.0, 1.0),
        "bL" => (bounds.x, bounds.bottom() - node_h, 1.0, -1.0),
        "bR" => (bounds.right() - node_w, bounds.bottom() - node_h, -1.0, -1.0),
        _ => (bounds.x, bounds.y, 1.0, 1.0), // "tL", the default.
    }
}

pub fn layout(nodes: &[DiagramTreeNode], ctx: &LayoutContext) -> Result<LayoutResult> {
    if nodes.is_empty() {
        return Ok(LayoutResult::empty());
    }

    let node_w = ctx.get_constraint("nodeWidth", 100.0);
    let node_h = ctx.get_constraint("nodeHeight", 60.0);
    let spacing = ctx.get_param_f64("spacing", 10.0);
    let grow_dir = ctx.get_param_str("grDir", "tL");
    let cont_dir = ctx.get_param_str("contDir", "sameDir");
    // ECMA-376 leaves the default `bkpt` value implementation-defined; this
    // crate treats it as "endCnv" (wrap to fit the available width),
    // matching what PowerPoint renders by default.
    let bkpt = ctx.get_param_str("bkpt", "endCnv");

    let cols = match bkpt.as_str() {
        "fixed" => (ctx.get_param_f64("colcnt", nodes.len() as f64).max(1.0)) as usize,
        _ => (((ctx.bounds.w + spacing) / (node_w + spacing)).floor().max(1.0)) as usize,
    };

    let (origin_x, origin_y, dx, dy) = grow_origin(&grow_dir, ctx.bounds, node_w, node_h);
    let reverse_alternating_rows = cont_dir == "revDir";

    let mut out = Vec::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        let row = i / cols;
        let mut col = i % cols;
        if reverse_alternating_rows && row % 2 == 1 {
            col = cols - 1 - col;
        }

        let x = origin_x + dx * col as f64 * (node_w + spacing);
        let y = origin_y + dy * row as f64 * (node_h + spacing);
        out.push(LayoutNode::leaf(node.id.clone(), Bounds::new(x, y, node_w, node_h)));
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
    fn wraps_after_fixed_column_count() {
        let nodes: Vec<_> = (0..5).map(|i| node(&i.to_string())).collect();
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 1000.0, 1000.0))
            .with_param("bkpt", "fixed")
            .with_param("colcnt", 2.0)
            .with_constraint("nodeWidth", 100.0)
            .with_constraint("nodeHeight", 50.0);
        let result = layout(&nodes, &ctx).unwrap();
        assert_eq!(result.nodes[0].y, result.nodes[1].y);
        assert!(result.nodes[2].y > result.nodes[0].y);
    }

    #[test]
    fn reverse_direction_flips_alternating_rows() {
        let nodes: Vec<_> = (0..4).map(|i| node(&i.to_string())).collect();
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 1000.0, 1000.0))
            .with_param("bkpt", "fixed")
            .with_param("colcnt", 2.0)
            .with_param("contDir", "revDir")
            .with_constraint("nodeWidth", 100.0)
            .with_constraint("nodeHeight", 50.0);
        let result = layout(&nodes, &ctx).unwrap();
        // Row 1 (nodes 2,3) should be reversed: node 2 in the right column.
        assert!(result.nodes[2].x > result.nodes[3].x);
    }
}
