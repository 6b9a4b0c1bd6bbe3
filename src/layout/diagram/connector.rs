//! `conn` — draws a connector between each consecutive pair of
//! already-positioned nodes. Unlike the other algorithms, `conn` does not
//! place nodes itself: it reads each node's pre-computed frame back out of
//! its `property_set` (populated by whatever placed the nodes it connects)
//! and emits one connector shape per adjacent pair.

use super::types::{Bounds, DiagramTreeNode, LayoutNode, LayoutResult};
use crate::layout::diagram::context::LayoutContext;
use crate::layout::error::{LayoutError, Result};

fn node_bounds(node: &DiagramTreeNode) -> Result<Bounds> {
    let props = node
        .property_set
        .as_ref()
        .ok_or_else(|| LayoutError::InvalidInput(format!("connector endpoint `{}` has no position", node.id)))?;
    let x = props.get_f64("x").ok_or_else(|| LayoutError::InvalidInput(format!("connector endpoint `{}` missing x", node.id)))?;
    let y = props.get_f64("y").ok_or_else(|| LayoutError::InvalidInput(format!("connector endpoint `{}` missing y", node.id)))?;
    let w = props.get_f64("w").unwrap_or(0.0);
    let h = props.get_f64("h").unwrap_or(0.0);
    Ok(Bounds::new(x, y, w, h))
}

pub fn layout(nodes: &[DiagramTreeNode], ctx: &LayoutContext) -> Result<LayoutResult> {
    if nodes.len() < 2 {
        return Ok(LayoutResult::empty());
    }

    let mut out = Vec::with_capacity(nodes.len() - 1);
    for pair in nodes.windows(2) {
        let from = node_bounds(&pair[0])?;
        let to = node_bounds(&pair[1])?;

        let from_cx = from.x + from.w / 2.0;
        let from_cy = from.y + from.h / 2.0;
        let to_cx = to.x + to.w / 2.0;
        let to_cy = to.y + to.h / 2.0;

        let x = from_cx.min(to_cx);
        let y = from_cy.min(to_cy);
        let w = (to_cx - from_cx).abs();
        let h = (to_cy - from_cy).abs();
        let angle = (to_cy - from_cy).atan2(to_cx - from_cx).to_degrees();

        out.push(LayoutNode {
            tree_node_id: format!("{}->{}", pair[0].id, pair[1].id),
            x,
            y,
            w,
            h,
            rotation: Some(angle),
            is_connector: true,
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

    fn positioned(id: &str, x: f64, y: f64) -> DiagramTreeNode {
        DiagramTreeNode::new(id, DiagramNodeType::Node)
            .with_property("x", x.to_string())
            .with_property("y", y.to_string())
            .with_property("w", "10")
            .with_property("h", "10")
    }

    #[test]
    fn connects_each_consecutive_pair() {
        let nodes = vec![positioned("a", 0.0, 0.0), positioned("b", 100.0, 0.0), positioned("c", 100.0, 100.0)];
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 200.0, 200.0));
        let result = layout(&nodes, &ctx).unwrap();
        assert_eq!(result.nodes.len(), 2);
        assert!(result.nodes.iter().all(|n| n.is_connector));
    }

    #[test]
    fn horizontal_connector_has_zero_angle() {
        let nodes = vec![positioned("a", 0.0, 0.0), positioned("b", 100.0, 0.0)];
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 200.0, 200.0));
        let result = layout(&nodes, &ctx).unwrap();
        assert_eq!(result.nodes[0].rotation, Some(0.0));
    }
}
