//! `tx` — a text block inset within the available bounds.

use super::context::LayoutContext;
use super::types::{Bounds, DiagramTreeNode, LayoutNode, LayoutResult};
use crate::layout::error::Result;

pub fn layout(nodes: &[DiagramTreeNode], ctx: &LayoutContext) -> Result<LayoutResult> {
    if nodes.is_empty() {
        return Ok(LayoutResult::empty());
    }

    let margin = ctx.get_param_f64("tMargin", 0.0);
    let inset = Bounds::new(
        ctx.bounds.x + margin,
        ctx.bounds.y + margin,
        (ctx.bounds.w - 2.0 * margin).max(0.0),
        (ctx.bounds.h - 2.0 * margin).max(0.0),
    );

    let out: Vec<LayoutNode> = nodes.iter().map(|node| LayoutNode::leaf(node.id.clone(), inset)).collect();
    let bounds = Bounds::from_nodes(&out).unwrap_or(ctx.bounds);
    Ok(LayoutResult { nodes: out, bounds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::diagram::types::DiagramNodeType;

    #[test]
    fn margin_shrinks_the_text_frame() {
        let nodes = vec![DiagramTreeNode::new("t", DiagramNodeType::Node)];
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 100.0, 100.0)).with_param("tMargin", 10.0);
        let result = layout(&nodes, &ctx).unwrap();
        assert_eq!(result.nodes[0].w, 80.0);
        assert_eq!(result.nodes[0].x, 10.0);
    }
}
