//! `sp` — the "space" algorithm: each node simply fills the bounds it's
//! given, unchanged. Used as the default sub-algorithm by [`super::composite`]
//! and anywhere a node should pass through its parent's frame as-is.

use super::context::LayoutContext;
use super::types::{Bounds, DiagramTreeNode, LayoutNode, LayoutResult};
use crate::layout::error::Result;

pub fn layout(nodes: &[DiagramTreeNode], ctx: &LayoutContext) -> Result<LayoutResult> {
    let out: Vec<LayoutNode> = nodes.iter().map(|node| LayoutNode::leaf(node.id.clone(), ctx.bounds)).collect();
    let bounds = Bounds::from_nodes(&out).unwrap_or(ctx.bounds);
    Ok(LayoutResult { nodes: out, bounds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::diagram::types::DiagramNodeType;

    #[test]
    fn node_fills_the_given_bounds() {
        let nodes = vec![DiagramTreeNode::new("a", DiagramNodeType::Node)];
        let ctx = LayoutContext::new(Bounds::new(5.0, 5.0, 50.0, 50.0));
        let result = layout(&nodes, &ctx).unwrap();
        assert_eq!(result.nodes[0].bounds(), ctx.bounds);
    }
}
