//! `composite` — delegate each node to its own sub-algorithm and merge the
//! results, so a single diagram can mix algorithms across its top-level
//! nodes (e.g. a title node using `tx` beside a body using `cycle`).

use super::context::LayoutContext;
use super::registry;
use super::types::{Bounds, DiagramTreeNode, LayoutResult};
use crate::layout::error::Result;

pub fn layout(nodes: &[DiagramTreeNode], ctx: &LayoutContext) -> Result<LayoutResult> {
    if nodes.is_empty() {
        return Ok(LayoutResult::empty());
    }

    let mut out = Vec::with_capacity(nodes.len());
    let mut bounds: Option<Bounds> = None;

    for node in nodes {
        let algorithm = node.property_set.as_ref().and_then(|p| p.get("algorithm")).unwrap_or("sp");
        let single = std::slice::from_ref(node);
        let sub = registry::layout_diagram(algorithm, single, ctx)?;
        bounds = Some(match bounds {
            Some(b) => b.union(&sub.bounds),
            None => sub.bounds,
        });
        out.extend(sub.nodes);
    }

    Ok(LayoutResult { nodes: out, bounds: bounds.unwrap_or(ctx.bounds) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::diagram::types::DiagramNodeType;

    #[test]
    fn each_node_keeps_its_own_algorithm_choice() {
        let a = DiagramTreeNode::new("a", DiagramNodeType::Node).with_property("algorithm", "sp");
        let b = DiagramTreeNode::new("b", DiagramNodeType::Node).with_property("algorithm", "sp");
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 200.0, 100.0));
        let result = layout(&[a, b], &ctx).unwrap();
        assert_eq!(result.nodes.len(), 2);
    }
}
