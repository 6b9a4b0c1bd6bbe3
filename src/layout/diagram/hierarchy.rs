//! `hierRoot`/`hierChild` — a left-to-right tree: depth grows horizontally,
//! siblings stack vertically, and a node is centred over the vertical span
//! of its own children.

use super::context::LayoutContext;
use super::types::{Bounds, DiagramTreeNode, LayoutNode, LayoutResult};
use crate::layout::error::Result;

/// `hierRoot` — lay out a single root and its full subtree.
pub fn layout_root(nodes: &[DiagramTreeNode], ctx: &LayoutContext) -> Result<LayoutResult> {
    let Some(root) = nodes.first() else {
        return Ok(LayoutResult::empty());
    };

    let node_w = ctx.get_constraint("nodeWidth", 120.0);
    let node_h = ctx.get_constraint("nodeHeight", 60.0);
    let spacing = ctx.get_param_f64("spacing", 20.0);

    let laid_out = layout_subtree(root, ctx.bounds.x, ctx.bounds.y, ctx.bounds.h, node_w, node_h, spacing);
    let bounds = Bounds::from_nodes(std::slice::from_ref(&laid_out)).unwrap_or(ctx.bounds);
    Ok(LayoutResult { nodes: vec![laid_out], bounds })
}

/// `hierChild` — lay out a list of siblings (no shared parent in this call)
/// using the same perpendicular recursion as [`layout_root`]'s children.
pub fn layout_children(nodes: &[DiagramTreeNode], ctx: &LayoutContext) -> Result<LayoutResult> {
    if nodes.is_empty() {
        return Ok(LayoutResult::empty());
    }

    let node_w = ctx.get_constraint("nodeWidth", 120.0);
    let node_h = ctx.get_constraint("nodeHeight", 60.0);
    let spacing = ctx.get_param_f64("spacing", 20.0);
    let n = nodes.len();
    let slice_h = ctx.bounds.h / n as f64;

    let out: Vec<LayoutNode> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            layout_subtree(node, ctx.bounds.x, ctx.bounds.y + i as f64 * slice_h, slice_h, node_w, node_h, spacing)
        })
        .collect();

    let bounds = Bounds::from_nodes(&out).unwrap_or(ctx.bounds);
    Ok(LayoutResult { nodes: out, bounds })
}

fn layout_subtree(
    node: &DiagramTreeNode,
    x: f64,
    y_top: f64,
    avail_h: f64,
    node_w: f64,
    node_h: f64,
    spacing: f64,
) -> LayoutNode {
    if node.children.is_empty() {
        return LayoutNode::leaf(node.id.clone(), Bounds::new(x, y_top + (avail_h - node_h) / 2.0, node_w, node_h));
    }

    let n = node.children.len();
    let slice_h = avail_h / n as f64;
    let children: Vec<LayoutNode> = node
        .children
        .iter()
        .enumerate()
        .map(|(i, child)| {
            layout_subtree(
                child,
                x + node_w + spacing,
                y_top + i as f64 * slice_h,
                slice_h,
                node_w,
                node_h,
                spacing,
            )
        })
        .collect();

    let first = children.first().expect("children non-empty per the branch above");
    let last = children.last().expect("children non-empty per the branch above");
    let span_top = first.y + first.h / 2.0;
    let span_bottom = last.y + last.h / 2.0;
    let node_y = (span_top + span_bottom) / 2.0 - node_h / 2.0;

    LayoutNode {
        tree_node_id: node.id.clone(),
        x,
        y: node_y,
        w: node_w,
        h: node_h,
        rotation: None,
        is_connector: false,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::diagram::types::DiagramNodeType;

    fn leaf(id: &str) -> DiagramTreeNode {
        DiagramTreeNode::new(id, DiagramNodeType::Node)
    }

    #[test]
    fn parent_centres_over_two_children() {
        let root = leaf("root").with_children(vec![leaf("a"), leaf("b")]);
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 400.0, 200.0))
            .with_constraint("nodeWidth", 100.0)
            .with_constraint("nodeHeight", 40.0)
            .with_param("spacing", 20.0);
        let result = layout_root(std::slice::from_ref(&root), &ctx).unwrap();
        let root_node = &result.nodes[0];
        assert_eq!(root_node.children.len(), 2);
        let child_a = &root_node.children[0];
        let child_b = &root_node.children[1];
        let expected_center = (child_a.y + child_a.h / 2.0 + child_b.y + child_b.h / 2.0) / 2.0;
        assert!((root_node.y + root_node.h / 2.0 - expected_center).abs() < 1e-6);
    }

    #[test]
    fn leaf_node_fills_available_height() {
        let root = leaf("only");
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 200.0, 200.0))
            .with_constraint("nodeWidth", 100.0)
            .with_constraint("nodeHeight", 40.0);
        let result = layout_root(std::slice::from_ref(&root), &ctx).unwrap();
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].y, 80.0);
    }
}
