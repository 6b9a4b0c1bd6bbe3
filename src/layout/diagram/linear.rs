//! `lin` — linear (single-row or single-column) layout.

use super::context::{LayoutContext, align_offset};
use super::types::{Bounds, DiagramTreeNode, LayoutNode, LayoutResult};
use crate::layout::error::Result;

pub fn layout(nodes: &[DiagramTreeNode], ctx: &LayoutContext) -> Result<LayoutResult> {
    if nodes.is_empty() {
        return Ok(LayoutResult::empty());
    }

    let n = nodes.len();
    let direction = ctx.get_param_str("linDir", "fromL");
    let horz_align = ctx.get_param_str("horzAlign", "ctr");
    let vert_align = ctx.get_param_str("vertAlign", "mid");
    let spacing = ctx.get_param_f64("spacing", 0.0);
    let horizontal = matches!(direction.as_str(), "fromL" | "fromR");
    let reversed = matches!(direction.as_str(), "fromR" | "fromB");

    let node_w = ctx.get_constraint("nodeWidth", if horizontal { ctx.bounds.w / n as f64 } else { ctx.bounds.w });
    let node_h = ctx.get_constraint("nodeHeight", if horizontal { ctx.bounds.h } else { ctx.bounds.h / n as f64 });

    let primary_node_size = if horizontal { node_w } else { node_h };
    let primary_size = n as f64 * primary_node_size + (n.saturating_sub(1)) as f64 * spacing;
    let available_primary = if horizontal { ctx.bounds.w } else { ctx.bounds.h };
    let primary_align = if horizontal { &horz_align } else { &vert_align };
    let start_primary = align_offset(available_primary, primary_size, primary_align);

    let mut out = Vec::with_capacity(n);
    for (i, node) in nodes.iter().enumerate() {
        let slot = if reversed { n - 1 - i } else { i };
        let primary_offset = start_primary + slot as f64 * (primary_node_size + spacing);

        let (x, y) = if horizontal {
            let cross = ctx.bounds.y + align_offset(ctx.bounds.h, node_h, &vert_align);
            (ctx.bounds.x + primary_offset, cross)
        } else {
            let cross = ctx.bounds.x + align_offset(ctx.bounds.w, node_w, &horz_align);
            (cross, ctx.bounds.y + primary_offset)
        };

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
    fn three_nodes_from_left_fill_the_row() {
        let nodes = vec![node("a"), node("b"), node("c")];
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 300.0, 50.0))
            .with_constraint("nodeWidth", 100.0)
            .with_constraint("nodeHeight", 50.0);
        let result = layout(&nodes, &ctx).unwrap();
        assert_eq!(result.nodes.len(), 3);
        assert_eq!(result.nodes[0].x, 0.0);
        assert_eq!(result.nodes[1].x, 100.0);
        assert_eq!(result.nodes[2].x, 200.0);
    }

    #[test]
    fn from_right_reverses_slot_order() {
        let nodes = vec![node("a"), node("b")];
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 200.0, 50.0))
            .with_param("linDir", "fromR")
            .with_constraint("nodeWidth", 100.0)
            .with_constraint("nodeHeight", 50.0);
        let result = layout(&nodes, &ctx).unwrap();
        assert_eq!(result.nodes[0].x, 100.0);
        assert_eq!(result.nodes[1].x, 0.0);
    }
}
