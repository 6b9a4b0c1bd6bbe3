//! `pyra` — stacked trapezoidal levels, narrowest at the top.

use super::context::LayoutContext;
use super::types::{Bounds, DiagramTreeNode, LayoutNode, LayoutResult};
use crate::layout::error::Result;

pub fn layout(nodes: &[DiagramTreeNode], ctx: &LayoutContext) -> Result<LayoutResult> {
    let n = nodes.len();
    if n == 0 {
        return Ok(LayoutResult::empty());
    }

    let base_width = ctx.get_param_f64("baseWidth", ctx.bounds.w * 0.3);
    let spacing = ctx.get_param_f64("spacing", 0.0);
    let level_h = (ctx.bounds.h - spacing * (n.saturating_sub(1)) as f64) / n as f64;

    let mut out = Vec::with_capacity(n);
    for (i, node) in nodes.iter().enumerate() {
        let level_width = if n > 1 {
            base_width + (ctx.bounds.w - base_width) / (n - 1) as f64 * i as f64
        } else {
            ctx.bounds.w
        };
        let x = ctx.bounds.x + (ctx.bounds.w - level_width) / 2.0;
        let y = ctx.bounds.y + i as f64 * (level_h + spacing);
        out.push(LayoutNode::leaf(node.id.clone(), Bounds::new(x, y, level_width, level_h)));
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
    fn widens_toward_the_base() {
        let nodes = vec![node("top"), node("mid"), node("base")];
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 300.0, 300.0)).with_param("baseWidth", 60.0);
        let result = layout(&nodes, &ctx).unwrap();
        assert!(result.nodes[0].w < result.nodes[1].w);
        assert!(result.nodes[1].w < result.nodes[2].w);
        assert_eq!(result.nodes[0].w, 60.0);
        assert_eq!(result.nodes[2].w, 300.0);
    }
}
