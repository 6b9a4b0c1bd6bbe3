//! Dispatch table mapping a `dgm:alg/@type` key to its pure layout function,
//! mirroring the `phf`-backed lookup tables this crate uses elsewhere for
//! small fixed string-keyed catalogues (see the transition token mapping in
//! `ooxml::pptx::transitions`).

use super::context::LayoutContext;
use super::types::{DiagramTreeNode, LayoutResult};
use super::{composite, connector, cycle, hierarchy, linear, pyramid, snake, space, text};
use crate::layout::error::{LayoutError, Result};

type AlgorithmFn = fn(&[DiagramTreeNode], &LayoutContext) -> Result<LayoutResult>;

static ALGORITHMS: phf::Map<&'static str, AlgorithmFn> = phf::phf_map! {
    "lin" => linear::layout,
    "sp" => space::layout,
    "hierChild" => hierarchy::layout_children,
    "hierRoot" => hierarchy::layout_root,
    "cycle" => cycle::layout,
    "snake" => snake::layout,
    "pyra" => pyramid::layout,
    "composite" => composite::layout,
    "conn" => connector::layout,
    "tx" => text::layout,
};

/// Look up and run the layout algorithm registered under `key`.
pub fn layout_diagram(key: &str, nodes: &[DiagramTreeNode], ctx: &LayoutContext) -> Result<LayoutResult> {
    let algorithm = ALGORITHMS.get(key).ok_or_else(|| LayoutError::UnknownAlgorithm(key.to_string()))?;
    algorithm(nodes, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::diagram::types::{Bounds, DiagramNodeType};

    #[test]
    fn dispatches_every_known_key() {
        let nodes = vec![DiagramTreeNode::new("a", DiagramNodeType::Node)];
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 100.0, 100.0));
        for key in ["lin", "sp", "hierChild", "hierRoot", "cycle", "snake", "pyra", "composite", "tx"] {
            assert!(layout_diagram(key, &nodes, &ctx).is_ok(), "key {key} should dispatch");
        }
    }

    #[test]
    fn unknown_key_is_an_error() {
        let nodes = vec![DiagramTreeNode::new("a", DiagramNodeType::Node)];
        let ctx = LayoutContext::new(Bounds::new(0.0, 0.0, 100.0, 100.0));
        assert!(matches!(layout_diagram("bogus", &nodes, &ctx), Err(LayoutError::UnknownAlgorithm(_))));
    }
}
