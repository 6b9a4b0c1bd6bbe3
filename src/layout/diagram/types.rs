//! Diagram layout value types: the input tree, the laid-out output tree, and
//! the bounding box the layout covers.

use std::collections::HashMap;

/// A node (or connector placeholder) in a SmartArt-style diagram's data
/// model, as handed to an [`super::registry::layout_diagram`] algorithm.
/// Cross-references between layout output and this tree are by `id`, not by
/// pointer, matching the relationship-graph convention used everywhere else
/// in this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramTreeNode {
    pub id: String,
    pub node_type: DiagramNodeType,
    pub children: Vec<DiagramTreeNode>,
    pub depth: u32,
    pub sibling_index: u32,
    /// Per-node parameter overrides (e.g. a per-node `algorithm` choice
    /// consumed by [`super::composite`], or a pre-computed `x`/`y`/`w`/`h`
    /// rect consumed by [`super::connector`]).
    pub property_set: Option<PropertySet>,
}

impl DiagramTreeNode {
    pub fn new(id: impl Into<String>, node_type: DiagramNodeType) -> Self {
        Self {
            id: id.into(),
            node_type,
            children: Vec::new(),
            depth: 0,
            sibling_index: 0,
            property_set: None,
        }
    }

    pub fn with_children(mut self, children: Vec<DiagramTreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.property_set
            .get_or_insert_with(PropertySet::default)
            .params
            .insert(key.into(), value.into());
        self
    }
}

/// `dgm:pt/@type` — the role a data-model point plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramNodeType {
    #[default]
    Node,
    Asst,
    Doc,
    Presentation,
}

/// Free-form per-node parameter overrides (`dgm:presOf`/shape-level
/// property set entries that vary a single node away from its algorithm's
/// default).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    pub params: HashMap<String, String>,
}

impl PropertySet {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.parse().ok())
    }
}

/// An axis-aligned rectangle in the same coordinate space as the layout
/// algorithm's input bounds (EMU, point, or any caller-chosen unit — the
/// algorithms themselves are unit-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Bounds::new(x, y, right - x, bottom - y)
    }

    /// The bounds covering every node's rectangle, or `None` for an empty
    /// slice.
    pub fn from_nodes(nodes: &[LayoutNode]) -> Option<Bounds> {
        let mut iter = nodes.iter();
        let first = iter.next()?;
        let mut acc = Bounds::new(first.x, first.y, first.w, first.h);
        for node in iter {
            acc = acc.union(&Bounds::new(node.x, node.y, node.w, node.h));
            if let Some(child_bounds) = Bounds::from_nodes(&node.children) {
                acc = acc.union(&child_bounds);
            }
        }
        Some(acc)
    }
}

/// One positioned node in a layout algorithm's output tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    /// The [`DiagramTreeNode::id`] this position was computed for.
    pub tree_node_id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Rotation in degrees, clockwise; `None` means unrotated.
    pub rotation: Option<f64>,
    pub is_connector: bool,
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub fn leaf(tree_node_id: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            tree_node_id: tree_node_id.into(),
            x: bounds.x,
            y: bounds.y,
            w: bounds.w,
            h: bounds.h,
            rotation: None,
            is_connector: false,
            children: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.w, self.h)
    }
}

/// The output of a layout algorithm: the positioned nodes plus the
/// rectangle covering all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    pub nodes: Vec<LayoutNode>,
    pub bounds: Bounds,
}

impl LayoutResult {
    pub fn empty() -> Self {
        Self::default()
    }
}
