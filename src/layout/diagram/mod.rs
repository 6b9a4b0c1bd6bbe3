//! SmartArt/diagram layout algorithms: pure functions from a data-model tree
//! plus a parameter context to a positioned output tree. Each algorithm
//! module implements exactly one `dgm:alg/@type` key; [`registry`] is the
//! single entry point callers should use.

mod composite;
mod connector;
mod context;
mod cycle;
mod hierarchy;
mod linear;
mod pyramid;
mod registry;
mod snake;
mod space;
mod text;
mod types;

pub use context::{align_offset, LayoutContext, ParamValue};
pub use registry::layout_diagram;
pub use types::{Bounds, DiagramNodeType, DiagramTreeNode, LayoutNode, LayoutResult, PropertySet};
