//! Structural patcher: diff a domain value against a parsed [`crate::xml`]
//! tree and emit a minimally-mutated tree that preserves unrecognized
//! siblings/attributes and ECMA-376 inheritance order.
//!
//! Every sub-patch in this module — shape-tree edits, per-property-group
//! replacement, text-style-level edits, DOCX run edits, XLSX row/cell edits
//! — is transactional per top-level operation and never mutates its input:
//! each returns a new [`crate::xml::Element`] sharing every unchanged
//! branch with the one it was given.

mod docx;
mod error;
mod group;
mod shape_property;
mod shape_tree;
mod text_style;
mod xlsx;

pub use docx::{RunOp, patch_paragraph_runs};
pub use error::{PatchError, Result};
pub use group::{remove_child_group, replace_child_group};
pub use shape_property::{
    SP_ORDER, SP_PR_ORDER, patch_blip, patch_effects, patch_fill, patch_geometry, patch_line,
    patch_text_body, patch_transform,
};
pub use shape_tree::{ShapeTreeOp, ensure_unique_ids_for_insertion, patch_shape_tree};
pub use text_style::{LVL_PPR_ORDER, patch_bullet, patch_default_run_props, patch_spacing, patch_tab_list};
pub use xlsx::{SheetOp, patch_sheet_data};
