//! Immutable XML tree with positional mutator primitives.
//!
//! This is the structural substrate the [`crate::patcher`] module edits:
//! parsing builds an [`Element`] tree once per part, mutators return new
//! trees sharing unchanged branches, and `serialize` writes a tree back out.

mod mutator;
mod node;
mod parse;
mod serialize;

pub use mutator::{
    get_attr, get_child, get_children, get_text_content, index_of_child, insert_child_at,
    remove_child_at, replace_child_at, replace_child_by_name, update_child_by_name,
    update_document_root,
};
pub use node::{Attr, Element, Node};
pub use parse::parse_document;
pub use serialize::{write_document, write_element};
