//! WordprocessingML paragraph-run patcher.
//!
//! The "diff a domain model against a parsed tree, preserve unknowns"
//! contract the rest of this module applies to PresentationML shape trees
//! is format-agnostic; this is the DOCX instance of it. Bookmarks, field
//! chars, and other non-run siblings are addressed by absolute child index
//! and are never merged or reordered by these operations.

use super::error::{PatchError, Result};
use crate::xml::{Element, Node};

#[derive(Debug, Clone)]
pub enum RunOp {
    Add { run: Element, after_index: Option<usize> },
    Remove { index: usize },
    Replace { index: usize, new_run: Element },
}

/// Apply `ops` to the children of a `w:p` element, left-to-right,
/// transactionally per op: a failing op returns the original paragraph.
pub fn patch_paragraph_runs(paragraph: &Element, ops: &[RunOp]) -> Result<Element> {
    let mut current = paragraph.clone();
    for (index, op) in ops.iter().enumerate() {
        current = apply_run_op(&current, op)
            .map_err(|source| PatchError::OperationFailed { index, source })?;
    }
    Ok(current)
}

fn apply_run_op(paragraph: &Element, op: &RunOp) -> std::result::Result<Element, String> {
    let mut children = paragraph.children.clone();
    match op {
        RunOp::Add { run, after_index } => {
            let at = after_index.map(|i| i + 1).unwrap_or(children.len()).min(children.len());
            children.insert(at, Node::element(run.clone()));
        },
        RunOp::Remove { index } => {
            if *index >= children.len() {
                return Err(format!("run index {index} out of range"));
            }
            children.remove(*index);
        },
        RunOp::Replace { index, new_run } => {
            if *index >= children.len() {
                return Err(format!("run index {index} out of range"));
            }
            children[*index] = Node::element(new_run.clone());
        },
    }
    Ok(Element { name: paragraph.name.clone(), attrs: paragraph.attrs.clone(), children })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Element as E;

    #[test]
    fn add_after_preserves_bookmark_siblings() {
        let p = E::new("w:p").with_children(vec![
            Node::element(E::new("w:bookmarkStart").with_attr("w:id", "0")),
            Node::element(E::new("w:r")),
            Node::element(E::new("w:bookmarkEnd").with_attr("w:id", "0")),
        ]);
        let patched = patch_paragraph_runs(&p, &[RunOp::Add { run: E::new("w:r"), after_index: Some(1) }]).unwrap();
        let names: Vec<_> = patched.children.iter().filter_map(|c| c.name()).collect();
        assert_eq!(names, vec!["w:bookmarkStart", "w:r", "w:r", "w:bookmarkEnd"]);
    }

    #[test]
    fn out_of_range_remove_fails_transactionally() {
        let p = E::new("w:p").with_children(vec![Node::element(E::new("w:r"))]);
        let err = patch_paragraph_runs(&p, &[RunOp::Remove { index: 5 }]).unwrap_err();
        assert!(matches!(err, PatchError::OperationFailed { index: 0, .. }));
    }
}
