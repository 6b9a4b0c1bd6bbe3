//! Shape-tree patcher: `add`/`remove`/`replace` operations over a `p:spTree`.
//!
//! Operations apply left-to-right and each one is transactional: a failing
//! step returns the *original* tree, tagged with its index, rather than a
//! half-mutated one.

use super::error::{PatchError, Result};
use crate::xml::{Element, Node};
use std::collections::{HashMap, HashSet};

/// One shape-tree edit. `shape`/`new_shape` are fully-built `sp`/`pic`/
/// `cxnSp`/`grpSp`/`graphicFrame` elements; the patcher only inspects their
/// `cNvPr`/`stCxn`/`endCxn` descendants for id bookkeeping.
#[derive(Debug, Clone)]
pub enum ShapeTreeOp {
    Add {
        shape: Element,
        after_id: Option<String>,
        #[allow(dead_code)] // parentId addresses nested group shapes; top-level spTree is the only target implemented
        parent_id: Option<String>,
    },
    Remove {
        shape_id: String,
    },
    Replace {
        shape_id: String,
        new_shape: Element,
    },
}

/// Apply `ops` to `tree` (a `p:spTree` element) in order. On failure, the
/// tree returned by the caller's `Err` match should be the pre-patch input —
/// callers get `PatchFailed{index, message}` and keep using their original
/// tree.
pub fn patch_shape_tree(tree: &Element, ops: &[ShapeTreeOp]) -> Result<Element> {
    let mut current = tree.clone();
    for (index, op) in ops.iter().enumerate() {
        current = apply_op(&current, op)
            .map_err(|source| PatchError::OperationFailed { index, source })?;
    }
    Ok(current)
}

fn apply_op(tree: &Element, op: &ShapeTreeOp) -> std::result::Result<Element, String> {
    match op {
        ShapeTreeOp::Add { shape, after_id, .. } => add_shape(tree, shape, after_id.as_deref()),
        ShapeTreeOp::Remove { shape_id } => remove_shape(tree, shape_id),
        ShapeTreeOp::Replace { shape_id, new_shape } => replace_shape(tree, shape_id, new_shape),
    }
}

/// The first two children of a spTree are always `nvGrpSpPr`/`grpSpPr`; no
/// insertion point may precede them.
const LEADING_PAIR_LEN: usize = 2;

fn add_shape(tree: &Element, shape: &Element, after_id: Option<&str>) -> std::result::Result<Element, String> {
    let mut dest_ids = HashSet::new();
    collect_ids(tree, &mut dest_ids);

    let (rewritten, _map) = ensure_unique_ids_for_insertion(&dest_ids, shape);

    let insert_at = match after_id {
        Some(id) => match find_direct_child_index(tree, id) {
            Some(pos) => (pos + 1).max(LEADING_PAIR_LEN),
            None => tree.children.len(),
        },
        None => tree.children.len(),
    }
    .max(LEADING_PAIR_LEN.min(tree.children.len()));

    let mut children = tree.children.clone();
    let at = insert_at.min(children.len());
    children.insert(at, Node::element(rewritten));
    Ok(Element {
        name: tree.name.clone(),
        attrs: tree.attrs.clone(),
        children,
    })
}

fn remove_shape(tree: &Element, shape_id: &str) -> std::result::Result<Element, String> {
    let pos = find_direct_child_index(tree, shape_id)
        .ok_or_else(|| format!("no direct child shape with id {shape_id}"))?;
    let mut children = tree.children.clone();
    children.remove(pos);
    Ok(Element {
        name: tree.name.clone(),
        attrs: tree.attrs.clone(),
        children,
    })
}

fn replace_shape(tree: &Element, shape_id: &str, new_shape: &Element) -> std::result::Result<Element, String> {
    let pos = find_direct_child_index(tree, shape_id)
        .ok_or_else(|| format!("no direct child shape with id {shape_id}"))?;

    let mut dest_ids = HashSet::new();
    collect_ids(tree, &mut dest_ids);
    dest_ids.remove(shape_id); // the slot being replaced frees its id

    let (rewritten, _map) = ensure_unique_ids_for_insertion(&dest_ids, new_shape);

    let mut children = tree.children.clone();
    children[pos] = Node::element(rewritten);
    Ok(Element {
        name: tree.name.clone(),
        attrs: tree.attrs.clone(),
        children,
    })
}

fn find_direct_child_index(tree: &Element, shape_id: &str) -> Option<usize> {
    tree.children.iter().position(|c| match c {
        Node::Element(el) => shape_own_id(el).as_deref() == Some(shape_id),
        Node::Text(_) => false,
    })
}

/// A shape's own id is the `id` attribute of the first `*cNvPr` descendant
/// in document order (the non-visual properties element is always the
/// shape's first child, and `cNvPr` is always its first child — so a
/// preorder search finds the shape's own id before any nested shape's).
fn shape_own_id(shape: &Element) -> Option<String> {
    fn search(el: &Element) -> Option<String> {
        if el.name.ends_with("cNvPr") {
            return el.attr("id").map(str::to_string);
        }
        for c in &el.children {
            if let Node::Element(child) = c {
                if let Some(id) = search(child) {
                    return Some(id);
                }
            }
        }
        None
    }
    search(shape)
}

fn collect_ids(tree: &Element, out: &mut HashSet<String>) {
    if tree.name.ends_with("cNvPr") {
        if let Some(id) = tree.attr("id") {
            out.insert(id.to_string());
        }
    }
    for c in &tree.children {
        if let Node::Element(child) = c {
            collect_ids(child, out);
        }
    }
}

fn collect_ids_in_order(el: &Element, out: &mut Vec<String>) {
    if el.name.ends_with("cNvPr") {
        if let Some(id) = el.attr("id") {
            out.push(id.to_string());
        }
    }
    for c in &el.children {
        if let Node::Element(child) = c {
            collect_ids_in_order(child, out);
        }
    }
}

fn next_unused_id(used: &HashSet<String>) -> String {
    let max = used.iter().filter_map(|s| s.parse::<u64>().ok()).max().unwrap_or(0);
    let mut candidate = max + 1;
    loop {
        let s = candidate.to_string();
        if !used.contains(&s) {
            return s;
        }
        candidate += 1;
    }
}

/// Detect in-tree id collisions between `subtree` and `dest_ids`, renumber
/// every colliding id (first pass), then rewrite every `stCxn`/`endCxn`
/// reference whose target id was rewritten (second pass). Returns the
/// possibly-rewritten subtree and the full old→new id map (map is empty
/// when nothing collided).
pub fn ensure_unique_ids_for_insertion(
    dest_ids: &HashSet<String>,
    subtree: &Element,
) -> (Element, HashMap<String, String>) {
    let mut ordered_ids = Vec::new();
    collect_ids_in_order(subtree, &mut ordered_ids);

    let mut used = dest_ids.clone();
    let mut map = HashMap::new();
    for id in ordered_ids {
        if used.contains(&id) {
            let new_id = next_unused_id(&used);
            used.insert(new_id.clone());
            map.insert(id, new_id);
        } else {
            used.insert(id);
        }
    }

    if map.is_empty() {
        return (subtree.clone(), map);
    }
    (rewrite_ids(subtree, &map), map)
}

fn rewrite_ids(el: &Element, map: &HashMap<String, String>) -> Element {
    let mut new_el = el.clone();
    if new_el.name.ends_with("cNvPr") || new_el.name.ends_with("stCxn") || new_el.name.ends_with("endCxn") {
        if let Some(id) = new_el.attr("id") {
            if let Some(new_id) = map.get(id) {
                set_attr(&mut new_el, "id", new_id.clone());
            }
        }
    }
    new_el.children = new_el
        .children
        .iter()
        .map(|c| match c {
            Node::Element(child) => Node::element(rewrite_ids(child, map)),
            Node::Text(t) => Node::Text(t.clone()),
        })
        .collect();
    new_el
}

fn set_attr(el: &mut Element, name: &str, value: String) {
    if let Some(pair) = el.attrs.iter_mut().find(|(k, _)| k == name) {
        pair.1 = value;
    } else {
        el.attrs.push((name.to_string(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Element as E;

    fn sp_with_id(id: &str) -> Element {
        E::new("p:sp").with_children(vec![Node::element(
            E::new("p:nvSpPr").with_children(vec![Node::element(E::new("p:cNvPr").with_attr("id", id))]),
        )])
    }

    fn base_tree() -> Element {
        E::new("p:spTree").with_children(vec![
            Node::element(E::new("p:nvGrpSpPr")),
            Node::element(E::new("p:grpSpPr")),
            Node::element(sp_with_id("2")),
        ])
    }

    #[test]
    fn add_after_existing_id() {
        let tree = base_tree();
        let patched = patch_shape_tree(
            &tree,
            &[ShapeTreeOp::Add { shape: sp_with_id("3"), after_id: Some("2".into()), parent_id: None }],
        )
        .unwrap();
        assert_eq!(patched.children.len(), 4);
        assert_eq!(shape_own_id(patched.children[3].as_element().unwrap()), Some("3".into()));
    }

    #[test]
    fn add_without_after_id_appends() {
        let tree = base_tree();
        let patched = patch_shape_tree(
            &tree,
            &[ShapeTreeOp::Add { shape: sp_with_id("5"), after_id: None, parent_id: None }],
        )
        .unwrap();
        assert_eq!(patched.children.len(), 4);
        assert_eq!(shape_own_id(patched.children.last().unwrap().as_element().unwrap()), Some("5".into()));
    }

    #[test]
    fn colliding_id_is_renumbered_on_insert() {
        let tree = base_tree(); // already has shape id "2"
        let patched = patch_shape_tree(
            &tree,
            &[ShapeTreeOp::Add { shape: sp_with_id("2"), after_id: None, parent_id: None }],
        )
        .unwrap();
        let ids: Vec<_> = patched
            .children
            .iter()
            .filter_map(|c| c.as_element().and_then(|e| shape_own_id(e)))
            .collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn cxn_sp_endpoints_rewrite_with_owner_id() {
        let dest = E::new("p:spTree").with_children(vec![
            Node::element(E::new("p:nvGrpSpPr")),
            Node::element(E::new("p:grpSpPr")),
            Node::element(sp_with_id("2")),
        ]);
        let mut dest_ids = HashSet::new();
        collect_ids(&dest, &mut dest_ids);

        // A subtree containing both a colliding shape "2" and a cxnSp pointing at it.
        let group = E::new("p:grpSp").with_children(vec![
            Node::element(E::new("p:nvGrpSpPr").with_children(vec![Node::element(
                E::new("p:cNvPr").with_attr("id", "10"),
            )])),
            Node::element(sp_with_id("2")),
            Node::element(E::new("p:cxnSp").with_children(vec![
                Node::element(E::new("p:nvCxnSpPr").with_children(vec![
                    Node::element(E::new("p:cNvPr").with_attr("id", "11")),
                    Node::element(
                        E::new("p:cNvCxnSpPr")
                            .with_children(vec![
                                Node::element(E::new("a:stCxn").with_attr("id", "2")),
                                Node::element(E::new("a:endCxn").with_attr("id", "999")),
                            ]),
                    ),
                ])),
            ])),
        ]);

        let (rewritten, map) = ensure_unique_ids_for_insertion(&dest_ids, &group);
        let new_sp_id = map.get("2").expect("id 2 should have been rewritten");

        // Find the cxnSp's stCxn id and confirm it follows the same rewrite.
        fn find_stcxn_id(el: &Element) -> Option<String> {
            if el.name == "a:stCxn" {
                return el.attr("id").map(str::to_string);
            }
            for c in &el.children {
                if let Node::Element(child) = c {
                    if let Some(id) = find_stcxn_id(child) {
                        return Some(id);
                    }
                }
            }
            None
        }
        assert_eq!(find_stcxn_id(&rewritten).as_deref(), Some(new_sp_id.as_str()));
    }

    #[test]
    fn remove_and_replace() {
        let tree = base_tree();
        let removed = patch_shape_tree(&tree, &[ShapeTreeOp::Remove { shape_id: "2".into() }]).unwrap();
        assert_eq!(removed.children.len(), 2);

        let replaced = patch_shape_tree(
            &tree,
            &[ShapeTreeOp::Replace { shape_id: "2".into(), new_shape: sp_with_id("2") }],
        )
        .unwrap();
        assert_eq!(replaced.children.len(), 3);
    }

    #[test]
    fn failed_op_reports_index_and_leaves_tree_recoverable() {
        let tree = base_tree();
        let err = patch_shape_tree(&tree, &[ShapeTreeOp::Remove { shape_id: "missing".into() }]).unwrap_err();
        match err {
            PatchError::OperationFailed { index, .. } => assert_eq!(index, 0),
            _ => panic!("expected OperationFailed"),
        }
    }
}
