//! Structural mutator primitives over immutable [`Element`] trees.
//!
//! Every mutator returns a *new* element; unchanged children are carried
//! over as `Rc::clone`s, so only the path from the edited child up to the
//! element passed in is freshly allocated. This is what makes patch
//! operations composable and lets round-trip tests compare trees with plain
//! structural equality instead of a diff.

use super::node::{Element, Node};
use std::rc::Rc;

pub fn get_child<'a>(el: &'a Element, name: &str) -> Option<&'a Rc<Element>> {
    el.child(name)
}

pub fn get_children<'a>(el: &'a Element, name: &'a str) -> Vec<&'a Rc<Element>> {
    el.children_named(name).collect()
}

pub fn get_attr<'a>(el: &'a Element, name: &str) -> Option<&'a str> {
    el.attr(name)
}

pub fn get_text_content(el: &Element) -> String {
    el.text_content()
}

/// Replace the first child named `name` with `replacement`. If no such
/// child exists, `replacement` is appended.
pub fn replace_child_by_name(el: &Element, name: &str, replacement: Node) -> Element {
    let mut found = false;
    let mut children: Vec<Node> = el
        .children
        .iter()
        .map(|c| {
            if !found && c.name() == Some(name) {
                found = true;
                replacement.clone()
            } else {
                c.clone()
            }
        })
        .collect();
    if !found {
        children.push(replacement);
    }
    Element {
        name: el.name.clone(),
        attrs: el.attrs.clone(),
        children,
    }
}

/// Apply `f` to the first child named `name`, in place structurally. If
/// the child is absent, `el` is returned unchanged.
pub fn update_child_by_name(
    el: &Element,
    name: &str,
    f: impl FnOnce(&Element) -> Element,
) -> Element {
    let mut applied = false;
    let children: Vec<Node> = el
        .children
        .iter()
        .map(|c| {
            if !applied {
                if let Node::Element(child_el) = c {
                    if child_el.name == name {
                        applied = true;
                        return Node::Element(Rc::new(f(child_el)));
                    }
                }
            }
            c.clone()
        })
        .collect();
    Element {
        name: el.name.clone(),
        attrs: el.attrs.clone(),
        children,
    }
}

pub fn insert_child_at(el: &Element, index: usize, child: Node) -> Element {
    let idx = index.min(el.children.len());
    let mut children = el.children.clone();
    children.insert(idx, child);
    Element {
        name: el.name.clone(),
        attrs: el.attrs.clone(),
        children,
    }
}

pub fn remove_child_at(el: &Element, index: usize) -> Element {
    let mut children = el.children.clone();
    if index < children.len() {
        children.remove(index);
    }
    Element {
        name: el.name.clone(),
        attrs: el.attrs.clone(),
        children,
    }
}

pub fn replace_child_at(el: &Element, index: usize, child: Node) -> Element {
    let mut children = el.children.clone();
    if index < children.len() {
        children[index] = child;
    }
    Element {
        name: el.name.clone(),
        attrs: el.attrs.clone(),
        children,
    }
}

/// Find the index of the first direct child element named `name`.
pub fn index_of_child(el: &Element, name: &str) -> Option<usize> {
    el.children.iter().position(|c| c.name() == Some(name))
}

/// Document-level mutator: re-root a tree by replacing its root element
/// with the result of `f`, preserving the caller's `Rc` sharing discipline.
pub fn update_document_root(root: &Rc<Element>, f: impl FnOnce(&Element) -> Element) -> Rc<Element> {
    Rc::new(f(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::node::{Element, Node};

    fn leaf(name: &str) -> Node {
        Node::element(Element::new(name))
    }

    #[test]
    fn replace_by_name_preserves_unrelated_siblings() {
        let el = Element::new("a:spPr").with_children(vec![leaf("a:xfrm"), leaf("a:prstGeom")]);
        let replaced = replace_child_by_name(&el, "a:prstGeom", leaf("a:custGeom"));
        assert_eq!(replaced.children.len(), 2);
        assert_eq!(replaced.children[0].name(), Some("a:xfrm"));
        assert_eq!(replaced.children[1].name(), Some("a:custGeom"));
    }

    #[test]
    fn replace_by_name_appends_when_absent() {
        let el = Element::new("a:spPr").with_children(vec![leaf("a:xfrm")]);
        let replaced = replace_child_by_name(&el, "a:ln", leaf("a:ln"));
        assert_eq!(replaced.children.len(), 2);
        assert_eq!(replaced.children[1].name(), Some("a:ln"));
    }

    #[test]
    fn insert_remove_roundtrip() {
        let el = Element::new("p:spTree").with_children(vec![leaf("p:nvGrpSpPr"), leaf("p:grpSpPr")]);
        let inserted = insert_child_at(&el, 2, leaf("p:sp"));
        assert_eq!(inserted.children.len(), 3);
        let removed = remove_child_at(&inserted, 2);
        assert_eq!(removed.children.len(), 2);
    }
}
