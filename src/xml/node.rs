//! Immutable XML tree: `Node` is a sum type of element and text nodes.
//!
//! Elements are `Rc`-shared (this crate is single-threaded) so that mutator
//! primitives in [`crate::xml::mutator`] can return new trees that share
//! every unchanged subtree with their input, rather than deep-cloning on
//! every edit.

use std::rc::Rc;

/// A single XML attribute. Order is insertion order, but attribute order is
/// not semantic — see [`Node::eq`].
pub type Attr = (String, String);

/// An XML element: a name, its attributes, and its ordered children.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attr>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&Rc<Element>> {
        self.children.iter().find_map(|c| match c {
            Node::Element(el) if el.name == name => Some(el),
            _ => None,
        })
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Rc<Element>> {
        self.children.iter().filter_map(move |c| match c {
            Node::Element(el) if el.name == name => Some(el),
            _ => None,
        })
    }

    /// Concatenation of every descendant text node, depth-first.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        fn walk(el: &Element, out: &mut String) {
            for child in &el.children {
                match child {
                    Node::Text(t) => out.push_str(t),
                    Node::Element(e) => walk(e, out),
                }
            }
        }
        walk(self, &mut out);
        out
    }
}

/// Sum type `{ element | text }` per the data model.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Rc<Element>),
    Text(Rc<str>),
}

impl Node {
    pub fn element(el: Element) -> Node {
        Node::Element(Rc::new(el))
    }

    pub fn text(s: impl Into<Rc<str>>) -> Node {
        Node::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Rc<Element>> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.as_element().map(|el| el.name.as_str())
    }
}

/// Structural equality: positional over children, order-independent over
/// attributes.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Text(a), Node::Text(b)) => a == b,
            (Node::Element(a), Node::Element(b)) => elements_eq(a, b),
            _ => false,
        }
    }
}
impl Eq for Node {}

fn elements_eq(a: &Element, b: &Element) -> bool {
    if a.name != b.name || a.children.len() != b.children.len() {
        return false;
    }
    if a.attrs.len() != b.attrs.len() {
        return false;
    }
    let mut a_attrs = a.attrs.clone();
    let mut b_attrs = b.attrs.clone();
    a_attrs.sort();
    b_attrs.sort();
    if a_attrs != b_attrs {
        return false;
    }
    a.children.iter().zip(b.children.iter()).all(|(x, y)| x == y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_order_is_not_semantic() {
        let a = Node::element(
            Element::new("a:ln").with_attr("w", "100").with_attr("cap", "rnd"),
        );
        let b = Node::element(
            Element::new("a:ln").with_attr("cap", "rnd").with_attr("w", "100"),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn child_order_is_semantic() {
        let a = Node::element(Element::new("p").with_children(vec![
            Node::element(Element::new("r")),
            Node::element(Element::new("br")),
        ]));
        let b = Node::element(Element::new("p").with_children(vec![
            Node::element(Element::new("br")),
            Node::element(Element::new("r")),
        ]));
        assert_ne!(a, b);
    }
}
