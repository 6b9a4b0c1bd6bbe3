//! Serialize an [`Element`] tree back to XML bytes.
//!
//! Escaping reuses the crate's aho-corasick-backed `common::xml::escape_xml`
//! where a dynamic value is written; static part templates go through
//! `parchment-xml-minifier`'s compile-time literals instead (see
//! `ooxml::*::writer` modules for that usage) — this module is the general
//! streaming-writer fallback for trees built or mutated at runtime.

use super::node::{Element, Node};
use crate::common::xml::escape_xml;
use std::fmt::Write as _;

pub fn write_document(root: &Element) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write_element(root, &mut out);
    out
}

pub fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (k, v) in &el.attrs {
        out.push(' ');
        out.push_str(k);
        out.push_str("=\"");
        out.push_str(&escape_xml(v));
        out.push('"');
    }
    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &el.children {
        write_node(child, out);
    }
    let _ = write!(out, "</{}>", el.name);
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(el) => write_element(el, out),
        Node::Text(t) => out.push_str(&escape_xml(t)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse::parse_document;

    #[test]
    fn round_trips_through_parse() {
        let xml = br#"<a:sp id="2"><a:t>a &amp; b</a:t></a:sp>"#;
        let root = parse_document(xml).unwrap();
        let mut serialized = String::new();
        write_element(&root, &mut serialized);
        let reparsed = parse_document(serialized.as_bytes()).unwrap();
        assert_eq!(Node::Element(root), Node::Element(reparsed));
    }
}
