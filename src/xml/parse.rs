//! Parse raw XML bytes into an owned [`Element`] tree.
//!
//! Uses `quick-xml`'s event reader the same way the rest of the crate's
//! parsers walk `Event::Start|Empty|Text|End` (see e.g.
//! `ooxml::docx::paragraph`, `ooxml::pptx::transitions`), but builds a real
//! structural tree instead of storing lazy byte spans — the patcher's
//! diff/rebuild contract needs actual nodes to mutate, not ranges to
//! re-slice.

use super::node::{Element, Node};
use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::rc::Rc;

/// Parse a complete XML document, returning its root element.
pub fn parse_document(xml: &[u8]) -> Result<Rc<Element>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let el = start_element(&e)?;
                stack.push(el);
            },
            Ok(Event::Empty(e)) => {
                let el = start_element(&e)?;
                push_finished_child(&mut stack, &mut root, Node::Element(Rc::new(el)));
            },
            Ok(Event::End(_)) => {
                let el = stack.pop().ok_or_else(|| Error::ParseError {
                    path: String::new(),
                    byte_offset: Some(reader.buffer_position()),
                    message: "unbalanced closing tag".into(),
                })?;
                push_finished_child(&mut stack, &mut root, Node::Element(Rc::new(el)));
            },
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| Error::ParseError {
                    path: String::new(),
                    byte_offset: Some(reader.buffer_position()),
                    message: e.to_string(),
                })?;
                if !text.is_empty() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::text(text.into_owned()));
                    }
                }
            },
            Ok(Event::CData(t)) => {
                let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::text(text));
                }
            },
            Ok(Event::Eof) => break,
            Ok(_) => {},
            Err(e) => {
                return Err(Error::ParseError {
                    path: String::new(),
                    byte_offset: Some(reader.buffer_position()),
                    message: e.to_string(),
                });
            },
        }
        buf.clear();
    }

    root.map(Rc::new).ok_or_else(|| Error::ParseError {
        path: String::new(),
        byte_offset: None,
        message: "empty document, no root element".into(),
    })
}

fn start_element(e: &quick_xml::events::BytesStart) -> Result<Element> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for a in e.attributes() {
        let a = a.map_err(|err| Error::ParseError {
            path: String::new(),
            byte_offset: None,
            message: err.to_string(),
        })?;
        let key = String::from_utf8_lossy(a.key.as_ref()).into_owned();
        let value = a
            .unescape_value()
            .map_err(|err| Error::ParseError {
                path: String::new(),
                byte_offset: None,
                message: err.to_string(),
            })?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(Element {
        name,
        attrs,
        children: Vec::new(),
    })
}

fn push_finished_child(stack: &mut Vec<Element>, root: &mut Option<Element>, node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if let Node::Element(el) = node {
        *root = Some((*el).clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_with_attrs_and_text() {
        let xml = br#"<a:sp id="2" name="Rect"><a:spPr><a:xfrm><a:off x="0" y="0"/></a:xfrm></a:spPr><a:t>hi &amp; bye</a:t></a:sp>"#;
        let root = parse_document(xml).unwrap();
        assert_eq!(root.name, "a:sp");
        assert_eq!(root.attr("id"), Some("2"));
        let sp_pr = root.child("a:spPr").unwrap();
        let xfrm = sp_pr.child("a:xfrm").unwrap();
        assert!(xfrm.child("a:off").is_some());
        let t = root.child("a:t").unwrap();
        assert_eq!(t.text_content(), "hi & bye");
    }

    #[test]
    fn empty_elements_round_trip_as_childless() {
        let xml = br#"<a:ln w="100"/>"#;
        let root = parse_document(xml).unwrap();
        assert_eq!(root.name, "a:ln");
        assert!(root.children.is_empty());
        assert_eq!(root.attr("w"), Some("100"));
    }
}
