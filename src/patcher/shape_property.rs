//! Shape property-change sub-patches: transform, fill, line, effects,
//! geometry, text body, blip fill — each a thin wrapper over
//! [`replace_child_group`] naming the right slot and canonical order.

use super::group::{remove_child_group, replace_child_group};
use crate::xml::{Element, Node};

/// Canonical child order inside `a:spPr` / `p:spPr`: xfrm → geom → fill →
/// ln → effectLst, per ECMA-376's `CT_ShapeProperties` sequence.
pub const SP_PR_ORDER: &[&str] = &[
    "a:xfrm",
    "a:custGeom",
    "a:prstGeom",
    "a:noFill",
    "a:solidFill",
    "a:gradFill",
    "a:blipFill",
    "a:pattFill",
    "a:grpFill",
    "a:ln",
    "a:effectLst",
    "a:effectDag",
    "a:scene3d",
    "a:sp3d",
    "a:extLst",
];

const GEOMETRY_NAMES: &[&str] = &["a:custGeom", "a:prstGeom"];
const FILL_NAMES: &[&str] = &["a:noFill", "a:solidFill", "a:gradFill", "a:blipFill", "a:pattFill", "a:grpFill"];
const EFFECTS_NAMES: &[&str] = &["a:effectLst", "a:effectDag"];

/// Canonical order inside a shape element (`p:sp`): non-visual props, then
/// `spPr`, then `style`, then `txBody`.
pub const SP_ORDER: &[&str] = &["p:nvSpPr", "p:spPr", "p:style", "p:txBody", "a:extLst"];

pub fn patch_transform(sp_pr: &Element, xfrm: Option<Element>) -> Element {
    match xfrm {
        Some(x) => replace_child_group(sp_pr, &["a:xfrm"], vec![Node::element(x)], SP_PR_ORDER),
        None => remove_child_group(sp_pr, &["a:xfrm"]),
    }
}

/// Clearing geometry reinserts a default `prstGeom prst="rect"` — ECMA-376
/// requires `spPr` to carry exactly one geometry child when fully resolved.
pub fn patch_geometry(sp_pr: &Element, geom: Option<Element>) -> Element {
    let replacement = geom.unwrap_or_else(default_rect_geometry);
    replace_child_group(sp_pr, GEOMETRY_NAMES, vec![Node::element(replacement)], SP_PR_ORDER)
}

fn default_rect_geometry() -> Element {
    Element::new("a:prstGeom")
        .with_attr("prst", "rect")
        .with_children(vec![Node::element(Element::new("a:avLst"))])
}

pub fn patch_fill(sp_pr: &Element, fill: Option<Element>) -> Element {
    match fill {
        Some(f) => replace_child_group(sp_pr, FILL_NAMES, vec![Node::element(f)], SP_PR_ORDER),
        None => replace_child_group(sp_pr, FILL_NAMES, vec![Node::element(Element::new("a:noFill"))], SP_PR_ORDER),
    }
}

pub fn patch_line(sp_pr: &Element, line: Option<Element>) -> Element {
    match line {
        Some(l) => replace_child_group(sp_pr, &["a:ln"], vec![Node::element(l)], SP_PR_ORDER),
        None => remove_child_group(sp_pr, &["a:ln"]),
    }
}

pub fn patch_effects(sp_pr: &Element, effects: Option<Element>) -> Element {
    match effects {
        Some(e) => replace_child_group(sp_pr, EFFECTS_NAMES, vec![Node::element(e)], SP_PR_ORDER),
        None => remove_child_group(sp_pr, EFFECTS_NAMES),
    }
}

/// `txBody` lives on the shape element, not on `spPr`.
pub fn patch_text_body(sp: &Element, tx_body: Option<Element>) -> Element {
    match tx_body {
        Some(tb) => replace_child_group(sp, &["p:txBody"], vec![Node::element(tb)], SP_ORDER),
        None => remove_child_group(sp, &["p:txBody"]),
    }
}

/// Replace the `r:embed`/`r:link` attribute on the `a:blip` inside a
/// `a:blipFill`, leaving tile/stretch/srcRect/effects siblings untouched.
pub fn patch_blip(blip_fill: &Element, new_r_id: &str) -> Element {
    let mut children = blip_fill.children.clone();
    let mut found = false;
    for child in children.iter_mut() {
        if let Node::Element(el) = child {
            if el.name == "a:blip" {
                let mut attrs = el.attrs.clone();
                if let Some(pair) = attrs.iter_mut().find(|(k, _)| k == "r:embed") {
                    pair.1 = new_r_id.to_string();
                } else {
                    attrs.push(("r:embed".to_string(), new_r_id.to_string()));
                }
                *child = Node::element(Element { name: el.name.clone(), attrs, children: el.children.clone() });
                found = true;
                break;
            }
        }
    }
    if !found {
        children.insert(0, Node::element(Element::new("a:blip").with_attr("r:embed", new_r_id)));
    }
    Element { name: blip_fill.name.clone(), attrs: blip_fill.attrs.clone(), children }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Element as E;

    #[test]
    fn clearing_geometry_reinserts_default_rect() {
        let sp_pr = E::new("p:spPr").with_children(vec![Node::element(E::new("a:custGeom"))]);
        let patched = patch_geometry(&sp_pr, None);
        let geom = patched.child("a:prstGeom").unwrap();
        assert_eq!(geom.attr("prst"), Some("rect"));
    }

    #[test]
    fn fill_line_effects_maintain_canonical_order() {
        let sp_pr = E::new("p:spPr").with_children(vec![Node::element(E::new("a:prstGeom"))]);
        let with_fill = patch_fill(&sp_pr, Some(E::new("a:solidFill")));
        let with_line = patch_line(&with_fill, Some(E::new("a:ln")));
        let with_effects = patch_effects(&with_line, Some(E::new("a:effectLst")));
        let names: Vec<_> = with_effects.children.iter().filter_map(|c| c.name()).collect();
        assert_eq!(names, vec!["a:prstGeom", "a:solidFill", "a:ln", "a:effectLst"]);
    }

    #[test]
    fn patch_blip_updates_existing_embed_id() {
        let blip_fill = E::new("a:blipFill").with_children(vec![
            Node::element(E::new("a:blip").with_attr("r:embed", "rId1")),
            Node::element(E::new("a:stretch")),
        ]);
        let patched = patch_blip(&blip_fill, "rId9");
        assert_eq!(patched.child("a:blip").unwrap().attr("r:embed"), Some("rId9"));
        assert!(patched.child("a:stretch").is_some());
    }
}
