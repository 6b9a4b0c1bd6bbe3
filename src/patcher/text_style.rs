//! Text-style-level patcher: `p:titleStyle`/`p:bodyStyle`/`p:otherStyle`
//! (and the `a:lvl1pPr`..`a:lvl9pPr` children they carry). Replacements are
//! per-child-group — spacing, bullet, tab list, default run properties —
//! each removing only its own group before inserting the replacement, with
//! `a:extLst` always preserved at the tail.

use super::group::{remove_child_group, replace_child_group};
use crate::xml::{Element, Node};

pub const LVL_PPR_ORDER: &[&str] = &[
    "a:lnSpc",
    "a:spcBef",
    "a:spcAft",
    "a:buClrTx",
    "a:buClr",
    "a:buSzTx",
    "a:buSzPct",
    "a:buSzPts",
    "a:buFontTx",
    "a:buFont",
    "a:buNone",
    "a:buAutoNum",
    "a:buChar",
    "a:buBlip",
    "a:tabLst",
    "a:defRPr",
    "a:extLst",
];

const SPACING_NAMES: &[&str] = &["a:lnSpc", "a:spcBef", "a:spcAft"];
const BULLET_NAMES: &[&str] = &[
    "a:buClrTx", "a:buClr", "a:buSzTx", "a:buSzPct", "a:buSzPts", "a:buFontTx", "a:buFont", "a:buNone",
    "a:buAutoNum", "a:buChar", "a:buBlip",
];

pub fn patch_spacing(lvl_ppr: &Element, spacing: Option<Vec<Element>>) -> Element {
    match spacing {
        Some(els) => replace_child_group(lvl_ppr, SPACING_NAMES, els.into_iter().map(Node::element).collect(), LVL_PPR_ORDER),
        None => remove_child_group(lvl_ppr, SPACING_NAMES),
    }
}

pub fn patch_bullet(lvl_ppr: &Element, bullet: Option<Element>) -> Element {
    match bullet {
        Some(el) => replace_child_group(lvl_ppr, BULLET_NAMES, vec![Node::element(el)], LVL_PPR_ORDER),
        None => remove_child_group(lvl_ppr, BULLET_NAMES),
    }
}

pub fn patch_tab_list(lvl_ppr: &Element, tab_lst: Option<Element>) -> Element {
    match tab_lst {
        Some(el) => replace_child_group(lvl_ppr, &["a:tabLst"], vec![Node::element(el)], LVL_PPR_ORDER),
        None => remove_child_group(lvl_ppr, &["a:tabLst"]),
    }
}

pub fn patch_default_run_props(lvl_ppr: &Element, def_rpr: Option<Element>) -> Element {
    match def_rpr {
        Some(el) => replace_child_group(lvl_ppr, &["a:defRPr"], vec![Node::element(el)], LVL_PPR_ORDER),
        None => remove_child_group(lvl_ppr, &["a:defRPr"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Element as E;

    #[test]
    fn bullet_replacement_preserves_spacing_and_ext_lst() {
        let lvl = E::new("a:lvl1pPr").with_children(vec![
            Node::element(E::new("a:spcBef")),
            Node::element(E::new("a:buChar").with_attr("char", "-")),
            Node::element(E::new("a:extLst")),
        ]);
        let patched = patch_bullet(&lvl, Some(E::new("a:buNone")));
        let names: Vec<_> = patched.children.iter().filter_map(|c| c.name()).collect();
        assert_eq!(names, vec!["a:spcBef", "a:buNone", "a:extLst"]);
    }

    #[test]
    fn clearing_tab_list_removes_only_that_group() {
        let lvl = E::new("a:lvl1pPr").with_children(vec![
            Node::element(E::new("a:defRPr")),
            Node::element(E::new("a:tabLst")),
        ]);
        let patched = patch_tab_list(&lvl, None);
        assert!(patched.child("a:tabLst").is_none());
        assert!(patched.child("a:defRPr").is_some());
    }
}
