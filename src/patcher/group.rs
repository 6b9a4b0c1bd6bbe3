//! Generic property-group replacement.
//!
//! Every "shape property change" sub-patch and the text-style-level patcher
//! share this single helper: remove the existing children whose name is a
//! member of the group being replaced, then re-insert the new children at
//! the position implied by the canonical ECMA-376 child ordering, always
//! keeping `a:extLst` last. This is what "honours the canonical ordering"
//! means operationally — it is implemented once here and reused by every
//! shape-property call site rather than re-derived per property.

use crate::xml::{Element, Node};

/// Replace every direct child of `parent` whose name is in `group_members`
/// with `new_children`, inserted at the canonical position.
///
/// `canonical_order` lists every known slot name across *all* property
/// groups that can appear as a sibling, in ECMA-376 order; names absent from
/// it are treated as unranked and left wherever they already sit (vendor
/// extensions other than `extLst` fall in this bucket and are preserved).
pub fn replace_child_group(
    parent: &Element,
    group_members: &[&str],
    new_children: Vec<Node>,
    canonical_order: &[&str],
) -> Element {
    let rank = |name: &str| -> usize {
        canonical_order
            .iter()
            .position(|n| *n == name)
            .unwrap_or(canonical_order.len())
    };
    let group_rank = group_members.iter().map(|n| rank(n)).min().unwrap_or(canonical_order.len());

    let mut remaining: Vec<Node> = parent
        .children
        .iter()
        .filter(|c| !matches!(c.name(), Some(n) if group_members.contains(&n)))
        .cloned()
        .collect();

    let mut insert_at = remaining.len();
    for (i, c) in remaining.iter().enumerate() {
        match c.name() {
            Some("a:extLst") => {
                insert_at = i;
                break;
            },
            Some(n) if rank(n) >= group_rank => {
                insert_at = i;
                break;
            },
            _ => {},
        }
    }

    for (offset, nc) in new_children.into_iter().enumerate() {
        remaining.insert(insert_at + offset, nc);
    }

    Element {
        name: parent.name.clone(),
        attrs: parent.attrs.clone(),
        children: remaining,
    }
}

/// Remove every direct child of `parent` whose name is in `group_members`,
/// inserting nothing back (used when a property is cleared without a
/// mandatory default replacement).
pub fn remove_child_group(parent: &Element, group_members: &[&str]) -> Element {
    replace_child_group(parent, group_members, Vec::new(), &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Element as E;

    const ORDER: &[&str] = &["a:xfrm", "a:prstGeom", "a:custGeom", "a:solidFill", "a:ln", "a:effectLst", "a:extLst"];

    #[test]
    fn inserts_fill_between_geometry_and_line() {
        let sp_pr = E::new("p:spPr").with_children(vec![
            Node::element(E::new("a:xfrm")),
            Node::element(E::new("a:prstGeom")),
            Node::element(E::new("a:ln")),
        ]);
        let patched = replace_child_group(&sp_pr, &["a:solidFill", "a:noFill", "a:gradFill"], vec![Node::element(E::new("a:solidFill"))], ORDER);
        let names: Vec<_> = patched.children.iter().filter_map(|c| c.name()).collect();
        assert_eq!(names, vec!["a:xfrm", "a:prstGeom", "a:solidFill", "a:ln"]);
    }

    #[test]
    fn ext_lst_always_stays_last() {
        let sp_pr = E::new("p:spPr").with_children(vec![
            Node::element(E::new("a:xfrm")),
            Node::element(E::new("a:extLst")),
        ]);
        let patched = replace_child_group(&sp_pr, &["a:ln"], vec![Node::element(E::new("a:ln"))], ORDER);
        let names: Vec<_> = patched.children.iter().filter_map(|c| c.name()).collect();
        assert_eq!(names, vec!["a:xfrm", "a:ln", "a:extLst"]);
    }
}
