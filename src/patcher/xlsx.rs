//! SpreadsheetML worksheet row/cell patcher.
//!
//! Rows are matched by their `r` (1-based row number) attribute, cells
//! within a row by their `r` (A1-style) attribute. Untouched rows keep their
//! `spans`/`ht`/style attributes exactly as parsed.

use super::error::{PatchError, Result};
use crate::xml::{Element, Node};

#[derive(Debug, Clone)]
pub enum SheetOp {
    AddRow { row: Element, after_r: Option<String> },
    ReplaceRow { r: String, new_row: Element },
    RemoveRow { r: String },
    AddCell { row_r: String, cell: Element, after_ref: Option<String> },
    ReplaceCell { row_r: String, cell_ref: String, new_cell: Element },
}

/// Apply `ops` to a `sheetData` element's `row` children.
pub fn patch_sheet_data(sheet_data: &Element, ops: &[SheetOp]) -> Result<Element> {
    let mut current = sheet_data.clone();
    for (index, op) in ops.iter().enumerate() {
        current = apply_sheet_op(&current, op)
            .map_err(|source| PatchError::OperationFailed { index, source })?;
    }
    Ok(current)
}

fn apply_sheet_op(sheet_data: &Element, op: &SheetOp) -> std::result::Result<Element, String> {
    match op {
        SheetOp::AddRow { row, after_r } => {
            let mut children = sheet_data.children.clone();
            let at = match after_r {
                Some(r) => row_index(sheet_data, r).map(|i| i + 1).unwrap_or(children.len()),
                None => children.len(),
            };
            children.insert(at.min(children.len()), Node::element(row.clone()));
            Ok(rebuilt(sheet_data, children))
        },
        SheetOp::ReplaceRow { r, new_row } => {
            let idx = row_index(sheet_data, r).ok_or_else(|| format!("no row r={r}"))?;
            let mut children = sheet_data.children.clone();
            children[idx] = Node::element(new_row.clone());
            Ok(rebuilt(sheet_data, children))
        },
        SheetOp::RemoveRow { r } => {
            let idx = row_index(sheet_data, r).ok_or_else(|| format!("no row r={r}"))?;
            let mut children = sheet_data.children.clone();
            children.remove(idx);
            Ok(rebuilt(sheet_data, children))
        },
        SheetOp::AddCell { row_r, cell, after_ref } => {
            let idx = row_index(sheet_data, row_r).ok_or_else(|| format!("no row r={row_r}"))?;
            let row = sheet_data.children[idx].as_element().unwrap();
            let mut cells = row.children.clone();
            let at = match after_ref {
                Some(cref) => cell_index(row, cref).map(|i| i + 1).unwrap_or(cells.len()),
                None => cells.len(),
            };
            cells.insert(at.min(cells.len()), Node::element(cell.clone()));
            let new_row = Element { name: row.name.clone(), attrs: row.attrs.clone(), children: cells };
            let mut children = sheet_data.children.clone();
            children[idx] = Node::element(new_row);
            Ok(rebuilt(sheet_data, children))
        },
        SheetOp::ReplaceCell { row_r, cell_ref, new_cell } => {
            let idx = row_index(sheet_data, row_r).ok_or_else(|| format!("no row r={row_r}"))?;
            let row = sheet_data.children[idx].as_element().unwrap();
            let cidx = cell_index(row, cell_ref).ok_or_else(|| format!("no cell r={cell_ref} in row {row_r}"))?;
            let mut cells = row.children.clone();
            cells[cidx] = Node::element(new_cell.clone());
            let new_row = Element { name: row.name.clone(), attrs: row.attrs.clone(), children: cells };
            let mut children = sheet_data.children.clone();
            children[idx] = Node::element(new_row);
            Ok(rebuilt(sheet_data, children))
        },
    }
}

fn rebuilt(sheet_data: &Element, children: Vec<Node>) -> Element {
    Element { name: sheet_data.name.clone(), attrs: sheet_data.attrs.clone(), children }
}

fn row_index(sheet_data: &Element, r: &str) -> Option<usize> {
    sheet_data.children.iter().position(|c| matches!(c.as_element(), Some(el) if el.attr("r") == Some(r)))
}

fn cell_index(row: &Element, cell_ref: &str) -> Option<usize> {
    row.children.iter().position(|c| matches!(c.as_element(), Some(el) if el.attr("r") == Some(cell_ref)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Element as E;

    fn row(r: &str, cells: Vec<Node>) -> Element {
        E::new("row").with_attr("r", r).with_children(cells)
    }
    fn cell(r: &str) -> Node {
        Node::element(E::new("c").with_attr("r", r))
    }

    #[test]
    fn replace_row_preserves_untouched_siblings() {
        let sheet = E::new("sheetData").with_children(vec![
            Node::element(row("1", vec![cell("A1")])),
            Node::element(row("2", vec![cell("A2")]).with_attr("ht", "20")),
        ]);
        let patched = patch_sheet_data(&sheet, &[SheetOp::ReplaceRow { r: "1".into(), new_row: row("1", vec![cell("A1"), cell("B1")]) }]).unwrap();
        let row2 = patched.children[1].as_element().unwrap();
        assert_eq!(row2.attr("ht"), Some("20"));
        let row1 = patched.children[0].as_element().unwrap();
        assert_eq!(row1.children.len(), 2);
    }

    #[test]
    fn add_cell_after_ref() {
        let sheet = E::new("sheetData").with_children(vec![Node::element(row("1", vec![cell("A1")]))]);
        let patched = patch_sheet_data(&sheet, &[SheetOp::AddCell { row_r: "1".into(), cell: E::new("c").with_attr("r", "B1"), after_ref: Some("A1".into()) }]).unwrap();
        let row1 = patched.children[0].as_element().unwrap();
        assert_eq!(row1.children.len(), 2);
        assert_eq!(row1.children[1].as_element().unwrap().attr("r"), Some("B1"));
    }
}
