//! Cross-reference table resolution: classical `xref` tables, cross-reference
//! streams, and the object streams (`/ObjStm`) that compressed objects live
//! inside (ISO 32000-1 §7.5.4, §7.5.7, §7.5.8).

use crate::pdf::error::{PdfError, Result};
use crate::pdf::filters::decode_stream;
use crate::pdf::object::{Dict, ObjRef, Object};
use crate::pdf::parser::{parse_indirect_object_at, parse_object_at};
use crate::pdf::tokenizer::{Token, Tokenizer};
use std::collections::HashMap;

/// Where object `N` lives and how to fetch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrefEntry {
    /// A free (never-used or deleted) object.
    Free,
    /// Defined directly at a byte offset via `N G obj`.
    InUse { offset: u64, gen: u16 },
    /// Defined inside object stream `stream_obj`, at zero-based `index`.
    Compressed { stream_obj: u32, index: u32 },
}

/// The resolved cross-reference table plus the merged trailer dictionary
/// (later `/Prev` trailers never override keys already set by a newer one).
pub struct XrefTable {
    pub entries: HashMap<u32, XrefEntry>,
    pub trailer: Dict,
}

impl XrefTable {
    /// Build the table by following `startxref`, then every `/Prev` (and, for
    /// hybrid files, `/XRefStm`) link, with cycle protection on offsets.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let start = find_startxref_offset(buf)?;

        let mut entries: HashMap<u32, XrefEntry> = HashMap::new();
        let mut trailer = Dict::new();
        let mut visited = Vec::new();
        let mut next = Some(start);

        while let Some(offset) = next {
            if visited.contains(&offset) {
                return Err(PdfError::CycleDetected(
                    visited.iter().map(|o| format!("{o:#x}")).collect(),
                ));
            }
            visited.push(offset);

            let (section_trailer, prev, xrefstm) = parse_xref_section(buf, offset, &mut entries)?;
            for (k, v) in section_trailer {
                trailer.entry(k).or_insert(v);
            }

            if let Some(hybrid_offset) = xrefstm {
                if !visited.contains(&hybrid_offset) {
                    visited.push(hybrid_offset);
                    let (_, _, _) = parse_xref_section(buf, hybrid_offset, &mut entries)?;
                }
            }

            next = prev;
        }

        Ok(Self { entries, trailer })
    }

    pub fn lookup(&self, num: u32) -> Option<XrefEntry> {
        self.entries.get(&num).copied()
    }
}

fn find_startxref_offset(buf: &[u8]) -> Result<u64> {
    let tail_start = buf.len().saturating_sub(2048);
    let tail = &buf[tail_start..];
    let marker = b"startxref";
    let idx = tail
        .windows(marker.len())
        .rposition(|w| w == marker)
        .ok_or_else(|| PdfError::parse(buf.len(), "missing 'startxref'"))?;
    let mut t = Tokenizer::at(tail, idx + marker.len());
    match t.next_token()? {
        Token::Int(n) if n >= 0 => Ok(n as u64),
        other => Err(PdfError::parse(tail_start + idx, format!("bad startxref value {other:?}"))),
    }
}

/// Parse one xref section (table or stream) at `offset`, inserting entries
/// that are not already present (earlier files win — later `/Prev` sections
/// describe an older state). Returns `(trailer, prev_offset, xrefstm_offset)`.
fn parse_xref_section(
    buf: &[u8],
    offset: usize,
    entries: &mut HashMap<u32, XrefEntry>,
) -> Result<(Dict, Option<usize>, Option<usize>)> {
    if offset >= buf.len() {
        return Err(PdfError::parse(offset, "xref offset past end of file"));
    }
    let mut t = Tokenizer::at(buf, offset);
    let checkpoint = t.pos();
    if let Ok(Token::Keyword(k)) = t.next_token() {
        if k == "xref" {
            return parse_classic_xref(buf, t.pos(), entries);
        }
    }
    t.seek(checkpoint);
    parse_xref_stream(buf, offset, entries)
}

fn parse_classic_xref(
    buf: &[u8],
    mut pos: usize,
    entries: &mut HashMap<u32, XrefEntry>,
) -> Result<(Dict, Option<usize>, Option<usize>)> {
    loop {
        let mut t = Tokenizer::at(buf, pos);
        let checkpoint = t.pos();
        match t.next_token()? {
            Token::Keyword(k) if k == "trailer" => {
                let (trailer_obj, end) = parse_object_at(buf, t.pos())?;
                let trailer = match trailer_obj {
                    Object::Dict(d) => d,
                    _ => return Err(PdfError::parse(t.pos(), "trailer is not a dictionary")),
                };
                let prev = trailer
                    .get("Prev")
                    .and_then(|o| o.as_int())
                    .map(|n| n as usize);
                let xrefstm = trailer
                    .get("XRefStm")
                    .and_then(|o| o.as_int())
                    .map(|n| n as usize);
                let _ = end;
                return Ok((trailer, prev, xrefstm));
            },
            Token::Int(start_obj) => {
                let count = match t.next_token()? {
                    Token::Int(n) => n,
                    other => {
                        return Err(PdfError::parse(t.pos(), format!("expected count, got {other:?}")));
                    },
                };
                pos = t.pos();
                for i in 0..count {
                    let (entry, new_pos) = parse_xref_table_row(buf, pos)?;
                    pos = new_pos;
                    let obj_num = (start_obj + i) as u32;
                    entries.entry(obj_num).or_insert(entry);
                }
            },
            Token::Eof => return Err(PdfError::parse(pos, "xref table missing trailer")),
            other => {
                return Err(PdfError::parse(
                    checkpoint,
                    format!("unexpected token in xref table: {other:?}"),
                ));
            },
        }
    }
}

fn parse_xref_table_row(buf: &[u8], pos: usize) -> Result<(XrefEntry, usize)> {
    // Each row is exactly 20 bytes: "nnnnnnnnnn ggggg n \r\n" (or "f \r\n").
    // We tokenize rather than assume fixed width, to tolerate minor
    // whitespace deviations seen in the wild.
    let mut t = Tokenizer::at(buf, pos);
    let offset = match t.next_token()? {
        Token::Int(n) => n,
        other => return Err(PdfError::parse(pos, format!("bad xref offset {other:?}"))),
    };
    let gen = match t.next_token()? {
        Token::Int(n) => n,
        other => return Err(PdfError::parse(pos, format!("bad xref gen {other:?}"))),
    };
    let kind = match t.next_token()? {
        Token::Keyword(k) => k,
        other => return Err(PdfError::parse(pos, format!("bad xref kind {other:?}"))),
    };
    let entry = match kind.as_str() {
        "n" => XrefEntry::InUse {
            offset: offset as u64,
            gen: gen as u16,
        },
        _ => XrefEntry::Free,
    };
    Ok((entry, t.pos()))
}

/// Cross-reference stream: `N G obj << /Type /XRef /W [w0 w1 w2] ... >>
/// stream ... endstream`.
fn parse_xref_stream(
    buf: &[u8],
    offset: usize,
    entries: &mut HashMap<u32, XrefEntry>,
) -> Result<(Dict, Option<usize>, Option<usize>)> {
    let (_, obj, _) = parse_indirect_object_at(buf, offset)?;
    let (dict, raw) = obj
        .as_stream()
        .ok_or_else(|| PdfError::parse(offset, "xref stream is not a stream object"))?;
    let decoded = decode_stream(dict, raw)?;

    let widths: Vec<usize> = dict
        .get("W")
        .and_then(|o| o.as_array())
        .map(|a| a.iter().filter_map(|o| o.as_int()).map(|n| n as usize).collect())
        .ok_or_else(|| PdfError::parse(offset, "xref stream missing /W"))?;
    if widths.len() != 3 {
        return Err(PdfError::parse(offset, "/W must have 3 entries"));
    }

    let size = dict.get("Size").and_then(|o| o.as_int()).unwrap_or(0) as u32;
    let index_pairs: Vec<(u32, u32)> = match dict.get("Index").and_then(|o| o.as_array()) {
        Some(items) => items
            .chunks(2)
            .filter_map(|pair| {
                let start = pair.first()?.as_int()? as u32;
                let count = pair.get(1)?.as_int()? as u32;
                Some((start, count))
            })
            .collect(),
        None => vec![(0, size)],
    };

    let row_len: usize = widths.iter().sum();
    let mut cursor = 0usize;
    for (start, count) in index_pairs {
        for i in 0..count {
            if cursor + row_len > decoded.len() {
                break;
            }
            let row = &decoded[cursor..cursor + row_len];
            cursor += row_len;
            let obj_num = start + i;
            let entry = decode_xref_stream_row(row, &widths);
            entries.entry(obj_num).or_insert(entry);
        }
    }

    let prev = dict.get("Prev").and_then(|o| o.as_int()).map(|n| n as usize);
    Ok((dict.clone(), prev, None))
}

fn decode_xref_stream_row(row: &[u8], widths: &[usize]) -> XrefEntry {
    let field = |idx: usize| -> u64 {
        let w = widths[idx];
        let start = widths[..idx].iter().sum::<usize>();
        let mut value: u64 = 0;
        for &b in &row[start..start + w] {
            value = (value << 8) | b as u64;
        }
        value
    };
    // default type is 1 when /W's first width is 0 (field absent => in-use)
    let kind = if widths[0] == 0 { 1 } else { field(0) };
    match kind {
        0 => XrefEntry::Free,
        1 => XrefEntry::InUse {
            offset: field(1),
            gen: field(2) as u16,
        },
        2 => XrefEntry::Compressed {
            stream_obj: field(1) as u32,
            index: field(2) as u32,
        },
        _ => XrefEntry::Free,
    }
}

/// Decompress and index all objects stored in an `/ObjStm` stream.
pub fn parse_object_stream(dict: &Dict, raw: &[u8]) -> Result<Vec<(ObjRef, Object)>> {
    let decoded = decode_stream(dict, raw)?;
    let n = dict.get("N").and_then(|o| o.as_int()).unwrap_or(0) as usize;
    let first = dict.get("First").and_then(|o| o.as_int()).unwrap_or(0) as usize;

    let mut header = Tokenizer::new(&decoded);
    let mut offsets = Vec::with_capacity(n);
    for _ in 0..n {
        let num = match header.next_token()? {
            Token::Int(v) => v as u32,
            other => return Err(PdfError::parse(header.pos(), format!("bad objstm header {other:?}"))),
        };
        let rel_offset = match header.next_token()? {
            Token::Int(v) => v as usize,
            other => return Err(PdfError::parse(header.pos(), format!("bad objstm header {other:?}"))),
        };
        offsets.push((num, rel_offset));
    }

    let mut out = Vec::with_capacity(offsets.len());
    for (num, rel_offset) in offsets {
        let pos = first + rel_offset;
        if pos >= decoded.len() {
            continue;
        }
        let (obj, _) = parse_object_at(&decoded, pos)?;
        out.push((ObjRef::new(num, 0), obj));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_classic_xref_table_and_trailer() {
        let pdf = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\nxref\n0 2\n0000000000 65535 f \n0000000009 00000 n \ntrailer\n<< /Size 2 /Root 1 0 R >>\nstartxref\n45\n%%EOF";
        let start = find_startxref_offset(pdf).unwrap();
        assert_eq!(&pdf[start as usize..start as usize + 4], b"xref");
        let table = XrefTable::parse(pdf).unwrap();
        assert_eq!(table.lookup(0), Some(XrefEntry::Free));
        match table.lookup(1) {
            Some(XrefEntry::InUse { offset, gen }) => {
                assert_eq!(offset, 9);
                assert_eq!(gen, 0);
            },
            other => panic!("unexpected entry: {other:?}"),
        }
        assert_eq!(table.trailer.get("Size").unwrap().as_int(), Some(2));
    }
}
