//! Top-level PDF document: xref resolution, indirect-object fetch, and page
//! tree traversal.

use crate::pdf::error::{PdfError, Result};
use crate::pdf::object::{Dict, ObjRef, Object};
use crate::pdf::parser::parse_indirect_object_at;
use crate::pdf::xref::{parse_object_stream, XrefEntry, XrefTable};
use std::cell::RefCell;
use std::collections::HashMap;

/// A parsed PDF file: owns the raw bytes, the resolved cross-reference
/// table, and a cache of already-materialized objects.
pub struct PdfDocument {
    buf: Vec<u8>,
    xref: XrefTable,
    cache: RefCell<HashMap<u32, Object>>,
}

impl PdfDocument {
    /// Parse the xref table and trailer; does not eagerly load any object.
    pub fn parse(buf: Vec<u8>) -> Result<Self> {
        let xref = XrefTable::parse(&buf)?;
        Ok(Self {
            buf,
            xref,
            cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn trailer(&self) -> &Dict {
        &self.xref.trailer
    }

    /// Fetch and fully resolve object `num` (does not follow references
    /// inside the returned value — callers call [`Self::resolve`] on fields
    /// that may themselves be references).
    pub fn get(&self, num: u32) -> Result<Object> {
        if let Some(cached) = self.cache.borrow().get(&num) {
            return Ok(cached.clone());
        }
        let obj = self.load(num)?;
        self.cache.borrow_mut().insert(num, obj.clone());
        Ok(obj)
    }

    fn load(&self, num: u32) -> Result<Object> {
        match self.xref.lookup(num) {
            Some(XrefEntry::InUse { offset, .. }) => {
                let (_, obj, _) = parse_indirect_object_at(&self.buf, offset as usize)?;
                Ok(obj)
            },
            Some(XrefEntry::Compressed { stream_obj, index }) => {
                let stream = self.get(stream_obj)?;
                let (dict, raw) = stream
                    .as_stream()
                    .ok_or_else(|| PdfError::parse(0, "ObjStm entry is not a stream"))?;
                let objects = parse_object_stream(dict, raw)?;
                objects
                    .into_iter()
                    .nth(index as usize)
                    .map(|(_, obj)| obj)
                    .ok_or_else(|| PdfError::parse(0, format!("object {num} missing from ObjStm {stream_obj}")))
            },
            Some(XrefEntry::Free) | None => Ok(Object::Null),
        }
    }

    /// Resolve a reference to its value, or pass through a non-reference
    /// value unchanged. Callers use this on every field that might be
    /// indirect per ISO 32000-1.
    pub fn resolve(&self, obj: &Object) -> Result<Object> {
        match obj {
            Object::Reference(r) => self.get(r.num),
            other => Ok(other.clone()),
        }
    }

    pub fn resolve_ref(&self, r: ObjRef) -> Result<Object> {
        self.get(r.num)
    }

    /// Resolve `dict[key]`, following one level of indirection.
    pub fn dict_get(&self, dict: &Dict, key: &str) -> Result<Option<Object>> {
        match dict.get(key) {
            Some(obj) => Ok(Some(self.resolve(obj)?)),
            None => Ok(None),
        }
    }

    pub fn root(&self) -> Result<Dict> {
        let root = self
            .trailer()
            .get("Root")
            .cloned()
            .ok_or_else(|| PdfError::parse(0, "trailer missing /Root"))?;
        let resolved = self.resolve(&root)?;
        resolved
            .as_dict()
            .cloned()
            .ok_or_else(|| PdfError::parse(0, "/Root is not a dictionary"))
    }

    /// Flatten the `/Pages` tree into leaf page dictionaries, in document
    /// order, with inheritable attributes (`Resources`, `MediaBox`,
    /// `CropBox`, `Rotate`) merged down from ancestor `/Pages` nodes.
    pub fn pages(&self) -> Result<Vec<Dict>> {
        let root = self.root()?;
        let pages_ref = root
            .get("Pages")
            .cloned()
            .ok_or_else(|| PdfError::parse(0, "/Root missing /Pages"))?;
        let pages_dict = self
            .resolve(&pages_ref)?
            .as_dict()
            .cloned()
            .ok_or_else(|| PdfError::parse(0, "/Pages is not a dictionary"))?;

        let mut out = Vec::new();
        let mut visited = Vec::new();
        self.walk_page_tree(&pages_dict, &Dict::new(), &mut out, &mut visited)?;
        Ok(out)
    }

    fn walk_page_tree(
        &self,
        node: &Dict,
        inherited: &Dict,
        out: &mut Vec<Dict>,
        visited: &mut Vec<(u32, u16)>,
    ) -> Result<()> {
        let mut merged = inherited.clone();
        for key in ["Resources", "MediaBox", "CropBox", "Rotate"] {
            if let Some(v) = node.get(key) {
                merged.insert(key.to_string(), v.clone());
            }
        }

        let node_type = node.get("Type").and_then(|o| o.as_name());
        if node_type == Some("Page") {
            let mut page = merged;
            for (k, v) in node {
                page.insert(k.clone(), v.clone());
            }
            out.push(page);
            return Ok(());
        }

        let kids = match node.get("Kids") {
            Some(obj) => self.resolve(obj)?,
            None => return Ok(()),
        };
        let Some(kids) = kids.as_array() else {
            return Ok(());
        };
        for kid in kids {
            let kid_ref = kid.as_reference();
            if let Some(r) = kid_ref {
                let key = (r.num, r.gen);
                if visited.contains(&key) {
                    return Err(PdfError::CycleDetected(vec![format!("{r}")]));
                }
                visited.push(key);
            }
            let kid_dict = self
                .resolve(kid)?
                .as_dict()
                .cloned()
                .unwrap_or_default();
            self.walk_page_tree(&kid_dict, &merged, out, visited)?;
        }
        Ok(())
    }

    /// Decode a page's `/Contents` (a stream, or an array of streams
    /// concatenated with a separating newline per ISO 32000-1 §7.8.2) into
    /// raw operator bytes.
    pub fn page_content_bytes(&self, page: &Dict) -> Result<Vec<u8>> {
        let Some(contents) = page.get("Contents") else {
            return Ok(Vec::new());
        };
        let resolved = self.resolve(contents)?;
        match resolved {
            Object::Stream(dict, raw) => crate::pdf::filters::decode_stream(&dict, &raw),
            Object::Array(items) => {
                let mut out = Vec::new();
                for item in items {
                    let obj = self.resolve(&item)?;
                    if let Some((dict, raw)) = obj.as_stream() {
                        let decoded = crate::pdf::filters::decode_stream(dict, raw)?;
                        out.extend_from_slice(&decoded);
                        out.push(b'\n');
                    }
                }
                Ok(out)
            },
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pdf() -> Vec<u8> {
        let body = concat!(
            "%PDF-1.4\n",
            "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n",
            "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 /MediaBox [0 0 612 792] >>\nendobj\n",
            "3 0 obj\n<< /Type /Page /Parent 2 0 R /Contents 4 0 R /Resources << >> >>\nendobj\n",
            "4 0 obj\n<< /Length 12 >>\nstream\nq 1 0 0 1 Q\nendstream\nendobj\n",
        );
        let mut buf = body.as_bytes().to_vec();
        let mut offsets = Vec::new();
        for marker in ["1 0 obj", "2 0 obj", "3 0 obj", "4 0 obj"] {
            let pos = body.find(marker).unwrap();
            offsets.push(pos);
        }
        let xref_offset = buf.len();
        let mut xref = String::new();
        xref.push_str("xref\n0 5\n0000000000 65535 f \n");
        for off in &offsets {
            xref.push_str(&format!("{:010} 00000 n \n", off));
        }
        xref.push_str("trailer\n<< /Size 5 /Root 1 0 R >>\n");
        xref.push_str(&format!("startxref\n{}\n%%EOF", xref_offset));
        buf.extend_from_slice(xref.as_bytes());
        buf
    }

    #[test]
    fn resolves_page_tree_with_inherited_attributes() {
        let doc = PdfDocument::parse(sample_pdf()).unwrap();
        let pages = doc.pages().unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains_key("MediaBox"));
        assert_eq!(pages[0].get("Type").unwrap().as_name(), Some("Page"));
    }

    #[test]
    fn decodes_page_content_stream() {
        let doc = PdfDocument::parse(sample_pdf()).unwrap();
        let pages = doc.pages().unwrap();
        let content = doc.page_content_bytes(&pages[0]).unwrap();
        assert_eq!(content, b"q 1 0 0 1 Q\n");
    }
}
