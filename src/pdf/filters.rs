//! Stream filter decoding (ISO 32000-1 §7.4).
//!
//! `FlateDecode` and `LZWDecode` delegate to the crate's `flate2`/`weezl`
//! dependencies; the remaining filters are small table-driven byte
//! transforms with no corpus precedent worth reusing.

use crate::pdf::error::{PdfError, Result};
use crate::pdf::object::{Dict, Object};
use std::io::Read;

/// Decode a stream's raw bytes according to its `/Filter` (+ `/DecodeParms`)
/// entries, applying filters left to right as PDF requires for filter
/// arrays. `CCITTFaxDecode` is recorded as unsupported (metadata-only per
/// the interpreter's scope) rather than silently passed through.
pub fn decode_stream(dict: &Dict, raw: &[u8]) -> Result<Vec<u8>> {
    let filters = filter_names(dict);
    let parms = decode_parms(dict, filters.len());

    let mut data = raw.to_vec();
    for (name, parm) in filters.iter().zip(parms.iter()) {
        data = apply_filter(name, &data, parm.as_ref())?;
    }
    Ok(data)
}

fn filter_names(dict: &Dict) -> Vec<String> {
    match dict.get("Filter") {
        Some(Object::Name(n)) => vec![n.clone()],
        Some(Object::Array(items)) => items.iter().filter_map(|o| o.as_name().map(str::to_string)).collect(),
        _ => Vec::new(),
    }
}

fn decode_parms(dict: &Dict, count: usize) -> Vec<Option<Dict>> {
    let raw = match dict.get("DecodeParms").or_else(|| dict.get("DP")) {
        Some(Object::Dict(d)) => vec![Some(d.clone())],
        Some(Object::Array(items)) => items
            .iter()
            .map(|o| o.as_dict().cloned())
            .collect::<Vec<_>>(),
        _ => Vec::new(),
    };
    let mut out = raw;
    out.resize(count, None);
    out
}

fn apply_filter(name: &str, data: &[u8], parm: Option<&Dict>) -> Result<Vec<u8>> {
    match name {
        "FlateDecode" | "Fl" => flate_decode(data, parm),
        "ASCIIHexDecode" | "AHx" => Ok(ascii_hex_decode(data)),
        "ASCII85Decode" | "A85" => Ok(ascii85_decode(data)),
        "RunLengthDecode" | "RL" => Ok(run_length_decode(data)),
        "LZWDecode" | "LZW" => lzw_decode(data, parm),
        "CCITTFaxDecode" | "CCF" => {
            // Metadata-level support only: dimensions/params are read by
            // callers directly off the image dict; pixel decoding is
            // explicitly out of scope.
            Err(PdfError::Unsupported("CCITTFaxDecode".to_string()))
        },
        "DCTDecode" | "JPXDecode" | "JBIG2Decode" => {
            // Already-compressed image formats are passed through verbatim;
            // a consumer that understands JPEG/JPEG2000/JBIG2 decodes them,
            // the interpreter itself does not need to.
            Ok(data.to_vec())
        },
        "Crypt" => Ok(data.to_vec()),
        other => Err(PdfError::Unsupported(format!("filter '{other}'"))),
    }
}

fn flate_decode(data: &[u8], parm: Option<&Dict>) -> Result<Vec<u8>> {
    use flate2::read::ZlibDecoder;
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| PdfError::parse(0, format!("FlateDecode: {e}")))?;
    apply_predictor(out, parm)
}

fn lzw_decode(data: &[u8], parm: Option<&Dict>) -> Result<Vec<u8>> {
    let early_change = parm
        .and_then(|p| p.get("EarlyChange"))
        .and_then(|o| o.as_int())
        .unwrap_or(1);
    let mut decoder = weezl::decode::Decoder::new(
        weezl::BitOrder::Msb,
        8,
    );
    if early_change == 0 {
        decoder = weezl::decode::Decoder::with_tiff_size_switch(weezl::BitOrder::Msb, 8);
    }
    let out = decoder
        .decode(data)
        .map_err(|e| PdfError::parse(0, format!("LZWDecode: {e}")))?;
    apply_predictor(out, parm)
}

/// TIFF/PNG predictor undoing, applied after Flate/LZW when `/Predictor` > 1.
fn apply_predictor(data: Vec<u8>, parm: Option<&Dict>) -> Result<Vec<u8>> {
    let Some(parm) = parm else { return Ok(data) };
    let predictor = parm.get("Predictor").and_then(|o| o.as_int()).unwrap_or(1);
    if predictor <= 1 {
        return Ok(data);
    }
    let colors = parm.get("Colors").and_then(|o| o.as_int()).unwrap_or(1).max(1) as usize;
    let bpc = parm
        .get("BitsPerComponent")
        .and_then(|o| o.as_int())
        .unwrap_or(8)
        .max(1) as usize;
    let columns = parm.get("Columns").and_then(|o| o.as_int()).unwrap_or(1).max(1) as usize;
    let bytes_per_pixel = (colors * bpc).div_ceil(8).max(1);
    let row_bytes = (colors * bpc * columns).div_ceil(8);

    if predictor == 2 {
        Ok(tiff_predictor(data, row_bytes, bytes_per_pixel))
    } else {
        // PNG predictors (10-15): each row is prefixed with a filter-type byte.
        Ok(png_predictor(data, row_bytes, bytes_per_pixel))
    }
}

fn tiff_predictor(mut data: Vec<u8>, row_bytes: usize, bpp: usize) -> Vec<u8> {
    if row_bytes == 0 {
        return data;
    }
    for row in data.chunks_mut(row_bytes) {
        for i in bpp..row.len() {
            row[i] = row[i].wrapping_add(row[i - bpp]);
        }
    }
    data
}

fn png_predictor(data: Vec<u8>, row_bytes: usize, bpp: usize) -> Vec<u8> {
    let stride = row_bytes + 1;
    if stride <= 1 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(data.len());
    let mut prev = vec![0u8; row_bytes];
    for chunk in data.chunks(stride) {
        if chunk.len() < 2 {
            break;
        }
        let filter = chunk[0];
        let mut row = chunk[1..].to_vec();
        row.resize(row_bytes, 0);
        for i in 0..row.len() {
            let a = if i >= bpp { row[i - bpp] } else { 0 };
            let b = prev[i];
            let c = if i >= bpp { prev[i - bpp] } else { 0 };
            let recon = match filter {
                0 => row[i],
                1 => row[i].wrapping_add(a),
                2 => row[i].wrapping_add(b),
                3 => row[i].wrapping_add(((a as u16 + b as u16) / 2) as u8),
                4 => row[i].wrapping_add(paeth(a, b, c)),
                _ => row[i],
            };
            row[i] = recon;
        }
        out.extend_from_slice(&row);
        prev = row;
    }
    out
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i32 + b as i32 - c as i32;
    let pa = (p - a as i32).abs();
    let pb = (p - b as i32).abs();
    let pc = (p - c as i32).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

fn ascii_hex_decode(data: &[u8]) -> Vec<u8> {
    let mut digits = Vec::new();
    for &b in data {
        if b == b'>' {
            break;
        }
        if let Some(d) = match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        } {
            digits.push(d);
        }
    }
    if digits.len() % 2 == 1 {
        digits.push(0);
    }
    digits.chunks(2).map(|c| c[0] * 16 + c[1]).collect()
}

fn ascii85_decode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut group = [0u8; 5];
    let mut group_len = 0usize;
    let mut iter = data.iter().copied();
    while let Some(b) = iter.next() {
        if b.is_ascii_whitespace() {
            continue;
        }
        if b == b'~' {
            break;
        }
        if b == b'z' && group_len == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        group[group_len] = b.wrapping_sub(b'!');
        group_len += 1;
        if group_len == 5 {
            let value = group.iter().fold(0u32, |acc, &d| acc.wrapping_mul(85).wrapping_add(d as u32));
            out.extend_from_slice(&value.to_be_bytes());
            group_len = 0;
        }
    }
    if group_len > 0 {
        for slot in group.iter_mut().skip(group_len) {
            *slot = 84; // pad with 'u' - 33
        }
        let value = group.iter().fold(0u32, |acc, &d| acc.wrapping_mul(85).wrapping_add(d as u32));
        let bytes = value.to_be_bytes();
        out.extend_from_slice(&bytes[..group_len - 1]);
    }
    out
}

fn run_length_decode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < data.len() {
        let len = data[i];
        i += 1;
        if len == 128 {
            break;
        } else if len < 128 {
            let count = len as usize + 1;
            let end = (i + count).min(data.len());
            out.extend_from_slice(&data[i..end]);
            i = end;
        } else {
            let count = 257 - len as usize;
            if i < data.len() {
                out.extend(std::iter::repeat_n(data[i], count));
                i += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_hex_round_trips() {
        let decoded = ascii_hex_decode(b"48656C6C6F>");
        assert_eq!(decoded, b"Hello");
    }

    #[test]
    fn ascii85_decodes_known_vector() {
        // "Man " encodes to "9jqo^" per the canonical Adobe example.
        let decoded = ascii85_decode(b"9jqo^~>");
        assert_eq!(decoded, b"Man ");
    }

    #[test]
    fn run_length_decodes_literal_and_repeat_runs() {
        let input = [2u8, b'a', b'b', b'c', 254, b'x', 128];
        let decoded = run_length_decode(&input);
        assert_eq!(decoded, b"abcxxx");
    }

    #[test]
    fn flate_decode_round_trips_zlib_payload() {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;
        use std::io::Write;
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"hello pdf").unwrap();
        let compressed = enc.finish().unwrap();
        let decoded = flate_decode(&compressed, None).unwrap();
        assert_eq!(decoded, b"hello pdf");
    }
}
