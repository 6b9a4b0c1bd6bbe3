//! Builds [`Object`] trees out of the token stream.
//!
//! Indirect references (`N G R`) require two tokens of lookahead beyond a
//! plain integer, and streams require recognising the `stream` keyword
//! immediately after a dictionary and reading `/Length` raw bytes verbatim.
//! Both are handled here rather than in the tokenizer, which stays a pure
//! lexer with one token of lookahead.

use crate::pdf::error::{PdfError, Result};
use crate::pdf::object::{Dict, ObjRef, Object};
use crate::pdf::tokenizer::{Token, Tokenizer};

/// Parse one object starting at `pos`. Returns the object and the position
/// just past it. Does not resolve indirect references or decode streams.
pub fn parse_object_at(buf: &[u8], pos: usize) -> Result<(Object, usize)> {
    let mut t = Tokenizer::at(buf, pos);
    let obj = parse_value(&mut t)?;
    Ok((obj, t.pos()))
}

/// Parse a top-level `N G obj ... endobj` definition starting at `pos`.
/// Returns the object's reference, its value, and the position past
/// `endobj`.
pub fn parse_indirect_object_at(buf: &[u8], pos: usize) -> Result<(ObjRef, Object, usize)> {
    let mut t = Tokenizer::at(buf, pos);
    let num = expect_int(&mut t)?;
    let gen = expect_int(&mut t)?;
    match t.next_token()? {
        Token::Keyword(k) if k == "obj" => {},
        other => return Err(PdfError::parse(t.pos(), format!("expected 'obj', got {other:?}"))),
    }
    let value = parse_value(&mut t)?;
    let value = maybe_attach_stream(&mut t, value)?;
    match t.next_token()? {
        Token::Keyword(k) if k == "endobj" => {},
        // tolerate missing endobj: malformed but recoverable, real-world
        // producers get this wrong often enough that rejecting it outright
        // would break otherwise-usable files
        _ => {},
    }
    Ok((ObjRef::new(num as u32, gen as u16), value, t.pos()))
}

fn expect_int(t: &mut Tokenizer<'_>) -> Result<i64> {
    match t.next_token()? {
        Token::Int(n) => Ok(n),
        other => Err(PdfError::parse(t.pos(), format!("expected integer, got {other:?}"))),
    }
}

/// Parse one value, resolving `N G R` references via two-token lookahead.
fn parse_value(t: &mut Tokenizer<'_>) -> Result<Object> {
    let tok = t.next_token()?;
    parse_value_from(t, tok)
}

fn parse_value_from(t: &mut Tokenizer<'_>, tok: Token) -> Result<Object> {
    match tok {
        Token::Eof => Err(PdfError::parse(t.pos(), "unexpected end of input")),
        Token::Int(n) => try_reference(t, n),
        Token::Real(n) => Ok(Object::Real(n)),
        Token::Name(n) => Ok(Object::Name(n)),
        Token::String(s) => Ok(Object::String(s)),
        Token::ArrayStart => parse_array(t),
        Token::DictStart => Ok(Object::Dict(parse_dict(t)?)),
        Token::ArrayEnd | Token::DictEnd => {
            Err(PdfError::parse(t.pos(), "unexpected closing delimiter"))
        },
        Token::Keyword(k) => match k.as_str() {
            "true" => Ok(Object::Bool(true)),
            "false" => Ok(Object::Bool(false)),
            "null" => Ok(Object::Null),
            other => Err(PdfError::parse(t.pos(), format!("unexpected keyword '{other}'"))),
        },
    }
}

/// After an `Int` token, look ahead for `Int Keyword("R")` to decide whether
/// this is a reference or a bare integer. Lookahead is implemented by
/// snapshotting the cursor position and rewinding on mismatch.
fn try_reference(t: &mut Tokenizer<'_>, first: i64) -> Result<Object> {
    let checkpoint = t.pos();
    if let Ok(Token::Int(gen)) = t.next_token() {
        let checkpoint2 = t.pos();
        if let Ok(Token::Keyword(k)) = t.next_token() {
            if k == "R" {
                return Ok(Object::Reference(ObjRef::new(first as u32, gen as u16)));
            }
        }
        t.seek(checkpoint2);
    }
    t.seek(checkpoint);
    Ok(Object::Int(first))
}

fn parse_array(t: &mut Tokenizer<'_>) -> Result<Object> {
    let mut items = Vec::new();
    loop {
        let tok = t.next_token()?;
        if tok == Token::ArrayEnd {
            break;
        }
        if tok == Token::Eof {
            return Err(PdfError::parse(t.pos(), "unterminated array"));
        }
        items.push(parse_value_from(t, tok)?);
    }
    Ok(Object::Array(items))
}

fn parse_dict(t: &mut Tokenizer<'_>) -> Result<Dict> {
    let mut dict = Dict::new();
    loop {
        match t.next_token()? {
            Token::DictEnd => break,
            Token::Name(key) => {
                let value = parse_value(t)?;
                dict.insert(key, value);
            },
            Token::Eof => return Err(PdfError::parse(t.pos(), "unterminated dictionary")),
            other => {
                return Err(PdfError::parse(
                    t.pos(),
                    format!("expected dictionary key, got {other:?}"),
                ));
            },
        }
    }
    Ok(dict)
}

/// If a parsed dictionary is immediately followed by the `stream` keyword,
/// consume the raw bytes (delimited by `/Length` and the `endstream`
/// keyword) and turn the value into `Object::Stream`.
fn maybe_attach_stream(t: &mut Tokenizer<'_>, value: Object) -> Result<Object> {
    let Object::Dict(dict) = value else {
        return Ok(value);
    };
    let checkpoint = t.pos();
    match t.next_token()? {
        Token::Keyword(k) if k == "stream" => {},
        _ => {
            t.seek(checkpoint);
            return Ok(Object::Dict(dict));
        },
    }
    // `stream` is followed by CRLF or LF (never bare CR) then raw bytes.
    let raw = t.remaining();
    let mut skip = 0usize;
    if raw.first() == Some(&b'\r') {
        skip += 1;
    }
    if raw.get(skip) == Some(&b'\n') {
        skip += 1;
    }
    let body_start = t.pos() + skip;

    let length = dict
        .get("Length")
        .and_then(|o| o.as_int())
        .map(|n| n as usize);

    let body_end = match length {
        Some(len) if body_start + len <= t_buf_len(t) => body_start + len,
        _ => find_endstream(t, body_start)?,
    };

    let data = t_slice(t, body_start, body_end).to_vec();
    t.seek(body_end);
    // consume trailing whitespace + `endstream` keyword
    let save = t.pos();
    match t.next_token()? {
        Token::Keyword(k) if k == "endstream" => {},
        _ => t.seek(save),
    }
    Ok(Object::Stream(dict, data))
}

fn t_buf_len(t: &Tokenizer<'_>) -> usize {
    t.pos() + t.remaining().len()
}

fn t_slice<'a>(t: &Tokenizer<'a>, start: usize, end: usize) -> &'a [u8] {
    let base = t.pos();
    let rel_start = start.saturating_sub(base);
    let rel_end = end.saturating_sub(base);
    let rem = t.remaining();
    &rem[rel_start.min(rem.len())..rel_end.min(rem.len())]
}

/// Fallback when `/Length` is missing, wrong, or an indirect reference we
/// cannot resolve at this layer: scan for the literal `endstream` keyword.
fn find_endstream(t: &Tokenizer<'_>, body_start: usize) -> Result<usize> {
    let rem = t.remaining();
    let base = t.pos();
    let rel_start = body_start.saturating_sub(base);
    let haystack = &rem[rel_start.min(rem.len())..];
    match find_subslice(haystack, b"endstream") {
        Some(idx) => {
            // trim a single trailing EOL before `endstream`
            let mut end = body_start + idx;
            if end > body_start && haystack[idx - 1] == b'\n' {
                end -= 1;
                if end > body_start && haystack[idx - 2] == b'\r' {
                    end -= 1;
                }
            }
            Ok(end)
        },
        None => Err(PdfError::parse(body_start, "missing 'endstream'")),
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_vs_bare_ints() {
        let (obj, _) = parse_object_at(b"1 0 R", 0).unwrap();
        assert_eq!(obj, Object::Reference(ObjRef::new(1, 0)));

        let (obj, pos) = parse_object_at(b"42 true", 0).unwrap();
        assert_eq!(obj, Object::Int(42));
        assert!(pos > 0);
    }

    #[test]
    fn parses_dict_and_array() {
        let (obj, _) = parse_object_at(b"<< /Type /Page /Kids [1 0 R 2 0 R] /Count 2 >>", 0)
            .unwrap();
        let dict = obj.as_dict().unwrap();
        assert_eq!(dict.get("Type").unwrap().as_name(), Some("Page"));
        assert_eq!(dict.get("Kids").unwrap().as_array().unwrap().len(), 2);
        assert_eq!(dict.get("Count").unwrap().as_int(), Some(2));
    }

    #[test]
    fn parses_indirect_object_with_stream() {
        let input = b"5 0 obj\n<< /Length 4 >>\nstream\nABCD\nendstream\nendobj";
        let (r, obj, _) = parse_indirect_object_at(input, 0).unwrap();
        assert_eq!(r, ObjRef::new(5, 0));
        let (dict, data) = obj.as_stream().unwrap();
        assert_eq!(dict.get("Length").unwrap().as_int(), Some(4));
        assert_eq!(data, b"ABCD");
    }

    #[test]
    fn falls_back_to_endstream_scan_on_bad_length() {
        let input = b"5 0 obj\n<< /Length 999 >>\nstream\nABCD\nendstream\nendobj";
        let (_, obj, _) = parse_indirect_object_at(input, 0).unwrap();
        let (_, data) = obj.as_stream().unwrap();
        assert_eq!(data, b"ABCD");
    }
}
