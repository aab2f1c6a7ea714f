//! Minimal YAML 1.1 subset shared by the PARAM and DOC text forms.
//!
//! The reader is line-based: block mappings and block sequences are parsed by
//! indentation, flow sequences by bracket balance. Only the constructs the
//! emitters produce (plus `#` comments and a leading `---`) are accepted:
//!
//! - Block mappings, optionally tagged — the tag either alone on the line
//!   opening the document (`!io`) or inline after a key (`key: !list`)
//! - Block sequences (`- ` items, with the first mapping field allowed on the
//!   hyphen line)
//! - Flow sequences, possibly spanning lines, with nesting
//! - Empty flow collections `{}` and `[]`
//! - Plain and double-quoted scalars with local `!` tags
//!
//! Anchors, aliases, multi-document streams and non-empty flow mappings are
//! rejected as invalid data.

use crate::error::{Error, Result};

/// A scalar as it appeared in the text: raw (unescaped) content, quoting
/// style and an optional local tag.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarNode {
    pub tag: Option<String>,
    pub text: String,
    pub quoted: bool,
    /// 1-based source line, for error messages.
    pub line: usize,
}

/// A parsed node tree. Mapping keys are always scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(ScalarNode),
    Seq {
        tag: Option<String>,
        children: Vec<Node>,
    },
    Map {
        tag: Option<String>,
        entries: Vec<(ScalarNode, Node)>,
    },
}

impl Node {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => s.tag.as_deref(),
            Node::Seq { tag, .. } | Node::Map { tag, .. } => tag.as_deref(),
        }
    }
}

/// A typed scalar value, produced from a [`ScalarNode`] by [`parse_scalar`].
///
/// Integers are stored as the two's-complement bit pattern of their textual
/// value in a u64, so narrowing casts recover signed values at any width.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(u64),
    Float(f64),
    String(String),
}

/// What a recognized tag says about the scalar it annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagBasedType {
    Bool,
    Int,
    Float,
    Str,
}

fn invalid(line: usize, message: impl std::fmt::Display) -> Error {
    Error::InvalidData(format!("line {line}: {message}"))
}

// ---------------------------------------------------------------------------
// Scalar typing
// ---------------------------------------------------------------------------

/// Types a scalar from its tag and textual shape.
///
/// `recognize` maps a tag to a [`TagBasedType`]; a recognized tag wins over
/// the textual shape (and a mismatching text is invalid data), an
/// unrecognized tag falls through to shape-based typing. Quoted scalars are
/// always strings.
pub fn parse_scalar(
    node: &ScalarNode,
    recognize: impl Fn(&str) -> Option<TagBasedType>,
) -> Result<Scalar> {
    if node.quoted {
        return Ok(Scalar::String(node.text.clone()));
    }
    let text = node.text.as_str();
    if let Some(ty) = node.tag.as_deref().and_then(recognize) {
        let mismatch = || invalid(node.line, format!("scalar {text:?} does not match its tag"));
        return match ty {
            TagBasedType::Bool => match text {
                "true" => Ok(Scalar::Bool(true)),
                "false" => Ok(Scalar::Bool(false)),
                _ => Err(mismatch()),
            },
            TagBasedType::Int => parse_int(text).map(Scalar::Int).ok_or_else(mismatch),
            TagBasedType::Float => parse_float(text).map(Scalar::Float).ok_or_else(mismatch),
            TagBasedType::Str => Ok(Scalar::String(text.to_string())),
        };
    }
    Ok(match text {
        "" | "~" | "null" => Scalar::Null,
        "true" => Scalar::Bool(true),
        "false" => Scalar::Bool(false),
        _ => {
            if let Some(bits) = parse_int(text) {
                Scalar::Int(bits)
            } else if let Some(value) = parse_float(text) {
                Scalar::Float(value)
            } else {
                Scalar::String(text.to_string())
            }
        }
    })
}

/// Sign-aware integer parsing over decimal and `0x` hex forms. Negative
/// values are folded into the u64 bit pattern with a wrapping negation.
fn parse_int(text: &str) -> Option<u64> {
    let (negative, rest) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()?
    } else {
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        rest.parse::<u64>().ok()?
    };
    Some(if negative {
        0u64.wrapping_sub(magnitude)
    } else {
        magnitude
    })
}

/// Floating-point shapes, including the YAML 1.1 spellings of the
/// non-finite values. Words like `inf` or `nan` without the leading dot stay
/// strings.
fn parse_float(text: &str) -> Option<f64> {
    match text {
        ".inf" | "+.inf" => return Some(f64::INFINITY),
        "-.inf" => return Some(f64::NEG_INFINITY),
        ".nan" => return Some(f64::NAN),
        _ => {}
    }
    let first = text.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '+' | '-' | '.')) {
        return None;
    }
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.bytes().any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) {
        return None;
    }
    text.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

struct Line<'a> {
    indent: usize,
    text: &'a str,
    number: usize,
}

/// Parse a document into a node tree.
pub fn parse(text: &str) -> Result<Node> {
    let lines = collect_lines(text)?;
    if lines.is_empty() {
        return Err(Error::InvalidData("empty document".into()));
    }
    let mut pos = 0;
    let node = parse_root(&lines, &mut pos)?;
    if pos != lines.len() {
        return Err(invalid(
            lines[pos].number,
            "trailing content after the document root",
        ));
    }
    Ok(node)
}

fn collect_lines(text: &str) -> Result<Vec<Line<'_>>> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        let stripped = strip_comment(raw, number)?;
        let trimmed_start = stripped.trim_start_matches(' ');
        if trimmed_start.starts_with('\t') {
            return Err(invalid(number, "tab character in indentation"));
        }
        let content = trimmed_start.trim_end();
        if content.is_empty() {
            continue;
        }
        if lines.is_empty() && content == "---" {
            continue;
        }
        lines.push(Line {
            indent: stripped.len() - trimmed_start.len(),
            text: content,
            number,
        });
    }
    Ok(lines)
}

/// Cuts a `#` comment: at line start, or preceded by whitespace, outside any
/// double-quoted scalar.
fn strip_comment(line: &str, number: usize) -> Result<&str> {
    let bytes = line.as_bytes();
    let mut in_quote = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_quote => i += 1,
            b'"' => in_quote = !in_quote,
            b'#' if !in_quote => {
                if i == 0 || bytes[i - 1] == b' ' || bytes[i - 1] == b'\t' {
                    return Ok(&line[..i]);
                }
            }
            _ => {}
        }
        i += 1;
    }
    if in_quote {
        return Err(invalid(number, "unterminated quoted string"));
    }
    Ok(line)
}

fn is_lone_tag(text: &str) -> bool {
    text.starts_with('!') && !text.contains(' ')
}

fn is_seq_item(text: &str) -> bool {
    text == "-" || text.starts_with("- ")
}

fn parse_root(lines: &[Line], pos: &mut usize) -> Result<Node> {
    let line = &lines[*pos];
    if line.indent != 0 {
        return Err(invalid(line.number, "unexpected indentation at the root"));
    }
    if is_lone_tag(line.text) {
        let tag = line.text.to_string();
        *pos += 1;
        return parse_tagged_block(lines, pos, tag, line.number);
    }
    if is_seq_item(line.text) {
        return parse_block_seq(lines, pos, line.indent, None);
    }
    if split_key(line.text, line.number).is_some() {
        return parse_block_map(lines, pos, line.indent, None);
    }
    parse_inline_value(lines, pos, line.text)
}

/// The block that follows a tag standing alone on its own line. Its entries
/// may sit at the tag line's own indent (the `!io` document form) or deeper.
fn parse_tagged_block(lines: &[Line], pos: &mut usize, tag: String, tag_line: usize) -> Result<Node> {
    if *pos >= lines.len() {
        return Ok(Node::Map {
            tag: Some(tag),
            entries: Vec::new(),
        });
    }
    let line = &lines[*pos];
    if is_seq_item(line.text) {
        parse_block_seq(lines, pos, line.indent, Some(tag))
    } else if split_key(line.text, line.number).is_some() {
        parse_block_map(lines, pos, line.indent, Some(tag))
    } else {
        Err(invalid(tag_line, "expected a block after a standalone tag"))
    }
}

fn parse_block_map(
    lines: &[Line],
    pos: &mut usize,
    entry_indent: usize,
    tag: Option<String>,
) -> Result<Node> {
    let mut entries: Vec<(ScalarNode, Node)> = Vec::new();
    while *pos < lines.len() {
        let line = &lines[*pos];
        if line.indent < entry_indent {
            break;
        }
        if line.indent > entry_indent {
            return Err(invalid(line.number, "unexpected indentation"));
        }
        if is_seq_item(line.text) {
            break;
        }
        let Some((key, rest)) = split_key(line.text, line.number) else {
            break;
        };
        let value = parse_entry_value(lines, pos, entry_indent, rest)?;
        entries.push((key, value));
    }
    Ok(Node::Map { tag, entries })
}

/// Parses the value of the map entry on the current line and advances past
/// everything it consumed. `rest` is the text after `key:`.
fn parse_entry_value(
    lines: &[Line],
    pos: &mut usize,
    entry_indent: usize,
    rest: &str,
) -> Result<Node> {
    if rest.is_empty() {
        let line = lines[*pos].number;
        *pos += 1;
        parse_nested(lines, pos, entry_indent, line)
    } else {
        parse_inline_value(lines, pos, rest)
    }
}

/// A value living on the lines below its key or hyphen, at a deeper indent.
/// Absent lines mean a null scalar.
fn parse_nested(lines: &[Line], pos: &mut usize, parent_indent: usize, owner_line: usize) -> Result<Node> {
    if *pos < lines.len() && lines[*pos].indent > parent_indent {
        let line = &lines[*pos];
        if is_seq_item(line.text) {
            parse_block_seq(lines, pos, line.indent, None)
        } else if split_key(line.text, line.number).is_some() {
            parse_block_map(lines, pos, line.indent, None)
        } else {
            parse_inline_value(lines, pos, line.text)
        }
    } else {
        Ok(Node::Scalar(ScalarNode {
            tag: None,
            text: String::new(),
            quoted: false,
            line: owner_line,
        }))
    }
}

fn parse_block_seq(
    lines: &[Line],
    pos: &mut usize,
    item_indent: usize,
    tag: Option<String>,
) -> Result<Node> {
    let mut children = Vec::new();
    while *pos < lines.len() {
        let line = &lines[*pos];
        if line.indent < item_indent {
            break;
        }
        if line.indent > item_indent {
            return Err(invalid(line.number, "unexpected indentation"));
        }
        if !is_seq_item(line.text) {
            break;
        }
        let content = line.text.strip_prefix('-').unwrap_or("").trim_start();
        if content.is_empty() {
            let owner = line.number;
            *pos += 1;
            children.push(parse_nested(lines, pos, item_indent, owner)?);
        } else if let Some((key, rest)) = split_key(content, line.number) {
            // First mapping field on the hyphen line; siblings sit at the
            // indent of the content after "- ".
            let content_indent = item_indent + (line.text.len() - content.len());
            children.push(parse_seq_item_map(lines, pos, content_indent, key, rest)?);
        } else {
            children.push(parse_inline_value(lines, pos, content)?);
        }
    }
    Ok(Node::Seq { tag, children })
}

fn parse_seq_item_map(
    lines: &[Line],
    pos: &mut usize,
    content_indent: usize,
    first_key: ScalarNode,
    first_rest: &str,
) -> Result<Node> {
    let mut entries = Vec::new();
    let value = parse_entry_value(lines, pos, content_indent, first_rest)?;
    entries.push((first_key, value));
    while *pos < lines.len() {
        let line = &lines[*pos];
        if line.indent != content_indent || is_seq_item(line.text) {
            break;
        }
        let Some((key, rest)) = split_key(line.text, line.number) else {
            break;
        };
        let value = parse_entry_value(lines, pos, content_indent, rest)?;
        entries.push((key, value));
    }
    Ok(Node::Map { tag: None, entries })
}

/// A value written out on the current line: a scalar, a flow sequence
/// (possibly continuing over following lines), an empty flow mapping, or a
/// tag introducing any of those or a nested block.
fn parse_inline_value(lines: &[Line], pos: &mut usize, text: &str) -> Result<Node> {
    let line = &lines[*pos];
    let number = line.number;
    let indent = line.indent;
    let (tag, payload) = split_tag(text);
    if payload.is_empty() {
        // A tag with nothing after it introduces a nested block.
        let tag = tag.ok_or_else(|| invalid(number, "expected a value"))?;
        *pos += 1;
        if *pos < lines.len() && lines[*pos].indent > indent {
            let next = &lines[*pos];
            return if is_seq_item(next.text) {
                parse_block_seq(lines, pos, next.indent, Some(tag))
            } else if split_key(next.text, next.number).is_some() {
                parse_block_map(lines, pos, next.indent, Some(tag))
            } else {
                Err(invalid(next.number, "expected a block after a tag"))
            };
        }
        return Ok(Node::Map {
            tag: Some(tag),
            entries: Vec::new(),
        });
    }
    if payload == "{}" {
        *pos += 1;
        return Ok(Node::Map {
            tag,
            entries: Vec::new(),
        });
    }
    if payload.starts_with('{') {
        return Err(invalid(number, "flow mappings other than {} are not supported"));
    }
    if payload.starts_with('[') {
        let flow = gather_flow(lines, pos, payload)?;
        return parse_flow_seq(&flow, tag, number);
    }
    *pos += 1;
    Ok(Node::Scalar(scalar_from_token(payload, tag, number)?))
}

/// Splits a leading `!tag` from a value, returning the tag and the remainder.
fn split_tag(text: &str) -> (Option<String>, &str) {
    if !text.starts_with('!') {
        return (None, text);
    }
    match text.find(' ') {
        Some(space) => (Some(text[..space].to_string()), text[space + 1..].trim_start()),
        None => (Some(text.to_string()), ""),
    }
}

/// Splits `key: rest` (or `key:` at end of line), handling quoted keys.
/// Returns `None` if the line is not a mapping entry.
fn split_key(text: &str, number: usize) -> Option<(ScalarNode, &str)> {
    if let Some(inner_end) = text.strip_prefix('"').and_then(|_| find_closing_quote(text, 1)) {
        let rest = &text[inner_end + 1..];
        let rest = rest.strip_prefix(':')?;
        if !rest.is_empty() && !rest.starts_with(' ') {
            return None;
        }
        let key = ScalarNode {
            tag: None,
            text: unescape(&text[1..inner_end]),
            quoted: true,
            line: number,
        };
        return Some((key, rest.trim_start()));
    }
    let mut search_from = 0;
    while let Some(off) = text[search_from..].find(':') {
        let i = search_from + off;
        let rest = &text[i + 1..];
        if rest.is_empty() || rest.starts_with(' ') {
            let raw = &text[..i];
            if raw.is_empty() || raw.contains('"') {
                return None;
            }
            let key = ScalarNode {
                tag: None,
                text: raw.to_string(),
                quoted: false,
                line: number,
            };
            return Some((key, rest.trim_start()));
        }
        search_from = i + 1;
    }
    None
}

fn scalar_from_token(token: &str, tag: Option<String>, number: usize) -> Result<ScalarNode> {
    if token.starts_with('"') {
        let end = find_closing_quote(token, 1)
            .ok_or_else(|| invalid(number, "unterminated quoted string"))?;
        if end + 1 != token.len() {
            return Err(invalid(number, "trailing content after a quoted string"));
        }
        return Ok(ScalarNode {
            tag,
            text: unescape(&token[1..end]),
            quoted: true,
            line: number,
        });
    }
    Ok(ScalarNode {
        tag,
        text: token.to_string(),
        quoted: false,
        line: number,
    })
}

/// Accumulates a flow sequence that may continue over several source lines,
/// until the brackets balance.
fn gather_flow(lines: &[Line], pos: &mut usize, first: &str) -> Result<String> {
    let start_line = lines[*pos].number;
    let mut flow = String::from(first);
    *pos += 1;
    while flow_depth(&flow, start_line)? > 0 {
        if *pos >= lines.len() {
            return Err(invalid(start_line, "unterminated flow sequence"));
        }
        flow.push(' ');
        flow.push_str(lines[*pos].text);
        *pos += 1;
    }
    Ok(flow)
}

fn flow_depth(text: &str, number: usize) -> Result<i32> {
    let mut depth = 0;
    let mut in_quote = false;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_quote => i += 1,
            b'"' => in_quote = !in_quote,
            b'[' if !in_quote => depth += 1,
            b']' if !in_quote => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return Err(invalid(number, "unbalanced ] in flow sequence"));
        }
        i += 1;
    }
    Ok(depth)
}

fn parse_flow_seq(text: &str, tag: Option<String>, number: usize) -> Result<Node> {
    let inner = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| invalid(number, "malformed flow sequence"))?;
    let mut children = Vec::new();
    for item in split_flow_items(inner, number)? {
        children.push(parse_flow_item(item, number)?);
    }
    Ok(Node::Seq { tag, children })
}

/// Splits flow-sequence items on top-level commas, honoring quotes and
/// nested brackets. A trailing comma is tolerated.
fn split_flow_items<'a>(inner: &'a str, number: usize) -> Result<Vec<&'a str>> {
    let mut items = Vec::new();
    let mut depth = 0;
    let mut in_quote = false;
    let mut start = 0;
    let bytes = inner.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_quote => i += 1,
            b'"' => in_quote = !in_quote,
            b'[' if !in_quote => depth += 1,
            b']' if !in_quote => depth -= 1,
            b',' if !in_quote && depth == 0 => {
                items.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    let last = inner[start..].trim();
    if !last.is_empty() {
        items.push(last);
    }
    if items.iter().any(|item| item.is_empty()) {
        return Err(invalid(number, "empty entry in flow sequence"));
    }
    Ok(items)
}

fn parse_flow_item(item: &str, number: usize) -> Result<Node> {
    let (tag, payload) = split_tag(item);
    if payload.starts_with('[') {
        return parse_flow_seq(payload, tag, number);
    }
    if payload.is_empty() {
        return Err(invalid(number, "tag without a value in flow sequence"));
    }
    if payload.starts_with('{') {
        return Err(invalid(number, "flow mappings are not supported in sequences"));
    }
    Ok(Node::Scalar(scalar_from_token(payload, tag, number)?))
}

fn find_closing_quote(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Emission helpers
// ---------------------------------------------------------------------------

/// Shortest f32 representation that reparses as a float (never as an int):
/// integral values get a forced `.0`, non-finite values use the YAML 1.1
/// spellings.
pub fn format_f32(value: f32) -> String {
    if value.is_nan() {
        return ".nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { ".inf" } else { "-.inf" }.to_string();
    }
    let mut s = value.to_string();
    if !s.contains(['.', 'e', 'E']) {
        s.push_str(".0");
    }
    s
}

/// f64 counterpart of [`format_f32`].
pub fn format_f64(value: f64) -> String {
    if value.is_nan() {
        return ".nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { ".inf" } else { "-.inf" }.to_string();
    }
    let mut s = value.to_string();
    if !s.contains(['.', 'e', 'E']) {
        s.push_str(".0");
    }
    s
}

/// Double-quotes and escapes a string value.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Renders a mapping key: plain when it would reparse as the same string,
/// quoted otherwise (numeric or boolean lookalikes, YAML syntax characters).
pub fn format_key(key: &str) -> String {
    if plain_key_is_safe(key) {
        key.to_string()
    } else {
        quote_string(key)
    }
}

fn plain_key_is_safe(s: &str) -> bool {
    if s.is_empty() || s != s.trim() {
        return false;
    }
    if s == "~" || s == "null" || s == "true" || s == "false" {
        return false;
    }
    if parse_int(s).is_some() || parse_float(s).is_some() {
        return false;
    }
    if s.starts_with('-') || s.starts_with('?') || s.starts_with('!') {
        return false;
    }
    !s.chars().any(|c| {
        c.is_control()
            || matches!(
                c,
                ':' | '#' | '"' | '\'' | '[' | ']' | '{' | '}' | ',' | '&' | '*' | '|' | '>' | '%' | '@' | '`'
            )
    })
}

/// Two-space indentation.
pub fn make_indent(depth: usize) -> String {
    "  ".repeat(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> ScalarNode {
        ScalarNode {
            tag: None,
            text: text.to_string(),
            quoted: false,
            line: 1,
        }
    }

    fn no_tags(_: &str) -> Option<TagBasedType> {
        None
    }

    #[test]
    fn scalar_shapes() {
        assert_eq!(parse_scalar(&plain("true"), no_tags).unwrap(), Scalar::Bool(true));
        assert_eq!(parse_scalar(&plain("42"), no_tags).unwrap(), Scalar::Int(42));
        assert_eq!(parse_scalar(&plain("-7"), no_tags).unwrap(), Scalar::Int(0u64.wrapping_sub(7)));
        assert_eq!(parse_scalar(&plain("0x10"), no_tags).unwrap(), Scalar::Int(16));
        assert_eq!(parse_scalar(&plain("3.5"), no_tags).unwrap(), Scalar::Float(3.5));
        assert_eq!(parse_scalar(&plain("1e3"), no_tags).unwrap(), Scalar::Float(1000.0));
        assert_eq!(parse_scalar(&plain("~"), no_tags).unwrap(), Scalar::Null);
        assert_eq!(
            parse_scalar(&plain("hello"), no_tags).unwrap(),
            Scalar::String("hello".into())
        );
        // Words that only look float-adjacent stay strings.
        assert_eq!(
            parse_scalar(&plain("inf"), no_tags).unwrap(),
            Scalar::String("inf".into())
        );
        assert_eq!(
            parse_scalar(&plain("1.2.3"), no_tags).unwrap(),
            Scalar::String("1.2.3".into())
        );
    }

    #[test]
    fn quoted_scalars_are_strings() {
        let node = ScalarNode {
            tag: None,
            text: "42".to_string(),
            quoted: true,
            line: 1,
        };
        assert_eq!(parse_scalar(&node, no_tags).unwrap(), Scalar::String("42".into()));
    }

    #[test]
    fn recognized_tag_overrides_shape() {
        let node = ScalarNode {
            tag: Some("!u".to_string()),
            text: "7".to_string(),
            quoted: false,
            line: 1,
        };
        let recognize = |tag: &str| (tag == "!u").then_some(TagBasedType::Int);
        assert_eq!(parse_scalar(&node, recognize).unwrap(), Scalar::Int(7));

        let bad = ScalarNode {
            text: "abc".to_string(),
            ..node
        };
        assert!(parse_scalar(&bad, recognize).is_err());
    }

    #[test]
    fn comments_are_stripped() {
        let node = parse("a: 1 # trailing\n# full line\nb: 2\n").unwrap();
        let Node::Map { entries, .. } = node else { panic!("expected map") };
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn flow_sequences_nest_and_span_lines() {
        let node = parse("[1, [2, 3],\n 4]\n").unwrap();
        let Node::Seq { children, .. } = node else { panic!("expected seq") };
        assert_eq!(children.len(), 3);
        assert!(matches!(&children[1], Node::Seq { children, .. } if children.len() == 2));
    }

    #[test]
    fn tagged_block_mapping_after_key() {
        let node = parse("root: !list\n  a: 1\n").unwrap();
        let Node::Map { entries, .. } = node else { panic!("expected map") };
        let Node::Map { tag, entries: inner } = &entries[0].1 else { panic!("expected map value") };
        assert_eq!(tag.as_deref(), Some("!list"));
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn block_sequence_with_inline_first_field() {
        let node = parse("- a: 1\n  b: 2\n- 3\n").unwrap();
        let Node::Seq { children, .. } = node else { panic!("expected seq") };
        assert_eq!(children.len(), 2);
        assert!(matches!(&children[0], Node::Map { entries, .. } if entries.len() == 2));
    }

    #[test]
    fn nonempty_flow_mapping_is_rejected_and_empty_allowed() {
        assert!(parse("a: {x: 1}\n").is_err());
        let node = parse("a: {}\n").unwrap();
        let Node::Map { entries, .. } = node else { panic!("expected map") };
        assert!(matches!(&entries[0].1, Node::Map { entries, .. } if entries.is_empty()));
    }

    #[test]
    fn float_formatting_keeps_float_shape() {
        assert_eq!(format_f32(3.5), "3.5");
        assert_eq!(format_f32(1.0), "1.0");
        assert_eq!(format_f32(-0.0), "-0.0");
        assert_eq!(format_f32(f32::INFINITY), ".inf");
        assert_eq!(format_f64(1e10), "10000000000.0");
    }

    #[test]
    fn keys_that_mimic_other_scalars_are_quoted() {
        assert_eq!(format_key("Speed"), "Speed");
        assert_eq!(format_key("123"), "\"123\"");
        assert_eq!(format_key("true"), "\"true\"");
        assert_eq!(format_key("a:b"), "\"a:b\"");
    }
}
