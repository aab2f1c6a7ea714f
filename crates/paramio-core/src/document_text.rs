//! Text reader and emitter for DOC values.
//!
//! Untagged scalars default to bool / i32 / f32 / string by shape; the
//! wider numeric variants each carry a tag (`!u`, `!l`, `!ul`, `!f64`) so a
//! value parsed from text re-serializes to the same binary width. Hashes
//! emit in lexicographic key order, arrays as flow sequences when every
//! element is a scalar and as block sequences otherwise.

use std::collections::BTreeMap;

use crate::document::DocValue;
use crate::error::{Error, Result};
use crate::tags;
use crate::yaml::{self, Node, Scalar, ScalarNode};

impl DocValue {
    /// Parses a DOC value from its text form.
    pub fn from_text(text: &str) -> Result<DocValue> {
        read_value(&yaml::parse(text)?)
    }

    /// Emits the value as text. Hash emission is canonical: keys appear in
    /// lexicographic order no matter how the value was built.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        emit_root(self, &mut out);
        out
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

fn read_value(node: &Node) -> Result<DocValue> {
    match node {
        Node::Map { entries, .. } => {
            let mut hash = BTreeMap::new();
            for (key, value) in entries {
                let key = key.text.clone();
                if hash.contains_key(&key) {
                    return Err(Error::InvalidData(format!("duplicate hash key {key:?}")));
                }
                hash.insert(key, read_value(value)?);
            }
            Ok(DocValue::Hash(hash))
        }
        Node::Seq { children, .. } => Ok(DocValue::Array(
            children.iter().map(read_value).collect::<Result<_>>()?,
        )),
        Node::Scalar(scalar) => read_scalar(scalar),
    }
}

fn read_scalar(node: &ScalarNode) -> Result<DocValue> {
    let scalar = yaml::parse_scalar(node, tags::doc_scalar_tag_type)?;
    Ok(match (node.tag.as_deref().unwrap_or(""), scalar) {
        ("!u", Scalar::Int(bits)) => DocValue::UInt(bits as u32),
        ("!l", Scalar::Int(bits)) => DocValue::Int64(bits as i64),
        ("!ul", Scalar::Int(bits)) => DocValue::UInt64(bits),
        ("!f64", Scalar::Float(value)) => DocValue::Double(value),
        (_, Scalar::Null) => DocValue::Null,
        (_, Scalar::Bool(value)) => DocValue::Bool(value),
        (_, Scalar::Int(bits)) => DocValue::Int(bits as i32),
        (_, Scalar::Float(value)) => DocValue::Float(value as f32),
        (_, Scalar::String(value)) => DocValue::String(value),
    })
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

fn is_scalar(value: &DocValue) -> bool {
    !matches!(value, DocValue::Array(_) | DocValue::Hash(_))
}

fn scalar_text(value: &DocValue) -> String {
    match value {
        DocValue::Null => "null".to_string(),
        DocValue::Bool(value) => if *value { "true" } else { "false" }.to_string(),
        DocValue::Int(value) => value.to_string(),
        DocValue::UInt(value) => format!("!u {value}"),
        DocValue::Int64(value) => format!("!l {value}"),
        DocValue::UInt64(value) => format!("!ul {value}"),
        DocValue::Float(value) => yaml::format_f32(*value),
        DocValue::Double(value) => format!("!f64 {}", yaml::format_f64(*value)),
        DocValue::String(value) => yaml::quote_string(value),
        // collections in scalar position
        DocValue::Array(_) | DocValue::Hash(_) => "null".to_string(),
    }
}

fn emit_root(value: &DocValue, out: &mut String) {
    match value {
        DocValue::Hash(map) if !map.is_empty() => emit_hash_entries(map, 0, out),
        DocValue::Hash(_) => out.push_str("{}\n"),
        DocValue::Array(values) if values.iter().all(is_scalar) => {
            emit_flow_seq(values, out);
            out.push('\n');
        }
        DocValue::Array(values) => emit_block_seq(values, 0, out),
        scalar => {
            out.push_str(&scalar_text(scalar));
            out.push('\n');
        }
    }
}

fn emit_flow_seq(values: &[DocValue], out: &mut String) {
    out.push('[');
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(&scalar_text(value));
    }
    out.push(']');
}

fn emit_hash_entries(map: &BTreeMap<String, DocValue>, depth: usize, out: &mut String) {
    for (key, value) in map {
        out.push_str(&yaml::make_indent(depth));
        emit_hash_entry_body(key, value, depth, out);
    }
}

/// One `key: value` entry, indentation for the first line already written.
fn emit_hash_entry_body(key: &str, value: &DocValue, depth: usize, out: &mut String) {
    out.push_str(&yaml::format_key(key));
    match value {
        DocValue::Hash(map) if map.is_empty() => out.push_str(": {}\n"),
        DocValue::Hash(map) => {
            out.push_str(":\n");
            emit_hash_entries(map, depth + 1, out);
        }
        DocValue::Array(values) if values.iter().all(is_scalar) => {
            out.push_str(": ");
            emit_flow_seq(values, out);
            out.push('\n');
        }
        DocValue::Array(values) => {
            out.push_str(":\n");
            emit_block_seq(values, depth + 1, out);
        }
        scalar => {
            out.push_str(": ");
            out.push_str(&scalar_text(scalar));
            out.push('\n');
        }
    }
}

fn emit_block_seq(values: &[DocValue], depth: usize, out: &mut String) {
    for value in values {
        out.push_str(&yaml::make_indent(depth));
        out.push_str("- ");
        match value {
            DocValue::Hash(map) if map.is_empty() => out.push_str("{}\n"),
            DocValue::Hash(map) => {
                // First field on the hyphen line, siblings below it.
                for (index, (key, entry)) in map.iter().enumerate() {
                    if index > 0 {
                        out.push_str(&yaml::make_indent(depth + 1));
                    }
                    emit_hash_entry_body(key, entry, depth + 1, out);
                }
            }
            DocValue::Array(inner) if inner.iter().all(is_scalar) => {
                emit_flow_seq(inner, out);
                out.push('\n');
            }
            DocValue::Array(inner) => {
                // A nested block sequence starts on the line below a bare
                // hyphen.
                out.truncate(out.len() - 1);
                out.push('\n');
                emit_block_seq(inner, depth + 1, out);
            }
            scalar => {
                out.push_str(&scalar_text(scalar));
                out.push('\n');
            }
        }
    }
}
