//! Text reader and emitter for PARAM documents.
//!
//! The text form is a tagged YAML subset: the document mapping carries
//! `!io`, lists `!list`, objects `!obj`, and every leaf variant that plain
//! scalar shape cannot round-trip carries its own tag. Keys are emitted as
//! recovered names where a name table resolves them and as bare integer
//! hashes otherwise.

use std::sync::PoisonError;

use crate::error::{Error, Result};
use crate::names::{default_name_table, NameTable};
use crate::param::{Name, ParamDoc, ParamList, ParamMap, ParamObject, Parameter};
use crate::tags::{self, SeqKind};
use crate::types::{
    Color4f, Curve, FixedStr256, FixedStr32, FixedStr64, Quatf, Vector2f, Vector3f, Vector4f,
    CURVE_ELEMENTS,
};
use crate::yaml::{self, Node, Scalar, ScalarNode};

impl ParamDoc {
    /// Parses a PARAM document from its text form.
    pub fn from_text(text: &str) -> Result<ParamDoc> {
        read_doc(&yaml::parse(text)?)
    }

    /// Emits the document as tagged block-style text. Deterministic: the
    /// output depends only on the document and the default table's known
    /// names.
    pub fn to_text(&self) -> String {
        TextEmitter::new().emit(self)
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidData(message.into())
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

fn map_entries<'a>(node: &'a Node, what: &str) -> Result<&'a [(ScalarNode, Node)]> {
    match node {
        Node::Map { entries, .. } => Ok(entries),
        _ => Err(invalid(format!("expected a mapping for {what}"))),
    }
}

fn find_entry<'a>(entries: &'a [(ScalarNode, Node)], key: &str) -> Option<&'a Node> {
    entries
        .iter()
        .find(|(k, _)| k.text == key)
        .map(|(_, value)| value)
}

fn read_doc(node: &Node) -> Result<ParamDoc> {
    let entries = map_entries(node, "the document root")?;
    let (Some(version), Some(doc_type), Some(param_root)) = (
        find_entry(entries, "version"),
        find_entry(entries, "type"),
        find_entry(entries, "param_root"),
    ) else {
        return Err(invalid(
            "document root must contain version, type and param_root",
        ));
    };
    Ok(ParamDoc {
        version: read_u32(version)?,
        doc_type: read_string(doc_type)?,
        param_root: read_list(param_root)?,
    })
}

fn read_list(node: &Node) -> Result<ParamList> {
    let entries = map_entries(node, "a parameter list")?;
    let (Some(objects), Some(lists)) = (
        find_entry(entries, "objects"),
        find_entry(entries, "lists"),
    ) else {
        return Err(invalid("parameter list must contain objects and lists"));
    };
    Ok(ParamList {
        objects: read_name_map(objects, read_object)?,
        lists: read_name_map(lists, read_list)?,
    })
}

fn read_object(node: &Node) -> Result<ParamObject> {
    Ok(ParamObject {
        params: read_name_map(node, read_parameter)?,
    })
}

/// Reads a hash-keyed mapping, resolving textual keys to hashes and
/// rejecting duplicates.
fn read_name_map<T>(node: &Node, read: impl Fn(&Node) -> Result<T>) -> Result<ParamMap<T>> {
    let entries = map_entries(node, "a hash-keyed mapping")?;
    let mut map = ParamMap::new();
    for (key, value) in entries {
        map.try_insert(read_key(key)?, read(value)?)?;
    }
    Ok(map)
}

/// An integer-shaped key is a bare hash narrowed to 32 bits; a string key
/// hashes through CRC32.
fn read_key(key: &ScalarNode) -> Result<Name> {
    match yaml::parse_scalar(key, tags::param_scalar_tag_type)? {
        Scalar::Int(bits) => Ok(Name(bits as u32)),
        Scalar::String(name) => Ok(Name::from_str(&name)),
        _ => Err(invalid("unexpected key scalar type")),
    }
}

fn read_parameter(node: &Node) -> Result<Parameter> {
    match node {
        Node::Seq { tag, children } => read_sequence(tag.as_deref(), children),
        Node::Scalar(scalar) => scalar_to_parameter(scalar),
        Node::Map { .. } => Err(invalid("unexpected mapping in parameter position")),
    }
}

fn scalar_to_parameter(node: &ScalarNode) -> Result<Parameter> {
    let tag = node.tag.as_deref().unwrap_or("");
    match yaml::parse_scalar(node, tags::param_scalar_tag_type)? {
        Scalar::Bool(value) => Ok(value.into()),
        Scalar::String(value) => match tag {
            "!str32" => Ok(FixedStr32::new(value)?.into()),
            "!str64" => Ok(FixedStr64::new(value)?.into()),
            "!str256" => Ok(FixedStr256::new(value)?.into()),
            _ => Ok(Parameter::String(value)),
        },
        Scalar::Int(bits) => {
            if tag == "!u" {
                Ok(Parameter::U32(bits as u32))
            } else {
                Ok(Parameter::Int(bits as i32))
            }
        }
        Scalar::Float(value) => Ok(Parameter::F32(value as f32)),
        Scalar::Null => Err(invalid("unexpected scalar type")),
    }
}

fn read_sequence(tag: Option<&str>, children: &[Node]) -> Result<Parameter> {
    let Some(kind) = tag.and_then(tags::param_seq_kind) else {
        return Err(invalid(format!(
            "unexpected sequence tag (or no tag): {}",
            tag.unwrap_or("")
        )));
    };
    match kind {
        SeqKind::Vec2 => Ok(Vector2f::from_array(read_float_array(children)?).into()),
        SeqKind::Vec3 => Ok(Vector3f::from_array(read_float_array(children)?).into()),
        SeqKind::Vec4 => Ok(Vector4f::from_array(read_float_array(children)?).into()),
        SeqKind::Color => Ok(Color4f::from_array(read_float_array(children)?).into()),
        SeqKind::Quat => Ok(Quatf::from_array(read_float_array(children)?).into()),
        SeqKind::Curve => read_curves(children),
        SeqKind::BufferInt => Ok(Parameter::BufferInt(read_buffer(children, read_i32)?)),
        SeqKind::BufferF32 => Ok(Parameter::BufferF32(read_buffer(children, read_f32)?)),
        SeqKind::BufferU32 => Ok(Parameter::BufferU32(read_buffer(children, read_u32)?)),
        SeqKind::BufferBinary => Ok(Parameter::BufferBinary(read_buffer(children, read_u8)?)),
    }
}

fn scalar_of(node: &Node) -> Result<&ScalarNode> {
    match node {
        Node::Scalar(scalar) => Ok(scalar),
        _ => Err(invalid("expected a scalar sequence element")),
    }
}

fn read_int_bits(node: &Node) -> Result<u64> {
    match yaml::parse_scalar(scalar_of(node)?, tags::param_scalar_tag_type)? {
        Scalar::Int(bits) => Ok(bits),
        _ => Err(invalid("expected an integer scalar")),
    }
}

fn read_u32(node: &Node) -> Result<u32> {
    Ok(read_int_bits(node)? as u32)
}

fn read_i32(node: &Node) -> Result<i32> {
    Ok(read_int_bits(node)? as i32)
}

fn read_u8(node: &Node) -> Result<u8> {
    Ok(read_int_bits(node)? as u8)
}

/// Numeric struct fields accept both int- and float-shaped scalars.
fn read_f32(node: &Node) -> Result<f32> {
    match yaml::parse_scalar(scalar_of(node)?, tags::param_scalar_tag_type)? {
        Scalar::Float(value) => Ok(value as f32),
        Scalar::Int(bits) => Ok(bits as i64 as f32),
        _ => Err(invalid("expected a numeric scalar")),
    }
}

fn read_string(node: &Node) -> Result<String> {
    match yaml::parse_scalar(scalar_of(node)?, tags::param_scalar_tag_type)? {
        Scalar::String(value) => Ok(value),
        _ => Err(invalid("expected a string scalar")),
    }
}

fn read_float_array<const N: usize>(children: &[Node]) -> Result<[f32; N]> {
    if children.len() != N {
        return Err(invalid("unexpected number of children"));
    }
    let mut fields = [0f32; N];
    for (slot, child) in fields.iter_mut().zip(children) {
        *slot = read_f32(child)?;
    }
    Ok(fields)
}

fn read_buffer<T>(children: &[Node], read: impl Fn(&Node) -> Result<T>) -> Result<Vec<T>> {
    children.iter().map(read).collect()
}

fn read_curves(children: &[Node]) -> Result<Parameter> {
    match children.len() {
        n if n == CURVE_ELEMENTS => Ok(read_curve_array::<1>(children)?.into()),
        n if n == 2 * CURVE_ELEMENTS => Ok(read_curve_array::<2>(children)?.into()),
        n if n == 3 * CURVE_ELEMENTS => Ok(read_curve_array::<3>(children)?.into()),
        n if n == 4 * CURVE_ELEMENTS => Ok(read_curve_array::<4>(children)?.into()),
        _ => Err(invalid("invalid curve: unexpected number of children")),
    }
}

fn read_curve_array<const N: usize>(children: &[Node]) -> Result<[Curve; N]> {
    let mut curves = [Curve::default(); N];
    for (index, curve) in curves.iter_mut().enumerate() {
        let base = index * CURVE_ELEMENTS;
        curve.a = read_u32(&children[base])?;
        curve.b = read_u32(&children[base + 1])?;
        for (offset, slot) in curve.floats.iter_mut().enumerate() {
            *slot = read_f32(&children[base + 2 + offset])?;
        }
    }
    Ok(curves)
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

struct TextEmitter {
    extra_names: NameTable,
    out: String,
}

impl TextEmitter {
    fn new() -> Self {
        Self {
            extra_names: NameTable::new(false),
            out: String::new(),
        }
    }

    fn emit(mut self, doc: &ParamDoc) -> String {
        self.build_extra_name_table(&doc.param_root);
        self.out.push_str("!io\n");
        self.out.push_str(&format!("version: {}\n", doc.version));
        self.out.push_str("type: ");
        self.out.push_str(&yaml::quote_string(&doc.doc_type));
        self.out.push_str("\nparam_root: !list\n");
        self.emit_list_body(&doc.param_root, 1, ParamDoc::root_key());
        self.out
    }

    /// Every string-valued parameter in the document names something; feed
    /// them all to the per-document table before resolving keys.
    fn build_extra_name_table(&mut self, list: &ParamList) {
        for (_, object) in list.objects.iter() {
            for (_, param) in object.params.iter() {
                if let Ok(name) = param.as_str() {
                    self.extra_names.add_reference(name);
                }
            }
        }
        for (_, sub_list) in list.lists.iter() {
            self.build_extra_name_table(sub_list);
        }
    }

    fn resolve_name(&mut self, name: Name, index: usize, parent: Name) -> Option<String> {
        if let Some(found) = self.extra_names.lookup(name.0, index, parent.0) {
            return Some(found.to_string());
        }
        let mut table = default_name_table()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        table.lookup(name.0, index, parent.0).map(str::to_string)
    }

    fn push_key(&mut self, depth: usize, name: Name, index: usize, parent: Name) {
        self.out.push_str(&yaml::make_indent(depth));
        match self.resolve_name(name, index, parent) {
            Some(resolved) => self.out.push_str(&yaml::format_key(&resolved)),
            None => self.out.push_str(&name.0.to_string()),
        }
    }

    fn emit_list_body(&mut self, list: &ParamList, depth: usize, parent: Name) {
        self.out.push_str(&yaml::make_indent(depth));
        if list.objects.is_empty() {
            self.out.push_str("objects: {}\n");
        } else {
            self.out.push_str("objects:\n");
            for (index, (name, object)) in list.objects.iter().enumerate() {
                self.push_key(depth + 1, name, index, parent);
                if object.params.is_empty() {
                    self.out.push_str(": !obj {}\n");
                } else {
                    self.out.push_str(": !obj\n");
                    for (param_index, (param_name, param)) in object.params.iter().enumerate() {
                        self.push_key(depth + 2, param_name, param_index, name);
                        self.out.push_str(": ");
                        self.push_parameter(param);
                        self.out.push('\n');
                    }
                }
            }
        }

        self.out.push_str(&yaml::make_indent(depth));
        if list.lists.is_empty() {
            self.out.push_str("lists: {}\n");
        } else {
            self.out.push_str("lists:\n");
            for (index, (name, sub_list)) in list.lists.iter().enumerate() {
                self.push_key(depth + 1, name, index, parent);
                self.out.push_str(": !list\n");
                self.emit_list_body(sub_list, depth + 2, name);
            }
        }
    }

    fn push_parameter(&mut self, param: &Parameter) {
        match param {
            Parameter::Bool(value) => {
                self.out.push_str(if *value { "true" } else { "false" });
            }
            Parameter::F32(value) => self.out.push_str(&yaml::format_f32(*value)),
            Parameter::Int(value) => self.out.push_str(&value.to_string()),
            Parameter::U32(value) => self.out.push_str(&format!("!u {value}")),
            Parameter::String(value) => self.out.push_str(&yaml::quote_string(value)),
            Parameter::String32(value) => self.push_fixed_str("!str32", value.as_str()),
            Parameter::String64(value) => self.push_fixed_str("!str64", value.as_str()),
            Parameter::String256(value) => self.push_fixed_str("!str256", value.as_str()),
            Parameter::Vec2(value) => self.push_float_seq("!vec2", &value.to_array()),
            Parameter::Vec3(value) => self.push_float_seq("!vec3", &value.to_array()),
            Parameter::Vec4(value) => self.push_float_seq("!vec4", &value.to_array()),
            Parameter::Color(value) => self.push_float_seq("!color", &value.to_array()),
            Parameter::Quat(value) => self.push_float_seq("!quat", &value.to_array()),
            Parameter::Curve1(curves) => self.push_curves(curves),
            Parameter::Curve2(curves) => self.push_curves(curves),
            Parameter::Curve3(curves) => self.push_curves(curves),
            Parameter::Curve4(curves) => self.push_curves(curves),
            Parameter::BufferInt(values) => {
                self.push_int_seq("!buffer_int", values.iter().map(|v| v.to_string()));
            }
            Parameter::BufferF32(values) => self.push_float_seq("!buffer_f32", values),
            Parameter::BufferU32(values) => {
                self.push_int_seq("!buffer_u32", values.iter().map(|v| v.to_string()));
            }
            Parameter::BufferBinary(values) => {
                self.push_int_seq("!buffer_binary", values.iter().map(|v| v.to_string()));
            }
        }
    }

    fn push_fixed_str(&mut self, tag: &str, value: &str) {
        self.out.push_str(tag);
        self.out.push(' ');
        self.out.push_str(&yaml::quote_string(value));
    }

    fn push_float_seq(&mut self, tag: &str, values: &[f32]) {
        self.push_flow(tag, values.iter().map(|v| yaml::format_f32(*v)));
    }

    fn push_int_seq(&mut self, tag: &str, values: impl Iterator<Item = String>) {
        self.push_flow(tag, values);
    }

    /// A curve array flattens into one flow sequence: two ints then thirty
    /// floats per curve, in order.
    fn push_curves(&mut self, curves: &[Curve]) {
        let scalars = curves.iter().flat_map(|curve| {
            [curve.a.to_string(), curve.b.to_string()]
                .into_iter()
                .chain(curve.floats.iter().map(|v| yaml::format_f32(*v)))
        });
        self.push_flow("!curve", scalars);
    }

    fn push_flow(&mut self, tag: &str, items: impl Iterator<Item = String>) {
        self.out.push_str(tag);
        self.out.push_str(" [");
        for (index, item) in items.enumerate() {
            if index > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str(&item);
        }
        self.out.push(']');
    }
}
