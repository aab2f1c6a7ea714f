//! The tag vocabulary shared by the text readers and emitters.
//!
//! Tags are local (they begin with `!`) and pin a scalar or sequence to one
//! exact leaf variant so the distinction survives the text round trip. An
//! unknown tag on a scalar falls through to shape-based typing; an unknown
//! (or missing) tag on a sequence in parameter position is invalid data.

use crate::document::DocType;
use crate::param::ParamType;
use crate::yaml::TagBasedType;

/// Tag-based scalar typing for PARAM scalars.
pub fn param_scalar_tag_type(tag: &str) -> Option<TagBasedType> {
    match tag {
        "!str32" | "!str64" | "!str256" => Some(TagBasedType::Str),
        "!u" => Some(TagBasedType::Int),
        _ => None,
    }
}

/// Tag-based scalar typing for DOC scalars.
pub fn doc_scalar_tag_type(tag: &str) -> Option<TagBasedType> {
    match tag {
        "!u" | "!l" | "!ul" => Some(TagBasedType::Int),
        "!f64" => Some(TagBasedType::Float),
        _ => None,
    }
}

/// The aggregate a tagged sequence in parameter position parses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqKind {
    Vec2,
    Vec3,
    Vec4,
    Color,
    Quat,
    Curve,
    BufferInt,
    BufferF32,
    BufferU32,
    BufferBinary,
}

pub fn param_seq_kind(tag: &str) -> Option<SeqKind> {
    match tag {
        "!vec2" => Some(SeqKind::Vec2),
        "!vec3" => Some(SeqKind::Vec3),
        "!vec4" => Some(SeqKind::Vec4),
        "!color" => Some(SeqKind::Color),
        "!quat" => Some(SeqKind::Quat),
        "!curve" => Some(SeqKind::Curve),
        "!buffer_int" => Some(SeqKind::BufferInt),
        "!buffer_f32" => Some(SeqKind::BufferF32),
        "!buffer_u32" => Some(SeqKind::BufferU32),
        "!buffer_binary" => Some(SeqKind::BufferBinary),
        _ => None,
    }
}

/// The tag a parameter variant emits with, or `None` for the untagged
/// scalars whose text shape alone round-trips (bool, int, f32, free string).
pub fn param_tag(ty: ParamType) -> Option<&'static str> {
    match ty {
        ParamType::Bool | ParamType::F32 | ParamType::Int | ParamType::String => None,
        ParamType::U32 => Some("!u"),
        ParamType::String32 => Some("!str32"),
        ParamType::String64 => Some("!str64"),
        ParamType::String256 => Some("!str256"),
        ParamType::Vec2 => Some("!vec2"),
        ParamType::Vec3 => Some("!vec3"),
        ParamType::Vec4 => Some("!vec4"),
        ParamType::Color => Some("!color"),
        ParamType::Quat => Some("!quat"),
        ParamType::Curve1 | ParamType::Curve2 | ParamType::Curve3 | ParamType::Curve4 => {
            Some("!curve")
        }
        ParamType::BufferInt => Some("!buffer_int"),
        ParamType::BufferF32 => Some("!buffer_f32"),
        ParamType::BufferU32 => Some("!buffer_u32"),
        ParamType::BufferBinary => Some("!buffer_binary"),
    }
}

/// The tag a DOC variant emits with, or `None` for the default-typed
/// scalars and the collections.
pub fn doc_tag(ty: DocType) -> Option<&'static str> {
    match ty {
        DocType::UInt => Some("!u"),
        DocType::Int64 => Some("!l"),
        DocType::UInt64 => Some("!ul"),
        DocType::Double => Some("!f64"),
        _ => None,
    }
}
