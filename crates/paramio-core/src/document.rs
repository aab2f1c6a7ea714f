//! The DOC value model: a generic tagged-value document.
//!
//! Unlike PARAM, DOC keys are plain strings and hashes are kept in
//! lexicographic order, which makes emission canonical by construction.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A DOC value: scalars at several numeric widths, arrays and hashes.
/// Values are immutable once produced by a reader; a document owns its
/// entire subtree.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DocValue {
    #[default]
    Null,
    String(String),
    Array(Vec<DocValue>),
    Hash(BTreeMap<String, DocValue>),
    Bool(bool),
    Int(i32),
    Float(f32),
    UInt(u32),
    Int64(i64),
    UInt64(u64),
    Double(f64),
}

/// Discriminator for [`DocValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocType {
    Null,
    String,
    Array,
    Hash,
    Bool,
    Int,
    Float,
    UInt,
    Int64,
    UInt64,
    Double,
}

impl DocType {
    pub(crate) fn name(self) -> &'static str {
        match self {
            DocType::Null => "null",
            DocType::String => "string",
            DocType::Array => "array",
            DocType::Hash => "hash",
            DocType::Bool => "bool",
            DocType::Int => "int",
            DocType::Float => "float",
            DocType::UInt => "uint",
            DocType::Int64 => "int64",
            DocType::UInt64 => "uint64",
            DocType::Double => "double",
        }
    }
}

impl DocValue {
    pub fn get_type(&self) -> DocType {
        match self {
            DocValue::Null => DocType::Null,
            DocValue::String(_) => DocType::String,
            DocValue::Array(_) => DocType::Array,
            DocValue::Hash(_) => DocType::Hash,
            DocValue::Bool(_) => DocType::Bool,
            DocValue::Int(_) => DocType::Int,
            DocValue::Float(_) => DocType::Float,
            DocValue::UInt(_) => DocType::UInt,
            DocValue::Int64(_) => DocType::Int64,
            DocValue::UInt64(_) => DocType::UInt64,
            DocValue::Double(_) => DocType::Double,
        }
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::TypeMismatch {
            expected,
            actual: self.get_type().name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DocValue::Null)
    }

    pub fn as_hash(&self) -> Result<&BTreeMap<String, DocValue>> {
        match self {
            DocValue::Hash(map) => Ok(map),
            other => Err(other.mismatch("hash")),
        }
    }

    pub fn as_array(&self) -> Result<&[DocValue]> {
        match self {
            DocValue::Array(values) => Ok(values),
            other => Err(other.mismatch("array")),
        }
    }

    pub fn as_string(&self) -> Result<&str> {
        match self {
            DocValue::String(value) => Ok(value),
            other => Err(other.mismatch("string")),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            DocValue::Bool(value) => Ok(*value),
            other => Err(other.mismatch("bool")),
        }
    }

    // The numeric getters mirror the original library's behavior: lossless
    // widening between the integer variants is performed automatically,
    // anything else is a type mismatch.

    pub fn as_int(&self) -> Result<i32> {
        match self {
            DocValue::Int(value) => Ok(*value),
            DocValue::UInt(value) => i32::try_from(*value).map_err(|_| self.mismatch("int")),
            other => Err(other.mismatch("int")),
        }
    }

    pub fn as_uint(&self) -> Result<u32> {
        match self {
            DocValue::UInt(value) => Ok(*value),
            DocValue::Int(value) => u32::try_from(*value).map_err(|_| self.mismatch("uint")),
            other => Err(other.mismatch("uint")),
        }
    }

    pub fn as_int64(&self) -> Result<i64> {
        match self {
            DocValue::Int64(value) => Ok(*value),
            DocValue::Int(value) => Ok(i64::from(*value)),
            DocValue::UInt(value) => Ok(i64::from(*value)),
            DocValue::UInt64(value) => i64::try_from(*value).map_err(|_| self.mismatch("int64")),
            other => Err(other.mismatch("int64")),
        }
    }

    pub fn as_uint64(&self) -> Result<u64> {
        match self {
            DocValue::UInt64(value) => Ok(*value),
            DocValue::UInt(value) => Ok(u64::from(*value)),
            DocValue::Int(value) => u64::try_from(*value).map_err(|_| self.mismatch("uint64")),
            DocValue::Int64(value) => u64::try_from(*value).map_err(|_| self.mismatch("uint64")),
            other => Err(other.mismatch("uint64")),
        }
    }

    pub fn as_float(&self) -> Result<f32> {
        match self {
            DocValue::Float(value) => Ok(*value),
            other => Err(other.mismatch("float")),
        }
    }

    pub fn as_double(&self) -> Result<f64> {
        match self {
            DocValue::Double(value) => Ok(*value),
            DocValue::Float(value) => Ok(f64::from(*value)),
            other => Err(other.mismatch("double")),
        }
    }
}

macro_rules! from_impl {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for DocValue {
            fn from(value: $ty) -> Self {
                DocValue::$variant(value)
            }
        }
    };
}

from_impl!(String, String);
from_impl!(Vec<DocValue>, Array);
from_impl!(BTreeMap<String, DocValue>, Hash);
from_impl!(bool, Bool);
from_impl!(i32, Int);
from_impl!(f32, Float);
from_impl!(u32, UInt);
from_impl!(i64, Int64);
from_impl!(u64, UInt64);
from_impl!(f64, Double);

impl From<&str> for DocValue {
    fn from(value: &str) -> Self {
        DocValue::String(value.to_string())
    }
}
