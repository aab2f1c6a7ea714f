//! # paramio-core
//!
//! Reader and writer for two Nintendo-originated parameter container
//! formats: a hierarchical parameter archive (**PARAM**, the `aamp` family)
//! and a generic tagged-value document (**DOC**, the `byml` family). Both
//! translate to and from a human-editable YAML text form that preserves
//! every distinguishable binary type through tag annotations, and PARAM
//! emission recovers human-readable key names from their CRC32 hashes.
//!
//! ## Quick start
//!
//! ```rust
//! use paramio_core::ParamDoc;
//!
//! let text = "!io\nversion: 0\ntype: \"xlink\"\nparam_root: !list\n  objects: {}\n  lists: {}\n";
//! let doc = ParamDoc::from_text(text).unwrap();
//! assert_eq!(doc.version, 0);
//! assert_eq!(doc.to_text(), text);
//! ```
//!
//! ## Modules
//!
//! - [`param`] — the PARAM value model (documents, lists, objects, the
//!   20-variant parameter union)
//! - [`document`] — the DOC value model
//! - [`names`] — hash-to-name recovery and the process-wide default table
//! - [`tags`] — the tag vocabulary shared by readers and emitters
//! - [`yaml`] — the YAML subset both text forms are built on
//! - [`types`] — bounded strings, vectors, colors, quaternions, curves
//! - [`hash`] — CRC32 of parameter names
//! - [`error`] — error types

pub mod document;
pub mod error;
pub mod hash;
pub mod names;
pub mod param;
pub mod tags;
pub mod types;
pub mod yaml;

mod document_text;
mod param_text;

pub use document::{DocType, DocValue};
pub use error::{Error, Result};
pub use names::{default_name_table, NameTable};
pub use param::{Name, ParamDoc, ParamList, ParamMap, ParamObject, ParamType, Parameter};
pub use types::{
    Color4f, Curve, FixedStr, FixedStr256, FixedStr32, FixedStr64, Quatf, Vector2f, Vector3f,
    Vector4f,
};
