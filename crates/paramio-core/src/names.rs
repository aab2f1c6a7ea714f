//! Hash-to-name recovery for PARAM keys.
//!
//! Binary PARAM files identify every object, list and parameter by the CRC32
//! of its original name. A [`NameTable`] maps hashes back to strings: a flat
//! dictionary of known names, a dictionary of numbered name templates, and a
//! guessing pass that derives candidates from the parent structure's name
//! and the entry's position. Recovered names are memoized so later lookups
//! are cheap.
//!
//! Two tables cooperate during emission: the process-wide default table
//! (preloaded from the embedded dictionaries) and a per-document extra table
//! holding every string the document itself contains.

use std::borrow::Cow;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::hash::crc32;

/// Read-to-end access to an embedded dictionary resource.
pub(crate) fn resource(name: &str) -> Option<&'static str> {
    match name {
        "botw_hashed_names.txt" => Some(include_str!("../data/botw_hashed_names.txt")),
        "botw_numbered_names.txt" => Some(include_str!("../data/botw_numbered_names.txt")),
        _ => None,
    }
}

/// Maps 32-bit name hashes to candidate strings.
pub struct NameTable {
    /// Known names, either borrowed from the embedded dictionary or added
    /// at runtime through [`NameTable::add_reference`].
    names: FxHashMap<u32, Cow<'static, str>>,
    /// Templates with one integer placeholder, tried as a last resort.
    numbered_names: Vec<&'static str>,
    /// Names recovered by guessing, memoized across lookups.
    owned_names: FxHashMap<u32, String>,
}

impl NameTable {
    /// Creates a table, optionally preloaded with the embedded dictionaries.
    pub fn new(with_botw_names: bool) -> Self {
        let mut table = Self {
            names: FxHashMap::default(),
            numbered_names: Vec::new(),
            owned_names: FxHashMap::default(),
        };
        if with_botw_names {
            if let Some(data) = resource("botw_hashed_names.txt") {
                for name in data.lines().filter(|line| !line.is_empty()) {
                    table.names.insert(crc32(name.as_bytes()), Cow::Borrowed(name));
                }
            }
            if let Some(data) = resource("botw_numbered_names.txt") {
                table.numbered_names.extend(
                    data.lines()
                        .filter(|line| !line.is_empty() && placeholder(line).is_some()),
                );
            }
        }
        table
    }

    /// Adds `(crc32(name), name)` to the known names.
    pub fn add_reference(&mut self, name: &str) {
        self.names
            .insert(crc32(name.as_bytes()), Cow::Owned(name.to_string()));
    }

    /// Resolves a hash to a name given its zero-based position within the
    /// parent structure and the parent's own hash.
    ///
    /// Resolution order is normative: known names, previously recovered
    /// names, guesses derived from the parent's name (the parent name
    /// itself, `"Children"`, and the parent name with a plural or `List`
    /// suffix stripped, each combined with the index and the index plus one
    /// over six numbering patterns), and finally the numbered-name templates
    /// formatted with every index below `index + 2`.
    pub fn lookup(&mut self, hash: u32, index: usize, parent_hash: u32) -> Option<&str> {
        if !self.names.contains_key(&hash) && !self.owned_names.contains_key(&hash) {
            self.recover(hash, index, parent_hash);
        }
        if let Some(name) = self.names.get(&hash) {
            return Some(name);
        }
        self.owned_names.get(&hash).map(String::as_str)
    }

    /// Tries to guess the name for `hash`; a hit lands in `owned_names`.
    fn recover(&mut self, hash: u32, index: usize, parent_hash: u32) {
        if let Some(parent) = self.names.get(&parent_hash).map(|name| name.to_string()) {
            if self.try_prefix(&parent, index, hash) {
                return;
            }
            // Sometimes the parent name is plural and the children singular.
            if self.try_prefix("Children", index, hash) {
                return;
            }
            for suffix in ["s", "es", "List"] {
                if let Some(stripped) = parent.strip_suffix(suffix) {
                    if self.try_prefix(stripped, index, hash) {
                        return;
                    }
                }
            }
        }

        // Last resort: every numbered template, every index in the window.
        for template_idx in 0..self.numbered_names.len() {
            let template = self.numbered_names[template_idx];
            for i in 0..index + 2 {
                let candidate = format_numbered(template, i);
                if crc32(candidate.as_bytes()) == hash {
                    self.owned_names.insert(hash, candidate);
                    return;
                }
            }
        }
    }

    fn try_prefix(&mut self, prefix: &str, index: usize, hash: u32) -> bool {
        for i in [index, index + 1] {
            let candidates = [
                format!("{prefix}{i}"),
                format!("{prefix}_{i}"),
                format!("{prefix}{i:02}"),
                format!("{prefix}_{i:02}"),
                format!("{prefix}{i:03}"),
                format!("{prefix}_{i:03}"),
            ];
            for candidate in candidates {
                if crc32(candidate.as_bytes()) == hash {
                    self.owned_names.insert(hash, candidate);
                    return true;
                }
            }
        }
        false
    }
}

/// Locates the integer placeholder in a numbered-name template.
fn placeholder(template: &str) -> Option<(usize, &'static str, usize)> {
    let pos = template.find('%')?;
    let rest = &template[pos + 1..];
    for (marker, width) in [("d", 0), ("02d", 2), ("03d", 3)] {
        if rest.starts_with(marker) {
            return Some((pos, marker, width));
        }
    }
    None
}

/// Substitutes the index into a template's `%d` / `%02d` / `%03d`
/// placeholder. Templates without one are returned unchanged.
fn format_numbered(template: &str, index: usize) -> String {
    match placeholder(template) {
        Some((pos, marker, width)) => {
            let tail = &template[pos + 1 + marker.len()..];
            format!("{}{:0width$}{}", &template[..pos], index, tail)
        }
        None => template.to_string(),
    }
}

static DEFAULT_TABLE: Lazy<Mutex<NameTable>> = Lazy::new(|| Mutex::new(NameTable::new(true)));

/// The process-wide name table, preloaded with the embedded dictionaries on
/// first use. Lock it for the duration of each lookup; recovered names are
/// memoized inside, so the table is effectively read-mostly.
pub fn default_name_table() -> &'static Mutex<NameTable> {
    &DEFAULT_TABLE
}
