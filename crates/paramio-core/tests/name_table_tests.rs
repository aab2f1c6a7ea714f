//! Name table behavior: known-name lookup, the parent-guided recovery
//! heuristic, the numbered-template fallback, memoization, and the
//! process-wide default table.

use paramio_core::{default_name_table, hash::crc32, NameTable};

fn lookup_owned(table: &mut NameTable, hash: u32, index: usize, parent: u32) -> Option<String> {
    table.lookup(hash, index, parent).map(str::to_string)
}

// ============================================================================
// Known names
// ============================================================================

#[test]
fn added_references_resolve_by_their_crc32() {
    let mut table = NameTable::new(false);
    table.add_reference("Speed");
    assert_eq!(lookup_owned(&mut table, crc32(b"Speed"), 0, 0).as_deref(), Some("Speed"));
}

#[test]
fn unknown_hashes_resolve_to_none() {
    let mut table = NameTable::new(false);
    assert_eq!(table.lookup(0xDEAD_BEEF, 0, 0), None);
}

#[test]
fn default_table_knows_the_embedded_dictionary() {
    let mut table = default_name_table()
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    assert_eq!(table.lookup(crc32(b"Enemy"), 0, 0), Some("Enemy"));
    assert_eq!(table.lookup(crc32(b"Speed"), 0, 0), Some("Speed"));
}

// ============================================================================
// Parent-guided recovery
// ============================================================================

#[test]
fn recovers_from_the_parent_name_itself() {
    let mut table = NameTable::new(false);
    table.add_reference("Node");
    let hash = crc32(b"Node_00");
    assert_eq!(
        lookup_owned(&mut table, hash, 0, crc32(b"Node")).as_deref(),
        Some("Node_00")
    );
}

#[test]
fn ordinal_window_includes_the_next_index() {
    // At ordinal 0 both i=0 and i=1 are tried.
    let mut table = NameTable::new(false);
    table.add_reference("Item");
    let hash = crc32(b"Item1");
    assert_eq!(
        lookup_owned(&mut table, hash, 0, crc32(b"Item")).as_deref(),
        Some("Item1")
    );
}

#[test]
fn recovers_through_the_children_prefix() {
    let mut table = NameTable::new(false);
    table.add_reference("Enemies");
    let hash = crc32(b"Children0");
    assert_eq!(
        lookup_owned(&mut table, hash, 0, crc32(b"Enemies")).as_deref(),
        Some("Children0")
    );
}

#[test]
fn recovers_by_stripping_plural_and_list_suffixes() {
    let mut table = NameTable::new(false);
    table.add_reference("ItemList");
    let hash = crc32(b"Item_03");
    assert_eq!(
        lookup_owned(&mut table, hash, 2, crc32(b"ItemList")).as_deref(),
        Some("Item_03")
    );

    let mut table = NameTable::new(false);
    table.add_reference("Boxes");
    let hash = crc32(b"Box_01");
    assert_eq!(
        lookup_owned(&mut table, hash, 0, crc32(b"Boxes")).as_deref(),
        Some("Box_01")
    );
}

#[test]
fn unknown_parent_defeats_the_heuristic() {
    let mut table = NameTable::new(false);
    let hash = crc32(b"Item_03");
    assert_eq!(table.lookup(hash, 2, crc32(b"ItemList")), None);
}

#[test]
fn recovered_names_are_memoized() {
    let mut table = NameTable::new(false);
    table.add_reference("Node");
    let hash = crc32(b"Node_02");
    assert_eq!(
        lookup_owned(&mut table, hash, 1, crc32(b"Node")).as_deref(),
        Some("Node_02")
    );
    // Positional context no longer needed once the name is owned.
    assert_eq!(lookup_owned(&mut table, hash, 0, 0).as_deref(), Some("Node_02"));
}

// ============================================================================
// Numbered-template fallback
// ============================================================================

#[test]
fn numbered_templates_cover_the_index_window() {
    // "AI_%d" is in the embedded numbered-name list; indices below
    // index + 2 are tried even with no parent context.
    let mut table = default_name_table()
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let hash = crc32(b"AI_3");
    assert_eq!(table.lookup(hash, 2, 0), Some("AI_3"));
    // Out of window: AI_9 at ordinal 2 would need i = 9 < 4.
    assert_eq!(table.lookup(crc32(b"AI_9"), 2, 0), None);
}

// ============================================================================
// Coexisting tables and concurrency
// ============================================================================

#[test]
fn extra_table_and_default_table_coexist() {
    let mut extra = NameTable::new(false);
    extra.add_reference("DocumentLocalName");
    let hash = crc32(b"DocumentLocalName");

    assert_eq!(
        lookup_owned(&mut extra, hash, 0, 0).as_deref(),
        Some("DocumentLocalName")
    );
    let mut default = default_name_table()
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    assert_eq!(default.lookup(hash, 0, 0), None);
    assert_eq!(default.lookup(crc32(b"Enemy"), 0, 0), Some("Enemy"));
}

#[test]
fn concurrent_lookups_serialize_on_the_default_table() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let mut table = default_name_table()
                    .lock()
                    .unwrap_or_else(|e| e.into_inner());
                let name = table.lookup(crc32(b"AI_1"), i % 4, 0).map(str::to_string);
                drop(table);
                name
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("AI_1"));
    }
}
