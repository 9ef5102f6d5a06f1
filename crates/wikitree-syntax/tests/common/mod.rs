// Shared helpers for the integration tests. Each test binary uses a
// different subset of them.
#![allow(dead_code)]

use wikitree_syntax::scanner::Scanner;
use wikitree_syntax::{Document, Entity, EntityKind};

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}.wiki", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path}: {e}"))
}

pub fn fixture_names() -> Vec<&'static str> {
    vec!["article", "talk", "messy"]
}

/// Check the structural invariants of a parsed document, panicking with a
/// description of the first violation.
pub fn check_invariants(doc: &Document) {
    let source = doc.source();
    let root = doc.root_entity();
    assert_eq!(root.kind, EntityKind::Root);
    assert_eq!(root.position, 0);
    assert_eq!(root.raw_in(source), source, "root raw must be the whole input");

    for entity in root.descendants() {
        assert!(
            entity.raw.contains(entity.text),
            "{:?} text {:?} escapes raw {:?}",
            entity.kind,
            entity.text,
            entity.raw
        );
        if entity.kind.is_atomic() {
            assert!(entity.children.is_empty(), "{:?} must be childless", entity.kind);
        }
        check_children(source, entity);
    }
}

fn check_children(source: &[u8], parent: &Entity) {
    let section = parent.section().len();
    let inline = parent.children.len() - section;

    let mut last_end = parent.raw.start;
    for (index, child) in parent.children.iter().enumerate() {
        let start = parent.raw.start + child.position;
        let located = source.get(start..start + child.raw.len());
        assert_eq!(
            located,
            Some(child.raw_in(source)),
            "{:?} at position {} does not locate its raw bytes under {:?}",
            child.kind,
            child.position,
            parent.kind
        );
        if index < inline {
            assert!(
                parent.raw.contains(child.raw),
                "{:?} {:?} is outside its parent {:?} {:?}",
                child.kind,
                child.raw,
                parent.kind,
                parent.raw
            );
        }
        assert!(
            child.raw.start >= last_end,
            "{:?} at {} overlaps its previous sibling",
            child.kind,
            child.raw.start
        );
        last_end = child.raw.end;
    }
}

/// The scanner's spans concatenate back to the input, and the top-level
/// entities cover everything except line breaks and leading indentation.
pub fn check_exhaustive(doc: &Document) {
    let source = doc.source();
    let spans = Scanner::new(source).collect_spans().unwrap();
    let joined: Vec<u8> = spans.iter().flat_map(|s| s.slice(source).to_vec()).collect();
    assert_eq!(joined, source, "spans must concatenate to the input");

    let mut cursor = 0;
    for entity in doc.top_level() {
        let raw = entity.entity().raw;
        assert!(raw.start >= cursor, "{:?} at {} overlaps", entity.kind(), raw.start);
        let gap = &source[cursor..raw.start];
        assert!(
            gap.iter().all(|b| matches!(b, b'\n' | b' ' | b'\t' | b'\r')),
            "bytes {cursor}..{} before {:?} are not covered: {:?}",
            raw.start,
            entity.kind(),
            String::from_utf8_lossy(gap)
        );
        cursor = raw.end;
    }
    assert!(
        source[cursor..].iter().all(|b| b.is_ascii_whitespace()),
        "trailing bytes from {cursor} are not covered"
    );
}

/// Kinds whose meaning depends on what surrounds them.
pub fn depends_on_context(kind: EntityKind) -> bool {
    kind == EntityKind::Root
        || kind.is_line_item()
        || kind.is_template_part()
        || kind.is_link_part()
        || kind == EntityKind::TagAttributes
}

/// `(kind, text)` pairs of an entity and its inline descendants, in order.
pub fn shape(source: &[u8], entity: &Entity) -> Vec<(EntityKind, Vec<u8>)> {
    let mut out = vec![(entity.kind, entity.text_in(source).to_vec())];
    let inline = entity.children.len() - entity.section().len();
    for child in &entity.children[..inline] {
        out.extend(shape(source, child));
    }
    out
}
