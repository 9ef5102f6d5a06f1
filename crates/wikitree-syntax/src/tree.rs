//! Text rendering of a parsed document, one line per entity.
//!
//! ```text
//! Root@0 "in ''a'' out"
//!   Text@0 "in "
//!   TextItalic@3 "a"
//!   Text@8 " out"
//! ```

use std::collections::BTreeMap;

use crate::entity::{Document, EntityRef};
use crate::entity_kind::EntityKind;

/// What [`format_tree`] prints for each entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Append `@position` after the kind.
    pub show_positions: bool,
    /// Append the raw bytes after the text.
    pub show_raw: bool,
    /// Clip text and raw to this many characters.
    pub max_width: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            show_positions: true,
            show_raw: false,
            max_width: None,
        }
    }
}

pub fn format_tree(doc: &Document, options: &FormatOptions) -> String {
    let mut result = String::new();
    let mut stack = vec![(doc.root(), 0)];
    while let Some((entity, depth)) = stack.pop() {
        format_entity(&mut result, entity, depth, options);
        let children: Vec<_> = entity.children().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }
    result
}

fn format_entity(result: &mut String, entity: EntityRef<'_>, depth: usize, options: &FormatOptions) {
    result.push_str(&"  ".repeat(depth));
    result.push_str(&entity.kind().to_string());
    if options.show_positions {
        result.push_str(&format!("@{}", entity.position()));
    }
    result.push_str(&format!(" {:?}", clip(&entity.text_str(), options.max_width)));
    if options.show_raw {
        result.push_str(&format!(" raw={:?}", clip(&entity.raw_str(), options.max_width)));
    }
    result.push('\n');
}

fn clip(text: &str, max_width: Option<usize>) -> String {
    match max_width {
        Some(max) if text.chars().count() > max => {
            let mut clipped: String = text.chars().take(max).collect();
            clipped.push('…');
            clipped
        }
        _ => text.to_string(),
    }
}

/// Number of entities of each kind, the root excluded.
pub fn kind_counts(doc: &Document) -> BTreeMap<EntityKind, usize> {
    let mut counts = BTreeMap::new();
    for entity in doc.root().descendants().skip(1) {
        *counts.entry(entity.kind()).or_insert(0) += 1;
    }
    counts
}
