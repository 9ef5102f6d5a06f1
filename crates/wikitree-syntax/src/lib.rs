//! # wikitree-syntax
//!
//! A position-exact syntax tree for MediaWiki wikitext.
//!
//! ## What Does the Tree Keep?
//!
//! Every entity records two byte ranges of the source:
//!
//! - **raw**: the construct with its delimiters (`'''Bold'''`, `{{name|x}}`)
//! - **text**: the construct without them (`Bold`, `name|x`)
//!
//! plus its **position**, the offset of its raw bytes from the start of its
//! parent's raw bytes. A subtree can be cut out of the source and re-scanned
//! on its own, and any entity can be sliced back out of the buffer without
//! parsing again. Nothing is rendered, expanded or resolved.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Bytes → Scanner → Events → Parser → Entity Tree
//!                (state machine)    (tree builder + heading sections)
//! ```
//!
//! ### 1. Scanner ([`scanner`] module)
//!
//! A byte-at-a-time state machine with a construct stack and a continuation
//! stack. It cuts the buffer into top-level spans and reports each construct
//! it opens and closes:
//!
//! ```text
//! "'''a''' b" → [Open(TextBold), Close(TextBold), Boundary(0..7),
//!                Open(Text), Close(Text), Boundary(7..9)]
//! ```
//!
//! ### 2. Parser ([`parser`] module)
//!
//! Consumes the events and builds [`Entity`] nodes. Top-level entities are
//! re-parented under the heading whose section they belong to.
//!
//! ## Module Structure
//!
//! ```text
//! wikitree-syntax/
//! ├── lib.rs           # This file - public API and integration tests
//! ├── entity_kind.rs   # EntityKind enum
//! ├── span.rs          # Byte ranges
//! ├── entity.rs        # Entity, Document, EntityRef
//! ├── error.rs         # SyntaxError
//! ├── tree.rs          # Text rendering
//! ├── scanner/
//! │   ├── mod.rs       # Scanner struct, stacks, span loop
//! │   ├── event.rs     # Event enum (Open, Close, Split, Boundary)
//! │   ├── block.rs     # Lists, indents, headings, rules
//! │   └── inline.rs    # Text, emphasis, templates, links, tags, signatures
//! └── parser/
//!     ├── mod.rs       # Tree builder, public parse() functions
//!     └── sections.rs  # Heading section table
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use wikitree_syntax::{parse_from_text, EntityKind};
//!
//! let doc = parse_from_text("'''''Any''' may apply.''").unwrap();
//!
//! let italic = doc.root().children().next().unwrap();
//! assert_eq!(italic.kind(), EntityKind::TextItalic);
//! assert_eq!(italic.text_str(), "'''Any''' may apply.");
//!
//! let bold = italic.children().next().unwrap();
//! assert_eq!(bold.kind(), EntityKind::TextBold);
//! assert_eq!(bold.text_str(), "Any");
//! ```
//!
//! ## Diagnostics
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade only:
//! state decisions at `trace`, auto-closed constructs at `debug`. It never
//! installs a logger.

pub mod entity;
pub mod entity_kind;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod span;
pub mod tree;

pub use entity::{Document, Entity, EntityRef};
pub use entity_kind::EntityKind;
pub use error::SyntaxError;
pub use parser::{parse, parse_from_text, parse_tree};
pub use span::Span;
pub use tree::{FormatOptions, format_tree};
