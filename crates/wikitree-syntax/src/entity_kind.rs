//! EntityKind enum for every node the wikitext tree can contain.
//!
//! The set is closed: the scanner only ever produces these kinds, and the
//! tree builder never invents new ones.

use std::fmt;

/// All entity kinds in the wikitext tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    /// The whole document
    Root,
    /// Top-level plain text between constructs
    Text,
    /// `'''bold'''`
    TextBold,
    /// `''italic''`
    TextItalic,
    /// `'''''bold italic'''''`, or a five-quote run that was never resolved
    TextBoldItalic,
    /// `== heading ==`
    Heading2,
    /// `=== heading ===`
    Heading3,
    /// `==== heading ====`
    Heading4,
    /// `===== heading =====`
    Heading5,
    /// `[https://example.org label]`
    LinkExternal,
    /// `[[Page|label]]`
    LinkInternal,
    /// Target part of an internal link
    LinkInternalName,
    /// `|label` part of an internal link
    LinkInternalProp,
    /// `{{name|arg}}`
    Template,
    /// Name part of a template
    TemplateName,
    /// `|arg` part of a template
    TemplateProp,
    /// Self-closing tag `<br />`
    Tag,
    /// Opening tag `<ref name="x">`
    TagOpen,
    /// Attribute text of a tag
    TagAttributes,
    /// Closing tag `</ref>`
    TagClose,
    /// `* item`
    ListBulleted,
    /// `# item`
    ListNumbered,
    /// `~~~`
    Signature,
    /// `~~~~`
    SignatureTimestamp,
    /// `: indented`
    Indent,
    /// `----`
    HorizontalRule,
}

impl EntityKind {
    /// Returns true for the three apostrophe-delimited kinds.
    pub fn is_emphasis(self) -> bool {
        matches!(
            self,
            Self::TextBold | Self::TextItalic | Self::TextBoldItalic
        )
    }

    /// Returns true for Heading2..Heading5.
    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }

    /// The heading level (2-5), or `None` for non-heading kinds.
    pub fn heading_level(self) -> Option<usize> {
        match self {
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            Self::Heading4 => Some(4),
            Self::Heading5 => Some(5),
            _ => None,
        }
    }

    /// The heading kind for a level, clamped into 2..=5.
    pub fn heading(level: usize) -> Self {
        match level {
            0..=2 => Self::Heading2,
            3 => Self::Heading3,
            4 => Self::Heading4,
            _ => Self::Heading5,
        }
    }

    /// Returns true for kinds opened by a line-leading `*`, `#` or `:`.
    pub fn is_line_item(self) -> bool {
        matches!(
            self,
            Self::ListBulleted | Self::ListNumbered | Self::Indent
        )
    }

    /// Maps a line-leading marker byte to the kind it opens.
    pub fn from_list_marker(byte: u8) -> Option<Self> {
        match byte {
            b'*' => Some(Self::ListBulleted),
            b'#' => Some(Self::ListNumbered),
            b':' => Some(Self::Indent),
            _ => None,
        }
    }

    /// The marker byte of a line item kind.
    pub fn list_marker(self) -> Option<u8> {
        match self {
            Self::ListBulleted => Some(b'*'),
            Self::ListNumbered => Some(b'#'),
            Self::Indent => Some(b':'),
            _ => None,
        }
    }

    /// Returns true for the tag kinds that can carry attributes.
    pub fn is_tag(self) -> bool {
        matches!(self, Self::Tag | Self::TagOpen)
    }

    /// Returns true for the Name/Prop parts of a template.
    pub fn is_template_part(self) -> bool {
        matches!(self, Self::TemplateName | Self::TemplateProp)
    }

    /// Returns true for the Name/Prop parts of an internal link.
    pub fn is_link_part(self) -> bool {
        matches!(self, Self::LinkInternalName | Self::LinkInternalProp)
    }

    /// Kinds that never have children and whose text equals their raw bytes.
    pub fn is_atomic(self) -> bool {
        matches!(
            self,
            Self::Signature | Self::SignatureTimestamp | Self::HorizontalRule | Self::TagAttributes
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(b'*', EntityKind::ListBulleted)]
    #[case(b'#', EntityKind::ListNumbered)]
    #[case(b':', EntityKind::Indent)]
    fn list_markers_map_both_ways(#[case] marker: u8, #[case] kind: EntityKind) {
        assert_eq!(EntityKind::from_list_marker(marker), Some(kind));
        assert_eq!(kind.list_marker(), Some(marker));
        assert!(kind.is_line_item());
    }

    #[test]
    fn other_bytes_are_not_list_markers() {
        assert_eq!(EntityKind::from_list_marker(b'-'), None);
        assert_eq!(EntityKind::from_list_marker(b';'), None);
    }

    #[rstest]
    #[case(2, EntityKind::Heading2)]
    #[case(3, EntityKind::Heading3)]
    #[case(4, EntityKind::Heading4)]
    #[case(5, EntityKind::Heading5)]
    #[case(6, EntityKind::Heading5)]
    fn heading_levels(#[case] level: usize, #[case] kind: EntityKind) {
        assert_eq!(EntityKind::heading(level), kind);
        assert_eq!(kind.heading_level(), Some(level.min(5)));
    }

    #[test]
    fn emphasis_detection() {
        assert!(EntityKind::TextBold.is_emphasis());
        assert!(EntityKind::TextItalic.is_emphasis());
        assert!(EntityKind::TextBoldItalic.is_emphasis());
        assert!(!EntityKind::Text.is_emphasis());
        assert!(!EntityKind::Template.is_heading());
    }

    #[test]
    fn display_uses_variant_name() {
        assert_eq!(EntityKind::LinkInternalProp.to_string(), "LinkInternalProp");
    }
}
