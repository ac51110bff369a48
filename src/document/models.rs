//! Core data structures for document representation
//!
//! This module defines the tree produced by parsing the three XML parts of a
//! .docx package: the document body (paragraphs and tables), the footnote
//! declarations, and the conversion-level options and diagnostics.

use serde::{Deserialize, Serialize};

use super::styles::StyleCatalog;

/// A fully parsed .docx package, ready for rendering.
///
/// The tree and the style catalog live only for the duration of one
/// conversion; nothing is shared between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub body: Vec<BodyNode>,
    pub styles: StyleCatalog,
    pub footnotes: Vec<FootnoteNode>,
}

/// A top-level node of the document body, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BodyNode {
    Paragraph(ParagraphNode),
    Table(TableNode),
}

/// A paragraph: an optional named style, direct formatting applied to this
/// paragraph only, and the runs in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParagraphNode {
    pub style: Option<String>,
    pub properties: DirectProperties,
    pub runs: Vec<RunNode>,
}

/// Formatting set directly on one paragraph, independent of any named style.
///
/// Direct properties are resolved in addition to style-derived properties,
/// never instead of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectProperties {
    pub bold: bool,
    pub italic: bool,
    pub outline_level: Option<u8>,
    pub list_level: Option<u8>,
}

/// A run: an optional named character style, direct bold/italic, and the
/// ordered text fragments and footnote-reference markers it contains.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunNode {
    pub style: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub content: Vec<RunContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunContent {
    /// Raw text as it appeared in the XML; character entities are left
    /// undecoded so the normalizer's decode-then-escape pass sees them.
    Text(String),
    /// A reference to a footnote declaration, by identifier.
    FootnoteReference(String),
}

/// A table: rows of cells of paragraphs. Nested tables are not modeled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableNode {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCell {
    pub paragraphs: Vec<ParagraphNode>,
}

/// A footnote declaration from word/footnotes.xml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootnoteNode {
    pub id: String,
    pub paragraphs: Vec<ParagraphNode>,
}

/// Conversion options.
///
/// Behaviors that drifted across versions of the conversion pipeline are
/// unified here instead of being forked logic.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Wrap list-styled paragraphs in item markers (on by default).
    pub lists: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { lists: true }
    }
}

/// Counters and warnings collected while rendering one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    pub footnotes: usize,
    pub sections: usize,
    pub bold: usize,
    pub italic: usize,
    pub lists: usize,
    pub documentations: usize,
    pub documentation_rows: usize,
    /// Footnote references whose identifier had no declaration; the marker
    /// is left in place in the output.
    pub unresolved_footnotes: Vec<String>,
}

impl ConversionReport {
    /// Human-readable summary, one counter per line.
    pub fn summary(&self) -> String {
        format!(
            "{} footnotes found.\n\
             {} documentations found.\n\
             {} documentation rows found.\n\
             {} bold found.\n\
             {} italic found.\n\
             {} section found.\n\
             {} list found.\n",
            self.footnotes,
            self.documentations,
            self.documentation_rows,
            self.bold,
            self.italic,
            self.sections,
            self.lists,
        )
    }
}
