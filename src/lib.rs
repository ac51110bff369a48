//! docx2tex: semantic .docx to LaTeX conversion
//!
//! This library converts Word manuscripts into semantically tagged LaTeX
//! for a scholarly-publishing toolchain: named styles and direct formatting
//! resolve to heading, bold and italic macros, tables become documentation
//! environments, footnotes are inlined at their reference points, and a
//! deterministic normalization pipeline produces typographically correct
//! output. The reverse direction extracts footnote text back out of the
//! produced LaTeX.

pub mod document;
pub mod latex;

use std::path::Path;

use anyhow::Result;

// Re-export commonly used types
pub use document::{load_document, ConversionReport, ConvertOptions, Document};
pub use latex::{extract_footnotes, render_latex};

/// Convert a .docx file to LaTeX in one call.
pub fn convert_file(path: &Path, options: &ConvertOptions) -> Result<(String, ConversionReport)> {
    let document = load_document(path)?;
    Ok(render_latex(&document, options))
}
