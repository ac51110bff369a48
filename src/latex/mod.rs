//! LaTeX emission module
//!
//! Renders the parsed document tree to semantic LaTeX: tree rendering with
//! placeholder tokens, footnote inlining, and the ordered text-normalization
//! passes. Also hosts the reverse footnote extractor.

pub(crate) mod extract;
pub(crate) mod normalize;
pub(crate) mod render;

pub use extract::extract_footnotes;
pub use render::{FootnoteIndex, Renderer};

use crate::document::models::{ConversionReport, ConvertOptions, Document};

/// Render a loaded document to its final LaTeX form.
///
/// Builds the footnote index first (footnote bodies render with reference
/// expansion disabled), walks the body, substitutes footnote references,
/// and runs the normalization passes.
pub fn render_latex(document: &Document, options: &ConvertOptions) -> (String, ConversionReport) {
    let mut renderer = Renderer::new(&document.styles, options.clone());
    let index = FootnoteIndex::build(&document.footnotes, &mut renderer);
    let rendered = renderer.render_body(&document.body);

    let mut report = renderer.into_report();
    report.footnotes = index.len();

    let resolved = render::substitute_footnotes(&rendered, &index, &mut report);
    (normalize::normalize(&resolved), report)
}
