//! Tree rendering
//!
//! Walks the parsed document tree and emits intermediate LaTeX: heading,
//! bold and italic wrappers resolved from the style catalog plus direct
//! properties, and placeholder tokens for list items, table separators and
//! footnote references. The placeholders are resolved to final syntax by
//! the normalizer.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

use crate::document::models::*;
use crate::document::styles::StyleCatalog;

/// Placeholder tokens embedded during tree rendering. One spelling each;
/// the normalizer and the renderer share these constants.
pub(crate) const ITEM_OPEN: &str = "<zchinr:item>";
pub(crate) const ITEM_CLOSE: &str = "</zchinr:item>";
pub(crate) const CELL_SEP: &str = "<zchinr:cellsep/>";
pub(crate) const ROW_SEP: &str = "<zchinr:rowsep/>";

/// Heading macro for an outline level; saturates at the deepest unit.
fn heading_open(level: u8) -> &'static str {
    match level {
        0 => "\\section{",
        1 => "\\subsection{",
        2 => "\\subsubsection{",
        3 => "\\paragraph{",
        _ => "\\subparagraph{",
    }
}

/// Renders paragraphs, tables and whole bodies against one style catalog,
/// accumulating diagnostic counters as it goes.
pub struct Renderer<'a> {
    catalog: &'a StyleCatalog,
    options: ConvertOptions,
    report: ConversionReport,
}

impl<'a> Renderer<'a> {
    pub fn new(catalog: &'a StyleCatalog, options: ConvertOptions) -> Self {
        Self {
            catalog,
            options,
            report: ConversionReport::default(),
        }
    }

    pub fn into_report(self) -> ConversionReport {
        self.report
    }

    /// Render the body's node sequence in document order. Separators are
    /// already embedded by the paragraph and table renderers, so outputs
    /// are concatenated as-is.
    pub fn render_body(&mut self, nodes: &[BodyNode]) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                BodyNode::Paragraph(para) => out.push_str(&self.render_paragraph(para, true)),
                BodyNode::Table(table) => out.push_str(&self.render_table(table)),
            }
        }
        out
    }

    /// Render one paragraph as `prefix + runs + suffix + "\n\n"`.
    ///
    /// Style-derived wrapping is resolved first, then direct properties with
    /// the same rules; both may contribute nested wrappers. Section status
    /// from either source suppresses bold and list wrapping but never
    /// italic. The list-item token is always the outermost wrapper.
    pub fn render_paragraph(&mut self, para: &ParagraphNode, expand_footnotes: bool) -> String {
        let mut before = String::new();
        let mut after = String::new();
        let mut is_section = false;

        if let Some(style) = para.style.as_deref().and_then(|id| self.catalog.get(id)) {
            self.apply_paragraph_formatting(
                &mut before,
                &mut after,
                &mut is_section,
                style.section_level,
                style.bold,
                style.italic,
                style.list_level,
            );
        }
        let direct = &para.properties;
        self.apply_paragraph_formatting(
            &mut before,
            &mut after,
            &mut is_section,
            direct.outline_level,
            direct.bold,
            direct.italic,
            direct.list_level,
        );

        let mut body = String::new();
        for run in &para.runs {
            body.push_str(&self.render_run(run, is_section, expand_footnotes));
        }

        format!("{before}{body}{after}\n\n")
    }

    /// One resolution pass over section/bold/italic/list flags, shared by
    /// the style-derived and the direct-property passes.
    ///
    /// Wrapper closers are inserted at the front of `after` so that closes
    /// mirror the opens in reverse; the item close token is appended at the
    /// end, keeping the item token the outermost wrapper across both passes.
    #[allow(clippy::too_many_arguments)]
    fn apply_paragraph_formatting(
        &mut self,
        before: &mut String,
        after: &mut String,
        is_section: &mut bool,
        section_level: Option<u8>,
        bold: bool,
        italic: bool,
        list_level: Option<u8>,
    ) {
        if let Some(level) = section_level {
            *is_section = true;
            before.push_str(heading_open(level));
            after.insert(0, '}');
            self.report.sections += 1;
        }
        if bold && !*is_section {
            before.push_str("\\textbf{");
            after.insert(0, '}');
            self.report.bold += 1;
        }
        if italic {
            before.push_str("\\emph{");
            after.insert(0, '}');
            self.report.italic += 1;
        }
        if self.options.lists && list_level.is_some() && !*is_section {
            before.insert_str(0, ITEM_OPEN);
            after.push_str(ITEM_CLOSE);
            self.report.lists += 1;
        }
    }

    /// Render one run. Bold is gated by the paragraph's section status;
    /// italic never is. With footnote expansion disabled the reference
    /// markers are suppressed so footnotes cannot nest.
    fn render_run(&mut self, run: &RunNode, is_section: bool, expand_footnotes: bool) -> String {
        let mut before = String::new();
        let mut after = String::new();

        if let Some(style) = run.style.as_deref().and_then(|id| self.catalog.get(id)) {
            if style.bold && !is_section {
                before.push_str("\\textbf{");
                after.push('}');
                self.report.bold += 1;
            }
            if style.italic {
                before.push_str("\\emph{");
                after.push('}');
                self.report.italic += 1;
            }
        }
        if run.bold && !is_section {
            before.push_str("\\textbf{");
            after.push('}');
            self.report.bold += 1;
        }
        if run.italic {
            before.push_str("\\emph{");
            after.push('}');
            self.report.italic += 1;
        }

        let mut text = String::new();
        for content in &run.content {
            match content {
                RunContent::Text(fragment) => text.push_str(fragment),
                RunContent::FootnoteReference(id) => {
                    if expand_footnotes {
                        text.push_str(&footnote_token(id));
                    }
                }
            }
        }

        format!("{before}{text}{after}")
    }

    /// Render a table as a documentation block with cell and row separator
    /// placeholders; no separator trails the last cell of a row, and the
    /// row separator follows every row.
    pub fn render_table(&mut self, table: &TableNode) -> String {
        let mut out = String::from("\n\n\\begin{documentation}\n");

        for row in &table.rows {
            for (index, cell) in row.cells.iter().enumerate() {
                if index > 0 {
                    out.push_str(CELL_SEP);
                }
                for para in &cell.paragraphs {
                    out.push_str(&self.render_paragraph(para, true));
                }
            }
            out.push_str(ROW_SEP);
            self.report.documentation_rows += 1;
        }

        out.push_str("\\end{documentation}\n\n");
        self.report.documentations += 1;
        out
    }
}

/// The placeholder emitted for an unexpanded footnote reference.
fn footnote_token(id: &str) -> String {
    format!("<zchinr:fnref id=\"{id}\"/>")
}

/// Footnote bodies pre-rendered into inline macro text, keyed by identifier.
pub struct FootnoteIndex {
    entries: HashMap<String, String>,
}

impl FootnoteIndex {
    /// Render every footnote body with reference expansion disabled and
    /// wrap it in the footnote macro.
    pub fn build(footnotes: &[FootnoteNode], renderer: &mut Renderer) -> Self {
        let mut entries = HashMap::new();
        for footnote in footnotes {
            let mut body = String::new();
            for para in &footnote.paragraphs {
                body.push_str(&renderer.render_paragraph(para, false));
            }
            entries.insert(footnote.id.clone(), format!("\\footnote{{{body}}}"));
        }
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static FNREF_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<zchinr:fnref id="([^"]*)"/>"#).unwrap());

/// Substitute footnote reference placeholders with the pre-rendered bodies.
///
/// A reference with no matching entry is left in place and recorded as a
/// warning; this is a silent degradation, never a hard failure.
pub(crate) fn substitute_footnotes(
    text: &str,
    index: &FootnoteIndex,
    report: &mut ConversionReport,
) -> String {
    let mut unresolved = Vec::new();
    let resolved = FNREF_TOKEN.replace_all(text, |caps: &Captures| match index.get(&caps[1]) {
        Some(body) => body.to_string(),
        None => {
            unresolved.push(caps[1].to_string());
            caps[0].to_string()
        }
    });
    report.unresolved_footnotes.extend(unresolved);
    resolved.into_owned()
}
