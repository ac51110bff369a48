//! Document loading and orchestration
//!
//! The main `load_document()` function: validates the package, extracts the
//! three XML parts, and parses them into the in-memory tree. The archive
//! handle is released before any rendering begins.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

use super::io::{read_part, validate_docx_file, DocumentError};
use super::models::Document;
use super::parsing::body::parse_body;
use super::parsing::footnotes::parse_footnotes;
use super::styles::StyleCatalog;

/// Load a .docx package into a [`Document`].
///
/// The document body part is required; missing styles or footnotes parts
/// yield an empty catalog or an empty footnote list, silently.
pub fn load_document(file_path: &Path) -> Result<Document> {
    validate_docx_file(file_path)?;

    let file = File::open(file_path)
        .with_context(|| format!("opening {}", file_path.display()))?;
    let mut archive = ZipArchive::new(file)?;

    let document_xml = read_part(&mut archive, "word/document.xml")?
        .ok_or(DocumentError::MissingPart("word/document.xml"))?;
    let styles_xml = read_part(&mut archive, "word/styles.xml")?;
    let footnotes_xml = read_part(&mut archive, "word/footnotes.xml")?;
    drop(archive);

    let styles = match styles_xml {
        Some(xml) => StyleCatalog::parse(&xml).context("parsing word/styles.xml")?,
        None => StyleCatalog::default(),
    };
    let footnotes = match footnotes_xml {
        Some(xml) => parse_footnotes(&xml).context("parsing word/footnotes.xml")?,
        None => Vec::new(),
    };
    let body = parse_body(&document_xml).context("parsing word/document.xml")?;

    Ok(Document {
        body,
        styles,
        footnotes,
    })
}
