//! File I/O operations and validation
//!
//! This module handles archive validation and extraction of the named XML
//! parts from a .docx package. The archive handle is acquired, read, and
//! released here before any rendering begins.

use anyhow::{bail, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

/// Errors with a defined recovery policy.
///
/// Missing optional parts never surface here; they are reported as `None` by
/// [`read_part`] and recovered as an empty catalog or index by the caller.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document body part is absent. Fatal; no partial output is written.
    #[error("missing required part: {0}")]
    MissingPart(&'static str),
    /// A present part could not be parsed as XML. Fatal.
    #[error("malformed XML: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for DocumentError {
    fn from(err: quick_xml::Error) -> Self {
        DocumentError::Xml(err.to_string())
    }
}

/// Validates that the file is a legitimate .docx package
pub(crate) fn validate_docx_file(file_path: &Path) -> Result<()> {
    // Check file extension
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if extension != "docx" {
        bail!(
            "Invalid file format. Expected .docx file, got .{}\n\
            Note: docx2tex only supports Word .docx files (not .doc, .xlsx, .zip, etc.)",
            extension
        );
    }

    // Check ZIP structure contains word/document.xml
    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    if archive.by_name("word/document.xml").is_err() {
        // Check if it might be an Excel file
        if archive.by_name("xl/workbook.xml").is_ok() {
            bail!(
                "This appears to be an Excel file (.xlsx).\n\
                docx2tex only supports Word documents (.docx)."
            );
        }

        bail!(
            "Invalid .docx file: missing word/document.xml\n\
            This file may be corrupted or is not a valid Word document."
        );
    }

    Ok(())
}

/// Read a named XML part from the package as UTF-8 text.
///
/// Returns `Ok(None)` when the part does not exist: the footnotes and styles
/// parts are optional and their absence is not an error.
pub(crate) fn read_part(archive: &mut ZipArchive<File>, name: &str) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut part) => {
            let mut contents = String::new();
            part.read_to_string(&mut contents)?;
            Ok(Some(contents))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, parts: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, data) in parts {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("document.txt");
        std::fs::write(&path, "not a docx").unwrap();
        assert!(validate_docx_file(&path).is_err());
    }

    #[test]
    fn rejects_archive_without_document_part() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        write_archive(&path, &[("word/styles.xml", "<w:styles/>")]);
        assert!(validate_docx_file(&path).is_err());
    }

    #[test]
    fn missing_part_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.docx");
        write_archive(&path, &[("word/document.xml", "<w:document/>")]);

        let file = File::open(&path).unwrap();
        let mut archive = ZipArchive::new(file).unwrap();
        assert!(read_part(&mut archive, "word/footnotes.xml")
            .unwrap()
            .is_none());
        assert_eq!(
            read_part(&mut archive, "word/document.xml").unwrap(),
            Some("<w:document/>".to_string())
        );
    }
}
