//! End-to-end conversion tests driving the public API against fixture
//! packages built on the fly.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use docx2tex::{convert_file, ConvertOptions};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn write_docx(dir: &TempDir, parts: &[(&str, &str)]) -> PathBuf {
    let path = dir.path().join("fixture.docx");
    let file = File::create(&path).expect("create fixture archive");
    let mut writer = zip::ZipWriter::new(file);
    for (name, data) in parts {
        writer
            .start_file(name.to_string(), SimpleFileOptions::default())
            .expect("start archive entry");
        writer.write_all(data.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish archive");
    path
}

fn document_part(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    )
}

const STYLES_PART: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:pPr><w:outlineLvl w:val="0"/></w:pPr>
    <w:rPr><w:b/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="ListItem">
    <w:pPr><w:numPr><w:ilvl w:val="0"/></w:numPr></w:pPr>
  </w:style>
</w:styles>"#;

#[test]
fn plain_paragraph_converts_without_markup() {
    let dir = TempDir::new().unwrap();
    let body = r#"<w:p><w:r><w:t>Hello world</w:t></w:r></w:p>"#;
    let path = write_docx(&dir, &[("word/document.xml", &document_part(body))]);

    let (latex, report) = convert_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(latex, "Hello world\n\n");
    assert_eq!(report.footnotes, 0);
    assert_eq!(report.sections, 0);
}

#[test]
fn headings_and_lists_assemble() {
    let dir = TempDir::new().unwrap();
    let body = r#"
        <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Intro</w:t></w:r></w:p>
        <w:p><w:pPr><w:pStyle w:val="ListItem"/></w:pPr><w:r><w:t>one</w:t></w:r></w:p>
        <w:p><w:pPr><w:pStyle w:val="ListItem"/></w:pPr><w:r><w:t>two</w:t></w:r></w:p>
        <w:p><w:r><w:t>done</w:t></w:r></w:p>"#;
    let path = write_docx(
        &dir,
        &[
            ("word/document.xml", &document_part(body)),
            ("word/styles.xml", STYLES_PART),
        ],
    );

    let (latex, report) = convert_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(
        latex,
        "\\section{Intro}\n\n\\begin{itemize}\n\\item one\n\\item two\n\\end{itemize}\n\ndone\n\n"
    );
    assert_eq!(report.sections, 1);
    assert_eq!(report.lists, 2);
    // Heading1 is also bold, but section status suppresses the wrapper.
    assert_eq!(report.bold, 0);
}

#[test]
fn list_item_with_direct_italic_closes_inside_the_item() {
    let dir = TempDir::new().unwrap();
    // The emph wrapper from direct formatting must close before the item
    // token does, or the brace crosses the itemize boundary.
    let body = r#"<w:p>
        <w:pPr><w:pStyle w:val="ListItem"/><w:rPr><w:i/></w:rPr></w:pPr>
        <w:r><w:t>entry</w:t></w:r>
      </w:p>"#;
    let path = write_docx(
        &dir,
        &[
            ("word/document.xml", &document_part(body)),
            ("word/styles.xml", STYLES_PART),
        ],
    );

    let (latex, report) = convert_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(latex, "\\begin{itemize}\n\\item \\emph{entry}\n\\end{itemize}\n\n");
    assert_eq!(report.lists, 1);
    assert_eq!(report.italic, 1);
}

#[test]
fn two_by_two_table_rows_end_with_row_terminators() {
    let dir = TempDir::new().unwrap();
    let cell = |text: &str| format!("<w:tc><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:tc>");
    let body = format!(
        "<w:tbl><w:tr>{}{}</w:tr><w:tr>{}{}</w:tr></w:tbl>",
        cell("a"),
        cell("b"),
        cell("c"),
        cell("d")
    );
    let path = write_docx(&dir, &[("word/document.xml", &document_part(&body))]);

    let (latex, report) = convert_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(
        latex,
        "\n\n\\begin{documentation}\na & \nb \\\\ \n\nc & \nd \\\\ \n\n\\end{documentation}\n\n"
    );
    assert_eq!(report.documentations, 1);
    assert_eq!(report.documentation_rows, 2);
}

#[test]
fn entities_decode_then_escape() {
    let dir = TempDir::new().unwrap();
    let body = r#"<w:p><w:r><w:t>100% &amp; &lt;x&gt;</w:t></w:r></w:p>"#;
    let path = write_docx(&dir, &[("word/document.xml", &document_part(body))]);

    let (latex, _) = convert_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(latex, "100\\,\\% \\& <x>\n\n");
}

#[test]
fn digit_dash_runs_follow_the_single_hyphen_rule() {
    let dir = TempDir::new().unwrap();
    let body = r#"<w:p><w:r><w:t>pages 12-34 and 1-2-3</w:t></w:r></w:p>"#;
    let path = write_docx(&dir, &[("word/document.xml", &document_part(body))]);

    let (latex, _) = convert_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(latex, "pages 12--34 and 1-2-3\n\n");
}

#[test]
fn cjk_runs_wrap_at_script_transitions() {
    let dir = TempDir::new().unwrap();
    let body = r#"<w:p><w:r><w:t>中文 and latin 漢字</w:t></w:r></w:p>"#;
    let path = write_docx(&dir, &[("word/document.xml", &document_part(body))]);

    let (latex, _) = convert_file(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(latex, "\\zhs{中文} and latin \\zhs{漢字}\n\n");
}

#[test]
fn missing_document_part_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(&dir, &[("word/styles.xml", STYLES_PART)]);
    assert!(convert_file(&path, &ConvertOptions::default()).is_err());
}

#[test]
fn unresolved_footnote_reference_degrades_with_warning() {
    let dir = TempDir::new().unwrap();
    let body = r#"<w:p><w:r><w:t>claim</w:t><w:footnoteReference w:id="9"/></w:r></w:p>"#;
    let path = write_docx(&dir, &[("word/document.xml", &document_part(body))]);

    let (latex, report) = convert_file(&path, &ConvertOptions::default()).unwrap();
    assert!(latex.contains(r#"<zchinr:fnref id="9"/>"#));
    assert_eq!(report.unresolved_footnotes, vec!["9".to_string()]);
}
