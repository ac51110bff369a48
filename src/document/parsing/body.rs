//! Document body parsing
//!
//! Parses word/document.xml into the ordered sequence of paragraph and
//! table nodes, dropping self-closing empty paragraphs up front.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{append_text, attr_value, parse_level};
use crate::document::io::DocumentError;
use crate::document::models::*;

/// Parse the body of the document part into top-level nodes, in document
/// order. Content outside `w:body` is ignored.
pub(crate) fn parse_body(xml: &str) -> Result<Vec<BodyNode>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut nodes = Vec::new();
    let mut in_body = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:body" => in_body = true,
                b"w:p" if in_body => {
                    nodes.push(BodyNode::Paragraph(parse_paragraph(&mut reader)?));
                }
                b"w:tbl" if in_body => {
                    nodes.push(BodyNode::Table(parse_table(&mut reader)?));
                }
                _ => {}
            },
            // Self-closing paragraphs are discarded before rendering.
            Event::End(e) if e.name().as_ref() == b"w:body" => in_body = false,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(nodes)
}

/// Parse one `w:p` element; the reader is positioned just past its start tag.
pub(crate) fn parse_paragraph(
    reader: &mut Reader<&[u8]>,
) -> Result<ParagraphNode, DocumentError> {
    let mut para = ParagraphNode::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:pPr" => parse_paragraph_properties(reader, &mut para)?,
                b"w:r" => para.runs.push(parse_run(reader)?),
                b"w:drawing" | b"w:pict" => skip_element(reader, &e)?,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"w:p" => break,
            Event::Eof => {
                return Err(DocumentError::Xml("unterminated w:p element".into()))
            }
            _ => {}
        }
    }

    Ok(para)
}

/// Collect direct paragraph formatting from `w:pPr`. Toggles inside the
/// nested paragraph-mark `w:rPr` count as paragraph-level formatting.
fn parse_paragraph_properties(
    reader: &mut Reader<&[u8]>,
    para: &mut ParagraphNode,
) -> Result<(), DocumentError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"w:pStyle" => para.style = attr_value(&e, b"w:val"),
                b"w:outlineLvl" => para.properties.outline_level = parse_level(&e),
                b"w:ilvl" => para.properties.list_level = parse_level(&e),
                b"w:b" => para.properties.bold = true,
                b"w:i" => para.properties.italic = true,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"w:pPr" => break,
            Event::Eof => {
                return Err(DocumentError::Xml("unterminated w:pPr element".into()))
            }
            _ => {}
        }
    }

    Ok(())
}

/// Parse one `w:r` element into its formatting and ordered content.
fn parse_run(reader: &mut Reader<&[u8]>) -> Result<RunNode, DocumentError> {
    let mut run = RunNode::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:rPr" => parse_run_properties(reader, &mut run)?,
                b"w:t" => {
                    run.content.push(RunContent::Text(read_text(reader)?));
                }
                b"w:drawing" | b"w:pict" => skip_element(reader, &e)?,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:t" => run.content.push(RunContent::Text(String::new())),
                b"w:footnoteReference" => {
                    if let Some(id) = attr_value(&e, b"w:id") {
                        run.content.push(RunContent::FootnoteReference(id));
                    }
                }
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"w:r" => break,
            Event::Eof => {
                return Err(DocumentError::Xml("unterminated w:r element".into()))
            }
            _ => {}
        }
    }

    Ok(run)
}

fn parse_run_properties(
    reader: &mut Reader<&[u8]>,
    run: &mut RunNode,
) -> Result<(), DocumentError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"w:rStyle" => run.style = attr_value(&e, b"w:val"),
                b"w:b" => run.bold = true,
                b"w:i" => run.italic = true,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"w:rPr" => break,
            Event::Eof => {
                return Err(DocumentError::Xml("unterminated w:rPr element".into()))
            }
            _ => {}
        }
    }

    Ok(())
}

/// Collect the raw text content of a `w:t` element.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, DocumentError> {
    let mut text = String::new();

    loop {
        let event = reader.read_event()?;
        match event {
            Event::End(ref e) if e.name().as_ref() == b"w:t" => break,
            Event::Eof => {
                return Err(DocumentError::Xml("unterminated w:t element".into()))
            }
            _ => append_text(&mut text, &event),
        }
    }

    Ok(text)
}

/// Parse one `w:tbl` element into rows of cells of paragraphs.
pub(crate) fn parse_table(reader: &mut Reader<&[u8]>) -> Result<TableNode, DocumentError> {
    let mut table = TableNode::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:tr" => {
                table.rows.push(parse_table_row(reader)?);
            }
            Event::End(e) if e.name().as_ref() == b"w:tbl" => break,
            Event::Eof => {
                return Err(DocumentError::Xml("unterminated w:tbl element".into()))
            }
            _ => {}
        }
    }

    Ok(table)
}

fn parse_table_row(reader: &mut Reader<&[u8]>) -> Result<TableRow, DocumentError> {
    let mut row = TableRow::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:tc" => {
                row.cells.push(parse_table_cell(reader)?);
            }
            Event::End(e) if e.name().as_ref() == b"w:tr" => break,
            Event::Eof => {
                return Err(DocumentError::Xml("unterminated w:tr element".into()))
            }
            _ => {}
        }
    }

    Ok(row)
}

fn parse_table_cell(reader: &mut Reader<&[u8]>) -> Result<TableCell, DocumentError> {
    let mut cell = TableCell::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => cell.paragraphs.push(parse_paragraph(reader)?),
                // One level of nesting only; nested tables are not modeled.
                b"w:tbl" => skip_element(reader, &e)?,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"w:tc" => break,
            Event::Eof => {
                return Err(DocumentError::Xml("unterminated w:tc element".into()))
            }
            _ => {}
        }
    }

    Ok(cell)
}

/// Skip the current element and everything inside it.
fn skip_element(
    reader: &mut Reader<&[u8]>,
    start: &quick_xml::events::BytesStart,
) -> Result<(), DocumentError> {
    let end = start.to_end().into_owned();
    reader.read_to_end(end.name())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(inner: &str) -> Vec<BodyNode> {
        let xml = format!("<w:document><w:body>{inner}</w:body></w:document>");
        parse_body(&xml).unwrap()
    }

    #[test]
    fn parses_styled_paragraph_with_runs() {
        let nodes = body_of(
            r#"<w:p>
                 <w:pPr><w:pStyle w:val="Quote"/><w:outlineLvl w:val="2"/></w:pPr>
                 <w:r><w:rPr><w:b/></w:rPr><w:t>Hello</w:t></w:r>
                 <w:r><w:t xml:space="preserve"> world</w:t></w:r>
               </w:p>"#,
        );
        assert_eq!(nodes.len(), 1);
        let BodyNode::Paragraph(para) = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(para.style.as_deref(), Some("Quote"));
        assert_eq!(para.properties.outline_level, Some(2));
        assert_eq!(para.runs.len(), 2);
        assert!(para.runs[0].bold);
        assert!(matches!(&para.runs[0].content[0], RunContent::Text(t) if t == "Hello"));
        assert!(matches!(&para.runs[1].content[0], RunContent::Text(t) if t == " world"));
    }

    #[test]
    fn self_closing_paragraphs_are_discarded() {
        let nodes = body_of(r#"<w:p/><w:p><w:r><w:t>kept</w:t></w:r></w:p><w:p/>"#);
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn entities_are_preserved_undecoded() {
        let nodes = body_of(r#"<w:p><w:r><w:t>a &amp; b &lt;c&gt;</w:t></w:r></w:p>"#);
        let BodyNode::Paragraph(para) = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert!(
            matches!(&para.runs[0].content[0], RunContent::Text(t) if t == "a &amp; b &lt;c&gt;")
        );
    }

    #[test]
    fn footnote_reference_marker_is_captured() {
        let nodes = body_of(
            r#"<w:p><w:r><w:t>see</w:t><w:footnoteReference w:id="2"/></w:r></w:p>"#,
        );
        let BodyNode::Paragraph(para) = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert!(
            matches!(&para.runs[0].content[1], RunContent::FootnoteReference(id) if id == "2")
        );
    }

    #[test]
    fn parses_table_and_skips_nested_table() {
        let nodes = body_of(
            r#"<w:tbl>
                 <w:tr>
                   <w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc>
                   <w:tc>
                     <w:tbl><w:tr><w:tc><w:p><w:r><w:t>nested</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
                     <w:p><w:r><w:t>b</w:t></w:r></w:p>
                   </w:tc>
                 </w:tr>
               </w:tbl>"#,
        );
        assert_eq!(nodes.len(), 1);
        let BodyNode::Table(table) = &nodes[0] else {
            panic!("expected table");
        };
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells.len(), 2);
        // The nested table's paragraph must not leak into the outer cell.
        assert_eq!(table.rows[0].cells[1].paragraphs.len(), 1);
    }

    #[test]
    fn direct_list_level_and_toggles_are_read_from_ppr() {
        let nodes = body_of(
            r#"<w:p>
                 <w:pPr>
                   <w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr>
                   <w:rPr><w:b/><w:i/></w:rPr>
                 </w:pPr>
                 <w:r><w:t>item</w:t></w:r>
               </w:p>"#,
        );
        let BodyNode::Paragraph(para) = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(para.properties.list_level, Some(0));
        assert!(para.properties.bold);
        assert!(para.properties.italic);
    }

    #[test]
    fn unterminated_paragraph_is_an_error() {
        let err = parse_body("<w:body><w:p><w:r>").unwrap_err();
        assert!(matches!(err, DocumentError::Xml(_)));
    }
}
