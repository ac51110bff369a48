//! Footnote part parsing
//!
//! Parses word/footnotes.xml into footnote declarations, each an identifier
//! plus its body paragraphs. Separator pseudo-footnotes are kept; they are
//! never referenced and render to nothing.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::attr_value;
use super::body::parse_paragraph;
use crate::document::io::DocumentError;
use crate::document::models::FootnoteNode;

/// Parse every `w:footnote` declaration, in part order.
pub(crate) fn parse_footnotes(xml: &str) -> Result<Vec<FootnoteNode>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut footnotes = Vec::new();
    let mut current: Option<FootnoteNode> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:footnote" => {
                    current = attr_value(&e, b"w:id").map(|id| FootnoteNode {
                        id,
                        paragraphs: Vec::new(),
                    });
                }
                b"w:p" => {
                    let para = parse_paragraph(&mut reader)?;
                    if let Some(footnote) = current.as_mut() {
                        footnote.paragraphs.push(para);
                    }
                }
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"w:footnote" => {
                if let Some(id) = attr_value(&e, b"w:id") {
                    footnotes.push(FootnoteNode {
                        id,
                        paragraphs: Vec::new(),
                    });
                }
            }
            Event::End(e) if e.name().as_ref() == b"w:footnote" => {
                if let Some(footnote) = current.take() {
                    footnotes.push(footnote);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(footnotes)
}
