//! Style catalog construction
//!
//! Classifies the named styles declared in word/styles.xml into the
//! formatting capabilities the renderer cares about: bold, italic, an
//! outline (section) level, and a list level. The catalog is built once per
//! conversion and is immutable afterwards; it is passed explicitly into
//! every rendering call instead of living in process-wide state.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::io::DocumentError;
use super::parsing::{attr_value, parse_level};

/// Capability flags derived from one style declaration.
///
/// A style may carry any combination of these; the paragraph that references
/// it decides precedence (section status suppresses bold and list wrapping,
/// never italic).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDefinition {
    pub bold: bool,
    pub italic: bool,
    pub section_level: Option<u8>,
    pub list_level: Option<u8>,
}

/// Mapping from style identifier to derived capability flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleCatalog {
    styles: HashMap<String, StyleDefinition>,
}

impl StyleCatalog {
    /// Build the catalog from the raw styles part.
    ///
    /// Every `w:style` element with a `w:styleId` is inspected: a `w:b` or
    /// `w:i` toggle anywhere in its property block sets the bold/italic
    /// flag, `w:outlineLvl` sets the section level, and `w:ilvl` sets the
    /// list level.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        let mut styles = HashMap::new();
        let mut current: Option<(String, StyleDefinition)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == b"w:style" => {
                    current = attr_value(&e, b"w:styleId")
                        .map(|id| (id, StyleDefinition::default()));
                }
                Event::Start(e) | Event::Empty(e) => {
                    if let Some((_, def)) = current.as_mut() {
                        match e.name().as_ref() {
                            b"w:b" => def.bold = true,
                            b"w:i" => def.italic = true,
                            b"w:outlineLvl" => def.section_level = parse_level(&e),
                            b"w:ilvl" => def.list_level = parse_level(&e),
                            _ => {}
                        }
                    }
                }
                Event::End(e) if e.name().as_ref() == b"w:style" => {
                    if let Some((id, def)) = current.take() {
                        styles.insert(id, def);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Self { styles })
    }

    pub fn get(&self, id: &str) -> Option<&StyleDefinition> {
        self.styles.get(id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
