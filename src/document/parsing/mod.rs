//! XML part parsing
//!
//! Event-stream parsing of the .docx XML parts into the document tree.
//! Scanning raw markup with structural assumptions is fragile under nesting,
//! so each part is parsed into an explicit tree and rendered by a visitor
//! instead.

pub(crate) mod body;
pub(crate) mod footnotes;

use quick_xml::events::{BytesStart, Event};

/// Look up an attribute by qualified name.
pub(crate) fn attr_value(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Parse a `w:val` level attribute as a small integer.
pub(crate) fn parse_level(e: &BytesStart) -> Option<u8> {
    attr_value(e, b"w:val").and_then(|v| v.parse().ok())
}

/// Append the textual payload of an event to `out`, preserving character
/// entities undecoded (`&amp;` stays `&amp;`); the normalizer decodes and
/// re-escapes them later.
pub(crate) fn append_text(out: &mut String, event: &Event) {
    match event {
        Event::Text(t) => out.push_str(&String::from_utf8_lossy(t.as_ref())),
        Event::CData(t) => out.push_str(&String::from_utf8_lossy(t.as_ref())),
        Event::GeneralRef(r) => {
            out.push('&');
            out.push_str(&String::from_utf8_lossy(r.as_ref()));
            out.push(';');
        }
        _ => {}
    }
}
