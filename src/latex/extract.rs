//! Footnote extraction
//!
//! The reverse direction: recover every footnote's plain text from a
//! converted .tex file. Inline macros are stripped down to their content,
//! URL macros revert to angle-bracket form, spacing markers become plain
//! spaces, and the escaped dash/quote sequences re-expand into Unicode
//! typographic characters.

use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_MACRO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(zhs|emph|textbf)\{(.*?)\}").unwrap());
static URL_MACRO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\url\{(.*?)\}").unwrap());
static SPACING_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\\,|~)").unwrap());
static FOOTNOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\footnote\{([^}]+?)\}").unwrap());

/// Extract all footnote bodies from LaTeX text, in document order, each
/// followed by a blank line.
pub fn extract_footnotes(latex: &str) -> String {
    let mut text = latex.to_string();

    // Strip inline wrappers to a fixpoint so nested macros unwrap fully.
    loop {
        let next = INLINE_MACRO.replace_all(&text, "${2}").into_owned();
        if next == text {
            break;
        }
        text = next;
    }

    let text = URL_MACRO.replace_all(&text, "<${1}>");
    let text = SPACING_MARKER.replace_all(&text, " ");

    // Longer sequences first, else the short forms eat their prefixes.
    let text = text
        .replace("---", "\u{2014}")
        .replace("--", "\u{2013}")
        .replace("''", "\u{201D}")
        .replace('\'', "\u{2019}")
        .replace("``", "\u{201C}")
        .replace('`', "\u{2018}")
        .replace(",,", "\u{201E}");

    let mut out = String::new();
    for caps in FOOTNOTE.captures_iter(&text) {
        out.push_str(&caps[1]);
        out.push_str("\n\n");
    }
    out
}
