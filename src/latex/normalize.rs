//! Text normalization
//!
//! A fixed, ordered sequence of whole-string passes applied after tree
//! rendering and footnote inlining. Each pass is a total function from
//! string to string. The order is a contract: entity decoding must precede
//! escaping, escaping must precede URL wrapping, the digit-dash run rule
//! must run before the spaced-dash rule, and the quote-pair substitutions
//! must run before the single-character fallbacks.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::render::{CELL_SEP, ITEM_CLOSE, ITEM_OPEN, ROW_SEP};

/// Apply all normalization passes, in order.
pub(crate) fn normalize(input: &str) -> String {
    let out = decode_and_escape(input);
    let out = wrap_urls(&out);
    let out = tidy_macros(&out);
    let out = endash_digits(&out);
    let out = thin_space_abbreviations(&out);
    let out = nbsp_citations(&out);
    let out = expand_separators(&out);
    let out = assemble_lists(&out);
    let out = typography(&out);
    let out = tidy_spaces(&out);
    wrap_cjk(&out)
}

/// Pass 1: decode ampersand/angle entities, then escape the markup-
/// significant characters. Decoding first means decoded ampersands are
/// themselves escaped.
pub(crate) fn decode_and_escape(input: &str) -> String {
    input
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace('$', "\\$")
        .replace('#', "\\#")
        .replace('&', "\\&")
        .replace('%', "\\%")
}

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<?((www\.[-a-zA-Z\d]+\.[^\s]+/|http://|https://)[^\s>]+)>?").unwrap()
});

/// Pass 2: wrap bare URLs in the URL macro, consuming surrounding angle
/// brackets if present.
pub(crate) fn wrap_urls(input: &str) -> String {
    URL.replace_all(input, "\\url{${1}}").into_owned()
}

static NESTED_EMPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\emph\{\\emph\{(.*?)\}(\s*)\}").unwrap());
static NESTED_TEXTBF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\textbf\{\\textbf\{(.*?)\}(\s*)\}").unwrap());
static WRAPPED_FOOTNOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(emph|textbf)\{\\footnote\{(.*?)\}(\s*)\}").unwrap());
static ADJACENT_EMPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\emph\{(.*?)\}([ \t\x0C]*)\\emph\{(.*?)\}").unwrap());
static ADJACENT_TEXTBF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\textbf\{(.*?)\}([ \t\x0C]*)\\textbf\{(.*?)\}").unwrap());
static EMPTY_WRAPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(emph|textbf)\{\s*\}").unwrap());
static TRAILING_WS_WRAPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(emph|textbf)\{(.*?)\s+\}").unwrap());
static LEADING_WS_WRAPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(emph|textbf)\{\s+(.*?)\}").unwrap());
static FOOTNOTE_TRAILING_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\footnote\{(.*?)\s+\}").unwrap());
static FOOTNOTE_LEADING_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\footnote\{\s+(.*?)\}").unwrap());

/// Replace until the pattern no longer matches. A single linear
/// `replace_all` can create new adjacencies, so iterate to a fixpoint
/// instead of recursing.
fn fixpoint(re: &Regex, replacement: &str, input: String) -> String {
    let mut current = input;
    loop {
        let next = re.replace_all(&current, replacement).into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Pass 3: tidy up empty, nested and subsequent bold/italic wrappers, and
/// unwrap footnotes accidentally nested inside them.
pub(crate) fn tidy_macros(input: &str) -> String {
    let out = NESTED_EMPH.replace_all(input, "\\emph{${1}${2}}");
    let out = NESTED_TEXTBF.replace_all(&out, "\\textbf{${1}${2}}");
    let out = WRAPPED_FOOTNOTE.replace_all(&out, "\\footnote{${2}}${3}");
    let out = fixpoint(&ADJACENT_EMPH, "\\emph{${1}${2}${3}}", out.into_owned());
    let out = fixpoint(&ADJACENT_TEXTBF, "\\textbf{${1}${2}${3}}", out);
    let out = EMPTY_WRAPPER.replace_all(&out, "");
    let out = TRAILING_WS_WRAPPER.replace_all(&out, "\\${1}{${2}} ");
    let out = LEADING_WS_WRAPPER.replace_all(&out, " \\${1}{${2}}");
    let out = FOOTNOTE_TRAILING_WS.replace_all(&out, "\\footnote{${1}}");
    FOOTNOTE_LEADING_WS
        .replace_all(&out, "\\footnote{${1}}")
        .into_owned()
}

static DIGIT_DASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d\-]+").unwrap());
static DIGIT_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)-(\d)").unwrap());
static SPACED_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s-\s").unwrap());

/// Pass 4: within each maximal run of digits and hyphens, replace a single
/// hyphen between digits with an en-dash; runs with more than one hyphen
/// are left unchanged. A lone hyphen between whitespace becomes a spaced
/// en-dash.
pub(crate) fn endash_digits(input: &str) -> String {
    let out = DIGIT_DASH_RUN.replace_all(input, |caps: &Captures| {
        let run = &caps[0];
        if run.matches('-').count() > 1 {
            run.to_string()
        } else {
            DIGIT_DASH.replace_all(run, "${1}--${2}").into_owned()
        }
    });
    SPACED_DASH.replace_all(&out, " -- ").into_owned()
}

static ABBREVIATION_3: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([a-zA-Z])\.([a-zA-Z])\.([a-zA-Z])\.").unwrap());
static ABBREVIATION_2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([a-zA-Z])\.([a-zA-Z]{1,2})\.").unwrap());
static DIGIT_PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)\\%").unwrap());

/// Pass 5: thin spaces inside dotted abbreviations and before a percent
/// sign following a digit. The percent rule matches the escaped form,
/// since pass 1 has already escaped every literal `%`.
pub(crate) fn thin_space_abbreviations(input: &str) -> String {
    let out = ABBREVIATION_3.replace_all(input, "${1}.\\,${2}.\\,${3}.");
    let out = ABBREVIATION_2.replace_all(&out, "${1}.\\,${2}.");
    DIGIT_PERCENT.replace_all(&out, "${1}\\,\\%").into_owned()
}

const CITATION_TOKENS: &str =
    r"(§§?|Artt?\.|Abs\.|Bd\.|Vol\.|S\.|pp?\.|Nr\.|No\.|Fn\.|Rn\.|Sec\.|sec\.|lit\.)";

static CITATION_FF: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"{CITATION_TOKENS}\s(\d+)\s(ff?\.)")).unwrap());
static CITATION_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"{CITATION_TOKENS}\s(\d+)")).unwrap());

/// Pass 6: non-breaking spaces between citation tokens and the following
/// number, and before a trailing "f."/"ff." continuation.
pub(crate) fn nbsp_citations(input: &str) -> String {
    let out = CITATION_FF.replace_all(input, "${1}~${2}~${3}");
    CITATION_NUMBER.replace_all(&out, "${1}~${2}").into_owned()
}

static CELL_SEP_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\s+{}", regex::escape(CELL_SEP))).unwrap());
static ROW_SEP_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\s+{}", regex::escape(ROW_SEP))).unwrap());

/// Pass 7: expand cell and row separator placeholders, consuming the
/// whitespace that precedes them.
pub(crate) fn expand_separators(input: &str) -> String {
    let out = CELL_SEP_TOKEN.replace_all(input, " & \n");
    ROW_SEP_TOKEN.replace_all(&out, " \\\\ \n\n").into_owned()
}

static LIST_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(({}.*?{}\s*)+)",
        regex::escape(ITEM_OPEN),
        regex::escape(ITEM_CLOSE)
    ))
    .unwrap()
});
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{}(.*?){}\n*",
        regex::escape(ITEM_OPEN),
        regex::escape(ITEM_CLOSE)
    ))
    .unwrap()
});

/// Pass 8: wrap each maximal run of item-wrapped paragraphs in a list
/// environment, then turn the item wrappers into item introducers.
pub(crate) fn assemble_lists(input: &str) -> String {
    let out = LIST_RUN.replace_all(input, "\\begin{itemize}\n${1}\\end{itemize}\n\n");
    LIST_ITEM.replace_all(&out, "\\item ${1}\n").into_owned()
}

/// Pass 9: map smart quotes, dashes and ellipses to their LaTeX ASCII
/// forms. Paired combinations are substituted before the single-character
/// fallbacks, else the pair patterns never match. Idempotent on its own
/// output.
pub(crate) fn typography(input: &str) -> String {
    input
        .replace('\u{00A0}', "~")
        .replace("\u{201C}\u{2018}", "``{}`")
        .replace("\u{2018}\u{201C}", "`{}``")
        .replace("\u{201D}\u{2019}", "''{}'")
        .replace("\u{2019}\u{201D}", "'{}''")
        .replace("\u{201E}\u{201A}", ",,{},")
        .replace("\u{201A}\u{201E}", ",{},,")
        .replace('\u{201C}', "``")
        .replace('\u{201D}', "''")
        .replace('\u{201E}', ",,")
        .replace('\u{2018}', "`")
        .replace('\u{2019}', "'")
        .replace('\u{201A}', ",")
        .replace('\u{2026}', "\\ldots{}")
        .replace("...", "\\ldots{}")
        .replace('\u{2013}', "--")
        .replace('\u{2014}', "---")
        .replace("!`", "!{}`")
        .replace("?`", "?{}`")
}

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static NBSP_THEN_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~[ \t\x0C]").unwrap());
static SPACE_THEN_NBSP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\x0C]~").unwrap());

/// Pass 10: a non-breaking space before a newline reverts to the newline,
/// runs of blank lines collapse to one, and a non-breaking space adjacent
/// to ordinary horizontal whitespace collapses to the non-breaking space.
pub(crate) fn tidy_spaces(input: &str) -> String {
    let out = input.replace("~\n", "\n");
    let out = EXCESS_NEWLINES.replace_all(&out, "\n\n");
    let out = NBSP_THEN_SPACE.replace_all(&out, "~");
    SPACE_THEN_NBSP.replace_all(&out, "~").into_owned()
}

static CJK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{3000}-\x{303F}\x{4E00}-\x{9FFF}\x{FF00}-\x{FFEF}]+").unwrap());

/// Pass 11: wrap each maximal run of CJK characters in the script macro.
pub(crate) fn wrap_cjk(input: &str) -> String {
    CJK_RUN.replace_all(input, "\\zhs{${0}}").into_owned()
}
