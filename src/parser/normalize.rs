//! Text cleanup applied before any matching.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&(nbsp|amp|lt|gt|#160);").expect("entity pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,;:])").expect("punctuation pattern is valid"));

// The surrounding spaces are part of the match, so connectors only count as
// whole words between other words.
static CONNECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i) (and/or|and|or) ").expect("connector pattern is valid")
});

/// Cleans raw catalog text.
///
/// - decodes leftover HTML entities
/// - collapses whitespace runs to a single space
/// - drops whitespace before `.`, `,`, `;` and `:`
/// - trims, and strips trailing `;` and `,`
/// - lowercases the connectors `and` and `or`, reading `and/or` as `or`
pub fn normalize(text: &str) -> String {
    let text = ENTITY.replace_all(text, |caps: &Captures| {
        match caps[1].to_ascii_lowercase().as_str() {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            _ => " ",
        }
    });
    let text = WHITESPACE.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(&text, "$1");
    let text = text
        .trim()
        .trim_end_matches(|c: char| c == ';' || c == ',' || c.is_whitespace());

    CONNECTOR
        .replace_all(text, |caps: &Captures| {
            if caps[1].eq_ignore_ascii_case("and") {
                " and "
            } else {
                " or "
            }
        })
        .into_owned()
}
