//! Prerequisite text parsing.
//!
//! Converts free-form catalog prerequisite text such as
//! `"CSE 2100 and (MATH 2210Q or MATH 2410Q)"` into an [`Expression`] tree.
//!
//! The parser never fails on string input. Uncertainty is reported through
//! [`ParseResult`]: when the text cannot be structured with confidence (mixed
//! `and`/`or` without parentheses, nested or repeated groups, qualitative
//! requirements only) the result is [`ParseResult::Unparsed`] and callers
//! should keep the raw text for review.

use std::fmt;

use nonempty::NonEmpty;
use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::{Expression, ParserConfig};

mod corequisites;
mod courses;
mod normalize;
mod qualitative;
mod structure;

pub use corequisites::extract_corequisites;
pub use courses::extract_courses;
pub use normalize::normalize;
pub use qualitative::{QUALITATIVE_KEYWORDS, minimum_grade, qualitative_requirements};

/// The outcome of parsing prerequisite text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    /// There is nothing to require: the text was empty, or it named neither
    /// courses nor qualitative requirements.
    Empty,
    /// The text was structured with confidence.
    Parsed(Expression),
    /// The text could not be structured with confidence.
    Unparsed(Reason),
}

impl ParseResult {
    /// Returns the expression, if one was produced.
    #[must_use]
    pub const fn expression(&self) -> Option<&Expression> {
        match self {
            Self::Parsed(expr) => Some(expr),
            Self::Empty | Self::Unparsed(_) => None,
        }
    }

    /// Whether the result can be trusted as authoritative.
    ///
    /// This is `true` for [`ParseResult::Empty`] as well as
    /// [`ParseResult::Parsed`].
    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        !matches!(self, Self::Unparsed(_))
    }

    /// Returns the reason the text was left unstructured, if it was.
    #[must_use]
    pub const fn reason(&self) -> Option<Reason> {
        match self {
            Self::Unparsed(reason) => Some(*reason),
            Self::Empty | Self::Parsed(_) => None,
        }
    }

    /// Splits the result into the expression and the confidence flag.
    #[must_use]
    pub fn into_parts(self) -> (Option<Expression>, bool) {
        let parsed = self.is_parsed();
        let expression = match self {
            Self::Parsed(expr) => Some(expr),
            Self::Empty | Self::Unparsed(_) => None,
        };
        (expression, parsed)
    }
}

/// Why prerequisite text was left unstructured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// No course codes, but qualitative requirements that need review.
    QualitativeOnly,
    /// Both `and` and `or` join requirements at the same level.
    MixedConnectors,
    /// More than one parenthesized group.
    MultipleGroups,
    /// A parenthesized group inside another.
    NestedGroups,
    /// Parentheses that do not pair up, under strict grouping.
    UnbalancedParentheses,
    /// Several courses with no connector, and the configuration refuses to
    /// guess how they combine.
    AmbiguousJuxtaposition,
}

impl Reason {
    /// Every reason, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::QualitativeOnly,
        Self::MixedConnectors,
        Self::MultipleGroups,
        Self::NestedGroups,
        Self::UnbalancedParentheses,
        Self::AmbiguousJuxtaposition,
    ];
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match self {
            Self::QualitativeOnly => "qualitative requirements only",
            Self::MixedConnectors => "mixed 'and'/'or' without grouping",
            Self::MultipleGroups => "more than one parenthesized group",
            Self::NestedGroups => "nested parentheses",
            Self::UnbalancedParentheses => "unbalanced parentheses",
            Self::AmbiguousJuxtaposition => "courses listed without a connector",
        };
        f.write_str(description)
    }
}

/// Parses prerequisite text into a logical expression.
///
/// Holds only configuration, so one parser can be shared freely between
/// threads.
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteParser {
    config: ParserConfig,
}

impl PrerequisiteParser {
    /// Creates a parser with the given configuration.
    #[must_use]
    pub const fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses prerequisite text.
    ///
    /// ```
    /// use prereqs::{ParseResult, PrerequisiteParser, Reason};
    ///
    /// let parser = PrerequisiteParser::default();
    ///
    /// let result = parser.parse("CSE 1010 and CSE 1729");
    /// assert_eq!(result.expression().unwrap().to_string(), "CSE 1010 and CSE 1729");
    ///
    /// assert_eq!(parser.parse(""), ParseResult::Empty);
    /// assert_eq!(
    ///     parser.parse("CSE 1010 and CSE 1729 or MATH 2210Q"),
    ///     ParseResult::Unparsed(Reason::MixedConnectors)
    /// );
    /// ```
    #[must_use]
    pub fn parse(&self, text: &str) -> ParseResult {
        let text = normalize(text);
        if text.is_empty() {
            return ParseResult::Empty;
        }

        let Some(courses) = NonEmpty::from_vec(extract_courses(&text)) else {
            let requirements = self.find_qualitative(&text);
            if requirements.is_empty() {
                trace!(%text, "no course codes or requirements found");
                return ParseResult::Empty;
            }
            debug!(%text, ?requirements, "no course codes, only qualitative requirements");
            return ParseResult::Unparsed(Reason::QualitativeOnly);
        };

        match structure::determine(&text, courses, &self.config) {
            Ok(expr) => {
                trace!(%text, %expr, "structured prerequisites");
                ParseResult::Parsed(expr)
            }
            Err(reason) => {
                debug!(%text, %reason, "prerequisites left unstructured");
                ParseResult::Unparsed(reason)
            }
        }
    }

    /// Returns the qualitative requirement phrases found in `text`, built-in
    /// vocabulary first, then configured extras.
    #[must_use]
    pub fn qualitative_requirements(&self, text: &str) -> Vec<&str> {
        self.find_qualitative(&normalize(text))
    }

    fn find_qualitative(&self, normalized: &str) -> Vec<&str> {
        let extra = self.config.extra_keywords().iter().map(String::as_str);
        qualitative::find_keywords(
            &normalized.to_lowercase(),
            QUALITATIVE_KEYWORDS.into_iter().chain(extra),
        )
    }
}

/// Parses prerequisite text with the default configuration.
///
/// ```
/// let (expression, parsed) = prereqs::parse("MATH 1131Q or MATH 1151Q").into_parts();
/// assert!(parsed);
/// assert_eq!(
///     serde_json::to_string(&expression).unwrap(),
///     r#"{"or":["MATH 1131Q","MATH 1151Q"]}"#
/// );
/// ```
#[must_use]
pub fn parse(text: &str) -> ParseResult {
    PrerequisiteParser::default().parse(text)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use test_case::test_case;

    use super::*;
    use crate::domain::Juxtaposition;

    fn parts(result: ParseResult) -> (Value, bool) {
        let (expression, parsed) = result.into_parts();
        (serde_json::to_value(expression).unwrap(), parsed)
    }

    #[test_case("CSE 1010 and CSE 1729", json!({"and": ["CSE 1010", "CSE 1729"]}), true; "simple and")]
    #[test_case("MATH 1131Q or MATH 1151Q", json!({"or": ["MATH 1131Q", "MATH 1151Q"]}), true; "simple or")]
    #[test_case(
        "CSE 2100 and (MATH 2210Q or MATH 2410Q)",
        json!({"and": ["CSE 2100", {"or": ["MATH 2210Q", "MATH 2410Q"]}]}),
        true;
        "nested group"
    )]
    #[test_case("CSE 1010", json!({"and": ["CSE 1010"]}), true; "single course")]
    #[test_case("", Value::Null, true; "empty string")]
    #[test_case("Permission of instructor required", Value::Null, false; "qualitative only")]
    #[test_case("CSE 1010 and CSE 1729 or MATH 2210Q", Value::Null, false; "ambiguous")]
    fn catalog_scenarios(text: &str, expected: Value, parsed: bool) {
        assert_eq!(parts(parse(text)), (expected, parsed));
    }

    #[test_case("   \n\t"; "whitespace")]
    #[test_case(";,"; "punctuation")]
    #[test_case("See department for details"; "prose without requirements")]
    fn nothing_to_require(text: &str) {
        assert_eq!(parse(text), ParseResult::Empty);
    }

    #[test]
    fn connector_case_is_ignored() {
        assert_eq!(
            parts(parse("CSE 1010 AND CSE 1729")),
            (json!({"and": ["CSE 1010", "CSE 1729"]}), true)
        );
        assert_eq!(
            parse("CSE 1010 AND CSE 1729 Or MATH 2210Q"),
            ParseResult::Unparsed(Reason::MixedConnectors)
        );
    }

    #[test]
    fn noisy_text_is_cleaned() {
        assert_eq!(
            parts(parse("  cse1010&nbsp;and\n MATH-2410q ; ")),
            (json!({"and": ["CSE 1010", "MATH 2410Q"]}), true)
        );
    }

    #[test]
    fn complex_text_is_not_guessed() {
        let result = parse("CSE 1010 and CSE 1729 or MATH 2210Q and junior standing");
        assert_eq!(result.expression(), None);
        assert!(!result.is_parsed());
        assert_eq!(result.reason(), Some(Reason::MixedConnectors));
    }

    #[test_case(
        "CSE 2100 or (MATH 2210Q and MATH 2410Q)",
        json!({"and": ["CSE 2100", {"and": ["MATH 2210Q", "MATH 2410Q"]}]});
        "and anywhere wins"
    )]
    #[test_case(
        "CSE 2100 and (MATH 2210Q or MATH 2410Q); open to juniors or higher.",
        json!({"and": ["CSE 2100", {"or": ["MATH 2210Q", "MATH 2410Q"]}]});
        "or in trailing prose"
    )]
    #[test_case(
        "CSE 1010 and CSE 1729)",
        json!({"and": ["CSE 1010", "CSE 1729"]});
        "stray parenthesis"
    )]
    fn grouping_follows_whole_text(text: &str, expected: Value) {
        assert_eq!(parts(parse(text)), (expected, true));
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "CSE 2100 and (MATH 2210Q or MATH 2410Q)";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn extra_keywords_make_text_reviewable() {
        let text = "Successful studio review";
        assert_eq!(parse(text), ParseResult::Empty);

        let mut config = ParserConfig::default();
        config.add_keyword("studio review");
        let parser = PrerequisiteParser::new(config);

        assert_eq!(parser.parse(text), ParseResult::Unparsed(Reason::QualitativeOnly));
        assert_eq!(parser.qualitative_requirements(text), ["studio review"]);
    }

    #[test]
    fn juxtaposition_is_configurable() {
        let mut config = ParserConfig::default();
        config.juxtaposition = Juxtaposition::Or;
        let parser = PrerequisiteParser::new(config);

        assert_eq!(
            parts(parser.parse("CSE 1010, CSE 1729")),
            (json!({"or": ["CSE 1010", "CSE 1729"]}), true)
        );
    }

    #[test]
    fn empty_result_is_parsed_without_expression() {
        let result = ParseResult::Empty;
        assert!(result.is_parsed());
        assert_eq!(result.expression(), None);
        assert_eq!(result.reason(), None);
    }

    #[test]
    fn reason_serializes_in_snake_case() {
        assert_eq!(
            serde_json::to_value(Reason::UnbalancedParentheses).unwrap(),
            json!("unbalanced_parentheses")
        );
    }
}
