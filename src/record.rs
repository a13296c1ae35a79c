//! Caller-facing prerequisite records and data-quality statistics.

use std::collections::BTreeMap;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{CourseCode, Expression},
    parser::{ParseResult, PrerequisiteParser, Reason, extract_corequisites, minimum_grade},
};

/// The prerequisite fields of a normalized course record.
///
/// The raw text is always kept beside the structured tree, so that anything
/// left unparsed can be reviewed by a human.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteRecord {
    /// The structured tree, `null` when there is none.
    pub prerequisites: Option<Expression>,

    /// The prerequisite text as it appears in the catalog.
    pub prerequisites_text: String,

    /// Whether `prerequisites` can be trusted as authoritative.
    pub prerequisites_parsed: bool,

    /// Courses that must be taken concurrently.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub corequisites: Vec<CourseCode>,

    /// Qualitative requirements such as "junior standing".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<String>,

    /// The minimum letter grade required, if stated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_grade: Option<String>,
}

impl PrerequisiteRecord {
    /// Parses `text` and assembles the record.
    #[must_use]
    pub fn from_text(parser: &PrerequisiteParser, text: &str) -> Self {
        Self::from_result(parser, text, parser.parse(text))
    }

    /// Assembles the record for `text` from an existing parse result.
    #[must_use]
    pub fn from_result(parser: &PrerequisiteParser, text: &str, result: ParseResult) -> Self {
        let (prerequisites, prerequisites_parsed) = result.into_parts();
        Self {
            prerequisites,
            prerequisites_text: text.to_string(),
            prerequisites_parsed,
            corequisites: extract_corequisites(text),
            restrictions: parser
                .qualitative_requirements(text)
                .into_iter()
                .map(String::from)
                .collect(),
            minimum_grade: minimum_grade(text),
        }
    }

    /// Builds the records for many texts in parallel.
    ///
    /// Records are returned in the order of `texts`, along with statistics
    /// over every text.
    #[must_use]
    pub fn batch<S>(parser: &PrerequisiteParser, texts: &[S]) -> (Vec<Self>, ParseStats)
    where
        S: AsRef<str> + Sync,
    {
        let outcomes: Vec<_> = texts
            .par_iter()
            .map(|text| {
                let text = text.as_ref();
                let result = parser.parse(text);
                let record = Self::from_result(parser, text, result.clone());
                (result, record)
            })
            .collect();

        let stats = outcomes.iter().map(|(result, _)| result).collect();
        let records = outcomes.into_iter().map(|(_, record)| record).collect();
        (records, stats)
    }
}

/// Tallies of parse outcomes across many prerequisite texts.
///
/// The headline metric is [`ParseStats::success_rate`], the share of texts
/// whose result can be trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Texts with nothing to require.
    pub empty: usize,
    /// Texts structured into a tree.
    pub parsed: usize,
    /// Texts left unstructured.
    pub unparsed: usize,
    /// Unstructured texts, by reason.
    pub reasons: BTreeMap<Reason, usize>,
}

impl ParseStats {
    /// Records one parse result.
    pub fn record(&mut self, result: &ParseResult) {
        match result {
            ParseResult::Empty => self.empty += 1,
            ParseResult::Parsed(_) => self.parsed += 1,
            ParseResult::Unparsed(reason) => {
                self.unparsed += 1;
                *self.reasons.entry(*reason).or_insert(0) += 1;
            }
        }
    }

    /// Total number of results recorded.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.empty + self.parsed + self.unparsed
    }

    /// Percentage of results that can be trusted (empty or parsed).
    ///
    /// Returns `0.0` when nothing has been recorded.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = (self.empty + self.parsed) as f64 / total as f64;
        rate * 100.0
    }
}

impl<'a> FromIterator<&'a ParseResult> for ParseStats {
    fn from_iter<I: IntoIterator<Item = &'a ParseResult>>(iter: I) -> Self {
        let mut stats = Self::default();
        for result in iter {
            stats.record(result);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::parser::parse;

    #[test]
    fn record_serializes_catalog_fields() {
        let parser = PrerequisiteParser::default();
        let text = "CSE 2100 and (MATH 2210Q or MATH 2410Q), minimum grade of C";
        let record = PrerequisiteRecord::from_text(&parser, text);

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "prerequisites": {"and": ["CSE 2100", {"or": ["MATH 2210Q", "MATH 2410Q"]}]},
                "prerequisites_text": text,
                "prerequisites_parsed": true,
                "restrictions": ["minimum grade", "grade of"],
                "minimum_grade": "C",
            })
        );
    }

    #[test]
    fn record_lists_corequisites() {
        let parser = PrerequisiteParser::default();
        let record = PrerequisiteRecord::from_text(&parser, "Corequisites: CSE 2500 and CSE 2600.");

        let corequisites: Vec<String> = record.corequisites.iter().map(ToString::to_string).collect();
        assert_eq!(corequisites, ["CSE 2500", "CSE 2600"]);
    }

    #[test]
    fn unparsed_record_keeps_raw_text() {
        let parser = PrerequisiteParser::default();
        let text = "Junior standing or permission of instructor";
        let record = PrerequisiteRecord::from_text(&parser, text);

        assert_eq!(record.prerequisites, None);
        assert!(!record.prerequisites_parsed);
        assert_eq!(record.prerequisites_text, text);
        assert_eq!(
            record.restrictions,
            ["permission of instructor", "junior standing"]
        );
    }

    #[test]
    fn record_omits_empty_optional_fields() {
        let record = PrerequisiteRecord::from_text(&PrerequisiteParser::default(), "");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "prerequisites": null,
                "prerequisites_text": "",
                "prerequisites_parsed": true,
            })
        );
    }

    #[test]
    fn record_reads_back_from_json() {
        let value = json!({
            "prerequisites": {"or": ["MATH 1131Q", "MATH 1151Q"]},
            "prerequisites_text": "MATH 1131Q or MATH 1151Q",
            "prerequisites_parsed": true,
        });
        let record: PrerequisiteRecord = serde_json::from_value(value).unwrap();
        assert_eq!(
            record,
            PrerequisiteRecord::from_text(&PrerequisiteParser::default(), "MATH 1131Q or MATH 1151Q")
        );
    }

    #[test]
    fn batch_preserves_input_order() {
        let texts = [
            "CSE 1010 and CSE 1729",
            "Permission of instructor",
            "",
            "MATH 1131Q or MATH 1151Q",
        ];
        let (records, stats) = PrerequisiteRecord::batch(&PrerequisiteParser::default(), &texts[..]);

        let returned: Vec<&str> = records
            .iter()
            .map(|record| record.prerequisites_text.as_str())
            .collect();
        assert_eq!(returned, texts);
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.unparsed, 1);
        assert!((stats.success_rate() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn stats_count_outcomes() {
        let results: Vec<ParseResult> = [
            "CSE 1010 and CSE 1729",
            "",
            "Permission of instructor",
            "CSE 1010 and CSE 1729 or MATH 2210Q",
            "CSE 1010 or CSE 1729",
        ]
        .into_iter()
        .map(parse)
        .collect();

        let stats: ParseStats = results.iter().collect();

        assert_eq!(stats.total(), 5);
        assert_eq!(stats.parsed, 2);
        assert_eq!(stats.empty, 1);
        assert_eq!(stats.unparsed, 2);
        assert_eq!(stats.reasons.get(&Reason::QualitativeOnly), Some(&1));
        assert_eq!(stats.reasons.get(&Reason::MixedConnectors), Some(&1));
        assert!((stats.success_rate() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn success_rate_of_nothing_is_zero() {
        assert!(ParseStats::default().success_rate().abs() < f64::EPSILON);
    }
}
