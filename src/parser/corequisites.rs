use std::sync::LazyLock;

use regex::Regex;

use super::{courses::extract_courses, normalize::normalize};
use crate::domain::CourseCode;

/// The label, an optional colon, then everything up to the end of the
/// sentence.
static COREQUISITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)corequisites?\s*:?\s*(.+?)(?:[.;]|$)").expect("corequisite pattern is valid")
});

/// Extracts the course codes listed after a "Corequisite(s)" label.
///
/// Only the sentence following the first label is considered. Returns an
/// empty list if there is no label or it names no courses.
///
/// ```
/// let coreqs = prereqs::extract_corequisites("Prerequisite: CSE 1010. Corequisite: CSE 1729.");
/// assert_eq!(coreqs.len(), 1);
/// assert_eq!(coreqs[0].to_string(), "CSE 1729");
/// ```
#[must_use]
pub fn extract_corequisites(text: &str) -> Vec<CourseCode> {
    let text = normalize(text);
    COREQUISITE
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|span| extract_courses(span.as_str()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::extract_corequisites;

    fn coreqs(text: &str) -> Vec<String> {
        extract_corequisites(text)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test_case("Corequisite: CSE 1010", &["CSE 1010"]; "single")]
    #[test_case("Corequisites: CSE 1010 and CSE 1729", &["CSE 1010", "CSE 1729"]; "plural")]
    #[test_case("COREQUISITE CSE 1010", &["CSE 1010"]; "no colon")]
    #[test_case("corequisite:CSE1010", &["CSE 1010"]; "compact")]
    #[test_case("Corequisite: PHYS 1201Q. Prerequisite: MATH 1131Q.", &["PHYS 1201Q"]; "stops at sentence end")]
    #[test_case("Corequisite: CHEM 1127Q; open to majors CHEM 1128Q", &["CHEM 1127Q"]; "stops at semicolon")]
    #[test_case("Prerequisite: CSE 1010. Corequisite: CSE 1729", &["CSE 1729"]; "after prerequisites")]
    fn extracts(text: &str, expected: &[&str]) {
        assert_eq!(coreqs(text), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("Prerequisite: CSE 1010"; "no label")]
    #[test_case("Corequisite: concurrent enrollment in a lab section"; "no courses")]
    fn finds_nothing(text: &str) {
        assert!(coreqs(text).is_empty());
    }
}
