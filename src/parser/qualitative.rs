use std::sync::LazyLock;

use regex::Regex;

/// Phrases that describe a prerequisite which is not a course.
pub const QUALITATIVE_KEYWORDS: [&str; 23] = [
    "permission of instructor",
    "instructor consent",
    "department consent",
    "instructor permission",
    "junior standing",
    "senior standing",
    "sophomore standing",
    "freshman standing",
    "graduate standing",
    "admission to",
    "minimum grade",
    "grade of",
    "gpa",
    "open only to",
    "restricted to",
    "majors only",
    "concurrent enrollment",
    "consent required",
    "departmental approval",
    "by invitation",
    "audition required",
    "portfolio review",
    "prerequisite waiver",
];

/// Returns the built-in qualitative phrases that occur in `text`, in
/// vocabulary order.
///
/// ```
/// let found = prereqs::qualitative_requirements("Junior standing and a GPA of 3.0");
/// assert_eq!(found, ["junior standing", "gpa"]);
/// ```
#[must_use]
pub fn qualitative_requirements(text: &str) -> Vec<&'static str> {
    find_keywords(&text.to_lowercase(), QUALITATIVE_KEYWORDS)
}

/// Returns each keyword contained in `lowercase_text`.
pub(super) fn find_keywords<'a>(
    lowercase_text: &str,
    keywords: impl IntoIterator<Item = &'a str>,
) -> Vec<&'a str> {
    keywords
        .into_iter()
        .filter(|keyword| lowercase_text.contains(keyword))
        .collect()
}

// Context words match in any case; the grade letter itself must be a capital.
static GRADE_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i:minimum grade of)\s+(?:(?i:an?)\s+)?([A-F][+-]?)(?:[\s.,;)]|$)")
            .expect("minimum grade pattern is valid"),
        Regex::new(r"\b([A-F][+-]?)\s+(?i:or)\s+(?i:better|higher)\b")
            .expect("grade or better pattern is valid"),
    ]
});

/// Extracts a minimum letter grade such as `"C-"` from `text`.
///
/// Recognizes "minimum grade of C-" and "C or better" / "B+ or higher".
///
/// ```
/// assert_eq!(
///     prereqs::minimum_grade("CSE 1010 with a minimum grade of C-"),
///     Some("C-".to_string())
/// );
/// assert_eq!(prereqs::minimum_grade("CSE 1010"), None);
/// ```
#[must_use]
pub fn minimum_grade(text: &str) -> Option<String> {
    GRADE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .map(|caps| caps[1].to_string())
}
