use std::sync::LazyLock;

use regex::Regex;

use crate::domain::CourseCode;

/// Department letters, an optional single space or hyphen, then 3-4 digits
/// and an optional letter. Letters are matched in either case.
static COURSE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z]{2,6})[\s-]?([0-9]{3,4}[A-Za-z]?)\b")
        .expect("course code pattern is valid")
});

/// Words that can sit directly before a number without being a department.
const CONNECTOR_WORDS: [&str; 2] = ["and", "or"];

/// Extracts every course code from `text`, in order of appearance.
///
/// Matches are case-insensitive and tolerate a missing space or a hyphen
/// between department and number; every result is in canonical form.
/// Duplicates are kept.
///
/// ```
/// let courses = prereqs::extract_courses("cse-1010, MATH2410q and CSE 1010");
/// let courses: Vec<String> = courses.iter().map(ToString::to_string).collect();
/// assert_eq!(courses, ["CSE 1010", "MATH 2410Q", "CSE 1010"]);
/// ```
#[must_use]
pub fn extract_courses(text: &str) -> Vec<CourseCode> {
    COURSE_CODE
        .captures_iter(text)
        .filter_map(|caps| {
            let department = &caps[1];
            if CONNECTOR_WORDS
                .iter()
                .any(|word| department.eq_ignore_ascii_case(word))
            {
                return None;
            }
            match CourseCode::from_parts(department, &caps[2]) {
                Ok(code) => Some(code),
                Err(error) => {
                    tracing::trace!(%error, matched = &caps[0], "discarding course code match");
                    None
                }
            }
        })
        .collect()
}
