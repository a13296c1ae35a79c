use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// A validated department prefix: 2 to 6 uppercase ASCII letters.
///
/// Examples: `CSE`, `MATH`, `CHEMEN`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Department(NonEmptyString);

impl Department {
    /// Creates a new `Department` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Department`] if the string is not 2 to 6 uppercase
    /// letters (A-Z).
    pub fn new(s: String) -> Result<Self, Error> {
        if !(2..=6).contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(Error::Department(s));
        }
        let non_empty = NonEmptyString::new(s).map_err(Error::Department)?;
        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Department {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized course code.
///
/// Canonical format is `{DEPT} {NUMBER}{SUFFIX?}`, where:
/// - `DEPT` is 2 to 6 uppercase letters (e.g. `CSE`, `MATH`)
/// - `NUMBER` is 3 or 4 digits (e.g. `101`, `2410`)
/// - `SUFFIX` is an optional single uppercase letter (e.g. the `Q` in
///   `MATH 2410Q`)
///
/// Parsing with [`FromStr`] is strict and only accepts the canonical form.
/// Lenient matching inside free text (lowercase, hyphens, missing space) is
/// handled by [`crate::parser::extract_courses`], which builds codes with
/// [`CourseCode::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseCode {
    department: Department,
    number: String,
}

impl CourseCode {
    /// Builds a course code from a department and a number, normalizing both
    /// to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an error if either part does not match the course-code
    /// grammar once uppercased.
    pub fn from_parts(department: &str, number: &str) -> Result<Self, Error> {
        let department = Department::new(department.to_ascii_uppercase())?;
        let number = number.to_ascii_uppercase();
        if !is_valid_number(&number) {
            return Err(Error::Number(number));
        }
        Ok(Self { department, number })
    }

    /// Returns the department prefix.
    #[must_use]
    pub fn department(&self) -> &str {
        self.department.as_str()
    }

    /// Returns the number, including any trailing letter (e.g. `2410Q`).
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the trailing letter, if any.
    #[must_use]
    pub fn suffix(&self) -> Option<char> {
        self.number.chars().last().filter(char::is_ascii_uppercase)
    }
}

fn is_valid_number(number: &str) -> bool {
    let digits = number.trim_end_matches(|c: char| c.is_ascii_uppercase());
    let suffix_len = number.len() - digits.len();
    (3..=4).contains(&digits.len())
        && digits.bytes().all(|b| b.is_ascii_digit())
        && suffix_len <= 1
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.department, self.number)
    }
}

/// Errors that can occur when constructing a [`CourseCode`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The string is not of the form `DEPT NUMBER`.
    #[error("Invalid course code format: '{0}'")]
    Syntax(String),

    /// The department prefix is not 2 to 6 uppercase letters.
    #[error("Invalid department '{0}': must be 2 to 6 uppercase letters (A-Z)")]
    Department(String),

    /// The number is not 3 or 4 digits with an optional uppercase letter.
    #[error("Invalid course number '{0}': expected 3 or 4 digits and an optional letter")]
    Number(String),
}

impl FromStr for CourseCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (department, number) = s
            .split_once(' ')
            .ok_or_else(|| Error::Syntax(s.to_string()))?;

        let department = Department::new(department.to_string())?;
        if !is_valid_number(number) {
            return Err(Error::Number(number.to_string()));
        }

        Ok(Self {
            department,
            number: number.to_string(),
        })
    }
}

impl TryFrom<&str> for CourseCode {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl TryFrom<String> for CourseCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<CourseCode> for String {
    fn from(code: CourseCode) -> Self {
        code.to_string()
    }
}
