//! Structured prerequisites for university course catalogs.
//!
//! Catalog prerequisite text is free-form prose. This crate turns it into a
//! nested `and`/`or` tree of normalized course codes, and says so plainly
//! when it cannot do that with confidence.
//!
//! ```
//! use prereqs::ParseResult;
//!
//! let result = prereqs::parse("CSE 2100 and (MATH 2210Q or MATH 2410Q)");
//! assert!(result.is_parsed());
//! assert_eq!(
//!     serde_json::to_string(&result.expression()).unwrap(),
//!     r#"{"and":["CSE 2100",{"or":["MATH 2210Q","MATH 2410Q"]}]}"#
//! );
//!
//! let result = prereqs::parse("Permission of instructor required");
//! assert!(matches!(result, ParseResult::Unparsed(_)));
//! ```

pub mod domain;
pub use domain::{CourseCode, Expression, Juxtaposition, Operator, ParserConfig};

pub mod parser;
pub use parser::{
    ParseResult, PrerequisiteParser, Reason, extract_corequisites, extract_courses, minimum_grade,
    parse, qualitative_requirements,
};

pub mod record;
pub use record::{ParseStats, PrerequisiteRecord};
