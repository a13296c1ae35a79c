//! Domain models for catalog prerequisites.
//!
//! This module contains the value types produced by the parser: course
//! codes, logical expressions over them, and the parser configuration.

/// Course code types and parsing.
pub mod course;
pub use course::{CourseCode, Error as CourseCodeError};

/// Logical prerequisite expressions.
pub mod expression;
pub use expression::{Expression, Operator};

/// Parser configuration.
pub mod config;
pub use config::{Juxtaposition, ParserConfig};
