//! Turns normalized text and its course codes into a logical tree.
//!
//! Two shapes are understood:
//!
//! - a flat list joined by a single kind of connector, e.g. `A and B and C`
//! - a flat list plus exactly one parenthesized group, e.g. `A and (B or C)`
//!
//! Mixed connectors without a group, several groups and nested groups are
//! refused rather than guessed.

use nonempty::NonEmpty;

use super::{Reason, courses::extract_courses};
use crate::domain::{CourseCode, Expression, Juxtaposition, Operator, ParserConfig};

/// Builds the expression for `text`, whose course codes are `courses`.
///
/// `text` must already be normalized, so connectors are lowercase and
/// separated by single spaces.
pub(super) fn determine(
    text: &str,
    courses: NonEmpty<CourseCode>,
    config: &ParserConfig,
) -> Result<Expression, Reason> {
    if config.strict_grouping && !is_balanced(text) {
        return Err(Reason::UnbalancedParentheses);
    }
    if text.contains('(') {
        grouped(text, courses, config)
    } else {
        flat(text, courses, config.juxtaposition)
    }
}

/// Which connector words occur in a piece of text.
#[derive(Debug, Clone, Copy)]
struct Connectors {
    and: bool,
    or: bool,
}

impl Connectors {
    fn scan(text: &str) -> Self {
        Self {
            and: text.contains(" and "),
            or: text.contains(" or "),
        }
    }

    /// The single connector in use, `None` if there is none.
    fn operator(self) -> Result<Option<Operator>, Reason> {
        match (self.and, self.or) {
            (true, true) => Err(Reason::MixedConnectors),
            (true, false) => Ok(Some(Operator::And)),
            (false, true) => Ok(Some(Operator::Or)),
            (false, false) => Ok(None),
        }
    }
}

/// Structures text without a parenthesized group.
fn flat(
    text: &str,
    courses: NonEmpty<CourseCode>,
    juxtaposition: Juxtaposition,
) -> Result<Expression, Reason> {
    let operator = match Connectors::scan(text).operator()? {
        Some(operator) => operator,
        None if courses.len() == 1 => Operator::And,
        None => juxtaposed(juxtaposition)?,
    };
    Ok(operator.node(courses.map(Expression::Leaf)))
}

/// The operator for course codes listed with no connector between them.
fn juxtaposed(juxtaposition: Juxtaposition) -> Result<Operator, Reason> {
    match juxtaposition {
        Juxtaposition::And => Ok(Operator::And),
        Juxtaposition::Or => Ok(Operator::Or),
        Juxtaposition::Unparsed => Err(Reason::AmbiguousJuxtaposition),
    }
}

/// Structures text containing a `(`.
///
/// The group's own operator is `or` if it contains `or`, otherwise `and`.
/// The top-level operator comes from the whole text, `and` taking precedence
/// over `or`; with no connector anywhere the group stands alone.
fn grouped(
    text: &str,
    courses: NonEmpty<CourseCode>,
    config: &ParserConfig,
) -> Result<Expression, Reason> {
    let Some((open, close)) = single_group(text)? else {
        // an unclosed `(` is ordinary text
        return flat(text, courses, config.juxtaposition);
    };
    let inner = &text[open + 1..close];
    let outside = format!("{} {}", text[..open].trim(), text[close + 1..].trim());

    let inner_connectors = Connectors::scan(inner);
    if config.strict_grouping {
        inner_connectors.operator()?;
    }
    let inner_operator = if inner_connectors.or {
        Operator::Or
    } else {
        Operator::And
    };
    let Some(inner) = Expression::from_courses(inner_operator, extract_courses(inner)) else {
        // A group without course codes, such as "(or equivalent)", is
        // commentary on the surrounding list.
        return flat(&outside, courses, config.juxtaposition);
    };

    let connectors = Connectors::scan(text);
    let operator = if connectors.and {
        Operator::And
    } else if connectors.or {
        Operator::Or
    } else {
        return Ok(inner);
    };

    let leaves: Vec<Expression> = extract_courses(&outside)
        .into_iter()
        .map(Expression::Leaf)
        .collect();
    let children = match NonEmpty::from_vec(leaves) {
        Some(mut children) => {
            children.push(inner);
            children
        }
        None => NonEmpty::new(inner),
    };
    Ok(operator.node(children))
}

/// Locates the only complete parenthesized group in `text`, as byte offsets
/// of its `(` and `)`.
///
/// A `)` with no open group and a trailing unclosed `(` are skipped.
fn single_group(text: &str) -> Result<Option<(usize, usize)>, Reason> {
    let mut depth = 0usize;
    let mut nested = false;
    let mut start = 0;
    let mut groups = Vec::new();

    for (i, c) in text.char_indices() {
        match c {
            '(' => {
                if depth == 0 {
                    start = i;
                } else {
                    nested = true;
                }
                depth += 1;
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    groups.push((start, i));
                }
            }
            _ => {}
        }
    }

    if nested {
        return Err(Reason::NestedGroups);
    }
    match groups.as_slice() {
        [] => Ok(None),
        [group] => Ok(Some(*group)),
        _ => Err(Reason::MultipleGroups),
    }
}

/// Whether every `(` is closed by a later `)` and every `)` closes one.
fn is_balanced(text: &str) -> bool {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
