use std::{fmt, str::FromStr};

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use super::course::{self, CourseCode};

/// A logical prerequisite expression over course codes.
///
/// Compound nodes hold a [`NonEmpty`] list of children, so a tree can never
/// contain an empty `And` or `Or`.
///
/// Expressions serialize to the catalog JSON shape: a leaf is a plain string
/// and a compound node is an object with a single `"and"` or `"or"` key.
///
/// ```
/// use prereqs::Expression;
///
/// let expr = Expression::and(nonempty::nonempty![
///     Expression::Leaf("CSE 2100".parse().unwrap()),
///     Expression::or(nonempty::nonempty![
///         Expression::Leaf("MATH 2210Q".parse().unwrap()),
///         Expression::Leaf("MATH 2410Q".parse().unwrap()),
///     ]),
/// ]);
///
/// assert_eq!(
///     serde_json::to_string(&expr).unwrap(),
///     r#"{"and":["CSE 2100",{"or":["MATH 2210Q","MATH 2410Q"]}]}"#
/// );
/// assert_eq!(expr.to_string(), "CSE 2100 and (MATH 2210Q or MATH 2410Q)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Repr", into = "Repr")]
pub enum Expression {
    /// A single required course.
    Leaf(CourseCode),
    /// Every child is required.
    And(Box<NonEmpty<Expression>>),
    /// Any one child is sufficient.
    Or(Box<NonEmpty<Expression>>),
}

impl Expression {
    /// Builds an `And` node.
    #[must_use]
    pub fn and(children: NonEmpty<Self>) -> Self {
        Self::And(Box::new(children))
    }

    /// Builds an `Or` node.
    #[must_use]
    pub fn or(children: NonEmpty<Self>) -> Self {
        Self::Or(Box::new(children))
    }

    /// Builds a node of the given operator over course leaves.
    ///
    /// Returns `None` if `courses` is empty.
    #[must_use]
    pub fn from_courses(operator: Operator, courses: Vec<CourseCode>) -> Option<Self> {
        let leaves: Vec<Self> = courses.into_iter().map(Self::Leaf).collect();
        NonEmpty::from_vec(leaves).map(|children| operator.node(children))
    }

    /// Returns the operator of a compound node, or `None` for a leaf.
    #[must_use]
    pub const fn operator(&self) -> Option<Operator> {
        match self {
            Self::Leaf(_) => None,
            Self::And(_) => Some(Operator::And),
            Self::Or(_) => Some(Operator::Or),
        }
    }

    /// Returns the direct children of a compound node (empty for a leaf).
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        let children = match self {
            Self::Leaf(_) => None,
            Self::And(children) | Self::Or(children) => Some(children),
        };
        children.into_iter().flat_map(|children| children.iter())
    }

    /// Returns every course leaf, depth-first, in source order.
    #[must_use]
    pub fn courses(&self) -> Vec<&CourseCode> {
        let mut courses = Vec::new();
        self.collect_courses(&mut courses);
        courses
    }

    fn collect_courses<'a>(&'a self, out: &mut Vec<&'a CourseCode>) {
        match self {
            Self::Leaf(code) => out.push(code),
            Self::And(_) | Self::Or(_) => {
                for child in self.children() {
                    child.collect_courses(out);
                }
            }
        }
    }

    /// Returns the nesting depth. A leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (children, connector) = match self {
            Self::Leaf(code) => return write!(f, "{code}"),
            Self::And(children) => (children, " and "),
            Self::Or(children) => (children, " or "),
        };

        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(connector)?;
            }
            match child {
                Self::Leaf(_) => write!(f, "{child}")?,
                Self::And(_) | Self::Or(_) => write!(f, "({child})")?,
            }
        }
        Ok(())
    }
}

/// A logical connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
}

impl Operator {
    /// Wraps `children` in a node of this operator.
    #[must_use]
    pub fn node(self, children: NonEmpty<Expression>) -> Expression {
        match self {
            Self::And => Expression::and(children),
            Self::Or => Expression::or(children),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
        }
    }
}

/// Errors that can occur when deserializing an [`Expression`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A compound node had no children.
    #[error("'{0}' node must have at least one child")]
    EmptyNode(Operator),

    /// A leaf was not a canonical course code.
    #[error("Invalid leaf: {0}")]
    InvalidLeaf(#[from] course::Error),
}

/// The serialized form of an expression.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Leaf(String),
    Node(Node),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Node {
    And(Vec<Repr>),
    Or(Vec<Repr>),
}

impl TryFrom<Repr> for Expression {
    type Error = Error;

    fn try_from(repr: Repr) -> Result<Self, Self::Error> {
        let (operator, children) = match repr {
            Repr::Leaf(code) => return Ok(Self::Leaf(CourseCode::from_str(&code)?)),
            Repr::Node(Node::And(children)) => (Operator::And, children),
            Repr::Node(Node::Or(children)) => (Operator::Or, children),
        };

        let children = children
            .into_iter()
            .map(Self::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        NonEmpty::from_vec(children)
            .map(|children| operator.node(children))
            .ok_or(Error::EmptyNode(operator))
    }
}

impl From<Expression> for Repr {
    fn from(expr: Expression) -> Self {
        let convert = |children: NonEmpty<Expression>| -> Vec<Self> {
            Vec::from(children).into_iter().map(Self::from).collect()
        };
        match expr {
            Expression::Leaf(code) => Self::Leaf(code.into()),
            Expression::And(children) => Self::Node(Node::And(convert(*children))),
            Expression::Or(children) => Self::Node(Node::Or(convert(*children))),
        }
    }
}
