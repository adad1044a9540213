//! Error types shared by every matrix operation.

use core::fmt;

use thiserror::Error;

use crate::shape::Shape;

/// Result alias used throughout the crate.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Relational marker carried by [`MatrixError::Dimension`].
///
/// `Less` means the payload nests too shallowly for the declared shape,
/// `Greater` means it nests too deeply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    NotEqual,
    Less,
    Greater,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::NotEqual => write!(f, "!="),
            Relation::Less => write!(f, "<"),
            Relation::Greater => write!(f, ">"),
        }
    }
}

/// Coarse classification of a [`MatrixError`].
///
/// Callers that only need to branch on the family of failure (bad input
/// type, shape disagreement, out-of-range coordinate, shape illegal for
/// the operation, singular input) match on this instead of the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Dimension,
    Index,
    Range,
    Singular,
}

/// Errors from matrix construction, indexing, linear algebra and arithmetic.
///
/// ```
/// use densemat::{ErrorKind, Matrix};
///
/// let singular = Matrix::new([[1.0_f64, 2.0], [2.0, 4.0]]);
/// let err = singular.inv().unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Singular);
/// assert_eq!(err.to_string(), "cannot calculate inverse, determinant is zero");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// Input is not a matrix, descriptor or nested sequence, or an operand
    /// pairing is not supported.
    #[error("{0}")]
    Type(String),

    /// Two shape descriptors (or an index vector and a shape) disagree.
    #[error("dimension mismatch ({actual} {relation} {expected})")]
    Dimension {
        actual: usize,
        expected: usize,
        relation: Relation,
    },

    /// Coordinate is negative or past the end of its axis.
    #[error("{}", index_message(.index, .bound))]
    Index { index: isize, bound: Option<usize> },

    /// Payload nests deeper than two levels.
    #[error("matrix is bound to two dimensions, given {0} dimensions")]
    RankExceeded(usize),

    /// Operation is not defined for a value of this rank.
    #[error("{operation} is not defined for rank {rank}")]
    UnsupportedRank { operation: &'static str, rank: usize },

    /// Square shape required.
    #[error("matrix must be square (size: {0})")]
    NotSquare(Shape),

    /// Element-wise operands have different shapes.
    #[error("dimension mismatch: {left} vs {right}")]
    ShapeMismatch { left: Shape, right: Shape },

    /// Shared dimension of a product does not line up.
    #[error("dimension mismatch in multiplication: {left} != {right}")]
    InnerMismatch { left: usize, right: usize },

    /// Transpose of a matrix without columns.
    #[error("cannot transpose a matrix with zero columns")]
    ZeroColumns,

    /// Factory size is not a positive integer.
    #[error("matrix size must be a positive integer (got {0})")]
    InvalidSize(usize),

    /// Factory size vector does not have exactly two entries.
    #[error("size vector must have two entries (got {0})")]
    SizeVector(usize),

    /// An intermediate value of an exact integer computation does not fit
    /// in the element type.
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// Determinant is zero.
    #[error("cannot calculate inverse, determinant is zero")]
    Singular,
}

fn index_message(index: &isize, bound: &Option<usize>) -> String {
    match *bound {
        Some(bound) if *index >= 0 => {
            format!("index out of range ({} > {})", index, bound as isize - 1)
        }
        _ => format!("index out of range ({} < 0)", index),
    }
}

impl MatrixError {
    /// Family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::Type(_) => ErrorKind::Type,
            MatrixError::Dimension { .. } => ErrorKind::Dimension,
            MatrixError::Index { .. } => ErrorKind::Index,
            MatrixError::RankExceeded(_)
            | MatrixError::UnsupportedRank { .. }
            | MatrixError::NotSquare(_)
            | MatrixError::ShapeMismatch { .. }
            | MatrixError::InnerMismatch { .. }
            | MatrixError::ZeroColumns
            | MatrixError::InvalidSize(_)
            | MatrixError::SizeVector(_)
            | MatrixError::Overflow(_) => ErrorKind::Range,
            MatrixError::Singular => ErrorKind::Singular,
        }
    }

    pub(crate) fn dimension(actual: usize, expected: usize) -> Self {
        MatrixError::Dimension {
            actual,
            expected,
            relation: Relation::NotEqual,
        }
    }
}
