//! Shapes, nested payloads, and the validation that ties them together.
//!
//! A [`Nested`] value is the literal form of a matrix: a leaf, a flat list
//! of leaves (a vector), or a list of equal-length lists (a 2-D matrix).
//! [`measure_shape`] reads the axis lengths off the first element at each
//! level and [`validate`] checks that every branch agrees with them.

use core::fmt;

use crate::error::{MatrixError, MatrixResult, Relation};

/// Axis lengths of a matrix: rank 0 (a single value), 1 (vector) or 2.
///
/// ```
/// use densemat::Shape;
///
/// let s = Shape::matrix(2, 3);
/// assert_eq!(s.dims(), &[2, 3]);
/// assert_eq!(s.rank(), 2);
/// assert_eq!(s.to_string(), "(2,3)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: [usize; 2],
    rank: usize,
}

impl Shape {
    /// Rank-0 shape of a single value.
    pub const fn scalar() -> Self {
        Self {
            dims: [0, 0],
            rank: 0,
        }
    }

    /// Vector of `len` elements.
    pub const fn vector(len: usize) -> Self {
        Self {
            dims: [len, 0],
            rank: 1,
        }
    }

    /// `rows x cols` matrix.
    pub const fn matrix(rows: usize, cols: usize) -> Self {
        Self {
            dims: [rows, cols],
            rank: 2,
        }
    }

    /// Build a shape from a list of axis lengths, rejecting more than two axes.
    pub fn from_dims(dims: &[usize]) -> MatrixResult<Self> {
        match *dims {
            [] => Ok(Self::scalar()),
            [len] => Ok(Self::vector(len)),
            [rows, cols] => Ok(Self::matrix(rows, cols)),
            _ => Err(MatrixError::RankExceeded(dims.len())),
        }
    }

    /// Axis lengths, outermost first.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims[..self.rank]
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.dims().iter().product()
    }

    /// Whether the shape holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims().iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, ")")
    }
}

/// Nested numeric payload: a leaf value or a list of nested payloads.
///
/// With the `serde` feature this (de)serializes untagged, so JSON such as
/// `[[1, 2], [3, 4]]` maps directly onto it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Nested<T> {
    Leaf(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Flat list of leaves.
    pub fn vector(items: impl IntoIterator<Item = T>) -> Self {
        Nested::List(items.into_iter().map(Nested::Leaf).collect())
    }

    /// Whether this node is a list.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Nested::List(_))
    }

    /// Name of the node kind, used in type errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Nested::Leaf(_) => "scalar",
            Nested::List(_) => "list",
        }
    }
}

impl<T: num_traits::Zero> Nested<T> {
    /// Whether every leaf is zero. An empty list counts as zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Nested::Leaf(x) => x.is_zero(),
            Nested::List(items) => items.iter().all(Nested::is_zero),
        }
    }
}

impl<T> From<Vec<Vec<T>>> for Nested<T> {
    fn from(rows: Vec<Vec<T>>) -> Self {
        Nested::List(rows.into_iter().map(Nested::vector).collect())
    }
}

impl<T, const M: usize, const N: usize> From<[[T; N]; M]> for Nested<T> {
    fn from(rows: [[T; N]; M]) -> Self {
        Nested::List(rows.into_iter().map(Nested::vector).collect())
    }
}

/// Measure the axis lengths of a nested payload.
///
/// Follows the first element at each level; it does not check that the
/// other branches agree (use [`validate`] for that). Stops at the first
/// leaf or empty list, so a bare leaf measures as `[]` and `[]` as `[0]`.
///
/// ```
/// use densemat::{measure_shape, Nested};
///
/// let x = Nested::from([[1, 2, 3], [4, 5, 6]]);
/// assert_eq!(measure_shape(&x), vec![2, 3]);
/// assert_eq!(measure_shape(&Nested::Leaf(7)), Vec::<usize>::new());
/// ```
pub fn measure_shape<T>(x: &Nested<T>) -> Vec<usize> {
    let mut dims = Vec::new();
    let mut node = x;
    while let Nested::List(items) = node {
        dims.push(items.len());
        match items.first() {
            Some(first) => node = first,
            None => break,
        }
    }
    dims
}

/// Check that `payload` has exactly the axis lengths in `shape`.
///
/// Payloads nesting deeper than two levels are rejected with
/// [`MatrixError::RankExceeded`].
pub fn validate<T>(payload: &Nested<T>, shape: &[usize]) -> MatrixResult<()> {
    if shape.is_empty() {
        if let Nested::List(items) = payload {
            return Err(MatrixError::dimension(items.len(), 0));
        }
        return Ok(());
    }
    validate_level(payload, shape, 0)
}

fn validate_level<T>(payload: &Nested<T>, shape: &[usize], dim: usize) -> MatrixResult<()> {
    if dim > 1 {
        return Err(MatrixError::RankExceeded(shape.len()));
    }

    let items = match payload {
        Nested::List(items) => items,
        Nested::Leaf(_) => {
            return Err(MatrixError::Dimension {
                actual: dim,
                expected: shape.len(),
                relation: Relation::Less,
            })
        }
    };

    if items.len() != shape[dim] {
        return Err(MatrixError::dimension(items.len(), shape[dim]));
    }

    if dim < shape.len() - 1 {
        for child in items {
            if !child.is_list() {
                return Err(MatrixError::Dimension {
                    actual: shape.len() - 1,
                    expected: shape.len(),
                    relation: Relation::Less,
                });
            }
            validate_level(child, shape, dim + 1)?;
        }
    } else if items.iter().any(Nested::is_list) {
        // last dimension: no child may nest further
        return Err(MatrixError::Dimension {
            actual: shape.len() + 1,
            expected: shape.len(),
            relation: Relation::Greater,
        });
    }

    Ok(())
}

/// Check a coordinate against an optional axis length.
///
/// Returns the coordinate as a `usize` on success.
pub fn validate_index(index: isize, length: Option<usize>) -> MatrixResult<usize> {
    if index < 0 {
        return Err(MatrixError::Index {
            index,
            bound: length,
        });
    }
    let i = index as usize;
    match length {
        Some(len) if i >= len => Err(MatrixError::Index {
            index,
            bound: length,
        }),
        _ => Ok(i),
    }
}

/// Read the leaf at `index` from a nested payload.
///
/// The index vector must have one coordinate per measured axis, and each
/// coordinate must fall inside its axis.
///
/// ```
/// use densemat::{get, Nested};
///
/// let x = Nested::from([[1, 2, 3], [4, 5, 6]]);
/// assert_eq!(get(&x, &[0, 2]).unwrap(), 3);
/// assert!(get(&x, &[-1, -1]).is_err());
/// ```
pub fn get<T: Copy>(payload: &Nested<T>, index: &[isize]) -> MatrixResult<T> {
    let shape = measure_shape(payload);
    if index.len() != shape.len() {
        return Err(MatrixError::dimension(index.len(), shape.len()));
    }
    let coords = index
        .iter()
        .zip(shape.iter())
        .map(|(&i, &len)| validate_index(i, Some(len)))
        .collect::<MatrixResult<Vec<usize>>>()?;

    let mut node = payload;
    for &i in &coords {
        node = match node {
            Nested::List(items) => items
                .get(i)
                .ok_or(MatrixError::Index {
                    index: i as isize,
                    bound: Some(items.len()),
                })?,
            Nested::Leaf(_) => return Err(MatrixError::dimension(index.len(), shape.len())),
        };
    }
    match node {
        Nested::Leaf(x) => Ok(*x),
        Nested::List(_) => Err(MatrixError::dimension(index.len(), shape.len() + 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn list<T>(items: Vec<Nested<T>>) -> Nested<T> {
        Nested::List(items)
    }

    #[test]
    fn measure() {
        assert_eq!(measure_shape(&Nested::from([[1, 2, 3], [4, 5, 6]])), vec![2, 3]);
        assert_eq!(measure_shape(&Nested::vector(vec![1.0, 2.0])), vec![2]);
        assert_eq!(measure_shape::<i32>(&list(vec![])), vec![0]);
        assert!(measure_shape(&Nested::Leaf(3)).is_empty());
        let deep = list(vec![list(vec![list(vec![Nested::Leaf(1)])])]);
        assert_eq!(measure_shape(&deep), vec![1, 1, 1]);
    }

    #[test]
    fn validate_accepts_matching_shapes() {
        let x = Nested::from([[1, 2], [3, 4], [5, 6]]);
        assert!(validate(&x, &[3, 2]).is_ok());
        assert!(validate(&Nested::vector(vec![1, 2, 3]), &[3]).is_ok());
        assert!(validate(&Nested::Leaf(1), &[]).is_ok());
    }

    #[test]
    fn validate_rejects_wrong_length() {
        let x = Nested::from([[1, 2], [3, 4]]);
        assert_eq!(validate(&x, &[3, 2]), Err(MatrixError::dimension(2, 3)));
        let ragged = list(vec![Nested::vector(vec![1, 2]), Nested::vector(vec![3])]);
        assert_eq!(validate(&ragged, &[2, 2]), Err(MatrixError::dimension(1, 2)));
    }

    #[test]
    fn validate_rejects_list_for_scalar_shape() {
        let err = validate(&Nested::vector(vec![1, 2]), &[]).unwrap_err();
        assert_eq!(err, MatrixError::dimension(2, 0));
    }

    #[test]
    fn validate_too_shallow_and_too_deep() {
        let shallow = list(vec![Nested::vector(vec![1, 2]), Nested::Leaf(3)]);
        assert_eq!(
            validate(&shallow, &[2, 2]),
            Err(MatrixError::Dimension {
                actual: 1,
                expected: 2,
                relation: Relation::Less,
            })
        );
        let deep = list(vec![Nested::Leaf(1), Nested::vector(vec![2])]);
        assert_eq!(
            validate(&deep, &[2]),
            Err(MatrixError::Dimension {
                actual: 2,
                expected: 1,
                relation: Relation::Greater,
            })
        );
    }

    #[test]
    fn validate_caps_rank_at_two() {
        let deep = list(vec![list(vec![list(vec![Nested::Leaf(1)])])]);
        let shape = measure_shape(&deep);
        assert_eq!(validate(&deep, &shape), Err(MatrixError::RankExceeded(3)));
    }

    #[test]
    fn index_bounds() {
        assert_eq!(validate_index(0, Some(1)), Ok(0));
        assert_eq!(validate_index(7, None), Ok(7));
        assert_eq!(validate_index(-1, Some(3)).unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(
            validate_index(3, Some(3)),
            Err(MatrixError::Index {
                index: 3,
                bound: Some(3),
            })
        );
    }

    #[test]
    fn get_leaf() {
        let x = Nested::from([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(get(&x, &[0, 2]), Ok(3));
        assert_eq!(get(&x, &[1, 0]), Ok(4));
        assert_eq!(get(&x, &[1]), Err(MatrixError::dimension(1, 2)));
        let err = get(&x, &[-1, -1]).unwrap_err();
        assert_eq!(err.to_string(), "index out of range (-1 < 0)");
    }

    #[test]
    fn nested_is_zero() {
        assert!(Nested::from([[0.0, 0.0], [0.0, 0.0]]).is_zero());
        assert!(!Nested::vector(vec![0, 1]).is_zero());
        assert!(Nested::<f64>::List(vec![]).is_zero());
    }

    #[test]
    fn shape_display_and_len() {
        assert_eq!(Shape::vector(4).to_string(), "(4)");
        assert_eq!(Shape::scalar().to_string(), "()");
        assert_eq!(Shape::matrix(2, 3).len(), 6);
        assert_eq!(Shape::scalar().len(), 1);
        assert!(Shape::vector(0).is_empty());
        assert_eq!(Shape::from_dims(&[1, 2, 3]), Err(MatrixError::RankExceeded(3)));
    }
}
