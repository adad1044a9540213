mod descriptor;
mod display;

pub use descriptor::MatrixDescriptor;
#[cfg(feature = "serde")]
pub use descriptor::index_from_json;

use core::ops::{Index, IndexMut};

use crate::error::{MatrixError, MatrixResult};
use crate::shape::{measure_shape, validate, validate_index, Nested, Shape};
use crate::traits::Scalar;

/// Dense matrix of rank 0, 1 or 2.
///
/// Row-major `Vec<T>` storage plus a [`Shape`]. Every constructor either
/// builds the storage itself or validates the input payload against the
/// shape, so the flat buffer always holds exactly `shape.len()` values.
/// The shape never changes after construction; values can be overwritten
/// through [`Matrix::set`] or `IndexMut`.
///
/// # Examples
///
/// ```
/// use densemat::Matrix;
///
/// let a = Matrix::new([[1.0_f64, 2.0], [3.0, 4.0]]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.size(), &[2, 2]);
///
/// let b = Matrix::<f64>::identity(3).unwrap();
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    shape: Shape,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T> Matrix<T> {
    /// Empty matrix: no values, shape `[0]`.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::<f64>::empty();
    /// assert_eq!(m.size(), &[0]);
    /// assert!(m.data().is_empty());
    /// ```
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            shape: Shape::vector(0),
        }
    }

    /// Create a matrix from a row-major 2D array.
    ///
    /// An array without rows measures as the empty vector `[0]`.
    pub fn new<const M: usize, const N: usize>(rows: [[T; N]; M]) -> Self {
        let shape = if M == 0 {
            Shape::vector(0)
        } else {
            Shape::matrix(M, N)
        };
        Self {
            data: rows.into_iter().flatten().collect(),
            shape,
        }
    }

    /// Create a vector from its values.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let v = Matrix::from_vec(vec![1, 2, 3]);
    /// assert_eq!(v.size(), &[3]);
    /// ```
    pub fn from_vec(data: Vec<T>) -> Self {
        let shape = Shape::vector(data.len());
        Self { data, shape }
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            shape: Shape::matrix(nrows, ncols),
        }
    }

    /// Build from parts already known to agree.
    pub(crate) fn from_parts(data: Vec<T>, shape: Shape) -> Self {
        debug_assert_eq!(data.len(), shape.len());
        Self { data, shape }
    }

    /// Create a matrix from a nested payload, inferring its shape.
    ///
    /// The shape is measured from the first element at each level, then the
    /// whole payload is validated against it. Ragged rows and nesting deeper
    /// than two levels are rejected. A bare leaf is not a matrix literal.
    ///
    /// ```
    /// use densemat::{Matrix, Nested};
    ///
    /// let m = Matrix::from_nested(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    /// assert_eq!(m.size(), &[2, 3]);
    ///
    /// let ragged = Matrix::from_nested(vec![vec![1, 2], vec![3]]);
    /// assert!(ragged.is_err());
    /// ```
    pub fn from_nested(payload: impl Into<Nested<T>>) -> MatrixResult<Self> {
        let payload = payload.into();
        if let Nested::Leaf(_) = payload {
            return Err(MatrixError::Type(format!(
                "unsupported type of data ({})",
                payload.kind_name()
            )));
        }
        let dims = measure_shape(&payload);
        validate(&payload, &dims)?;
        Self::from_validated(payload, Shape::from_dims(&dims)?)
    }

    /// Copy another matrix.
    pub fn from_matrix(other: &Matrix<T>) -> Self
    where
        T: Clone,
    {
        other.clone()
    }

    /// Flatten a payload that has already passed [`validate`] for `shape`.
    pub(crate) fn from_validated(payload: Nested<T>, shape: Shape) -> MatrixResult<Self> {
        let mut data = Vec::with_capacity(shape.len());
        flatten_into(payload, &mut data);
        if data.len() != shape.len() {
            return Err(MatrixError::dimension(data.len(), shape.len()));
        }
        Ok(Self { data, shape })
    }
}

fn flatten_into<T>(node: Nested<T>, out: &mut Vec<T>) {
    match node {
        Nested::Leaf(x) => out.push(x),
        Nested::List(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
    }
}

impl<T: Scalar> Matrix<T> {
    /// Create an `nrows x ncols` matrix filled with `value`.
    pub fn fill(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            shape: Shape::matrix(nrows, ncols),
        }
    }

    /// Create an `nrows x ncols` matrix of zeros.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.size(), &[2, 3]);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::fill(nrows, ncols, T::zero())
    }

    /// Create an `nrows x ncols` matrix of ones.
    pub fn ones(nrows: usize, ncols: usize) -> Self {
        Self::fill(nrows, ncols, T::one())
    }

    /// [`Matrix::zeros`] taking a `[rows, cols]` size vector.
    pub fn zeros_sized(size: &[usize]) -> MatrixResult<Self> {
        let (rows, cols) = size_pair(size)?;
        Ok(Self::zeros(rows, cols))
    }

    /// [`Matrix::ones`] taking a `[rows, cols]` size vector.
    pub fn ones_sized(size: &[usize]) -> MatrixResult<Self> {
        let (rows, cols) = size_pair(size)?;
        Ok(Self::ones(rows, cols))
    }

    /// Create an `n x n` identity matrix. `n` must be positive.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let id = Matrix::<i32>::identity(2).unwrap();
    /// assert_eq!(id, Matrix::new([[1, 0], [0, 1]]));
    /// assert!(Matrix::<i32>::identity(0).is_err());
    /// ```
    pub fn identity(n: usize) -> MatrixResult<Self> {
        if n == 0 {
            return Err(MatrixError::InvalidSize(n));
        }
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        Ok(m)
    }
}

fn size_pair(size: &[usize]) -> MatrixResult<(usize, usize)> {
    match *size {
        [rows, cols] => Ok((rows, cols)),
        _ => Err(MatrixError::SizeVector(size.len())),
    }
}

// ── Accessors ───────────────────────────────────────────────────────

impl<T> Matrix<T> {
    /// Stored values in row-major order.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Axis lengths: `[]`, `[len]` or `[rows, cols]`.
    #[inline]
    pub fn size(&self) -> &[usize] {
        self.shape.dims()
    }

    /// Shape as a value, for comparisons and error payloads.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of axes (0, 1 or 2).
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.rank()
    }

    /// Length of the first axis (the vector length for rank 1).
    #[inline]
    pub fn nrows(&self) -> usize {
        self.size().first().copied().unwrap_or(0)
    }

    /// Length of the second axis (0 below rank 2).
    #[inline]
    pub fn ncols(&self) -> usize {
        self.size().get(1).copied().unwrap_or(0)
    }

    /// Number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix stores no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether this is a rank-2 matrix with as many rows as columns.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.shape.rank() == 2 && self.nrows() == self.ncols()
    }

    /// Sole value of a rank-0 matrix, such as a vector dot product.
    pub fn as_scalar(&self) -> Option<T>
    where
        T: Copy,
    {
        if self.shape.rank() == 0 {
            self.data.first().copied()
        } else {
            None
        }
    }

    /// Row-major offset of a checked coordinate vector.
    fn offset(&self, index: &[isize]) -> MatrixResult<usize> {
        let dims = self.shape.dims();
        if index.len() != dims.len() {
            return Err(MatrixError::dimension(index.len(), dims.len()));
        }
        let mut offset = 0;
        for (&i, &len) in index.iter().zip(dims.iter()) {
            offset = offset * len + validate_index(i, Some(len))?;
        }
        Ok(offset)
    }

    /// Value at a coordinate vector with one entry per axis.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::new([[1, 2, 3], [4, 5, 6]]);
    /// assert_eq!(m.get(&[0, 2]).unwrap(), 3);
    /// let err = m.get(&[-1, -1]).unwrap_err();
    /// assert_eq!(err.to_string(), "index out of range (-1 < 0)");
    /// ```
    pub fn get(&self, index: &[isize]) -> MatrixResult<T>
    where
        T: Copy,
    {
        let offset = self.offset(index)?;
        Ok(self.data[offset])
    }

    /// Overwrite the value at a coordinate vector.
    ///
    /// All checks run before the write, so a failed call leaves the matrix
    /// untouched. Returns `self` so calls can be chained.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let mut m = Matrix::<i32>::zeros(2, 2);
    /// m.set(&[0, 1], 5).unwrap().set(&[1, 0], 7).unwrap();
    /// assert_eq!(m, Matrix::new([[0, 5], [7, 0]]));
    /// ```
    pub fn set(&mut self, index: &[isize], value: T) -> MatrixResult<&mut Self> {
        let offset = self.offset(index)?;
        self.data[offset] = value;
        Ok(self)
    }

    /// Rebuild the nested payload form.
    pub fn to_nested(&self) -> Nested<T>
    where
        T: Clone,
    {
        match *self.shape.dims() {
            [] => Nested::Leaf(self.data[0].clone()),
            [_] => Nested::vector(self.data.iter().cloned()),
            [_, cols] => {
                let rows = self.shape.dims()[0];
                Nested::List(
                    (0..rows)
                        .map(|i| Nested::vector(self.data[i * cols..(i + 1) * cols].iter().cloned()))
                        .collect(),
                )
            }
            _ => unreachable!("shape is capped at two dimensions"),
        }
    }

    /// Apply a function to every element, preserving the shape.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::new([[1.0_f64, 4.0], [9.0, 16.0]]);
    /// let r = m.map(|x| x.sqrt());
    /// assert_eq!(r, Matrix::new([[1.0, 2.0], [3.0, 4.0]]));
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Matrix<U>
    where
        T: Copy,
    {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape,
        }
    }
}

impl<T: Scalar> Matrix<T> {
    /// Whether every value is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| x.is_zero())
    }

    /// Transpose.
    ///
    /// Vectors are their own transpose. A matrix without columns cannot be
    /// transposed.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::new([[1, 2, 3], [4, 5, 6]]);
    /// let t = m.transpose().unwrap();
    /// assert_eq!(t, Matrix::new([[1, 4], [2, 5], [3, 6]]));
    /// ```
    pub fn transpose(&self) -> MatrixResult<Self> {
        match *self.shape.dims() {
            [_] => Ok(self.clone()),
            [rows, cols] => {
                if cols == 0 {
                    return Err(MatrixError::ZeroColumns);
                }
                Ok(Self::from_fn(cols, rows, |x, y| self.data[y * cols + x]))
            }
            _ => Err(MatrixError::UnsupportedRank {
                operation: "transpose",
                rank: self.shape.rank(),
            }),
        }
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    /// Panics if the coordinate is outside a rank-2 matrix.
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            self.shape.rank() == 2 && row < self.nrows() && col < self.ncols(),
            "index ({}, {}) out of bounds for shape {}",
            row,
            col,
            self.shape,
        );
        &self.data[row * self.ncols() + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            self.shape.rank() == 2 && row < self.nrows() && col < self.ncols(),
            "index ({}, {}) out of bounds for shape {}",
            row,
            col,
            self.shape,
        );
        let ncols = self.ncols();
        &mut self.data[row * ncols + col]
    }
}

impl<T> Index<usize> for Matrix<T> {
    type Output = T;

    /// Flat row-major access.
    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Relation};

    #[test]
    fn empty() {
        let m = Matrix::<f64>::empty();
        assert_eq!(m.size(), &[0]);
        assert!(m.data().is_empty());
        assert_eq!(Matrix::<f64>::default(), m);
        assert!(m.is_empty());
        assert_eq!(m.shape(), Shape::vector(0));
        assert!(!Matrix::new([[1]]).is_empty());
    }

    #[test]
    fn new_from_array() {
        let m = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(m.size(), &[2, 3]);
        assert_eq!(m.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m[(1, 0)], 4.0);
    }

    #[test]
    fn new_without_rows_is_empty_vector() {
        let m: Matrix<f64> = Matrix::new::<0, 3>([]);
        assert_eq!(m.size(), &[0]);
    }

    #[test]
    fn from_nested_measures_shape() {
        let m = Matrix::from_nested(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        assert_eq!(m.size(), &[3, 2]);
        let v = Matrix::from_nested(Nested::vector(vec![1.0, 2.0])).unwrap();
        assert_eq!(v.size(), &[2]);
        let e = Matrix::<i32>::from_nested(Nested::List(vec![])).unwrap();
        assert_eq!(e, Matrix::empty());
    }

    #[test]
    fn from_nested_rejects_bad_payloads() {
        let ragged = Matrix::from_nested(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(ragged, MatrixError::dimension(1, 2));

        let deep = Nested::List(vec![Nested::List(vec![Nested::vector(vec![1])])]);
        assert_eq!(
            Matrix::from_nested(deep).unwrap_err(),
            MatrixError::RankExceeded(3)
        );

        let mixed = Nested::List(vec![Nested::Leaf(1), Nested::vector(vec![2])]);
        assert_eq!(
            Matrix::from_nested(mixed).unwrap_err(),
            MatrixError::Dimension {
                actual: 2,
                expected: 1,
                relation: Relation::Greater,
            }
        );

        let leaf = Matrix::from_nested(Nested::Leaf(3.0)).unwrap_err();
        assert_eq!(leaf.kind(), ErrorKind::Type);
        assert_eq!(leaf.to_string(), "unsupported type of data (scalar)");
    }

    #[test]
    fn from_nested_copies_input() {
        let rows = vec![vec![1, 2], vec![3, 4]];
        let mut m = Matrix::from_nested(rows.clone()).unwrap();
        m.set(&[0, 0], 9).unwrap();
        assert_eq!(rows[0][0], 1);
        let copy = Matrix::from_matrix(&m);
        m.set(&[1, 1], 0).unwrap();
        assert_eq!(copy.get(&[1, 1]).unwrap(), 4);
    }

    #[test]
    fn factories() {
        let z = Matrix::<f64>::zeros(2, 3);
        assert_eq!(z.size(), &[2, 3]);
        assert!(z.is_zero());
        let o = Matrix::<i32>::ones_sized(&[2, 2]).unwrap();
        assert_eq!(o, Matrix::new([[1, 1], [1, 1]]));
        assert_eq!(
            Matrix::<i32>::zeros_sized(&[3]).unwrap_err(),
            MatrixError::SizeVector(1)
        );
        let id = Matrix::<f64>::identity(3).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
        assert_eq!(
            Matrix::<f64>::identity(0).unwrap_err(),
            MatrixError::InvalidSize(0)
        );
    }

    #[test]
    fn get_and_set() {
        let mut m = Matrix::new([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.get(&[0, 2]), Ok(3));
        assert_eq!(m.get(&[1, 1]), Ok(5));
        assert_eq!(m.get(&[0]), Err(MatrixError::dimension(1, 2)));
        assert_eq!(m.get(&[2, 0]).unwrap_err().to_string(), "index out of range (2 > 1)");

        m.set(&[1, 1], 10).unwrap();
        assert_eq!(m[(1, 1)], 10);
    }

    #[test]
    fn failed_set_leaves_matrix_untouched() {
        let mut m = Matrix::new([[1, 2], [3, 4]]);
        let before = m.clone();
        assert!(m.set(&[0, 2], 9).is_err());
        assert!(m.set(&[-1, 0], 9).is_err());
        assert!(m.set(&[0], 9).is_err());
        assert_eq!(m, before);
    }

    #[test]
    fn vector_get() {
        let v = Matrix::from_vec(vec![4.0, 5.0]);
        assert_eq!(v.get(&[1]), Ok(5.0));
        assert_eq!(v.nrows(), 2);
        assert_eq!(v.ncols(), 0);
        assert_eq!(v[1], 5.0);
    }

    #[test]
    fn transpose() {
        let m = Matrix::new([[1, 2, 3], [4, 5, 6]]);
        let t = m.transpose().unwrap();
        assert_eq!(t.size(), &[3, 2]);
        assert_eq!(t[(2, 1)], 6);
        assert_eq!(t.transpose().unwrap(), m);

        let v = Matrix::from_vec(vec![1, 2, 3]);
        assert_eq!(v.transpose().unwrap(), v);

        let no_cols = Matrix::from_nested(vec![Vec::<i32>::new(), Vec::new()]).unwrap();
        assert_eq!(no_cols.size(), &[2, 0]);
        assert_eq!(no_cols.transpose().unwrap_err(), MatrixError::ZeroColumns);
    }

    #[test]
    fn to_nested_round_trip() {
        let m = Matrix::new([[1, 2], [3, 4]]);
        assert_eq!(m.to_nested(), Nested::from([[1, 2], [3, 4]]));
        assert_eq!(Matrix::from_nested(m.to_nested()).unwrap(), m);
        let v = Matrix::from_vec(vec![1.5]);
        assert_eq!(v.to_nested(), Nested::vector(vec![1.5]));
    }

    #[test]
    fn map_preserves_shape() {
        let m = Matrix::new([[1, 2], [3, 4]]);
        let doubled = m.map(|x| x * 2);
        assert_eq!(doubled, Matrix::new([[2, 4], [6, 8]]));
        let as_float = m.map(|x| x as f64);
        assert_eq!(as_float.size(), &[2, 2]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_bounds_panics() {
        let m = Matrix::new([[1, 2], [3, 4]]);
        let _ = m[(0, 2)];
    }
}
