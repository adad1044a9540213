//! Element-wise arithmetic, matrix products and scalar broadcasting.
//!
//! The free functions take anything convertible into an [`Operand`], so
//! they accept `(&Matrix, &Matrix)` and `(&Matrix, scalar)` pairs. The left
//! operand must be a matrix; any other pairing is a type error naming both
//! operand kinds. The `std::ops` impls on `&Matrix<T>` forward here and
//! return a [`MatrixResult`].

use core::ops::{Add, Div, Mul, Sub};

use crate::error::{MatrixError, MatrixResult};
use crate::shape::Shape;
use crate::traits::{FloatScalar, Scalar};
use crate::Matrix;

/// One side of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a, T> {
    Matrix(&'a Matrix<T>),
    Scalar(T),
}

impl<T> Operand<'_, T> {
    /// Name of the operand kind, used in type errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Operand::Matrix(_) => "matrix",
            Operand::Scalar(_) => "scalar",
        }
    }
}

impl<'a, T> From<&'a Matrix<T>> for Operand<'a, T> {
    fn from(m: &'a Matrix<T>) -> Self {
        Operand::Matrix(m)
    }
}

macro_rules! impl_scalar_operand {
    ($($t:ty),*) => {
        $(
            impl<'a> From<$t> for Operand<'a, $t> {
                fn from(x: $t) -> Self {
                    Operand::Scalar(x)
                }
            }
        )*
    };
}

impl_scalar_operand!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

fn unsupported<T>(lhs: &Operand<'_, T>, rhs: &Operand<'_, T>) -> MatrixError {
    MatrixError::Type(format!(
        "unsupported operand types ({}, {})",
        lhs.kind_name(),
        rhs.kind_name()
    ))
}

/// Apply `op` leaf by leaf.
///
/// Two matrices must have identical shapes; a matrix and a scalar pair the
/// scalar with every element. The result always has the matrix's shape.
///
/// ```
/// use densemat::{broadcast, Matrix, Operand};
///
/// let a = Matrix::new([[1, 2], [3, 4]]);
/// let max = broadcast(Operand::Matrix(&a), Operand::Scalar(2), |x, y| x.max(y)).unwrap();
/// assert_eq!(max, Matrix::new([[2, 2], [3, 4]]));
/// ```
pub fn broadcast<T: Scalar>(
    lhs: Operand<'_, T>,
    rhs: Operand<'_, T>,
    op: impl Fn(T, T) -> T,
) -> MatrixResult<Matrix<T>> {
    match (lhs, rhs) {
        (Operand::Matrix(a), Operand::Matrix(b)) => {
            if a.shape() != b.shape() {
                return Err(MatrixError::ShapeMismatch {
                    left: a.shape(),
                    right: b.shape(),
                });
            }
            let data = a
                .data()
                .iter()
                .zip(b.data().iter())
                .map(|(&x, &y)| op(x, y))
                .collect();
            Ok(Matrix::from_parts(data, a.shape()))
        }
        (Operand::Matrix(a), Operand::Scalar(s)) => Ok(a.map(|x| op(x, s))),
        (l, r) => Err(unsupported(&l, &r)),
    }
}

/// Element-wise sum.
///
/// ```
/// use densemat::{add, Matrix};
/// let a = Matrix::new([[1, 2, 3], [4, 5, 6]]);
/// assert_eq!(add(&a, 1).unwrap(), Matrix::new([[2, 3, 4], [5, 6, 7]]));
/// assert!(add(&a, &Matrix::new([[1, 2], [4, 5]])).is_err());
/// ```
pub fn add<'a, T: Scalar + 'a>(
    lhs: impl Into<Operand<'a, T>>,
    rhs: impl Into<Operand<'a, T>>,
) -> MatrixResult<Matrix<T>> {
    broadcast(lhs.into(), rhs.into(), |x, y| x + y)
}

/// Element-wise difference.
pub fn sub<'a, T: Scalar + 'a>(
    lhs: impl Into<Operand<'a, T>>,
    rhs: impl Into<Operand<'a, T>>,
) -> MatrixResult<Matrix<T>> {
    broadcast(lhs.into(), rhs.into(), |x, y| x - y)
}

/// Matrix product, or element-wise scaling by a scalar.
///
/// Vector·vector is a dot product returned as a rank-0 matrix;
/// vector·matrix and matrix·vector give vectors.
///
/// ```
/// use densemat::{mul, Matrix};
/// let a = Matrix::new([[1, 2, 3], [4, 5, 6]]);
/// let b = Matrix::new([[1, 2], [3, 4], [5, 6]]);
/// assert_eq!(mul(&a, &b).unwrap(), Matrix::new([[22, 28], [49, 64]]));
///
/// let v = Matrix::from_vec(vec![1, 2, 3]);
/// assert_eq!(mul(&v, &v).unwrap().as_scalar(), Some(14));
/// ```
pub fn mul<'a, T: Scalar + 'a>(
    lhs: impl Into<Operand<'a, T>>,
    rhs: impl Into<Operand<'a, T>>,
) -> MatrixResult<Matrix<T>> {
    match (lhs.into(), rhs.into()) {
        (Operand::Matrix(a), Operand::Matrix(b)) => matmul(a, b),
        (Operand::Matrix(a), Operand::Scalar(s)) => Ok(a.map(|x| x * s)),
        (l, r) => Err(unsupported(&l, &r)),
    }
}

/// `A * inv(B)` for two matrices, element-wise division for a scalar.
///
/// Shapes are checked as for [`mul`] before `B` is inverted, so division
/// also fails on a non-square or singular `B`.
///
/// ```
/// use densemat::{div, Matrix};
/// let a = Matrix::new([[2.0_f64, 4.0], [6.0, 8.0]]);
/// assert_eq!(div(&a, 2.0).unwrap(), Matrix::new([[1.0, 2.0], [3.0, 4.0]]));
/// assert_eq!(div(&a, &a).unwrap(), Matrix::identity(2).unwrap());
/// ```
pub fn div<'a, T: FloatScalar + 'a>(
    lhs: impl Into<Operand<'a, T>>,
    rhs: impl Into<Operand<'a, T>>,
) -> MatrixResult<Matrix<T>> {
    match (lhs.into(), rhs.into()) {
        (Operand::Matrix(a), Operand::Matrix(b)) => {
            check_inner(a.shape(), b.shape())?;
            matmul(a, &b.inv()?)
        }
        (Operand::Matrix(a), Operand::Scalar(s)) => Ok(a.map(|x| x / s)),
        (l, r) => Err(unsupported(&l, &r)),
    }
}

/// Whether a scalar is zero, or a matrix holds only zeros.
pub fn is_zero<'a, T: Scalar + 'a>(x: impl Into<Operand<'a, T>>) -> bool {
    match x.into() {
        Operand::Matrix(m) => m.is_zero(),
        Operand::Scalar(s) => s.is_zero(),
    }
}

/// Shared dimension of `left * right`, or the mismatch error.
fn check_inner(left: Shape, right: Shape) -> MatrixResult<usize> {
    match (left.dims(), right.dims()) {
        (&[n], &[m]) | (&[n], &[m, _]) | (&[_, n], &[m]) | (&[_, n], &[m, _]) => {
            if n != m {
                return Err(MatrixError::InnerMismatch { left: n, right: m });
            }
            Ok(n)
        }
        _ => Err(MatrixError::UnsupportedRank {
            operation: "mul",
            rank: left.rank().min(right.rank()),
        }),
    }
}

/// Sum of `term(k)` for `k` in `0..inner`, seeded with the first term.
#[inline]
fn dot<T: Scalar>(inner: usize, term: impl Fn(usize) -> T) -> T {
    if inner == 0 {
        return T::zero();
    }
    let mut sum = term(0);
    for k in 1..inner {
        sum = sum + term(k);
    }
    sum
}

fn matmul<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> MatrixResult<Matrix<T>> {
    let inner = check_inner(a.shape(), b.shape())?;
    let (x, y) = (a.data(), b.data());
    let out = match (a.size(), b.size()) {
        (&[_], &[_]) => Matrix::from_parts(vec![dot(inner, |k| x[k] * y[k])], Shape::scalar()),
        (&[_], &[_, cols]) => Matrix::from_vec(
            (0..cols)
                .map(|j| dot(inner, |k| x[k] * y[k * cols + j]))
                .collect(),
        ),
        (&[rows, _], &[_]) => Matrix::from_vec(
            (0..rows)
                .map(|i| dot(inner, |k| x[i * inner + k] * y[k]))
                .collect(),
        ),
        (&[rows, _], &[_, cols]) => Matrix::from_fn(rows, cols, |i, j| {
            dot(inner, |k| x[i * inner + k] * y[k * cols + j])
        }),
        _ => unreachable!("check_inner rejects rank-0 operands"),
    };
    Ok(out)
}

// ── std::ops ────────────────────────────────────────────────────────

impl<T: Scalar> Add<&Matrix<T>> for &Matrix<T> {
    type Output = MatrixResult<Matrix<T>>;

    fn add(self, rhs: &Matrix<T>) -> Self::Output {
        add(self, rhs)
    }
}

impl<T: Scalar> Add<T> for &Matrix<T> {
    type Output = MatrixResult<Matrix<T>>;

    fn add(self, rhs: T) -> Self::Output {
        broadcast(Operand::Matrix(self), Operand::Scalar(rhs), |x, y| x + y)
    }
}

impl<T: Scalar> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = MatrixResult<Matrix<T>>;

    fn sub(self, rhs: &Matrix<T>) -> Self::Output {
        sub(self, rhs)
    }
}

impl<T: Scalar> Sub<T> for &Matrix<T> {
    type Output = MatrixResult<Matrix<T>>;

    fn sub(self, rhs: T) -> Self::Output {
        broadcast(Operand::Matrix(self), Operand::Scalar(rhs), |x, y| x - y)
    }
}

impl<T: Scalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = MatrixResult<Matrix<T>>;

    fn mul(self, rhs: &Matrix<T>) -> Self::Output {
        matmul(self, rhs)
    }
}

impl<T: Scalar> Mul<T> for &Matrix<T> {
    type Output = MatrixResult<Matrix<T>>;

    fn mul(self, rhs: T) -> Self::Output {
        Ok(self.map(|x| x * rhs))
    }
}

impl<T: FloatScalar> Div<&Matrix<T>> for &Matrix<T> {
    type Output = MatrixResult<Matrix<T>>;

    fn div(self, rhs: &Matrix<T>) -> Self::Output {
        div(self, rhs)
    }
}

impl<T: FloatScalar> Div<T> for &Matrix<T> {
    type Output = MatrixResult<Matrix<T>>;

    fn div(self, rhs: T) -> Self::Output {
        Ok(self.map(|x| x / rhs))
    }
}
