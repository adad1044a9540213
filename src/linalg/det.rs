use log::trace;

use crate::error::{MatrixError, MatrixResult};
use crate::traits::SignedScalar;
use crate::Matrix;

const OVERFLOW: MatrixError = MatrixError::Overflow("det");

/// `a * b - c * d` with every step checked.
#[inline]
fn cross<T: SignedScalar>(a: T, b: T, c: T, d: T) -> MatrixResult<T> {
    let ab = a.mul_checked(b).ok_or(OVERFLOW)?;
    let cd = c.mul_checked(d).ok_or(OVERFLOW)?;
    ab.sub_checked(cd).ok_or(OVERFLOW)
}

/// Determinant of an `n x n` row-major buffer by Bareiss elimination.
///
/// Row swaps are tracked in a permutation instead of moving storage. If a
/// pivot column is zero in every remaining row the determinant is zero and
/// the function returns early. Every division is exact for integer input.
///
/// Intermediate values are products of minors and can exceed the element
/// type long before the determinant does. For integers this is reported as
/// [`MatrixError::Overflow`] rather than wrapping.
///
/// `a` is consumed as scratch space. Panics if `a.len() != n * n`.
///
/// ```
/// use densemat::linalg::bareiss;
/// assert_eq!(bareiss(vec![2, 2, 3, 4, 5, 6, 7, 8, 9], 3), Ok(-3));
/// assert!(bareiss(vec![i8::MAX, 2, -3, i8::MAX], 2).is_err());
/// ```
pub fn bareiss<T: SignedScalar>(mut a: Vec<T>, n: usize) -> MatrixResult<T> {
    assert_eq!(a.len(), n * n, "buffer length {} does not match {}x{}", a.len(), n, n);
    match n {
        0 => return Ok(T::one()),
        1 => return Ok(a[0]),
        2 => return cross(a[0], a[3], a[2], a[1]),
        _ => {}
    }

    let mut rows: Vec<usize> = (0..n).collect();
    let mut negated = false;

    for k in 0..n {
        if a[rows[k] * n + k].is_zero() {
            match (k + 1..n).find(|&r| !a[rows[r] * n + k].is_zero()) {
                Some(r) => {
                    trace!("bareiss: pivot {} swaps with row {}", k, r);
                    rows.swap(k, r);
                    negated = !negated;
                }
                None => return Ok(T::zero()),
            }
        }

        let pk = rows[k];
        let pivot = a[pk * n + k];
        let prev = if k == 0 {
            T::one()
        } else {
            a[rows[k - 1] * n + (k - 1)]
        };

        for &ri in &rows[k + 1..] {
            let a_ik = a[ri * n + k];
            for j in (k + 1)..n {
                let num = cross(a[ri * n + j], pivot, a_ik, a[pk * n + j])?;
                a[ri * n + j] = num.div_checked(prev).ok_or(OVERFLOW)?;
            }
        }
    }

    let det = a[rows[n - 1] * n + (n - 1)];
    if negated {
        T::zero().sub_checked(det).ok_or(OVERFLOW)
    } else {
        Ok(det)
    }
}

impl<T: SignedScalar> Matrix<T> {
    /// Determinant.
    ///
    /// Matrices must be square; the 0x0 matrix has determinant 1. A
    /// length-1 vector returns its value and the empty vector returns 1.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::new([[2, 2, 3], [4, 5, 6], [7, 8, 9]]);
    /// assert_eq!(m.det().unwrap(), -3);
    ///
    /// let f = Matrix::new([[3.0_f64, 8.0], [4.0, 6.0]]);
    /// assert_eq!(f.det().unwrap(), -14.0);
    /// ```
    ///
    /// Unsigned matrices have no determinant; widen them first.
    ///
    /// ```compile_fail
    /// use densemat::Matrix;
    /// let m = Matrix::<u32>::new([[0, 1], [1, 0]]);
    /// let _ = m.det();
    /// ```
    pub fn det(&self) -> MatrixResult<T> {
        match *self.size() {
            [0] => Ok(T::one()),
            [1] => Ok(self[0]),
            [_] => Err(MatrixError::NotSquare(self.shape())),
            [rows, cols] if rows == cols => bareiss(self.data().to_vec(), cols),
            [_, _] => Err(MatrixError::NotSquare(self.shape())),
            _ => Err(MatrixError::UnsupportedRank {
                operation: "det",
                rank: self.ndim(),
            }),
        }
    }
}
