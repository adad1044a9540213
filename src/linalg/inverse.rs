use log::{debug, trace};

use crate::error::{MatrixError, MatrixResult};
use crate::shape::Shape;
use crate::traits::FloatScalar;
use crate::Matrix;

/// Gauss–Jordan inversion of an `n x n` row-major buffer.
///
/// Partial pivoting picks the row with the largest magnitude in each
/// pivot column. Returns `Singular` if a pivot column is exactly zero.
fn gauss_jordan<T: FloatScalar>(mut a: Vec<T>, n: usize) -> MatrixResult<Vec<T>> {
    let mut b = vec![T::zero(); n * n];
    for i in 0..n {
        b[i * n + i] = T::one();
    }

    for c in 0..n {
        let mut best = c;
        let mut best_val = a[c * n + c].abs();
        for r in (c + 1)..n {
            let val = a[r * n + c].abs();
            if val > best_val {
                best_val = val;
                best = r;
            }
        }

        if best_val.is_zero() {
            debug!("gauss-jordan: column {} has no nonzero pivot", c);
            return Err(MatrixError::Singular);
        }

        if best != c {
            trace!("gauss-jordan: swap rows {} and {}", c, best);
            for j in 0..n {
                a.swap(c * n + j, best * n + j);
                b.swap(c * n + j, best * n + j);
            }
        }

        let pivot = a[c * n + c];
        for j in 0..n {
            a[c * n + j] = a[c * n + j] / pivot;
            b[c * n + j] = b[c * n + j] / pivot;
        }

        for r in 0..n {
            if r == c {
                continue;
            }
            let factor = a[r * n + c] / a[c * n + c];
            if factor.is_zero() {
                continue;
            }
            for j in 0..n {
                a[r * n + j] = a[r * n + j] - factor * a[c * n + j];
                b[r * n + j] = b[r * n + j] - factor * b[c * n + j];
            }
        }
    }

    Ok(b)
}

impl<T: FloatScalar> Matrix<T> {
    /// Inverse.
    ///
    /// Closed forms handle 1x1 and 2x2; larger matrices use Gauss–Jordan
    /// elimination with partial pivoting after a determinant check. A
    /// length-1 vector inverts to the vector of its reciprocal.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::new([[4.0_f64, 7.0], [2.0, 6.0]]);
    /// let inv = m.inv().unwrap();
    /// assert!((inv[(0, 0)] - 0.6).abs() < 1e-12);
    /// assert!((inv[(1, 0)] + 0.2).abs() < 1e-12);
    ///
    /// let singular = Matrix::new([[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    /// assert!(singular.inv().is_err());
    /// ```
    pub fn inv(&self) -> MatrixResult<Self> {
        match *self.size() {
            [1] => {
                let x = self[0];
                if x.is_zero() {
                    return Err(MatrixError::Singular);
                }
                Ok(Matrix::from_vec(vec![T::one() / x]))
            }
            [_] => Err(MatrixError::NotSquare(self.shape())),
            [rows, cols] if rows == cols => self.inv_square(rows),
            [_, _] => Err(MatrixError::NotSquare(self.shape())),
            _ => Err(MatrixError::UnsupportedRank {
                operation: "inv",
                rank: self.ndim(),
            }),
        }
    }

    fn inv_square(&self, n: usize) -> MatrixResult<Self> {
        let d = self.data();
        match n {
            1 => {
                if d[0].is_zero() {
                    debug!("inv: 1x1 matrix is zero");
                    return Err(MatrixError::Singular);
                }
                Ok(Matrix::new([[T::one() / d[0]]]))
            }
            2 => {
                let det = self.det()?;
                if det.is_zero() {
                    debug!("inv: 2x2 determinant is zero");
                    return Err(MatrixError::Singular);
                }
                Ok(Matrix::new([
                    [d[3] / det, T::zero() - d[1] / det],
                    [T::zero() - d[2] / det, d[0] / det],
                ]))
            }
            _ => {
                let det = self.det()?;
                if det.is_zero() {
                    debug!("inv: {}x{} determinant is zero", n, n);
                    return Err(MatrixError::Singular);
                }
                let b = gauss_jordan(d.to_vec(), n)?;
                Ok(Matrix::from_parts(b, Shape::matrix(n, n)))
            }
        }
    }
}
