use crate::error::{MatrixError, MatrixResult};
use crate::traits::Scalar;
use crate::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Sum of diagonal elements. A length-1 vector returns its value.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::new([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
    /// assert_eq!(m.trace().unwrap(), 15);
    /// ```
    pub fn trace(&self) -> MatrixResult<T> {
        match *self.size() {
            [1] => Ok(self[0]),
            [rows, cols] if rows == cols => {
                let mut sum = T::zero();
                for i in 0..rows {
                    sum = sum + self[(i, i)];
                }
                Ok(sum)
            }
            [..] if self.ndim() > 0 => Err(MatrixError::NotSquare(self.shape())),
            _ => Err(MatrixError::UnsupportedRank {
                operation: "trace",
                rank: self.ndim(),
            }),
        }
    }
}
