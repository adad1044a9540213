use log::debug;

use crate::traits::FloatScalar;
use crate::Matrix;

impl<T: FloatScalar> Matrix<T> {
    /// Rank by row-echelon reduction.
    ///
    /// Starts from the column count. Whenever a diagonal entry is zero and no
    /// row below can be swapped in, that column is dependent: it is replaced
    /// by the last live column and the bound shrinks by one. A vector is
    /// treated as a single row.
    ///
    /// ```
    /// use densemat::Matrix;
    /// let m = Matrix::new([[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    /// assert_eq!(m.rank(), 2);
    /// ```
    pub fn rank(&self) -> usize {
        let (rows, cols) = match *self.size() {
            [rows, cols] => (rows, cols),
            [len] => (1, len),
            _ => (1, 1),
        };
        let mut a = self.data().to_vec();

        let mut rank = cols;
        let mut row = 0;
        while row < rank && row < rows {
            let pivot = a[row * cols + row];
            if !pivot.is_zero() {
                for r in 0..rows {
                    if r == row {
                        continue;
                    }
                    let mult = a[r * cols + row] / pivot;
                    for i in 0..rank {
                        a[r * cols + i] = a[r * cols + i] - mult * a[row * cols + i];
                    }
                }
                row += 1;
                continue;
            }

            match ((row + 1)..rows).find(|&r| !a[r * cols + row].is_zero()) {
                Some(r) => {
                    for i in 0..rank {
                        a.swap(row * cols + i, r * cols + i);
                    }
                }
                None => {
                    rank -= 1;
                    debug!("rank: column {} is dependent, bound now {}", row, rank);
                    for r in 0..rows {
                        a[r * cols + row] = a[r * cols + rank];
                    }
                }
            }
        }

        rank.min(rows)
    }
}
