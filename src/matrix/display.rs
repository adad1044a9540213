use core::fmt;

use super::Matrix;

/// Values joined by `,`; rows of a 2-D matrix joined by `\n`.
///
/// ```
/// use densemat::Matrix;
/// let m = Matrix::new([[1, 2, 3], [4, 5, 6]]);
/// assert_eq!(m.to_string(), "1,2,3\n4,5,6");
/// assert_eq!(Matrix::from_vec(vec![1.5, 2.0]).to_string(), "1.5,2");
/// ```
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = match *self.size() {
            [rows, cols] => (rows, cols),
            _ => (1, self.data.len()),
        };
        for i in 0..rows {
            if i > 0 {
                writeln!(f)?;
            }
            let row = &self.data[i * cols..(i + 1) * cols];
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", x)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_rows_on_lines() {
        let m = Matrix::new([[1.0, 2.5], [3.0, 4.0]]);
        assert_eq!(m.to_string(), "1,2.5\n3,4");
    }

    #[test]
    fn vector_is_one_line() {
        assert_eq!(Matrix::from_vec(vec![1, 2, 3]).to_string(), "1,2,3");
        assert_eq!(Matrix::<i32>::empty().to_string(), "");
    }

    #[test]
    fn zero_column_rows_are_blank() {
        let m = Matrix::<i32>::zeros(2, 0);
        assert_eq!(m.to_string(), "\n");
    }
}
