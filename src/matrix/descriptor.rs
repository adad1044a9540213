//! The `{ data, size }` reconstruction form of a matrix.

use crate::error::MatrixResult;
use crate::shape::{validate, Nested, Shape};

use super::Matrix;

/// Plain description of a matrix: a nested payload plus its asserted shape.
///
/// Reconstruction never infers the shape; `data` is validated against
/// `size` and fails exactly like fresh construction would.
///
/// ```
/// use densemat::{Matrix, MatrixDescriptor, Nested};
///
/// let m = Matrix::new([[1, 2], [3, 4]]);
/// let desc = m.to_descriptor();
/// assert_eq!(desc.size, vec![2, 2]);
/// assert_eq!(Matrix::from_descriptor(desc).unwrap(), m);
///
/// let bad = MatrixDescriptor { data: Nested::from([[1, 2]]), size: vec![2, 2] };
/// assert!(Matrix::from_descriptor(bad).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixDescriptor<T> {
    pub data: Nested<T>,
    pub size: Vec<usize>,
}

impl<T> Matrix<T> {
    /// Adopt a descriptor after validating its payload against its size.
    pub fn from_descriptor(descriptor: MatrixDescriptor<T>) -> MatrixResult<Self> {
        let MatrixDescriptor { data, size } = descriptor;
        validate(&data, &size)?;
        Self::from_validated(data, Shape::from_dims(&size)?)
    }

    /// Describe this matrix as `{ data, size }`.
    pub fn to_descriptor(&self) -> MatrixDescriptor<T>
    where
        T: Clone,
    {
        MatrixDescriptor {
            data: self.to_nested(),
            size: self.size().to_vec(),
        }
    }
}

#[cfg(feature = "serde")]
mod json {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use crate::error::{MatrixError, MatrixResult};
    use crate::shape::Nested;
    use crate::traits::Scalar;

    use super::{Matrix, MatrixDescriptor};

    impl<T: Scalar + Serialize> Serialize for Matrix<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.to_descriptor().serialize(serializer)
        }
    }

    impl<'de, T: Scalar + Deserialize<'de>> Deserialize<'de> for Matrix<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let descriptor = MatrixDescriptor::<T>::deserialize(deserializer)?;
            Matrix::from_descriptor(descriptor).map_err(serde::de::Error::custom)
        }
    }

    fn type_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn is_falsy(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(_) | Value::Object(_) => false,
        }
    }

    impl<T: Scalar + DeserializeOwned> Matrix<T> {
        /// Construct from an arbitrary JSON value.
        ///
        /// Tried in order: an object with `data` and `size` is a descriptor;
        /// an array is a nested literal; a falsy value (`null`, `false`, `0`,
        /// `""`) yields the empty matrix; anything else is a type error
        /// naming the JSON type.
        ///
        /// ```
        /// use densemat::Matrix;
        /// use serde_json::json;
        ///
        /// let m = Matrix::<f64>::from_json(&json!([[1, 2], [3, 4]])).unwrap();
        /// assert_eq!(m.size(), &[2, 2]);
        ///
        /// let d = Matrix::<f64>::from_json(&json!({"data": [1, 2], "size": [2]})).unwrap();
        /// assert_eq!(d.size(), &[2]);
        ///
        /// assert_eq!(Matrix::<f64>::from_json(&json!(null)).unwrap(), Matrix::empty());
        /// assert!(Matrix::<f64>::from_json(&json!("text")).is_err());
        /// ```
        pub fn from_json(value: &Value) -> MatrixResult<Self> {
            match value {
                Value::Object(map) if map.contains_key("data") && map.contains_key("size") => {
                    let descriptor: MatrixDescriptor<T> = serde_json::from_value(value.clone())
                        .map_err(|e| MatrixError::Type(format!("invalid matrix descriptor: {}", e)))?;
                    Matrix::from_descriptor(descriptor)
                }
                Value::Array(_) => {
                    let payload: Nested<T> = serde_json::from_value(value.clone())
                        .map_err(|e| MatrixError::Type(format!("invalid matrix data: {}", e)))?;
                    Matrix::from_nested(payload)
                }
                v if is_falsy(v) => Ok(Matrix::empty()),
                v => Err(MatrixError::Type(format!(
                    "unsupported type of data ({})",
                    type_name(v)
                ))),
            }
        }
    }

    /// Parse a JSON index vector such as `[0, 2]` into coordinates.
    ///
    /// Non-integer entries are a type error; range checks happen later in
    /// [`Matrix::get`] / [`Matrix::set`].
    pub fn index_from_json(value: &Value) -> MatrixResult<Vec<isize>> {
        let items = value.as_array().ok_or_else(|| {
            MatrixError::Type(format!("array expected, got {}", type_name(value)))
        })?;
        items
            .iter()
            .map(|item| {
                item.as_i64()
                    .and_then(|i| isize::try_from(i).ok())
                    .ok_or_else(|| {
                        MatrixError::Type(format!("index must be an integer (value: {})", item))
                    })
            })
            .collect()
    }
}

#[cfg(feature = "serde")]
pub use json::index_from_json;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, MatrixError};

    #[test]
    fn descriptor_round_trip() {
        let m = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let back = Matrix::from_descriptor(m.to_descriptor()).unwrap();
        assert_eq!(back, m);

        let v = Matrix::from_vec(vec![7, 8]);
        assert_eq!(Matrix::from_descriptor(v.to_descriptor()).unwrap(), v);

        let e = Matrix::<i32>::empty();
        assert_eq!(Matrix::from_descriptor(e.to_descriptor()).unwrap(), e);
    }

    #[test]
    fn descriptor_is_validated() {
        let desc = MatrixDescriptor {
            data: Nested::from([[1, 2], [3, 4]]),
            size: vec![2, 3],
        };
        assert_eq!(
            Matrix::from_descriptor(desc).unwrap_err(),
            MatrixError::dimension(2, 3)
        );
    }

    #[test]
    fn descriptor_with_scalar_size() {
        let desc = MatrixDescriptor {
            data: Nested::Leaf(5),
            size: vec![],
        };
        let m = Matrix::from_descriptor(desc).unwrap();
        assert_eq!(m.as_scalar(), Some(5));
        assert_eq!(m.to_descriptor().data, Nested::Leaf(5));

        let desc = MatrixDescriptor {
            data: Nested::vector(vec![5]),
            size: vec![],
        };
        assert_eq!(
            Matrix::from_descriptor(desc).unwrap_err().kind(),
            ErrorKind::Dimension
        );
    }

    #[cfg(feature = "serde")]
    mod json {
        use super::*;
        use serde_json::json;

        #[test]
        fn serializes_as_descriptor() {
            let m = Matrix::new([[1, 2], [3, 4]]);
            let value = serde_json::to_value(&m).unwrap();
            assert_eq!(value, json!({"data": [[1, 2], [3, 4]], "size": [2, 2]}));
            let back: Matrix<i32> = serde_json::from_value(value).unwrap();
            assert_eq!(back, m);
        }

        #[test]
        fn deserialize_revalidates() {
            let bad = json!({"data": [[1, 2], [3]], "size": [2, 2]});
            assert!(serde_json::from_value::<Matrix<i32>>(bad).is_err());
        }

        #[test]
        fn from_json_dispatch() {
            let m = Matrix::<f64>::from_json(&json!([[1, 2], [3, 4]])).unwrap();
            assert_eq!(m, Matrix::new([[1.0, 2.0], [3.0, 4.0]]));

            let d = Matrix::<f64>::from_json(&json!({"data": [[1, 2]], "size": [1, 2]})).unwrap();
            assert_eq!(d.size(), &[1, 2]);

            for falsy in [json!(null), json!(false), json!(0), json!("")] {
                assert_eq!(Matrix::<f64>::from_json(&falsy).unwrap(), Matrix::empty());
            }

            let err = Matrix::<f64>::from_json(&json!("abc")).unwrap_err();
            assert_eq!(err.to_string(), "unsupported type of data (string)");
            let err = Matrix::<f64>::from_json(&json!(3)).unwrap_err();
            assert_eq!(err.to_string(), "unsupported type of data (number)");
            let err = Matrix::<f64>::from_json(&json!({"rows": 2})).unwrap_err();
            assert_eq!(err.to_string(), "unsupported type of data (object)");
        }

        #[test]
        fn from_json_shape_errors_match_fresh_construction() {
            let fresh = Matrix::from_nested(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
            let json = Matrix::<f64>::from_json(&json!([[1, 2], [3]])).unwrap_err();
            assert_eq!(fresh, json);

            let deep = Matrix::<f64>::from_json(&json!([[[1]]])).unwrap_err();
            assert_eq!(deep, MatrixError::RankExceeded(3));
        }

        #[test]
        fn json_index() {
            assert_eq!(index_from_json(&json!([0, 2])), Ok(vec![0, 2]));
            assert_eq!(index_from_json(&json!([-1])), Ok(vec![-1]));
            let err = index_from_json(&json!([1.5])).unwrap_err();
            assert_eq!(err.to_string(), "index must be an integer (value: 1.5)");
            assert_eq!(index_from_json(&json!(3)).unwrap_err().kind(), ErrorKind::Type);
        }
    }
}
