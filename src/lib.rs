//! # densemat
//!
//! Dense, shape-validated matrices with classical linear algebra.
//!
//! ## Quick start
//!
//! ```
//! use densemat::{mul, Matrix};
//!
//! let a = Matrix::new([[2.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
//! assert!((a.det().unwrap() + 3.0).abs() < 1e-12);
//!
//! let inv = a.inv().unwrap();
//! let id = mul(&a, &inv).unwrap();
//! assert!((id[(1, 1)] - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`shape`]: [`Shape`] (rank 0, 1 or 2), the nested literal form
//!   [`Nested`], and the measuring/validation functions every constructor
//!   runs: [`measure_shape`], [`validate`], [`validate_index`], [`get`].
//!
//! - [`matrix`]: [`Matrix<T>`] with row-major `Vec<T>` storage. Named
//!   constructors for each input form (`new`, `from_vec`, `from_nested`,
//!   `from_descriptor`, `from_matrix`, `empty`), factories (`zeros`,
//!   `ones`, `identity`), bounds-checked `get`/`set`, `transpose` and the
//!   comma/newline `Display` format. [`MatrixDescriptor`] is the
//!   `{ data, size }` reconstruction form.
//!
//! - [`linalg`]: `det` (Bareiss), `inv` (closed forms and Gauss–Jordan
//!   with partial pivoting), `rank` and `trace` as methods on `Matrix`.
//!
//! - [`ops`]: [`add`], [`sub`], [`mul`], [`div`] over matrix/matrix and
//!   matrix/scalar [`Operand`] pairs, the generic [`broadcast`], the
//!   [`is_zero`] predicate, and `std::ops` impls on `&Matrix<T>`.
//!
//! - [`traits`]: [`Scalar`] for storage and arithmetic,
//!   [`SignedScalar`] for the overflow-checked determinant, and
//!   [`FloatScalar`] where division by pivots is needed.
//!
//! Every fallible operation returns [`MatrixResult`]; [`MatrixError::kind`]
//! groups failures into type, dimension, index, range and singular errors.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | yes     | `Serialize`/`Deserialize` for `Matrix` (as a descriptor), `Nested` and `MatrixDescriptor`; `Matrix::from_json` |

pub mod error;
pub mod linalg;
pub mod matrix;
pub mod ops;
pub mod shape;
pub mod traits;

pub use error::{ErrorKind, MatrixError, MatrixResult, Relation};
pub use matrix::{Matrix, MatrixDescriptor};
#[cfg(feature = "serde")]
pub use matrix::index_from_json;
pub use ops::{add, broadcast, div, is_zero, mul, sub, Operand};
pub use shape::{get, measure_shape, validate, validate_index, Nested, Shape};
pub use traits::{FloatScalar, Scalar, SignedScalar};
