//! Determinant, inverse, rank and trace.
//!
//! - `det` uses Bareiss fraction-free elimination on signed elements. A
//!   signed integer determinant is exact, or `Overflow` when an
//!   intermediate minor does not fit; float matrices lose less precision
//!   than with naive elimination.
//! - `inv` uses closed forms up to 2x2 and Gauss–Jordan elimination with
//!   partial pivoting above that. Singular input is an error, never a
//!   matrix of infinities.
//! - `rank` reduces to row-echelon form, swapping dependent columns out.
//!
//! Vectors are accepted where a convention exists: a length-1 vector acts
//! as the 1x1 matrix holding its value and the empty vector has
//! determinant 1. These conventions are not standard linear algebra.

mod det;
mod inverse;
mod rank;
mod trace;

pub use det::bareiss;
