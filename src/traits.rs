use core::fmt::{Debug, Display};
use num_traits::{CheckedDiv, CheckedMul, CheckedSub, Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types. Storage, indexing,
/// element-wise arithmetic and multiplication only need `Scalar`.
pub trait Scalar: Copy + PartialEq + Debug + Display + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Display + Zero + One + Num> Scalar for T {}

/// Signed matrix elements whose arithmetic can report overflow.
///
/// Required by the Bareiss determinant. Signed integers use their
/// `checked_*` operations, so an integer determinant is either exact or
/// an error; floats never fail and overflow to infinity as usual.
///
/// Implemented for `f32`, `f64` and the signed integers only. Unsigned
/// integers are left out: a determinant changes sign under a row swap.
pub trait SignedScalar: Scalar {
    /// `self * rhs`, or `None` if the result does not fit.
    fn mul_checked(self, rhs: Self) -> Option<Self>;

    /// `self - rhs`, or `None` if the result does not fit.
    fn sub_checked(self, rhs: Self) -> Option<Self>;

    /// `self / rhs`, or `None` on overflow or a zero divisor.
    fn div_checked(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_signed_scalar_int {
    ($($t:ty),*) => {
        $(
            impl SignedScalar for $t {
                #[inline] fn mul_checked(self, rhs: $t) -> Option<$t> { CheckedMul::checked_mul(&self, &rhs) }
                #[inline] fn sub_checked(self, rhs: $t) -> Option<$t> { CheckedSub::checked_sub(&self, &rhs) }
                #[inline] fn div_checked(self, rhs: $t) -> Option<$t> { CheckedDiv::checked_div(&self, &rhs) }
            }
        )*
    };
}

macro_rules! impl_signed_scalar_float {
    ($($t:ty),*) => {
        $(
            impl SignedScalar for $t {
                #[inline] fn mul_checked(self, rhs: $t) -> Option<$t> { Some(self * rhs) }
                #[inline] fn sub_checked(self, rhs: $t) -> Option<$t> { Some(self - rhs) }
                #[inline] fn div_checked(self, rhs: $t) -> Option<$t> { Some(self / rhs) }
            }
        )*
    };
}

impl_signed_scalar_int!(i8, i16, i32, i64, i128, isize);
impl_signed_scalar_float!(f32, f64);

/// Trait for floating-point matrix elements.
///
/// Required by operations that divide by arbitrary pivots or compare
/// magnitudes: inverse, rank, and matrix-by-matrix division.
pub trait FloatScalar: SignedScalar + Float {}

impl<T: SignedScalar + Float> FloatScalar for T {}
