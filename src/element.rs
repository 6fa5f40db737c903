//! Floating-point element types a blob can hold.

use ndarray::NdFloat;
use num_traits::FromPrimitive;

/// Scalar type stored in an [`Array`](crate::Array) or [`Blob`](crate::Blob).
///
/// Implemented for `f32` and `f64`.
pub trait Element: NdFloat + FromPrimitive + Default + 'static {
    /// Short name used in log lines and registry keys.
    const NAME: &'static str;

    /// Converts a count (batch size, element count) into the element type.
    fn from_count(n: usize) -> Self;

    /// Three-valued sign: `1` for positive, `-1` for negative, `0` otherwise.
    ///
    /// Zero and NaN both map to `0`.
    fn sign(self) -> Self;

    /// Widens to `f64` for diagnostics and gradient checks.
    fn to_f64_lossy(self) -> f64;
}

macro_rules! impl_element {
    ($t:ty, $name:expr) => {
        impl Element for $t {
            const NAME: &'static str = $name;

            #[inline]
            fn from_count(n: usize) -> Self {
                n as $t
            }

            #[inline]
            fn sign(self) -> Self {
                ((0.0 < self) as i8 - (self < 0.0) as i8) as $t
            }

            #[inline]
            fn to_f64_lossy(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_element!(f32, "f32");
impl_element!(f64, "f64");
