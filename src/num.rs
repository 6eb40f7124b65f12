//! Numbers and numerics.

use num_traits as nt;
use std::{fmt, ops::Neg};

/// The capabilities a type must have to serve as the component type of a
/// [`Quaternion`](crate::Quaternion).
///
/// Only the ring operations, division and equality are required natively.
/// Everything that needs a square root or trigonometry goes through the
/// `f64` bridge given by [`to_f64`](Self::to_f64) and
/// [`from_f64`](Self::from_f64), so integer types remain usable for the purely
/// algebraic operations.
pub trait Scalar: Copy + PartialEq + fmt::Debug + nt::Num + Neg<Output = Self> {
    /// Converts the value to a 64-bit float.
    fn to_f64(self) -> f64;

    /// Converts a 64-bit float to this type. Integer types truncate toward
    /// zero and saturate at their bounds, with NaN mapping to zero.
    fn from_f64(value: f64) -> Self;

    /// Two times the value.
    #[inline]
    fn doubled(self) -> Self {
        self + self
    }
}

macro_rules! impl_scalar {
    ($($t:ty),+) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    nt::AsPrimitive::<f64>::as_(self)
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    nt::AsPrimitive::<$t>::as_(value)
                }
            }
        )+
    };
}

impl_scalar!(f32, f64, i8, i16, i32, i64, i128, isize);

/// Returns the bits of the given value with negative zero and all NaNs mapped
/// to a single representation, so that values comparing equal hash equally.
pub(crate) fn canonical_bits<T: Scalar>(value: T) -> u64 {
    let value = value.to_f64();
    if value == 0.0 {
        0
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}
