//! Quaternions.

use crate::{
    num::{self, Scalar},
    vector::{self, Vector3},
};
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// A quaternion `r + xi + yj + zk` with a scalar part `r` and a vector part
/// `vec = (x, y, z)`.
///
/// Quaternions are plain values: every operation returns a new quaternion and
/// leaves its operands untouched.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quaternion<T> {
    /// The scalar (real) part.
    pub r: T,
    /// The vector part, holding the i, j and k components.
    pub vec: Vector3<T>,
}

impl<T> Quaternion<T> {
    /// Creates a quaternion from its scalar and vector parts.
    #[inline]
    pub const fn new(r: T, vec: Vector3<T>) -> Self {
        Self { r, vec }
    }

    /// Creates a quaternion from a `(w, x, y, z)` tuple, where `w` is the
    /// scalar part.
    #[inline]
    pub fn from_vec((w, x, y, z): (T, T, T, T)) -> Self {
        Self::new(w, (x, y, z))
    }

    /// Applies `f` to all four components. The component type may change.
    #[inline]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Quaternion<U> {
        Quaternion {
            r: f(self.r),
            vec: vector::map(self.vec, f),
        }
    }
}

impl<T: Scalar> Quaternion<T> {
    /// The multiplicative identity `1 + 0i + 0j + 0k`.
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::one(), (T::zero(), T::zero(), T::zero()))
    }

    /// The quaternion with all components zero.
    #[inline]
    pub fn zeros() -> Self {
        Self::new(T::zero(), (T::zero(), T::zero(), T::zero()))
    }

    #[inline]
    pub fn real(&self) -> T {
        self.r
    }

    #[inline]
    pub fn imag(&self) -> Vector3<T> {
        self.vec
    }

    /// Returns the `(w, x, y, z)` tuple of components.
    #[inline]
    pub fn to_tuple(&self) -> (T, T, T, T) {
        (self.r, self.vec.0, self.vec.1, self.vec.2)
    }

    /// Computes the conjugate, which has the vector part negated.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.r, vector::map(self.vec, |c| -c))
    }

    /// Computes the squared length `r² + x² + y² + z²`.
    #[inline]
    pub fn square_len(&self) -> T {
        self.r * self.r + vector::dot(self.vec, self.vec)
    }

    /// Computes the length (norm) of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> T {
        T::from_f64(self.square_len().to_f64().sqrt())
    }

    /// Computes the quaternion scaled to unit length.
    ///
    /// A quaternion whose magnitude is exactly zero is returned unchanged.
    /// Magnitudes that are merely small are not treated specially.
    #[inline]
    pub fn normalize(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == T::zero() {
            *self
        } else {
            self.scale(T::one() / magnitude)
        }
    }

    /// Computes the four-dimensional dot product with another quaternion.
    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        self.r * other.r + vector::dot(self.vec, other.vec)
    }

    /// Computes the multiplicative inverse `q* / |q|²`.
    ///
    /// The squared length is not checked: a zero quaternion gives whatever the
    /// scalar type yields for division by zero.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate().scale(T::one() / self.square_len())
    }

    /// Multiplies all four components by `factor`.
    #[inline]
    pub fn scale(&self, factor: T) -> Self {
        Self::new(self.r * factor, vector::scale(self.vec, factor))
    }
}

impl<T: Scalar> From<(T, T, T, T)> for Quaternion<T> {
    fn from(components: (T, T, T, T)) -> Self {
        Self::from_vec(components)
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {}i + {}j + {}k",
            self.r, self.vec.0, self.vec.1, self.vec.2
        )
    }
}

impl<T: Scalar> Hash for Quaternion<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        num::canonical_bits(self.r).hash(state);
        num::canonical_bits(self.vec.0).hash(state);
        num::canonical_bits(self.vec.1).hash(state);
        num::canonical_bits(self.vec.2).hash(state);
    }
}

impl_unary_op!(Neg, neg, <T>, Quaternion<T>, Quaternion<T>, |q| {
    q.map(|c| -c)
});

impl_binop!(Add, add, <T>, Quaternion<T>, Quaternion<T>, Quaternion<T>, |a, b| {
    Quaternion::new(a.r + b.r, vector::add(a.vec, b.vec))
});

impl_binop!(Sub, sub, <T>, Quaternion<T>, Quaternion<T>, Quaternion<T>, |a, b| {
    a + (-b)
});

// Hamilton product.
impl_binop!(Mul, mul, <T>, Quaternion<T>, Quaternion<T>, Quaternion<T>, |a, b| {
    let r = a.r * b.r - vector::dot(a.vec, b.vec);
    let vec = vector::add(
        vector::cross(a.vec, b.vec),
        vector::add(vector::scale(b.vec, a.r), vector::scale(a.vec, b.r)),
    );
    Quaternion::new(r, vec)
});

// `a / b` is `b⁻¹ * a`, expanded so that the squared length of `b` is only
// divided by once per component.
impl_binop!(Div, div, <T>, Quaternion<T>, Quaternion<T>, Quaternion<T>, |a, b| {
    let (w, (x, y, z)) = (a.r, a.vec);
    let (bw, (bx, by, bz)) = (b.r, b.vec);
    let d = b.square_len();
    Quaternion::new(
        (bw * w + bx * x + by * y + bz * z) / d,
        (
            (bw * x - bx * w - by * z + bz * y) / d,
            (bw * y + bx * z - by * w - bz * x) / d,
            (bw * z - bx * y + by * x - bz * w) / d,
        ),
    )
});

impl_abs_diff_eq!(<T>, Quaternion<T>, |a, b, epsilon| {
    a.r.abs_diff_eq(&b.r, epsilon)
        && a.vec.0.abs_diff_eq(&b.vec.0, epsilon)
        && a.vec.1.abs_diff_eq(&b.vec.1, epsilon)
        && a.vec.2.abs_diff_eq(&b.vec.2, epsilon)
});

impl_relative_eq!(<T>, Quaternion<T>, |a, b, epsilon, max_relative| {
    a.r.relative_eq(&b.r, epsilon, max_relative)
        && a.vec.0.relative_eq(&b.vec.0, epsilon, max_relative)
        && a.vec.1.relative_eq(&b.vec.1, epsilon, max_relative)
        && a.vec.2.relative_eq(&b.vec.2, epsilon, max_relative)
});
