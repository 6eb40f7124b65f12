//! Helpers for 3-component vectors represented as tuples.

use crate::num::Scalar;

/// A 3-dimensional vector as an `(x, y, z)` tuple.
pub type Vector3<T> = (T, T, T);

/// Computes the right-handed cross product `a × b`.
#[inline]
pub fn cross<T: Scalar>(a: Vector3<T>, b: Vector3<T>) -> Vector3<T> {
    (
        a.1 * b.2 - a.2 * b.1,
        a.2 * b.0 - a.0 * b.2,
        a.0 * b.1 - a.1 * b.0,
    )
}

/// Adds two vectors component-wise.
#[inline]
pub fn add<T: Scalar>(a: Vector3<T>, b: Vector3<T>) -> Vector3<T> {
    (a.0 + b.0, a.1 + b.1, a.2 + b.2)
}

/// Multiplies every component of the vector by `s`.
#[inline]
pub fn scale<T: Scalar>(a: Vector3<T>, s: T) -> Vector3<T> {
    (a.0 * s, a.1 * s, a.2 * s)
}

/// Computes the dot product of two vectors.
#[inline]
pub fn dot<T: Scalar>(a: Vector3<T>, b: Vector3<T>) -> T {
    a.0 * b.0 + a.1 * b.1 + a.2 * b.2
}

/// Applies `f` to each component.
#[inline]
pub fn map<T, U>(a: Vector3<T>, mut f: impl FnMut(T) -> U) -> Vector3<U> {
    (f(a.0), f(a.1), f(a.2))
}

/// Computes the Euclidean length of the vector through the `f64` bridge.
#[inline]
pub(crate) fn norm<T: Scalar>(a: Vector3<T>) -> T {
    T::from_f64(dot(a, a).to_f64().sqrt())
}
