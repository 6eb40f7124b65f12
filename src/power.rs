//! Integer and real powers of quaternions.

use crate::{num::Scalar, quaternion::Quaternion, vector};

impl<T: Scalar> Quaternion<T> {
    /// Raises the quaternion to an integer power by repeated squaring.
    ///
    /// Zero gives the identity and negative exponents raise the inverse. Only
    /// the ring operations are used for non-negative exponents, so the result
    /// is exact for integer scalars.
    pub fn powi(&self, exponent: i32) -> Self {
        if exponent < 0 {
            self.inverse().pow_by_squaring(exponent.unsigned_abs())
        } else {
            self.pow_by_squaring(exponent.unsigned_abs())
        }
    }

    fn pow_by_squaring(&self, exponent: u32) -> Self {
        if exponent == 0 {
            return Self::identity();
        }
        let half = self.pow_by_squaring(exponent / 2);
        let squared = half * half;
        if exponent % 2 == 1 {
            squared * self
        } else {
            squared
        }
    }

    /// Raises the quaternion to a real power through its polar form
    /// `|q| (cos φ + n sin φ)`, giving `|q|^e (cos eφ + n sin eφ)`.
    ///
    /// A quaternion of exactly zero magnitude is returned unchanged. If the
    /// vector part is exactly zero only the real part is raised to the power.
    pub fn powf(&self, exponent: T) -> Self {
        if self.magnitude() == T::zero() {
            return *self;
        }

        let q = self.map(Scalar::to_f64);
        let exponent = exponent.to_f64();
        let vec_norm = vector::norm(q.vec);

        if vec_norm == 0.0 {
            return Quaternion::new(q.r.powf(exponent), (0.0, 0.0, 0.0)).map(T::from_f64);
        }

        // Equals `asin(vec_norm / |q|)` for a non-negative real part and
        // extends it to the full [0, π] range otherwise.
        let half_angle = vec_norm.atan2(q.r);
        let axis = vector::scale(q.vec, 1.0 / vec_norm);

        let magnitude = q.magnitude().powf(exponent);
        let (sin, cos) = (exponent * half_angle).sin_cos();

        Quaternion::new(cos * magnitude, vector::scale(axis, sin * magnitude)).map(T::from_f64)
    }
}
