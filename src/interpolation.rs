//! Interpolation between quaternions.

use crate::{num::Scalar, quaternion::Quaternion};

/// Above this cosine of the angle between the endpoints, slerp falls back to
/// normalized linear interpolation since `sin θ` vanishes.
const NEARLY_PARALLEL_DOT: f64 = 0.9995;

impl<T: Scalar> Quaternion<T> {
    /// Spherical linear interpolation from `self` (at `t = 0`) to `other` (at
    /// `t = 1`).
    ///
    /// Both endpoints are normalized first, and `other` is negated if needed
    /// so that the shorter of the two arcs is followed. Nearly parallel
    /// endpoints are interpolated linearly and renormalized. The parameter is
    /// real for every scalar type, and the result is converted back with
    /// [`Scalar::from_f64`].
    pub fn slerp(&self, other: &Self, t: f64) -> Self {
        let start = self.map(Scalar::to_f64).normalize();
        let mut end = other.map(Scalar::to_f64).normalize();

        let mut dot = start.dot(&end);
        if dot < 0.0 {
            end = -end;
            dot = -dot;
        }
        let dot = dot.clamp(-1.0, 1.0);

        let interpolated = if dot > NEARLY_PARALLEL_DOT {
            (start + (end - start).scale(t)).normalize()
        } else {
            let theta = dot.acos();
            let sin_theta = theta.sin();
            let start_weight = ((1.0 - t) * theta).sin() / sin_theta;
            let end_weight = (t * theta).sin() / sin_theta;
            start.scale(start_weight) + end.scale(end_weight)
        };

        interpolated.map(T::from_f64)
    }
}
