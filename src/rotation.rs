//! Rotation of vectors and axis-angle construction.

use crate::{
    num::Scalar,
    quaternion::Quaternion,
    vector::{self, Vector3},
};

impl<T: Scalar> Quaternion<T> {
    /// Creates the quaternion rotating by `angle` radians about `axis`.
    ///
    /// The axis is normalized here, so it may have any non-zero length. A
    /// zero-length axis yields non-finite components for float scalars.
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        let axis_len = vector::norm(axis);
        let unit_axis = vector::map(axis, |c| c / axis_len);

        let half_angle = 0.5 * angle.to_f64();
        Self::new(
            T::from_f64(half_angle.cos()),
            vector::scale(unit_axis, T::from_f64(half_angle.sin())),
        )
    }

    /// Rotates the given vector by this quaternion.
    ///
    /// The quaternion must have unit length; this is not checked. Evaluates
    /// `q v q*` as `v + r t + vec × t` with `t = 2 vec × v`.
    pub fn rotate(&self, v: Vector3<T>) -> Vector3<T> {
        let t = vector::map(vector::cross(self.vec, v), Scalar::doubled);
        vector::add(
            v,
            vector::add(vector::scale(t, self.r), vector::cross(self.vec, t)),
        )
    }
}
