//! Conversion between quaternions and Euler angles.
//!
//! Roll is the angle about the x-axis, pitch the angle about the y-axis and
//! yaw the angle about the z-axis. A rotation order names the sequence of axes
//! the three elemental rotations are performed about. With the
//! [`External`](EulerConvention::External) convention the rotations are about
//! the fixed axes, so the order `XYZ` is the quaternion `q_z * q_y * q_x`. With
//! the [`Internal`](EulerConvention::Internal) convention they are about the
//! axes of the rotating body, which makes internal `XYZ` the same rotation as
//! external `ZYX`.

use crate::{num::Scalar, quaternion::Quaternion};
use anyhow::{Result, anyhow};
use std::{f64::consts::FRAC_PI_2, fmt, str::FromStr};

/// When the absolute sine of the middle angle exceeds this, the first and
/// third axes are considered aligned.
const GIMBAL_LOCK_THRESHOLD: f64 = 0.9998;

/// A sequence of three distinct axes to rotate about.
#[allow(clippy::upper_case_acronyms)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EulerOrder {
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    ZYX,
}

/// Whether the axes of an [`EulerOrder`] are fixed in space or move with the
/// rotated body.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EulerConvention {
    /// Rotations about the fixed (extrinsic) axes.
    #[default]
    External,
    /// Rotations about the body (intrinsic) axes.
    Internal,
}

/// A set of Euler angles in radians, keyed by the axis they rotate about.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EulerAngles<T> {
    /// Angle about the x-axis.
    pub roll: T,
    /// Angle about the y-axis.
    pub pitch: T,
    /// Angle about the z-axis.
    pub yaw: T,
}

impl EulerOrder {
    /// All supported orders.
    pub const ALL: [Self; 6] = [
        Self::XYZ,
        Self::XZY,
        Self::YXZ,
        Self::YZX,
        Self::ZXY,
        Self::ZYX,
    ];

    /// The order used by [`Quaternion::euler_angles`].
    pub const DEFAULT_EXTRACTION: Self = Self::ZYX;

    /// The order used by [`Quaternion::from_euler_angles`].
    pub const DEFAULT_CONSTRUCTION: Self = Self::XYZ;

    /// The three-letter code of the order, like `"XYZ"`.
    pub const fn code(self) -> &'static str {
        match self {
            Self::XYZ => "XYZ",
            Self::XZY => "XZY",
            Self::YXZ => "YXZ",
            Self::YZX => "YZX",
            Self::ZXY => "ZXY",
            Self::ZYX => "ZYX",
        }
    }

    /// The same axes in the opposite sequence.
    pub const fn reversed(self) -> Self {
        match self {
            Self::XYZ => Self::ZYX,
            Self::XZY => Self::YZX,
            Self::YXZ => Self::ZXY,
            Self::YZX => Self::XZY,
            Self::ZXY => Self::YXZ,
            Self::ZYX => Self::XYZ,
        }
    }

    /// Indices (0 for x, 1 for y, 2 for z) of the axes in sequence.
    const fn axes(self) -> [usize; 3] {
        match self {
            Self::XYZ => [0, 1, 2],
            Self::XZY => [0, 2, 1],
            Self::YXZ => [1, 0, 2],
            Self::YZX => [1, 2, 0],
            Self::ZXY => [2, 0, 1],
            Self::ZYX => [2, 1, 0],
        }
    }
}

impl fmt::Display for EulerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for EulerOrder {
    type Err = anyhow::Error;

    fn from_str(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|order| order.code() == code)
            .ok_or_else(|| {
                anyhow!(
                    "Unsupported Euler rotation order `{code}` (expected one of {})",
                    Self::ALL.map(Self::code).join(", ")
                )
            })
    }
}

impl<T> EulerAngles<T> {
    pub const fn new(roll: T, pitch: T, yaw: T) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Returns the `(roll, pitch, yaw)` tuple.
    pub fn as_tuple(self) -> (T, T, T) {
        (self.roll, self.pitch, self.yaw)
    }
}

impl<T: Scalar> EulerAngles<T> {
    /// Assigns angles given in the sequence of `order` to their axes.
    fn from_sequence(order: EulerOrder, (first, second, third): (T, T, T)) -> Self {
        let mut by_axis = [T::zero(); 3];
        let [a, b, c] = order.axes();
        by_axis[a] = first;
        by_axis[b] = second;
        by_axis[c] = third;
        let [roll, pitch, yaw] = by_axis;
        Self::new(roll, pitch, yaw)
    }
}

impl_abs_diff_eq!(<T>, EulerAngles<T>, |a, b, epsilon| {
    a.roll.abs_diff_eq(&b.roll, epsilon)
        && a.pitch.abs_diff_eq(&b.pitch, epsilon)
        && a.yaw.abs_diff_eq(&b.yaw, epsilon)
});

impl_relative_eq!(<T>, EulerAngles<T>, |a, b, epsilon, max_relative| {
    a.roll.relative_eq(&b.roll, epsilon, max_relative)
        && a.pitch.relative_eq(&b.pitch, epsilon, max_relative)
        && a.yaw.relative_eq(&b.yaw, epsilon, max_relative)
});

impl<T: Scalar> Quaternion<T> {
    /// Creates the quaternion for the external rotation sequence `order` with
    /// the given roll (x), pitch (y) and yaw (z) angles in radians.
    pub fn from_euler(roll: T, pitch: T, yaw: T, order: EulerOrder) -> Self {
        let (sx, cx) = (0.5 * roll.to_f64()).sin_cos();
        let (sy, cy) = (0.5 * pitch.to_f64()).sin_cos();
        let (sz, cz) = (0.5 * yaw.to_f64()).sin_cos();

        let ccc = cx * cy * cz;
        let sss = sx * sy * sz;
        let scc = sx * cy * cz;
        let css = cx * sy * sz;
        let csc = cx * sy * cz;
        let scs = sx * cy * sz;
        let ccs = cx * cy * sz;
        let ssc = sx * sy * cz;

        let (w, x, y, z) = match order {
            EulerOrder::XYZ => (ccc + sss, scc - css, csc + scs, ccs - ssc),
            EulerOrder::XZY => (ccc - sss, scc + css, csc + scs, ccs - ssc),
            EulerOrder::YXZ => (ccc - sss, scc - css, csc + scs, ccs + ssc),
            EulerOrder::YZX => (ccc + sss, scc - css, csc - scs, ccs + ssc),
            EulerOrder::ZXY => (ccc + sss, scc + css, csc - scs, ccs - ssc),
            EulerOrder::ZYX => (ccc - sss, scc + css, csc - scs, ccs + ssc),
        };

        Quaternion::from_vec((w, x, y, z)).map(T::from_f64)
    }

    /// Like [`from_euler`](Self::from_euler), but the order may also be
    /// interpreted as a sequence of rotations about the body axes.
    pub fn from_euler_with_convention(
        roll: T,
        pitch: T,
        yaw: T,
        order: EulerOrder,
        convention: EulerConvention,
    ) -> Self {
        match convention {
            EulerConvention::External => Self::from_euler(roll, pitch, yaw, order),
            EulerConvention::Internal => Self::from_euler(roll, pitch, yaw, order.reversed()),
        }
    }

    /// Creates the quaternion for the given roll, pitch and yaw using the
    /// default external `XYZ` order.
    pub fn from_euler_angles(roll: T, pitch: T, yaw: T) -> Self {
        Self::from_euler(roll, pitch, yaw, EulerOrder::DEFAULT_CONSTRUCTION)
    }

    /// Like [`from_euler`](Self::from_euler), with the order given by its
    /// code. Fails if the code is not one of the supported orders.
    pub fn from_euler_with_code(roll: T, pitch: T, yaw: T, code: &str) -> Result<Self> {
        let order = code.parse()?;
        Ok(Self::from_euler(roll, pitch, yaw, order))
    }

    /// Computes the Euler angles of this quaternion for the given rotation
    /// order and convention.
    ///
    /// The quaternion is normalized first. Near gimbal lock the middle angle
    /// is snapped to ±π/2 and the angle of the last rotation performed is set
    /// to zero; see [`to_euler_external_xyz`](Self::to_euler_external_xyz).
    pub fn to_euler(&self, order: EulerOrder, convention: EulerConvention) -> EulerAngles<T> {
        use EulerConvention::{External, Internal};

        let angles = match (convention, order) {
            (External, EulerOrder::XYZ) => self.to_euler_external_xyz(),
            (External, EulerOrder::XZY) => self.to_euler_external_xzy(),
            (External, EulerOrder::YXZ) => self.to_euler_external_yxz(),
            (External, EulerOrder::YZX) => self.to_euler_external_yzx(),
            (External, EulerOrder::ZXY) => self.to_euler_external_zxy(),
            (External, EulerOrder::ZYX) => self.to_euler_external_zyx(),
            (Internal, EulerOrder::XYZ) => self.to_euler_internal_xyz(),
            (Internal, EulerOrder::XZY) => self.to_euler_internal_xzy(),
            (Internal, EulerOrder::YXZ) => self.to_euler_internal_yxz(),
            (Internal, EulerOrder::YZX) => self.to_euler_internal_yzx(),
            (Internal, EulerOrder::ZXY) => self.to_euler_internal_zxy(),
            (Internal, EulerOrder::ZYX) => self.to_euler_internal_zyx(),
        };
        EulerAngles::from_sequence(order, angles)
    }

    /// Computes the Euler angles for the default external `ZYX` order.
    ///
    /// The rotation about x is performed last in this sequence, so at gimbal
    /// lock the roll is set to zero, the pitch to ±π/2 and the yaw carries the
    /// combined rotation about the aligned x- and z-axes.
    pub fn euler_angles(&self) -> EulerAngles<T> {
        self.to_euler(EulerOrder::DEFAULT_EXTRACTION, EulerConvention::External)
    }

    /// Like [`to_euler`](Self::to_euler), with the order given by its code.
    /// Fails if the code is not one of the supported orders.
    pub fn to_euler_with_code(
        &self,
        code: &str,
        convention: EulerConvention,
    ) -> Result<EulerAngles<T>> {
        let order = code.parse()?;
        Ok(self.to_euler(order, convention))
    }

    /// Returns the angles `(x, y, z)` of the external rotation sequence
    /// x-y-z.
    ///
    /// The y angle is obtained from `asin` and lies in [-π/2, π/2]. When its
    /// sine is within 2e-4 of ±1 the x- and z-axes are aligned and only
    /// their combined angle is defined. The y angle is then set to exactly
    /// ±π/2, the z angle to exactly zero and the x angle carries the whole
    /// remaining rotation. A warning is logged when this happens.
    pub fn to_euler_external_xyz(&self) -> (T, T, T) {
        let (w, x, y, z) = self.unit_components();
        tait_bryan_angles(
            EulerOrder::XYZ,
            2.0 * (w * y - x * z),
            (2.0 * (w * x + y * z), 1.0 - 2.0 * (x * x + y * y)),
            (2.0 * (w * z + x * y), 1.0 - 2.0 * (y * y + z * z)),
            (2.0 * (x * y - w * z), 1.0 - 2.0 * (x * x + z * z)),
        )
    }

    /// Returns the angles `(x, z, y)` of the external rotation sequence
    /// x-z-y.
    pub fn to_euler_external_xzy(&self) -> (T, T, T) {
        let (w, x, y, z) = self.unit_components();
        tait_bryan_angles(
            EulerOrder::XZY,
            2.0 * (x * y + w * z),
            (2.0 * (w * x - y * z), 1.0 - 2.0 * (x * x + z * z)),
            (2.0 * (w * y - x * z), 1.0 - 2.0 * (y * y + z * z)),
            (2.0 * (x * z + w * y), 1.0 - 2.0 * (x * x + y * y)),
        )
    }

    /// Returns the angles `(y, x, z)` of the external rotation sequence
    /// y-x-z.
    pub fn to_euler_external_yxz(&self) -> (T, T, T) {
        let (w, x, y, z) = self.unit_components();
        tait_bryan_angles(
            EulerOrder::YXZ,
            2.0 * (w * x + y * z),
            (2.0 * (w * y - x * z), 1.0 - 2.0 * (x * x + y * y)),
            (2.0 * (w * z - x * y), 1.0 - 2.0 * (x * x + z * z)),
            (2.0 * (x * y + w * z), 1.0 - 2.0 * (y * y + z * z)),
        )
    }

    /// Returns the angles `(y, z, x)` of the external rotation sequence
    /// y-z-x.
    pub fn to_euler_external_yzx(&self) -> (T, T, T) {
        let (w, x, y, z) = self.unit_components();
        tait_bryan_angles(
            EulerOrder::YZX,
            2.0 * (w * z - x * y),
            (2.0 * (w * y + x * z), 1.0 - 2.0 * (y * y + z * z)),
            (2.0 * (w * x + y * z), 1.0 - 2.0 * (x * x + z * z)),
            (2.0 * (y * z - w * x), 1.0 - 2.0 * (x * x + y * y)),
        )
    }

    /// Returns the angles `(z, x, y)` of the external rotation sequence
    /// z-x-y.
    pub fn to_euler_external_zxy(&self) -> (T, T, T) {
        let (w, x, y, z) = self.unit_components();
        tait_bryan_angles(
            EulerOrder::ZXY,
            2.0 * (w * x - y * z),
            (2.0 * (w * z + x * y), 1.0 - 2.0 * (x * x + z * z)),
            (2.0 * (w * y + x * z), 1.0 - 2.0 * (x * x + y * y)),
            (2.0 * (x * z - w * y), 1.0 - 2.0 * (y * y + z * z)),
        )
    }

    /// Returns the angles `(z, y, x)` of the external rotation sequence
    /// z-y-x.
    pub fn to_euler_external_zyx(&self) -> (T, T, T) {
        let (w, x, y, z) = self.unit_components();
        tait_bryan_angles(
            EulerOrder::ZYX,
            2.0 * (w * y + x * z),
            (2.0 * (w * z - x * y), 1.0 - 2.0 * (y * y + z * z)),
            (2.0 * (w * x - y * z), 1.0 - 2.0 * (x * x + y * y)),
            (2.0 * (y * z + w * x), 1.0 - 2.0 * (x * x + z * z)),
        )
    }

    /// Returns the angles `(x, y, z)` of the internal rotation sequence
    /// x-y'-z''. Near gimbal lock the x angle is the one set to zero.
    pub fn to_euler_internal_xyz(&self) -> (T, T, T) {
        reversed(self.to_euler_external_zyx())
    }

    /// Returns the angles `(x, z, y)` of the internal rotation sequence
    /// x-z'-y''.
    pub fn to_euler_internal_xzy(&self) -> (T, T, T) {
        reversed(self.to_euler_external_yzx())
    }

    /// Returns the angles `(y, x, z)` of the internal rotation sequence
    /// y-x'-z''.
    pub fn to_euler_internal_yxz(&self) -> (T, T, T) {
        reversed(self.to_euler_external_zxy())
    }

    /// Returns the angles `(y, z, x)` of the internal rotation sequence
    /// y-z'-x''.
    pub fn to_euler_internal_yzx(&self) -> (T, T, T) {
        reversed(self.to_euler_external_xzy())
    }

    /// Returns the angles `(z, x, y)` of the internal rotation sequence
    /// z-x'-y''.
    pub fn to_euler_internal_zxy(&self) -> (T, T, T) {
        reversed(self.to_euler_external_yxz())
    }

    /// Returns the angles `(z, y, x)` of the internal rotation sequence
    /// z-y'-x''.
    pub fn to_euler_internal_zyx(&self) -> (T, T, T) {
        reversed(self.to_euler_external_xyz())
    }

    fn unit_components(&self) -> (f64, f64, f64, f64) {
        self.map(Scalar::to_f64).normalize().to_tuple()
    }
}

/// Computes the angles of an external rotation sequence from the sine of the
/// middle angle and `(y, x)` arguments to `atan2` for the first and third
/// angles. `locked_first` holds the `atan2` arguments for the first angle when
/// the third one is taken to be zero, before the sign of the middle angle is
/// applied to the first.
fn tait_bryan_angles<T: Scalar>(
    order: EulerOrder,
    sin_middle: f64,
    first: (f64, f64),
    third: (f64, f64),
    locked_first: (f64, f64),
) -> (T, T, T) {
    let sin_middle = sin_middle.clamp(-1.0, 1.0);

    if sin_middle.abs() > GIMBAL_LOCK_THRESHOLD {
        let sign = sin_middle.signum();
        log::warn!(
            "Gimbal lock in {order} Euler angle extraction (sine of middle angle is {sin_middle}), \
             setting angle of last rotation to zero"
        );
        (
            T::from_f64((sign * locked_first.0).atan2(locked_first.1)),
            T::from_f64(sign * FRAC_PI_2),
            T::zero(),
        )
    } else {
        (
            T::from_f64(first.0.atan2(first.1)),
            T::from_f64(sin_middle.asin()),
            T::from_f64(third.0.atan2(third.1)),
        )
    }
}

fn reversed<T>((a, b, c): (T, T, T)) -> (T, T, T) {
    (c, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::UnitQuaternion;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn axis_rotation(axis: usize, angle: f64) -> Quaternion<f64> {
        let mut direction = [0.0; 3];
        direction[axis] = 1.0;
        Quaternion::from_axis_angle((direction[0], direction[1], direction[2]), angle)
    }

    /// Builds the external rotation by multiplying elemental rotations.
    fn composed(roll: f64, pitch: f64, yaw: f64, order: EulerOrder) -> Quaternion<f64> {
        let angles = [roll, pitch, yaw];
        order
            .axes()
            .into_iter()
            .fold(Quaternion::identity(), |q, axis| {
                axis_rotation(axis, angles[axis]) * q
            })
    }

    fn assert_same_rotation(a: Quaternion<f64>, b: Quaternion<f64>) {
        let b = if a.dot(&b) < 0.0 { -b } else { b };
        assert_abs_diff_eq!(a, b, epsilon = EPSILON);
    }

    #[test]
    fn order_codes_round_trip() {
        for order in EulerOrder::ALL {
            assert_eq!(order.code().parse::<EulerOrder>().unwrap(), order);
            assert_eq!(order.to_string(), order.code());
            assert_eq!(order.reversed().reversed(), order);
        }
    }

    #[test]
    fn unsupported_order_code_is_rejected() {
        let error = "ABC".parse::<EulerOrder>().unwrap_err();
        assert!(error.to_string().contains("ABC"));
        assert!("xyz".parse::<EulerOrder>().is_err());
        assert!("".parse::<EulerOrder>().is_err());
    }

    #[test]
    fn string_entry_points_fail_for_unsupported_order() {
        let q = Quaternion::from_euler_angles(0.1, 0.2, 0.3);
        assert!(q.to_euler_with_code("ABC", EulerConvention::External).is_err());
        assert!(q.to_euler_with_code("ABC", EulerConvention::Internal).is_err());
        assert!(Quaternion::from_euler_with_code(0.1, 0.2, 0.3, "ABC").is_err());
    }

    #[test]
    fn string_entry_points_match_typed_ones() {
        let q = Quaternion::from_euler_with_code(0.1, 0.2, 0.3, "YZX").unwrap();
        assert_eq!(q, Quaternion::from_euler(0.1, 0.2, 0.3, EulerOrder::YZX));
        assert_eq!(
            q.to_euler_with_code("ZYX", EulerConvention::Internal).unwrap(),
            q.to_euler(EulerOrder::ZYX, EulerConvention::Internal)
        );
    }

    #[test]
    fn defaults_are_external_zyx_for_extraction_and_xyz_for_construction() {
        assert_eq!(EulerConvention::default(), EulerConvention::External);

        let q = Quaternion::from_euler_angles(0.1, 0.2, 0.3);
        assert_eq!(q, Quaternion::from_euler(0.1, 0.2, 0.3, EulerOrder::XYZ));
        assert_eq!(
            q.euler_angles(),
            q.to_euler(EulerOrder::ZYX, EulerConvention::External)
        );
    }

    #[test]
    fn zero_angles_give_identity_for_all_orders() {
        for order in EulerOrder::ALL {
            assert_abs_diff_eq!(
                Quaternion::from_euler(0.0, 0.0, 0.0, order),
                Quaternion::identity(),
                epsilon = EPSILON
            );
        }
    }

    #[test]
    fn single_axis_angles_give_axis_rotations() {
        for order in EulerOrder::ALL {
            assert_same_rotation(
                Quaternion::from_euler(0.7, 0.0, 0.0, order),
                axis_rotation(0, 0.7),
            );
            assert_same_rotation(
                Quaternion::from_euler(0.0, -0.4, 0.0, order),
                axis_rotation(1, -0.4),
            );
            assert_same_rotation(
                Quaternion::from_euler(0.0, 0.0, 1.9, order),
                axis_rotation(2, 1.9),
            );
        }
    }

    #[test]
    fn external_xyz_matches_nalgebra() {
        let (roll, pitch, yaw) = (0.4, -0.3, 1.2);
        let q = Quaternion::from_euler(roll, pitch, yaw, EulerOrder::XYZ);
        let reference = UnitQuaternion::from_euler_angles(roll, pitch, yaw);

        assert_same_rotation(
            q,
            Quaternion::from_vec((reference.w, reference.i, reference.j, reference.k)),
        );

        let (ref_roll, ref_pitch, ref_yaw) = reference.euler_angles();
        assert_abs_diff_eq!(
            q.to_euler(EulerOrder::XYZ, EulerConvention::External),
            EulerAngles::new(ref_roll, ref_pitch, ref_yaw),
            epsilon = EPSILON
        );
    }

    #[test]
    fn external_tuples_are_in_sequence_order() {
        let q = Quaternion::from_euler(0.1, 0.2, 0.3, EulerOrder::ZYX);
        let (z, y, x) = q.to_euler_external_zyx();
        assert_abs_diff_eq!(z, 0.3, epsilon = EPSILON);
        assert_abs_diff_eq!(y, 0.2, epsilon = EPSILON);
        assert_abs_diff_eq!(x, 0.1, epsilon = EPSILON);
    }

    #[test]
    fn internal_variants_reverse_external_variants() {
        let q = Quaternion::from_vec((0.9, 0.2, -0.3, 0.25));
        let reverse = |(a, b, c): (f64, f64, f64)| (c, b, a);

        assert_eq!(q.to_euler_internal_xyz(), reverse(q.to_euler_external_zyx()));
        assert_eq!(q.to_euler_internal_xzy(), reverse(q.to_euler_external_yzx()));
        assert_eq!(q.to_euler_internal_yxz(), reverse(q.to_euler_external_zxy()));
        assert_eq!(q.to_euler_internal_yzx(), reverse(q.to_euler_external_xzy()));
        assert_eq!(q.to_euler_internal_zxy(), reverse(q.to_euler_external_yxz()));
        assert_eq!(q.to_euler_internal_zyx(), reverse(q.to_euler_external_xyz()));
    }

    #[test]
    fn internal_xyz_of_external_zyx_rotation_gives_original_angles() {
        let q = Quaternion::from_euler(0.5, -0.25, 2.0, EulerOrder::ZYX);
        let (x, y, z) = q.to_euler_internal_xyz();
        assert_abs_diff_eq!(x, 0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(y, -0.25, epsilon = EPSILON);
        assert_abs_diff_eq!(z, 2.0, epsilon = EPSILON);
    }

    #[test]
    fn extraction_normalizes_quaternion_first() {
        let q = Quaternion::from_euler(0.3, 0.2, -0.6, EulerOrder::YXZ);
        assert_abs_diff_eq!(
            q.scale(3.5).to_euler(EulerOrder::YXZ, EulerConvention::External),
            q.to_euler(EulerOrder::YXZ, EulerConvention::External),
            epsilon = EPSILON
        );
    }

    #[test]
    fn gimbal_lock_at_positive_pole_keeps_rotation() {
        init_logging();

        let q = Quaternion::from_euler(0.3, FRAC_PI_2, 0.2, EulerOrder::XYZ);
        let (x, y, z) = q.to_euler_external_xyz();

        assert_eq!(y, FRAC_PI_2);
        assert_eq!(z, 0.0);
        assert_abs_diff_eq!(x, 0.1, epsilon = EPSILON);
        assert_same_rotation(Quaternion::from_euler(x, y, z, EulerOrder::XYZ), q);
    }

    #[test]
    fn gimbal_lock_at_negative_pole_keeps_rotation() {
        init_logging();

        let q = Quaternion::from_euler(0.3, -FRAC_PI_2, 0.2, EulerOrder::XYZ);
        let (x, y, z) = q.to_euler_external_xyz();

        assert_eq!(y, -FRAC_PI_2);
        assert_eq!(z, 0.0);
        assert_abs_diff_eq!(x, 0.5, epsilon = EPSILON);
        assert_same_rotation(Quaternion::from_euler(x, y, z, EulerOrder::XYZ), q);
    }

    #[test]
    fn gimbal_lock_is_handled_for_all_orders_and_conventions() {
        init_logging();

        for order in EulerOrder::ALL {
            let [_, middle_axis, _] = order.axes();
            for sign in [1.0, -1.0] {
                let mut angles = [0.4, -0.7, 0.9];
                angles[middle_axis] = sign * FRAC_PI_2;
                let q = Quaternion::from_euler(angles[0], angles[1], angles[2], order);

                let external = q.to_euler(order, EulerConvention::External);
                let external_by_axis = [external.roll, external.pitch, external.yaw];
                assert_eq!(external_by_axis[middle_axis], sign * FRAC_PI_2);
                assert_eq!(external_by_axis[order.axes()[2]], 0.0);
                assert_same_rotation(
                    Quaternion::from_euler(external.roll, external.pitch, external.yaw, order),
                    q,
                );

                let internal = q.to_euler(order.reversed(), EulerConvention::Internal);
                assert_eq!(internal, external);
            }
        }
    }

    #[test]
    fn default_extraction_zeroes_roll_at_gimbal_lock() {
        init_logging();

        let q = Quaternion::from_euler(0.3, FRAC_PI_2, 0.2, EulerOrder::ZYX);
        let angles = q.euler_angles();

        assert_eq!(angles.roll, 0.0);
        assert_eq!(angles.pitch, FRAC_PI_2);
        assert_abs_diff_eq!(angles.yaw, 0.5, epsilon = EPSILON);
        assert_same_rotation(
            Quaternion::from_euler(angles.roll, angles.pitch, angles.yaw, EulerOrder::ZYX),
            q,
        );
    }

    #[test]
    fn near_pole_within_threshold_is_treated_as_gimbal_lock() {
        init_logging();

        // sin(1.56) ≈ 0.99995, beyond the threshold.
        let q = Quaternion::from_euler(0.2, 1.56, 0.1, EulerOrder::ZYX);
        let (z, y, x) = q.to_euler_external_zyx();
        assert_eq!(y, FRAC_PI_2);
        assert_eq!(x, 0.0);
        assert!(z.is_finite());
    }

    #[test]
    fn euler_angles_with_f32_components_work() {
        let q = Quaternion::<f32>::from_euler(0.1, 0.2, 0.3, EulerOrder::XYZ);
        let angles = q.to_euler(EulerOrder::XYZ, EulerConvention::External);
        assert_abs_diff_eq!(angles, EulerAngles::new(0.1, 0.2, 0.3), epsilon = 1e-5);
    }

    prop_compose! {
        fn angles_away_from_poles()(
            roll in -PI + 1e-3..PI - 1e-3,
            pitch in -1.5..1.5,
            yaw in -PI + 1e-3..PI - 1e-3,
        ) -> EulerAngles<f64> {
            EulerAngles::new(roll, pitch, yaw)
        }
    }

    fn order_strategy() -> impl Strategy<Value = EulerOrder> {
        prop::sample::select(EulerOrder::ALL.to_vec())
    }

    /// Puts the angle of the middle axis of `order` in the pitch-limited
    /// range, since only that angle is restricted to [-π/2, π/2].
    fn with_middle_angle_limited(angles: EulerAngles<f64>, order: EulerOrder) -> EulerAngles<f64> {
        let mut by_axis = [angles.roll, angles.pitch, angles.yaw];
        let [_, middle_axis, _] = order.axes();
        by_axis.swap(1, middle_axis);
        EulerAngles::new(by_axis[0], by_axis[1], by_axis[2])
    }

    proptest! {
        #[test]
        fn from_euler_matches_composed_axis_rotations(
            angles in angles_away_from_poles(),
            order in order_strategy(),
        ) {
            let q = Quaternion::from_euler(angles.roll, angles.pitch, angles.yaw, order);
            let reference = composed(angles.roll, angles.pitch, angles.yaw, order);
            prop_assert!(approx::abs_diff_eq!(q, reference, epsilon = 1e-12));
        }
    }

    proptest! {
        #[test]
        fn external_euler_angles_round_trip(
            angles in angles_away_from_poles(),
            order in order_strategy(),
        ) {
            let angles = with_middle_angle_limited(angles, order);
            let q = Quaternion::from_euler(angles.roll, angles.pitch, angles.yaw, order);
            let extracted = q.to_euler(order, EulerConvention::External);
            prop_assert!(approx::abs_diff_eq!(extracted, angles, epsilon = 1e-9));
        }
    }

    proptest! {
        #[test]
        fn internal_euler_angles_round_trip(
            angles in angles_away_from_poles(),
            order in order_strategy(),
        ) {
            let angles = with_middle_angle_limited(angles, order);
            let q = Quaternion::from_euler_with_convention(
                angles.roll,
                angles.pitch,
                angles.yaw,
                order,
                EulerConvention::Internal,
            );
            let extracted = q.to_euler(order, EulerConvention::Internal);
            prop_assert!(approx::abs_diff_eq!(extracted, angles, epsilon = 1e-9));
        }
    }

    proptest! {
        #[test]
        fn extraction_of_unit_quaternions_reproduces_rotation(
            angles in angles_away_from_poles(),
            order in order_strategy(),
            convention in prop::sample::select(vec![EulerConvention::External, EulerConvention::Internal]),
        ) {
            let q = Quaternion::from_euler(angles.roll, angles.pitch, angles.yaw, EulerOrder::XYZ);
            let extracted = q.to_euler(order, convention);
            let by_axis = [extracted.roll, extracted.pitch, extracted.yaw];
            prop_assume!(by_axis[order.axes()[1]].abs() < 1.5);

            let rebuilt = Quaternion::from_euler_with_convention(
                extracted.roll,
                extracted.pitch,
                extracted.yaw,
                order,
                convention,
            );
            let rebuilt = if rebuilt.dot(&q) < 0.0 { -rebuilt } else { rebuilt };
            prop_assert!(approx::abs_diff_eq!(rebuilt, q, epsilon = 1e-6));
        }
    }
}
