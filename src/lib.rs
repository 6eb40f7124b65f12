//! Generic quaternion algebra for 3D rotations.

#[macro_use]
mod macros;

pub mod euler;
pub mod interpolation;
pub mod num;
pub mod power;
pub mod quaternion;
pub mod rotation;
pub mod vector;

pub use euler::{EulerAngles, EulerConvention, EulerOrder};
pub use num::Scalar;
pub use quaternion::Quaternion;
pub use vector::Vector3;
