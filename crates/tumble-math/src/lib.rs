//! Math primitives for the tumble rigid-body engine.
//!
//! Thin aliases over nalgebra plus the quaternion and ray types the
//! simulation core needs.

pub mod quaternion;
pub mod ray;

pub use quaternion::Quat;
pub use ray::Ray;

use nalgebra as na;

/// 3D vector alias.
pub type Vec3 = na::Vector3<f64>;
/// 3x3 matrix alias.
pub type Mat3 = na::Matrix3<f64>;

/// Cross-product matrix: [v]× such that [v]× w = v × w.
#[inline]
pub fn skew(v: &Vec3) -> Mat3 {
    Mat3::new(0.0, -v.z, v.y, v.z, 0.0, -v.x, -v.y, v.x, 0.0)
}

/// Standard gravity magnitude (m/s²).
pub const GRAVITY: f64 = 9.8;
