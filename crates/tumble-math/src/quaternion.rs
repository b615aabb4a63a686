//! Unit quaternions for body orientation.
//!
//! Convention: q = [w; x, y, z] with w the scalar part. A body's orientation
//! quaternion maps body-frame vectors to world frame.

use crate::{Mat3, Vec3};

/// A unit quaternion representing a 3D rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    /// Scalar part (w).
    pub w: f64,
    /// Vector part (x, y, z).
    pub v: Vec3,
}

impl Quat {
    /// Create a quaternion from scalar and vector components.
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            w,
            v: Vec3::new(x, y, z),
        }
    }

    /// Identity quaternion (no rotation).
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            v: Vec3::zeros(),
        }
    }

    /// Quaternion for a rotation of `angle` radians about a unit `axis`.
    pub fn from_axis_angle(axis: &Vec3, angle: f64) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self { w: c, v: axis * s }
    }

    /// Euclidean norm of the four components.
    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.v.norm_squared()).sqrt()
    }

    /// Rescale to unit length. A degenerate quaternion collapses to identity.
    pub fn normalize(&self) -> Self {
        let n = self.norm();
        if n < 1e-12 {
            return Self::identity();
        }
        Self {
            w: self.w / n,
            v: self.v / n,
        }
    }

    /// Hamilton product `self * rhs` (apply `rhs` first, then `self`).
    pub fn mul(&self, rhs: &Quat) -> Quat {
        Quat {
            w: self.w * rhs.w - self.v.dot(&rhs.v),
            v: self.v.cross(&rhs.v) + rhs.v * self.w + self.v * rhs.w,
        }
    }

    /// Rotate a vector by this quaternion.
    pub fn rotate(&self, p: &Vec3) -> Vec3 {
        let t = 2.0 * self.v.cross(p);
        p + self.w * t + self.v.cross(&t)
    }

    /// Rotation matrix equivalent of this quaternion.
    pub fn to_matrix(&self) -> Mat3 {
        let (w, x, y, z) = (self.w, self.v.x, self.v.y, self.v.z);
        Mat3::new(
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y - w * z),
            2.0 * (x * z + w * y),
            2.0 * (x * y + w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z - w * x),
            2.0 * (x * z - w * y),
            2.0 * (y * z + w * x),
            1.0 - 2.0 * (x * x + y * y),
        )
    }

    /// Advance the orientation under a world-frame angular velocity over `dt`:
    /// `q' = rot(ω, dt) * q` with the incremental rotation
    /// `[cos(|ω|·dt/2); sin(|ω|·dt/2) ω̂]`.
    ///
    /// Below `1e-10` rad/s the axis is undefined and the orientation is
    /// returned unchanged.
    pub fn integrate(&self, omega: &Vec3, dt: f64) -> Quat {
        let m = omega.norm();
        if m <= 1e-10 {
            return *self;
        }
        let half = dt * m * 0.5;
        let delta = Quat {
            w: half.cos(),
            v: omega * (half.sin() / m),
        };
        delta.mul(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_leaves_vectors_alone() {
        let q = Quat::identity();
        let p = Vec3::new(1.0, 2.0, 3.0);
        let r = q.rotate(&p);
        assert_relative_eq!((r - p).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn axis_angle_quarter_turn_about_z() {
        let q = Quat::from_axis_angle(&Vec3::z(), std::f64::consts::FRAC_PI_2);
        let r = q.rotate(&Vec3::x());
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(r.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(r.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rotate_agrees_with_matrix() {
        let q = Quat::from_axis_angle(&Vec3::new(1.0, 2.0, 3.0).normalize(), 0.7);
        let p = Vec3::new(-0.5, 1.5, 2.0);
        let via_quat = q.rotate(&p);
        let via_matrix = q.to_matrix() * p;
        assert_relative_eq!((via_quat - via_matrix).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn mul_composes_rotations() {
        let axis = Vec3::z();
        let q1 = Quat::from_axis_angle(&axis, std::f64::consts::FRAC_PI_2);
        let composed = q1.mul(&q1);
        let expected = Quat::from_axis_angle(&axis, std::f64::consts::PI);
        assert_relative_eq!(composed.w, expected.w, epsilon = 1e-12);
        assert_relative_eq!((composed.v - expected.v).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize_restores_unit_length() {
        let q = Quat::new(1.0, 2.0, 3.0, 4.0).normalize();
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn integrate_matches_axis_angle() {
        // Constant spin about y for one step should equal the axis-angle
        // rotation by |ω|·dt composed with the start orientation.
        let q0 = Quat::from_axis_angle(&Vec3::x(), 0.3);
        let omega = Vec3::new(0.0, 2.0, 0.0);
        let dt = 0.05;
        let q1 = q0.integrate(&omega, dt);
        let expected = Quat::from_axis_angle(&Vec3::y(), 2.0 * dt).mul(&q0);
        assert_relative_eq!(q1.w, expected.w, epsilon = 1e-12);
        assert_relative_eq!((q1.v - expected.v).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn integrate_with_negligible_spin_is_a_no_op() {
        let q = Quat::from_axis_angle(&Vec3::z(), 0.4);
        let q1 = q.integrate(&Vec3::new(0.0, 1e-12, 0.0), 0.01);
        assert_eq!(q, q1);
    }

    #[test]
    fn integrate_preserves_unit_norm() {
        let mut q = Quat::identity();
        let omega = Vec3::new(1.0, -2.0, 0.5);
        for _ in 0..10_000 {
            q = q.integrate(&omega, 0.001);
        }
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-6);
    }
}
