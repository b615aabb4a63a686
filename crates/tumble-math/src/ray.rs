//! Rays for picking queries.

use crate::Vec3;

/// A half-line from `origin` along a unit `direction`.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn point_at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray parameter of the projection of `p` onto the ray's line.
    pub fn parameter_of(&self, p: &Vec3) -> f64 {
        (p - self.origin).dot(&self.direction)
    }

    /// Nearest non-negative intersection parameter with a sphere, if any.
    ///
    /// A ray starting inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: &Vec3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(&self.direction);
        let c = oc.norm_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t = -b - sqrt_disc;
        if t >= 0.0 {
            return Some(t);
        }
        let t = -b + sqrt_disc;
        if t >= 0.0 { Some(t) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hits_sphere_ahead() {
        let ray = Ray::new(Vec3::zeros(), Vec3::x());
        let t = ray
            .intersect_sphere(&Vec3::new(5.0, 0.0, 0.0), 1.0)
            .expect("should hit");
        assert_relative_eq!(t, 4.0, epsilon = 1e-12);
        assert_relative_eq!(ray.point_at(t).x, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn misses_offset_sphere() {
        let ray = Ray::new(Vec3::zeros(), Vec3::x());
        assert!(ray.intersect_sphere(&Vec3::new(5.0, 3.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_not_hit() {
        let ray = Ray::new(Vec3::zeros(), Vec3::x());
        assert!(
            ray.intersect_sphere(&Vec3::new(-5.0, 0.0, 0.0), 1.0)
                .is_none()
        );
    }

    #[test]
    fn origin_inside_sphere_reports_exit() {
        let ray = Ray::new(Vec3::zeros(), Vec3::x());
        let t = ray
            .intersect_sphere(&Vec3::zeros(), 2.0)
            .expect("should hit");
        assert_relative_eq!(t, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn direction_is_normalized() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 10.0, 0.0));
        assert_relative_eq!(ray.direction.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            ray.parameter_of(&Vec3::new(0.0, 3.0, 4.0)),
            3.0,
            epsilon = 1e-12
        );
    }
}
