//! Rigid-body state, properties, and the per-body force accumulator.

use serde::{Deserialize, Serialize};
use tumble_math::{Mat3, Quat, Vec3};

use crate::{ModelError, Result};

/// Stable index of a body in the world's arena. Handles stay valid for the
/// world's lifetime; bodies are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub usize);

/// World-frame force and torque gathered over one step and cleared at its end.
#[derive(Debug, Clone, Copy)]
pub struct ForceAccumulator {
    pub force: Vec3,
    pub torque: Vec3,
}

impl ForceAccumulator {
    /// Add a force acting at a world-space point, together with the torque it
    /// induces about the body origin at `body_position`.
    pub fn add_at_point(&mut self, force: Vec3, world_point: Vec3, body_position: Vec3) {
        self.force += force;
        self.torque += (world_point - body_position).cross(&force);
    }

    pub fn clear(&mut self) {
        self.force = Vec3::zeros();
        self.torque = Vec3::zeros();
    }
}

impl Default for ForceAccumulator {
    fn default() -> Self {
        Self {
            force: Vec3::zeros(),
            torque: Vec3::zeros(),
        }
    }
}

/// Creation-time description of a rigid body. Validated when the body is
/// added to a world.
#[derive(Debug, Clone)]
pub struct BodyDef {
    /// Mass in kg, strictly positive.
    pub mass: f64,
    /// Body-frame inertia tensor, constant for the body's lifetime.
    pub inertia: Mat3,
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Fixed bodies skip integration and contact but can anchor springs.
    pub fixed: bool,
    /// Whether the contact resolver considers this body.
    pub has_collision: bool,
    /// Body-local points tested against the ground plane.
    pub contact_points: Vec<Vec3>,
}

impl BodyDef {
    pub fn new(mass: f64, inertia: Mat3) -> Self {
        Self {
            mass,
            inertia,
            position: Vec3::zeros(),
            orientation: Quat::identity(),
            linear_velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            fixed: false,
            has_collision: false,
            contact_points: Vec::new(),
        }
    }

    /// Solid sphere: inertia `2/5·m·r²` about every axis, collision enabled,
    /// contact points at the six axis-aligned surface points.
    pub fn sphere(mass: f64, radius: f64) -> Self {
        let i = 0.4 * mass * radius * radius;
        let mut def = Self::new(mass, Mat3::from_diagonal_element(i));
        def.has_collision = true;
        def.contact_points = vec![
            Vec3::new(radius, 0.0, 0.0),
            Vec3::new(-radius, 0.0, 0.0),
            Vec3::new(0.0, radius, 0.0),
            Vec3::new(0.0, -radius, 0.0),
            Vec3::new(0.0, 0.0, radius),
            Vec3::new(0.0, 0.0, -radius),
        ];
        def
    }

    /// Solid cuboid with the given half extents, collision enabled, contact
    /// points at the eight corners.
    pub fn cuboid(mass: f64, half_extents: Vec3) -> Self {
        let h = half_extents;
        let inertia = Mat3::from_diagonal(&Vec3::new(
            mass / 3.0 * (h.y * h.y + h.z * h.z),
            mass / 3.0 * (h.x * h.x + h.z * h.z),
            mass / 3.0 * (h.x * h.x + h.y * h.y),
        ));
        let mut def = Self::new(mass, inertia);
        def.has_collision = true;
        def.contact_points = vec![
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(-h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(-h.x, -h.y, -h.z),
        ];
        def
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn oriented(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_velocity(mut self, linear: Vec3, angular: Vec3) -> Self {
        self.linear_velocity = linear;
        self.angular_velocity = angular;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn collision(mut self, enabled: bool) -> Self {
        self.has_collision = enabled;
        self
    }

    pub fn contact_points(mut self, points: Vec<Vec3>) -> Self {
        self.contact_points = points;
        self
    }
}

/// A free rigid body. Velocities and angular velocity are world-frame; the
/// orientation quaternion maps body frame to world frame and stays unit
/// length (renormalized by the integrator when drift exceeds tolerance).
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub mass: f64,
    inertia_local: Mat3,
    inv_inertia_local: Mat3,
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub fixed: bool,
    pub has_collision: bool,
    pub contact_points: Vec<Vec3>,
    bounding_radius: f64,
    pub accumulator: ForceAccumulator,
}

impl RigidBody {
    /// Validate a definition and build the body. The inertia tensor is
    /// inverted once here; integration and contact never invert it again.
    pub fn new(def: BodyDef) -> Result<Self> {
        if def.mass <= 0.0 || def.mass.is_nan() {
            return Err(ModelError::NonPositiveMass(def.mass));
        }
        let inv_inertia_local = def
            .inertia
            .try_inverse()
            .ok_or(ModelError::SingularInertia)?;
        let bounding_radius = def
            .contact_points
            .iter()
            .map(|p| p.norm())
            .fold(0.0, f64::max);
        Ok(Self {
            mass: def.mass,
            inertia_local: def.inertia,
            inv_inertia_local,
            position: def.position,
            orientation: def.orientation.normalize(),
            linear_velocity: def.linear_velocity,
            angular_velocity: def.angular_velocity,
            fixed: def.fixed,
            has_collision: def.has_collision,
            contact_points: def.contact_points,
            bounding_radius,
            accumulator: ForceAccumulator::default(),
        })
    }

    /// Body-frame inertia tensor.
    pub fn inertia_local(&self) -> &Mat3 {
        &self.inertia_local
    }

    /// World-frame inertia tensor `R·I·Rᵗ` at the current orientation.
    pub fn inertia_world(&self) -> Mat3 {
        let r = self.orientation.to_matrix();
        r * self.inertia_local * r.transpose()
    }

    /// World-frame inverse inertia tensor `R·I⁻¹·Rᵗ`.
    pub fn inv_inertia_world(&self) -> Mat3 {
        let r = self.orientation.to_matrix();
        r * self.inv_inertia_local * r.transpose()
    }

    /// Map a body-local point to world coordinates.
    pub fn world_point(&self, local: &Vec3) -> Vec3 {
        self.position + self.orientation.rotate(local)
    }

    /// Velocity of a world-space point rigidly attached to the body.
    pub fn point_velocity(&self, world_point: &Vec3) -> Vec3 {
        self.linear_velocity + self.angular_velocity.cross(&(world_point - self.position))
    }

    /// Radius of the picking proxy sphere, derived from the contact-point
    /// set. Bodies without contact points report zero and are never picked.
    pub fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }

    /// Translational plus rotational kinetic energy.
    pub fn kinetic_energy(&self) -> f64 {
        let w = self.angular_velocity;
        0.5 * self.mass * self.linear_velocity.norm_squared()
            + 0.5 * w.dot(&(self.inertia_world() * w))
    }
}
