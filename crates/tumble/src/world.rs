//! The simulation world: arenas of bodies and springs plus the per-step
//! pipeline.
//!
//! `step(dt)` runs: gravity and spring forces into the per-body accumulators
//! → per-body velocity update (with the gyroscopic term) → ground-contact
//! impulse → pose update from the corrected velocities → accumulators
//! cleared. Stepping is single-threaded and non-reentrant; the only
//! supported mutation between steps is adding bodies/springs, changing
//! `params`, and injecting external forces.

use tumble_contact::resolve_ground_contact;
use tumble_math::{Ray, Vec3};
use tumble_model::{
    Anchor, BodyDef, BodyHandle, ModelError, Result, RigidBody, SimParameters, Spring, SpringHandle,
};

/// Result of a picking query.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub body: BodyHandle,
    /// World-space intersection point on the body's picking proxy.
    pub point: Vec3,
}

/// Owns every body and spring exclusively; bodies persist for the world's
/// lifetime and handles are never recycled.
pub struct World {
    pub params: SimParameters,
    bodies: Vec<RigidBody>,
    springs: Vec<Spring>,
}

impl World {
    pub fn new() -> Self {
        Self::with_params(SimParameters::default())
    }

    pub fn with_params(params: SimParameters) -> Self {
        Self {
            params,
            bodies: Vec::new(),
            springs: Vec::new(),
        }
    }

    /// Validate a body definition and add the body. On error the world is
    /// left unmodified.
    pub fn add_body(&mut self, def: BodyDef) -> Result<BodyHandle> {
        let body = RigidBody::new(def)?;
        self.bodies.push(body);
        Ok(BodyHandle(self.bodies.len() - 1))
    }

    /// Add a spring between `parent` and a local point on `child`. The rest
    /// length is the current world-space distance between the attachment
    /// points and is fixed from here on.
    pub fn add_spring(
        &mut self,
        parent: Anchor,
        child: BodyHandle,
        child_local: Vec3,
        stiffness: f64,
    ) -> Result<SpringHandle> {
        if stiffness <= 0.0 || stiffness.is_nan() {
            return Err(ModelError::NonPositiveStiffness(stiffness));
        }
        let child_world = self
            .body(child)
            .ok_or(ModelError::UnknownBody(child.0))?
            .world_point(&child_local);
        let parent_world = match parent {
            Anchor::World(p) => p,
            Anchor::Body { body, local } => self
                .body(body)
                .ok_or(ModelError::UnknownBody(body.0))?
                .world_point(&local),
        };
        let rest_length = (child_world - parent_world).norm();
        self.springs.push(Spring {
            parent,
            child,
            child_local,
            rest_length,
            stiffness,
        });
        Ok(SpringHandle(self.springs.len() - 1))
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (BodyHandle(i), b))
    }

    pub fn spring(&self, handle: SpringHandle) -> Option<&Spring> {
        self.springs.get(handle.0)
    }

    /// Current world-space endpoints of a spring, parent end first. Intended
    /// for rendering.
    pub fn spring_endpoints(&self, handle: SpringHandle) -> Option<(Vec3, Vec3)> {
        let spring = self.springs.get(handle.0)?;
        let parent = match spring.parent {
            Anchor::World(p) => p,
            Anchor::Body { body, local } => self.bodies.get(body.0)?.world_point(&local),
        };
        let child = self
            .bodies
            .get(spring.child.0)?
            .world_point(&spring.child_local);
        Some((parent, child))
    }

    /// Inject an external force acting at a world-space point. It accumulates
    /// immediately and is consumed by the next `step`. Unknown handles are a
    /// no-op, not an error.
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec3, world_point: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle.0) {
            let position = body.position;
            body.accumulator.add_at_point(force, world_point, position);
        }
    }

    /// Advance the simulation by one timestep.
    pub fn step(&mut self, dt: f64) {
        self.accumulate_gravity();
        self.accumulate_spring_forces();

        for body in &mut self.bodies {
            if body.fixed {
                continue;
            }
            integrate_body(body, dt, &self.params);
        }

        // Cleared unconditionally, whatever happened above.
        for body in &mut self.bodies {
            body.accumulator.clear();
        }
    }

    /// Nearest body whose picking proxy the ray intersects, with the
    /// intersection point. Ties go to the earlier-added body.
    pub fn first_body_hit_by_ray(&self, ray: &Ray) -> Option<RayHit> {
        let mut nearest: Option<(f64, RayHit)> = None;
        for (i, body) in self.bodies.iter().enumerate() {
            if let Some(t) = ray.intersect_sphere(&body.position, body.bounding_radius()) {
                if nearest.map_or(true, |(best_t, _)| t < best_t) {
                    nearest = Some((
                        t,
                        RayHit {
                            body: BodyHandle(i),
                            point: ray.point_at(t),
                        },
                    ));
                }
            }
        }
        nearest.map(|(_, hit)| hit)
    }

    fn accumulate_gravity(&mut self) {
        let g = self.params.gravity;
        for body in &mut self.bodies {
            if !body.fixed {
                body.accumulator.force += Vec3::new(0.0, -g * body.mass, 0.0);
            }
        }
    }

    fn accumulate_spring_forces(&mut self) {
        for spring in &self.springs {
            let child = &self.bodies[spring.child.0];
            let child_world = child.world_point(&spring.child_local);
            let (parent_world, parent_body) = match spring.parent {
                Anchor::World(p) => (p, None),
                Anchor::Body { body, local } => {
                    (self.bodies[body.0].world_point(&local), Some(body))
                }
            };

            let separation = child_world - parent_world;
            let distance = separation.norm();
            if distance < 1e-10 {
                // Coincident endpoints: the force direction is undefined, so
                // this spring contributes nothing this step.
                continue;
            }
            let direction = separation / distance;
            let force = -spring.stiffness * (separation - direction * spring.rest_length);

            let child_position = self.bodies[spring.child.0].position;
            self.bodies[spring.child.0]
                .accumulator
                .add_at_point(force, child_world, child_position);
            if let Some(parent) = parent_body {
                let parent_position = self.bodies[parent.0].position;
                self.bodies[parent.0]
                    .accumulator
                    .add_at_point(-force, parent_world, parent_position);
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Velocity update → contact correction → pose update, in that order.
/// Integrating the pose from the corrected velocity is what keeps contact
/// points from tunneling through the ground.
fn integrate_body(body: &mut RigidBody, dt: f64, params: &SimParameters) {
    let inertia_world = body.inertia_world();
    let inv_inertia_world = body.inv_inertia_world();
    let w = body.angular_velocity;
    // Euler's equation in world frame, gyroscopic term included.
    body.angular_velocity +=
        dt * (inv_inertia_world * (body.accumulator.torque - w.cross(&(inertia_world * w))));
    body.linear_velocity += dt * body.accumulator.force / body.mass;

    if params.contacts_enabled && body.has_collision {
        resolve_ground_contact(body, params);
    }

    body.position += dt * body.linear_velocity;
    body.orientation = body.orientation.integrate(&body.angular_velocity, dt);
    if (body.orientation.norm() - 1.0).abs() > 1e-9 {
        body.orientation = body.orientation.normalize();
    }
}
