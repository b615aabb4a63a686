//! Impulse-based ground-contact resolution with Coulomb friction.
//!
//! The ground is the plane y = 0. Each body resolves at most one contact per
//! step: the lowest of its contact points. The resolver runs between the
//! velocity update and the pose update, so the pose is integrated from
//! already-corrected velocities. No position correction is applied; residual
//! penetration from the explicit step is pushed out by subsequent steps.

use tumble_math::{skew, Mat3, Vec3};
use tumble_model::{RigidBody, SimParameters};

/// Impulse applied by the resolver, reported so callers can inspect or
/// visualize contact activity.
#[derive(Debug, Clone, Copy)]
pub struct ContactImpulse {
    /// World-space contact point.
    pub point: Vec3,
    /// Total impulse applied at the point.
    pub impulse: Vec3,
    /// True when the friction-cone bound was hit (Coulomb sliding), false
    /// when the normal-only impulse already satisfied it (sticking).
    pub sliding: bool,
}

/// The body's lowest contact point in world coordinates under its current
/// pose, or `None` if the body has no contact points.
pub fn lowest_contact_point(body: &RigidBody) -> Option<Vec3> {
    body.contact_points
        .iter()
        .map(|p| body.world_point(p))
        .min_by(|a, b| a.y.total_cmp(&b.y))
}

/// Resolve ground contact for one body, applying the impulse directly to its
/// linear and angular velocity.
///
/// Returns `None` when no contact is active: no point at or below the plane,
/// the point is separating (its velocity has no downward component), or the
/// effective-mass matrix is numerically singular (skipped this step).
pub fn resolve_ground_contact(
    body: &mut RigidBody,
    params: &SimParameters,
) -> Option<ContactImpulse> {
    let point = lowest_contact_point(body)?;
    if point.y > 0.0 {
        return None;
    }

    let n = Vec3::y();
    let offset = point - body.position;
    let u = body.linear_velocity + body.angular_velocity.cross(&offset);
    let u_n = u.dot(&n);
    if u_n >= 0.0 {
        return None;
    }

    let inv_inertia_world = body.inv_inertia_world();
    let offset_skew = skew(&offset);
    // Effective inverse-mass matrix at the contact. The ground is immovable
    // and contributes nothing.
    let k = Mat3::identity() / body.mass - offset_skew * inv_inertia_world * offset_skew;
    let k_inv = k.try_inverse()?;

    let eps = params.restitution;
    let mu = params.friction;

    // Normal-only candidate: cancel the point velocity and reflect the
    // normal component by the restitution coefficient.
    let j_candidate = k_inv * (-u - eps * u_n * n);
    let j_normal = j_candidate.dot(&n) * n;
    let j_tangent = j_candidate - j_normal;

    let (impulse, sliding) = if j_tangent.norm() <= mu * j_normal.norm() {
        (j_candidate, false)
    } else {
        // Coulomb sliding: normal magnitude from the cone-constrained
        // system, friction opposing the tangential slip direction.
        let u_t = u - u_n * n;
        let t = if u_t.norm() > 1e-10 {
            u_t / u_t.norm()
        } else {
            Vec3::zeros()
        };
        let denom = n.dot(&(k * (n - mu * t)));
        if denom.abs() < 1e-12 {
            return None;
        }
        let j_n = -(eps + 1.0) * u_n / denom;
        (j_n * n - mu * j_n * t, true)
    };

    body.linear_velocity += impulse / body.mass;
    body.angular_velocity += inv_inertia_world * offset_skew * impulse;

    Some(ContactImpulse {
        point,
        impulse,
        sliding,
    })
}
