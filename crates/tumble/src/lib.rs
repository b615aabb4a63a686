//! tumble — impulse-based rigid-body simulator.
//!
//! Advances free rigid bodies under gravity, spring connectors, and ground
//! contact with Coulomb friction. This umbrella crate owns the `World`
//! driver and re-exports the sub-crate types.

mod world;

pub use world::{RayHit, World};

pub use tumble_contact::{self, lowest_contact_point, resolve_ground_contact, ContactImpulse};
pub use tumble_math::{self, skew, Mat3, Quat, Ray, Vec3, GRAVITY};
pub use tumble_model::{
    self, Anchor, BodyDef, BodyHandle, ModelError, RigidBody, SimParameters, Spring, SpringHandle,
};
