//! Model types for the tumble rigid-body engine.
//!
//! `RigidBody` holds per-body physical state, constant properties, and the
//! force/torque accumulator consumed by integration. `Spring` is a Hookean
//! connector between a body and either another body or a fixed world point.
//! Both live in arenas owned by the world and are addressed through stable
//! integer handles.

pub mod body;
pub mod params;
pub mod spring;

pub use body::{BodyDef, BodyHandle, ForceAccumulator, RigidBody};
pub use params::SimParameters;
pub use spring::{Anchor, Spring, SpringHandle};

use thiserror::Error;

/// Configuration errors, surfaced at creation time. A failed creation leaves
/// the world unmodified; nothing here is raised mid-step.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("mass must be strictly positive, got {0}")]
    NonPositiveMass(f64),

    #[error("inertia tensor is singular")]
    SingularInertia,

    #[error("spring stiffness must be strictly positive, got {0}")]
    NonPositiveStiffness(f64),

    #[error("unknown body handle {0}")]
    UnknownBody(usize),
}

pub type Result<T> = std::result::Result<T, ModelError>;
