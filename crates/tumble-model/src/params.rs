//! World-level simulation parameters.

use serde::{Deserialize, Serialize};
use tumble_math::GRAVITY;

/// Global knobs read by the per-step pipeline. Mutable between steps,
/// read-only during a step; each world carries its own copy so independent
/// worlds can run with independent parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParameters {
    /// Gravitational acceleration magnitude, applied along -y.
    pub gravity: f64,
    /// Coefficient of restitution ε ∈ [0, 1].
    pub restitution: f64,
    /// Coulomb friction coefficient μ ≥ 0.
    pub friction: f64,
    /// Master switch for ground-contact resolution.
    pub contacts_enabled: bool,
}

impl Default for SimParameters {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            restitution: 0.0,
            friction: 0.8,
            contacts_enabled: false,
        }
    }
}
