//! Two-endpoint elastic connectors.

use serde::{Deserialize, Serialize};
use tumble_math::Vec3;

use crate::BodyHandle;

/// Stable index of a spring in the world's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpringHandle(pub usize);

/// The parent end of a spring: pinned to the world or attached to a body.
#[derive(Debug, Clone, Copy)]
pub enum Anchor {
    /// Fixed world-space point.
    World(Vec3),
    /// Attachment point in a body's local frame.
    Body { body: BodyHandle, local: Vec3 },
}

/// Hookean spring between a parent anchor and a local point on `child`.
///
/// `rest_length` is fixed when the spring is added to a world, from the
/// world-space separation of the two attachment points at that instant; it is
/// never recomputed.
#[derive(Debug, Clone)]
pub struct Spring {
    pub parent: Anchor,
    pub child: BodyHandle,
    pub child_local: Vec3,
    pub rest_length: f64,
    pub stiffness: f64,
}
