//! Probe result structures.
//!
//! These structures hold the results of physics queries (downward raycasts)
//! used for ground detection and surface classification.

use bevy::prelude::*;

/// Information about a raycast hit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionData {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Normal of the surface at the hit point.
    pub normal: Vec3,
    /// World position of the hit point.
    pub point: Vec3,
    /// Entity that was hit (if the backend tracks entities).
    pub entity: Option<Entity>,
}

impl CollisionData {
    /// Create a collision result.
    pub fn new(distance: f32, normal: Vec3, point: Vec3, entity: Option<Entity>) -> Self {
        Self {
            distance,
            normal,
            point,
            entity,
        }
    }

    /// Whether the hit lies within `max_distance` of the ray origin.
    #[inline]
    pub fn within(&self, max_distance: f32) -> bool {
        self.distance <= max_distance
    }
}
