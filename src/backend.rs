//! Physics backend abstraction.
//!
//! This module defines the trait a collision world must implement to drive
//! the controller. The controller only needs downward probes, collider
//! metadata and a way to move the character, so any engine (or a hand-built
//! static scene) can sit behind it.

use bevy::prelude::*;

use crate::collision::CollisionData;
use crate::surface::{ColliderTag, TerrainSurfaceProvider};

/// Trait for collision world implementations.
///
/// # Example
///
/// The crate ships [`StaticScene`](crate::scene::StaticScene), a backend made
/// of flat ground patches:
///
/// ```rust
/// use bevy::prelude::*;
/// use fps_character_controller::prelude::*;
///
/// let mut scene = StaticScene::new();
/// scene.add_patch(GroundPatch::new(Vec2::splat(-50.0), Vec2::splat(50.0), 0.0));
///
/// let hit = scene.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 2.0, u32::MAX);
/// assert!(hit.is_some());
/// ```
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// Cast a ray and return the closest hit within `max_distance`.
    ///
    /// # Arguments
    /// * `origin` - Ray origin in world space
    /// * `direction` - Cast direction (should be normalized)
    /// * `max_distance` - Maximum cast distance
    /// * `layer_mask` - Only colliders on one of these layers are hit
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layer_mask: u32,
    ) -> Option<CollisionData>;

    /// Material tag of a collider.
    fn collider_tag(&self, _entity: Entity) -> ColliderTag {
        ColliderTag::Untagged
    }

    /// Terrain attached to a collider, if it is a terrain.
    fn terrain(&self, _entity: Entity) -> Option<&dyn TerrainSurfaceProvider> {
        None
    }

    /// Move the character by `displacement` and return its resolved position.
    ///
    /// Backends with collision response clip the displacement here; the
    /// default translates without resolving anything.
    fn move_character(&mut self, position: Vec3, displacement: Vec3) -> Vec3 {
        position + displacement
    }
}

/// Helper struct for building downward probes.
#[derive(Debug, Clone, Copy)]
pub struct RaycastRequest {
    /// Origin point of the ray.
    pub origin: Vec3,
    /// Direction of the ray (normalized).
    pub direction: Vec3,
    /// Maximum distance to cast.
    pub max_distance: f32,
    /// Layers the ray collides with.
    pub layer_mask: u32,
}

impl RaycastRequest {
    /// Create a new raycast request against all layers.
    pub fn new(origin: Vec3, direction: Vec3, max_distance: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            max_distance,
            layer_mask: u32::MAX,
        }
    }

    /// Probe straight down from `origin`.
    pub fn down(origin: Vec3, max_distance: f32) -> Self {
        Self::new(origin, Vec3::NEG_Y, max_distance)
    }

    /// Restrict the ray to a layer mask.
    pub fn on_layers(mut self, layer_mask: u32) -> Self {
        self.layer_mask = layer_mask;
        self
    }

    /// Run the request against a backend.
    ///
    /// Hits reported beyond `max_distance` are discarded.
    pub fn cast<B: CharacterPhysicsBackend + ?Sized>(&self, backend: &B) -> Option<CollisionData> {
        backend
            .raycast(self.origin, self.direction, self.max_distance, self.layer_mask)
            .filter(|hit| hit.within(self.max_distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Infinite floor at y = 0 on layer 1.
    struct Floor;

    impl CharacterPhysicsBackend for Floor {
        fn raycast(
            &self,
            origin: Vec3,
            direction: Vec3,
            max_distance: f32,
            layer_mask: u32,
        ) -> Option<CollisionData> {
            if layer_mask & 1 == 0 || direction.y >= 0.0 {
                return None;
            }
            let distance = origin.y / -direction.y;
            (distance >= 0.0 && distance <= max_distance)
                .then(|| CollisionData::new(distance, Vec3::Y, origin + direction * distance, None))
        }
    }

    #[test]
    fn request_normalizes_direction() {
        let request = RaycastRequest::new(Vec3::ZERO, Vec3::new(0.0, -5.0, 0.0), 1.0);
        assert_eq!(request.direction, Vec3::NEG_Y);
        assert_eq!(request.layer_mask, u32::MAX);
    }

    #[test]
    fn request_casts_against_backend() {
        let hit = RaycastRequest::down(Vec3::new(3.0, 1.5, 2.0), 2.0).cast(&Floor);
        let hit = hit.unwrap();
        assert_eq!(hit.distance, 1.5);
        assert_eq!(hit.point, Vec3::new(3.0, 0.0, 2.0));

        assert!(RaycastRequest::down(Vec3::new(0.0, 3.0, 0.0), 2.0).cast(&Floor).is_none());
    }

    #[test]
    fn request_respects_layers() {
        let request = RaycastRequest::down(Vec3::Y, 2.0).on_layers(0b10);
        assert!(request.cast(&Floor).is_none());
    }

    #[test]
    fn default_metadata_and_movement() {
        let mut floor = Floor;
        let entity = Entity::from_raw(7);
        assert_eq!(floor.collider_tag(entity), ColliderTag::Untagged);
        assert!(floor.terrain(entity).is_none());
        assert_eq!(floor.move_character(Vec3::ONE, Vec3::X), Vec3::new(2.0, 1.0, 1.0));
    }
}
