//! Static scene backend.
//!
//! A lightweight [`CharacterPhysicsBackend`] made of flat, axis-aligned ground
//! patches. Each patch can carry a material tag and a terrain splat map.
//! Movement is resolved kinematically: a character that starts a tick on or
//! above a patch never ends it below that patch's surface.

use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::collision::CollisionData;
use crate::surface::{ColliderTag, SplatMap, TerrainSurfaceProvider};

/// Small tolerance for "on or above the surface" comparisons.
const SURFACE_EPSILON: f32 = 1e-4;

/// A horizontal rectangle of walkable ground.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundPatch {
    /// Minimum corner of the footprint (world X, Z).
    pub min: Vec2,
    /// Maximum corner of the footprint (world X, Z).
    pub max: Vec2,
    /// Surface height (world Y).
    pub height: f32,
    /// Collision layer membership bits.
    pub layers: u32,
    /// Material tag.
    pub tag: ColliderTag,
    /// Terrain splat map, if this patch is terrain.
    pub terrain: Option<SplatMap>,
    /// Entity reported in probe hits. Assigned by the scene when `None`.
    pub entity: Option<Entity>,
}

impl GroundPatch {
    /// Create an untagged patch on layer 0.
    pub fn new(min: Vec2, max: Vec2, height: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            height,
            layers: 1,
            tag: ColliderTag::Untagged,
            terrain: None,
            entity: None,
        }
    }

    /// Builder: set the material tag.
    pub fn with_tag(mut self, tag: ColliderTag) -> Self {
        self.tag = tag;
        self
    }

    /// Builder: attach a terrain splat map.
    pub fn with_terrain(mut self, terrain: SplatMap) -> Self {
        self.terrain = Some(terrain);
        self
    }

    /// Builder: set the collision layer bits.
    pub fn with_layers(mut self, layers: u32) -> Self {
        self.layers = layers;
        self
    }

    /// Builder: report hits on this patch as `entity`.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Whether a world (X, Z) position lies on the footprint.
    #[inline]
    pub fn contains(&self, xz: Vec2) -> bool {
        xz.cmpge(self.min).all() && xz.cmple(self.max).all()
    }
}

/// Collision world built from [`GroundPatch`]es.
#[derive(Resource, Debug, Clone, Default)]
pub struct StaticScene {
    patches: Vec<(Entity, GroundPatch)>,
}

impl StaticScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a patch and return the entity its hits are reported as.
    pub fn add_patch(&mut self, patch: GroundPatch) -> Entity {
        let entity = patch.entity.unwrap_or_else(|| self.next_free_entity());
        self.patches.push((entity, patch));
        entity
    }

    /// Lowest placeholder entity not already reported by a patch.
    fn next_free_entity(&self) -> Entity {
        let mut index = self.patches.len() as u32;
        while self.patch(Entity::from_raw(index)).is_some() {
            index += 1;
        }
        Entity::from_raw(index)
    }

    /// Builder: add a patch.
    pub fn with_patch(mut self, patch: GroundPatch) -> Self {
        self.add_patch(patch);
        self
    }

    /// Look up a patch by the entity its hits report.
    pub fn patch(&self, entity: Entity) -> Option<&GroundPatch> {
        self.patches
            .iter()
            .find(|(e, _)| *e == entity)
            .map(|(_, patch)| patch)
    }

    /// Number of patches in the scene.
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Whether the scene has no patches.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Highest surface under `xz` that is not above `max_height`.
    fn support_height(&self, xz: Vec2, max_height: f32) -> Option<f32> {
        self.patches
            .iter()
            .filter(|(_, patch)| patch.contains(xz) && patch.height <= max_height + SURFACE_EPSILON)
            .map(|(_, patch)| patch.height)
            .reduce(f32::max)
    }
}

impl CharacterPhysicsBackend for StaticScene {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layer_mask: u32,
    ) -> Option<CollisionData> {
        // Patches are one-sided and face +Y.
        if direction.y >= 0.0 {
            return None;
        }

        self.patches
            .iter()
            .filter(|(_, patch)| patch.layers & layer_mask != 0)
            .filter_map(|(entity, patch)| {
                let distance = (origin.y - patch.height) / -direction.y;
                if !(-SURFACE_EPSILON..=max_distance).contains(&distance) {
                    return None;
                }
                let distance = distance.max(0.0);
                let point = origin + direction * distance;
                patch
                    .contains(point.xz())
                    .then(|| CollisionData::new(distance, Vec3::Y, point, Some(*entity)))
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn collider_tag(&self, entity: Entity) -> ColliderTag {
        self.patch(entity).map(|patch| patch.tag).unwrap_or_default()
    }

    fn terrain(&self, entity: Entity) -> Option<&dyn TerrainSurfaceProvider> {
        self.patch(entity)?
            .terrain
            .as_ref()
            .map(|terrain| terrain as &dyn TerrainSurfaceProvider)
    }

    fn move_character(&mut self, position: Vec3, displacement: Vec3) -> Vec3 {
        let mut target = position + displacement;
        if let Some(height) = self.support_height(target.xz(), position.y) {
            if target.y < height {
                target.y = height;
            }
        }
        target
    }
}
