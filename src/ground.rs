//! Ground probing and surface classification.
//!
//! The grounded check runs every tick and is a single short ray. Surface
//! classification casts a second, longer ray and may sample a terrain splat
//! map, so it only runs when a footstep is about to fire.

use bevy::prelude::*;

use crate::backend::{CharacterPhysicsBackend, RaycastRequest};
use crate::config::ProbeSettings;
use crate::surface::{ColliderTag, SurfaceKind, SurfaceSample};

/// Probes start this far above the feet so a character standing exactly on
/// a surface still hits it.
pub const PROBE_SKIN: f32 = 0.01;

/// Downward probes below the character's feet.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundSampler;

impl GroundSampler {
    /// Whether walkable ground lies within the ground probe distance.
    pub fn sample<B: CharacterPhysicsBackend + ?Sized>(
        backend: &B,
        settings: &ProbeSettings,
        feet: Vec3,
    ) -> bool {
        RaycastRequest::down(feet + Vec3::Y * PROBE_SKIN, settings.ground_distance + PROBE_SKIN)
            .cast(backend)
            .is_some()
    }

    /// Classify the material under the feet.
    ///
    /// A tagged collider wins over terrain sampling. Anything that is neither
    /// tagged nor a terrain classifies as [`SurfaceKind::None`].
    pub fn classify_surface<B: CharacterPhysicsBackend + ?Sized>(
        backend: &B,
        settings: &ProbeSettings,
        feet: Vec3,
    ) -> SurfaceSample {
        let Some(hit) = RaycastRequest::down(feet + Vec3::Y * PROBE_SKIN, settings.surface_distance + PROBE_SKIN)
            .on_layers(settings.surface_layers)
            .cast(backend)
        else {
            return SurfaceSample::miss();
        };

        let Some(entity) = hit.entity else {
            return SurfaceSample::hit(SurfaceKind::None, hit.point);
        };

        if backend.collider_tag(entity) == ColliderTag::Wood {
            return SurfaceSample::hit(SurfaceKind::Wood, hit.point);
        }

        let kind = backend
            .terrain(entity)
            .and_then(|terrain| terrain.dominant_layer(hit.point))
            .map(|layer| settings.layer_map.kind_for(layer))
            .unwrap_or_default();
        SurfaceSample::hit(kind, hit.point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{GroundPatch, StaticScene};
    use crate::surface::SplatMap;

    fn terrain(layer: usize) -> SplatMap {
        SplatMap::uniform(Vec3::new(-10.0, 0.0, -10.0), Vec2::splat(20.0), 4, 4, 4, layer).unwrap()
    }

    fn terrain_scene(layer: usize) -> StaticScene {
        StaticScene::new().with_patch(
            GroundPatch::new(Vec2::splat(-10.0), Vec2::splat(10.0), 0.0).with_terrain(terrain(layer)),
        )
    }

    #[test]
    fn grounded_when_standing_on_surface() {
        let scene = terrain_scene(0);
        let settings = ProbeSettings::default();
        assert!(GroundSampler::sample(&scene, &settings, Vec3::ZERO));
        assert!(GroundSampler::sample(&scene, &settings, Vec3::new(0.0, 0.05, 0.0)));
    }

    #[test]
    fn airborne_above_probe_distance() {
        let scene = terrain_scene(0);
        let settings = ProbeSettings::default();
        assert!(!GroundSampler::sample(&scene, &settings, Vec3::new(0.0, 0.5, 0.0)));
        assert!(!GroundSampler::sample(&scene, &settings, Vec3::new(30.0, 0.0, 0.0)));
    }

    #[test]
    fn terrain_layers_map_to_surfaces() {
        let settings = ProbeSettings::default();
        let feet = Vec3::new(1.0, 0.5, 1.0);
        let cases = [
            (0, SurfaceKind::Dirt),
            (1, SurfaceKind::Dirt),
            (2, SurfaceKind::Concrete),
            (3, SurfaceKind::None),
        ];
        for (layer, expected) in cases {
            let sample = GroundSampler::classify_surface(&terrain_scene(layer), &settings, feet);
            assert_eq!(sample.kind, expected, "layer {layer}");
            assert_eq!(sample.point, Some(Vec3::new(1.0, 0.0, 1.0)));
        }
    }

    #[test]
    fn wood_tag_beats_terrain() {
        let scene = StaticScene::new().with_patch(
            GroundPatch::new(Vec2::splat(-10.0), Vec2::splat(10.0), 0.0)
                .with_terrain(terrain(2))
                .with_tag(ColliderTag::Wood),
        );
        let sample = GroundSampler::classify_surface(&scene, &ProbeSettings::default(), Vec3::ZERO);
        assert_eq!(sample.kind, SurfaceKind::Wood);
    }

    #[test]
    fn wood_deck_above_terrain_is_wood() {
        let scene = terrain_scene(2).with_patch(
            GroundPatch::new(Vec2::splat(-1.0), Vec2::splat(1.0), 0.5).with_tag(ColliderTag::Wood),
        );
        let sample =
            GroundSampler::classify_surface(&scene, &ProbeSettings::default(), Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(sample.kind, SurfaceKind::Wood);
    }

    #[test]
    fn untagged_non_terrain_is_none() {
        let scene =
            StaticScene::new().with_patch(GroundPatch::new(Vec2::splat(-1.0), Vec2::splat(1.0), 0.0));
        let sample = GroundSampler::classify_surface(&scene, &ProbeSettings::default(), Vec3::ZERO);
        assert_eq!(sample.kind, SurfaceKind::None);
        assert!(sample.point.is_some());
    }

    #[test]
    fn surface_probe_reaches_full_distance_below_feet() {
        let scene = terrain_scene(2);
        let settings = ProbeSettings::default();
        let feet = Vec3::new(0.0, settings.surface_distance - 0.005, 0.0);
        let sample = GroundSampler::classify_surface(&scene, &settings, feet);
        assert_eq!(sample.kind, SurfaceKind::Concrete);
    }

    #[test]
    fn nothing_below_is_a_miss() {
        let scene = terrain_scene(0);
        let sample =
            GroundSampler::classify_surface(&scene, &ProbeSettings::default(), Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(sample, SurfaceSample::miss());
    }

    #[test]
    fn surface_probe_uses_layer_mask() {
        let scene = StaticScene::new()
            .with_patch(GroundPatch::new(Vec2::splat(-1.0), Vec2::splat(1.0), 0.0).with_tag(ColliderTag::Wood));
        let settings = ProbeSettings {
            surface_layers: 0b100,
            ..ProbeSettings::default()
        };
        let sample = GroundSampler::classify_surface(&scene, &settings, Vec3::ZERO);
        assert_eq!(sample.kind, SurfaceKind::None);
        assert!(sample.point.is_none());
    }
}
