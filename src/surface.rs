//! Surface classification types.
//!
//! Footstep audio and visuals are keyed by the material under the
//! character's feet. Tagged colliders name their material directly; terrains
//! expose a splat map whose dominant texture layer is mapped to a material
//! through a [`SurfaceLayerMap`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SplatMapError;

/// Material underfoot.
///
/// `None` means "no classifiable surface" and suppresses footstep events.
#[derive(Reflect, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Nothing recognisable underfoot.
    #[default]
    None,
    /// Soil, grass and other soft natural ground.
    Dirt,
    /// Wooden planks, decks and bridges.
    Wood,
    /// Concrete, stone and paved ground.
    Concrete,
}

/// Tag carried by a collider that overrides terrain sampling.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[reflect(Component)]
pub enum ColliderTag {
    /// No material tag; fall back to terrain sampling.
    #[default]
    Untagged,
    /// Wooden surface.
    Wood,
}

/// Result of a surface classification probe.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceSample {
    /// Classified material.
    pub kind: SurfaceKind,
    /// Probe hit point, if the probe hit anything.
    pub point: Option<Vec3>,
}

impl SurfaceSample {
    /// A probe that hit nothing.
    pub fn miss() -> Self {
        Self::default()
    }

    /// A probe that hit something at `point`.
    pub fn hit(kind: SurfaceKind, point: Vec3) -> Self {
        Self {
            kind,
            point: Some(point),
        }
    }
}

/// Maps terrain texture layer indices to surface kinds.
///
/// The order follows the order textures were painted onto the terrain, so it
/// is configuration rather than logic. Indices past the end map to
/// [`SurfaceKind::None`].
#[derive(Reflect, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct SurfaceLayerMap(pub Vec<SurfaceKind>);

impl Default for SurfaceLayerMap {
    fn default() -> Self {
        // Layer 0 is painted grass; it uses the dirt footsteps.
        Self(vec![SurfaceKind::Dirt, SurfaceKind::Dirt, SurfaceKind::Concrete])
    }
}

impl SurfaceLayerMap {
    /// Create a map from an explicit layer order.
    pub fn new(layers: impl Into<Vec<SurfaceKind>>) -> Self {
        Self(layers.into())
    }

    /// Surface kind for a layer index.
    pub fn kind_for(&self, layer: usize) -> SurfaceKind {
        self.0.get(layer).copied().unwrap_or_default()
    }
}

/// Capability of a terrain to report its dominant texture layer.
pub trait TerrainSurfaceProvider {
    /// Dominant layer index at a world point, or `None` if the point lies
    /// outside the terrain footprint.
    fn dominant_layer(&self, world_point: Vec3) -> Option<usize>;
}

/// Heightfield-aligned grid of per-layer blend weights.
///
/// Weights are stored row-major with layers innermost:
/// `weights[(z * width + x) * layers + layer]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SplatMap {
    origin: Vec3,
    size: Vec2,
    width: usize,
    height: usize,
    layers: usize,
    weights: Vec<f32>,
}

impl SplatMap {
    /// Create a splat map covering `size` (X, Z) starting at `origin`.
    pub fn new(
        origin: Vec3,
        size: Vec2,
        width: usize,
        height: usize,
        layers: usize,
        weights: Vec<f32>,
    ) -> Result<Self, SplatMapError> {
        if width == 0 || height == 0 || layers == 0 {
            return Err(SplatMapError::EmptyGrid {
                width,
                height,
                layers,
            });
        }
        if !(size.x > 0.0 && size.y > 0.0 && size.is_finite()) {
            return Err(SplatMapError::InvalidFootprint {
                x: size.x,
                z: size.y,
            });
        }
        let expected = width * height * layers;
        if weights.len() != expected {
            return Err(SplatMapError::WeightCount {
                expected,
                actual: weights.len(),
            });
        }
        Ok(Self {
            origin,
            size,
            width,
            height,
            layers,
            weights,
        })
    }

    /// Create a splat map painted entirely with one layer.
    pub fn uniform(
        origin: Vec3,
        size: Vec2,
        width: usize,
        height: usize,
        layers: usize,
        layer: usize,
    ) -> Result<Self, SplatMapError> {
        let mut weights = vec![0.0; width * height * layers];
        if layer < layers {
            for cell in weights.chunks_mut(layers) {
                cell[layer] = 1.0;
            }
        }
        Self::new(origin, size, width, height, layers, weights)
    }

    /// Overwrite the weights of one cell. Out-of-range cells are ignored.
    pub fn paint(&mut self, x: usize, z: usize, weights: &[f32]) {
        if x >= self.width || z >= self.height {
            return;
        }
        let start = (z * self.width + x) * self.layers;
        let Some(cell) = self.weights.get_mut(start..start + self.layers) else {
            return;
        };
        for (dst, src) in cell.iter_mut().zip(weights) {
            *dst = *src;
        }
    }

    /// Weights of one cell.
    pub fn weights_at(&self, x: usize, z: usize) -> Option<&[f32]> {
        if x >= self.width || z >= self.height {
            return None;
        }
        let start = (z * self.width + x) * self.layers;
        self.weights.get(start..start + self.layers)
    }

    /// Grid cell containing a world point, if it lies on the footprint.
    pub fn cell_at(&self, world_point: Vec3) -> Option<(usize, usize)> {
        let local = world_point - self.origin;
        let u = local.x / self.size.x;
        let v = local.z / self.size.y;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }
        let x = ((u * self.width as f32).floor() as usize).min(self.width - 1);
        let z = ((v * self.height as f32).floor() as usize).min(self.height - 1);
        Some((x, z))
    }

    /// Number of texture layers.
    pub fn layers(&self) -> usize {
        self.layers
    }
}

impl TerrainSurfaceProvider for SplatMap {
    fn dominant_layer(&self, world_point: Vec3) -> Option<usize> {
        let (x, z) = self.cell_at(world_point)?;
        let weights = self.weights_at(x, z)?;

        // Strict comparison: the lowest index wins ties, all-zero cells give 0.
        let mut dominant = 0;
        let mut max_weight = 0.0;
        for (layer, &weight) in weights.iter().enumerate() {
            if weight > max_weight {
                max_weight = weight;
                dominant = layer;
            }
        }
        Some(dominant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn two_by_two() -> SplatMap {
        // Footprint 10 x 10 starting at (100, 0, 50).
        let mut map = SplatMap::uniform(
            Vec3::new(100.0, 0.0, 50.0),
            Vec2::new(10.0, 10.0),
            2,
            2,
            3,
            0,
        )
        .unwrap();
        map.paint(1, 0, &[0.2, 0.1, 0.7]);
        map.paint(0, 1, &[0.1, 0.6, 0.3]);
        map.paint(1, 1, &[0.4, 0.4, 0.2]);
        map
    }

    #[rstest]
    #[case(0, SurfaceKind::Dirt)]
    #[case(1, SurfaceKind::Dirt)]
    #[case(2, SurfaceKind::Concrete)]
    #[case(3, SurfaceKind::None)]
    #[case(17, SurfaceKind::None)]
    fn default_layer_map(#[case] layer: usize, #[case] expected: SurfaceKind) {
        assert_eq!(SurfaceLayerMap::default().kind_for(layer), expected);
    }

    #[test]
    fn custom_layer_map() {
        let map = SurfaceLayerMap::new([SurfaceKind::Concrete, SurfaceKind::Wood]);
        assert_eq!(map.kind_for(0), SurfaceKind::Concrete);
        assert_eq!(map.kind_for(1), SurfaceKind::Wood);
        assert_eq!(map.kind_for(2), SurfaceKind::None);
    }

    #[rstest]
    #[case(Vec3::new(102.0, 0.0, 52.0), Some(0))]
    #[case(Vec3::new(108.0, 3.0, 52.0), Some(2))]
    #[case(Vec3::new(102.0, 0.0, 58.0), Some(1))]
    #[case(Vec3::new(99.0, 0.0, 52.0), None)]
    #[case(Vec3::new(102.0, 0.0, 61.0), None)]
    fn dominant_layer_lookup(#[case] point: Vec3, #[case] expected: Option<usize>) {
        assert_eq!(two_by_two().dominant_layer(point), expected);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let map = two_by_two();
        assert_eq!(map.dominant_layer(Vec3::new(108.0, 0.0, 58.0)), Some(0));
    }

    #[test]
    fn all_zero_cell_is_layer_zero() {
        let map = SplatMap::new(Vec3::ZERO, Vec2::ONE, 1, 1, 3, vec![0.0; 3]).unwrap();
        assert_eq!(map.dominant_layer(Vec3::new(0.5, 0.0, 0.5)), Some(0));
    }

    #[test]
    fn far_edge_clamps_to_last_cell() {
        let map = two_by_two();
        assert_eq!(map.cell_at(Vec3::new(110.0, 0.0, 60.0)), Some((1, 1)));
    }

    #[test]
    fn new_rejects_bad_layouts() {
        assert_eq!(
            SplatMap::new(Vec3::ZERO, Vec2::ONE, 0, 1, 1, vec![]),
            Err(SplatMapError::EmptyGrid {
                width: 0,
                height: 1,
                layers: 1
            })
        );
        assert!(matches!(
            SplatMap::new(Vec3::ZERO, Vec2::new(0.0, 1.0), 1, 1, 1, vec![1.0]),
            Err(SplatMapError::InvalidFootprint { .. })
        ));
        assert_eq!(
            SplatMap::new(Vec3::ZERO, Vec2::ONE, 2, 2, 2, vec![0.0; 7]),
            Err(SplatMapError::WeightCount {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn paint_ignores_out_of_range_cells() {
        let mut map = two_by_two();
        let before = map.clone();
        map.paint(5, 5, &[1.0, 0.0, 0.0]);
        assert_eq!(map, before);
    }
}
