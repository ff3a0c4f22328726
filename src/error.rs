//! Error types.
//!
//! The per-tick path never fails; errors only come from building a
//! controller or a terrain splat map with values that cannot work.

use thiserror::Error;

/// Rejected [`MovementTuning`](crate::config::MovementTuning) values.
#[derive(Debug, Error)]
pub enum TuningError {
    /// A value that must be strictly positive (and finite) was not.
    #[error("`{field}` must be a positive, finite number, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A value that may be zero was negative (or not finite).
    #[error("`{field}` must be zero or positive, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Sprint speed is slower than walk speed.
    #[error("sprint speed ({sprint}) must not be below walk speed ({walk})")]
    SprintBelowWalk {
        /// Configured walk speed.
        walk: f32,
        /// Configured sprint speed.
        sprint: f32,
    },

    /// Vertical look clamp outside (0, 90] degrees.
    #[error("vertical look limit must be within (0, 90] degrees, got {0}")]
    LookClamp(f32),

    /// The tuning document could not be parsed.
    #[error("failed to parse movement tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Rejected [`SplatMap`](crate::surface::SplatMap) layouts.
#[derive(Debug, Error, PartialEq)]
pub enum SplatMapError {
    /// Width, height or layer count was zero.
    #[error("splat map dimensions must be non-zero (width {width}, height {height}, layers {layers})")]
    EmptyGrid {
        /// Grid cells along X.
        width: usize,
        /// Grid cells along Z.
        height: usize,
        /// Number of texture layers.
        layers: usize,
    },

    /// Terrain footprint must have a positive size on both axes.
    #[error("terrain footprint must be positive, got {x} x {z}")]
    InvalidFootprint {
        /// Footprint size along X.
        x: f32,
        /// Footprint size along Z.
        z: f32,
    },

    /// Weight buffer length does not match `width * height * layers`.
    #[error("expected {expected} splat weights, got {actual}")]
    WeightCount {
        /// Required number of weights.
        expected: usize,
        /// Number of weights supplied.
        actual: usize,
    },
}
