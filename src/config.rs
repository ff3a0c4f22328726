//! Controller configuration.
//!
//! [`MovementTuning`] holds every feel-related number the controller reads.
//! It is validated once when a controller is initialized and treated as
//! read-only afterwards.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::TuningError;
use crate::surface::SurfaceLayerMap;

/// Vertical velocity applied while standing on ground, keeping the character
/// pressed onto uneven terrain.
pub const STICK_TO_GROUND_VELOCITY: f32 = -2.0;

/// Vertical velocity below which a landing counts as a hard landing.
pub const HARD_LANDING_VELOCITY: f32 = -2.0;

/// Input magnitude below which movement input is ignored.
pub const INPUT_DEADZONE: f32 = 0.1;

/// Speed a character must exceed for footsteps to accumulate.
pub const FOOTSTEP_MIN_SPEED: f32 = 0.1;

/// Settings for the downward probes cast below the character.
#[derive(Reflect, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProbeSettings {
    /// Distance below the feet within which a surface counts as ground.
    pub ground_distance: f32,

    /// Maximum distance of the surface classification probe.
    pub surface_distance: f32,

    /// Layer bitmask the surface classification probe collides with.
    pub surface_layers: u32,

    /// Terrain texture layer order.
    pub layer_map: SurfaceLayerMap,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            ground_distance: 0.1,
            surface_distance: 2.0,
            surface_layers: u32::MAX,
            layer_map: SurfaceLayerMap::default(),
        }
    }
}

/// Movement tuning for a first-person character.
///
/// All distances are in meters, speeds in meters/second and times in
/// seconds. Look sensitivity is degrees per unit of pointer delta.
#[derive(Component, Reflect, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[reflect(Component)]
#[serde(default)]
pub struct MovementTuning {
    // === Locomotion ===
    /// Target speed while walking.
    pub walk_speed: f32,

    /// Target speed while sprinting forward.
    pub sprint_speed: f32,

    /// Smoothing time when speeding up (including from a stop).
    pub acceleration_time: f32,

    /// Smoothing time when slowing to a stop.
    pub deceleration_time: f32,

    /// Smoothing time when dropping from sprint to walk speed.
    pub sprint_transition_time: f32,

    // === Jumping ===
    /// Apex height of a jump.
    pub jump_height: f32,

    /// Minimum time between two jumps.
    pub jump_cooldown: f32,

    /// Gravity magnitude (positive, applied downward).
    pub gravity: f32,

    // === Footsteps ===
    /// Horizontal distance between two footsteps.
    pub step_length: f32,

    // === Look ===
    /// Degrees of rotation per unit of pointer delta.
    pub look_sensitivity: f32,

    /// Maximum pitch above or below the horizon, in degrees.
    pub vertical_look_limit: f32,

    // === Probes ===
    /// Ground and surface probe settings.
    pub probe: ProbeSettings,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 10.0,
            acceleration_time: 0.3,
            deceleration_time: 0.2,
            sprint_transition_time: 0.5,

            jump_height: 1.5,
            jump_cooldown: 0.1,
            gravity: 10.0,

            step_length: 2.0,

            look_sensitivity: 2.0,
            vertical_look_limit: 80.0,

            probe: ProbeSettings::default(),
        }
    }
}

impl MovementTuning {
    /// Heavier, slower-responding movement.
    pub fn sluggish() -> Self {
        Self {
            walk_speed: 3.5,
            sprint_speed: 6.0,
            acceleration_time: 0.6,
            deceleration_time: 0.45,
            sprint_transition_time: 0.8,
            jump_height: 1.0,
            jump_cooldown: 0.4,
            ..default()
        }
    }

    /// Quick, arcade-like movement.
    pub fn snappy() -> Self {
        Self {
            walk_speed: 6.0,
            sprint_speed: 11.0,
            acceleration_time: 0.12,
            deceleration_time: 0.08,
            sprint_transition_time: 0.2,
            jump_height: 1.8,
            gravity: 20.0,
            ..default()
        }
    }

    /// Parse tuning from JSON. Missing fields keep their defaults.
    ///
    /// The parsed tuning is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value can drive the controller.
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("walk_speed", self.walk_speed)?;
        positive("sprint_speed", self.sprint_speed)?;
        positive("acceleration_time", self.acceleration_time)?;
        positive("deceleration_time", self.deceleration_time)?;
        positive("sprint_transition_time", self.sprint_transition_time)?;
        positive("jump_height", self.jump_height)?;
        non_negative("jump_cooldown", self.jump_cooldown)?;
        positive("gravity", self.gravity)?;
        positive("step_length", self.step_length)?;
        positive("look_sensitivity", self.look_sensitivity)?;
        positive("probe.ground_distance", self.probe.ground_distance)?;
        positive("probe.surface_distance", self.probe.surface_distance)?;

        if self.sprint_speed < self.walk_speed {
            return Err(TuningError::SprintBelowWalk {
                walk: self.walk_speed,
                sprint: self.sprint_speed,
            });
        }
        if !(self.vertical_look_limit > 0.0 && self.vertical_look_limit <= 90.0) {
            return Err(TuningError::LookClamp(self.vertical_look_limit));
        }
        Ok(())
    }

    /// Launch velocity that reaches `jump_height` under `gravity`.
    #[inline]
    pub fn jump_velocity(&self) -> f32 {
        (2.0 * self.gravity * self.jump_height).sqrt()
    }

    /// Target speed for the given sprint state.
    #[inline]
    pub fn max_speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.sprint_speed
        } else {
            self.walk_speed
        }
    }

    /// Builder: set walk and sprint speeds.
    pub fn with_speeds(mut self, walk: f32, sprint: f32) -> Self {
        self.walk_speed = walk;
        self.sprint_speed = sprint;
        self
    }

    /// Builder: set the three smoothing times.
    pub fn with_smoothing(mut self, acceleration: f32, deceleration: f32, sprint_transition: f32) -> Self {
        self.acceleration_time = acceleration;
        self.deceleration_time = deceleration;
        self.sprint_transition_time = sprint_transition;
        self
    }

    /// Builder: set jump height.
    pub fn with_jump_height(mut self, height: f32) -> Self {
        self.jump_height = height;
        self
    }

    /// Builder: set jump cooldown.
    pub fn with_jump_cooldown(mut self, cooldown: f32) -> Self {
        self.jump_cooldown = cooldown;
        self
    }

    /// Builder: set gravity magnitude.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder: set footstep length.
    pub fn with_step_length(mut self, length: f32) -> Self {
        self.step_length = length;
        self
    }

    /// Builder: set look sensitivity and vertical clamp.
    pub fn with_look(mut self, sensitivity: f32, vertical_limit: f32) -> Self {
        self.look_sensitivity = sensitivity;
        self.vertical_look_limit = vertical_limit;
        self
    }

    /// Builder: set probe settings.
    pub fn with_probe(mut self, probe: ProbeSettings) -> Self {
        self.probe = probe;
        self
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::Negative { field, value })
    }
}
