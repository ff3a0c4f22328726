//! Horizontal speed smoothing.
//!
//! Input picks a target speed (walk, sprint or stop). The current speed
//! follows it through a critically damped spring whose time constant depends
//! on whether the character is speeding up, dropping from sprint to walk, or
//! stopping.

use bevy::prelude::*;

use crate::config::{MovementTuning, INPUT_DEADZONE};

/// Which smoothing time constant applies this tick.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpeedRegime {
    /// Target above current speed.
    Accelerating,
    /// Target below current speed but still moving.
    SprintRelease,
    /// Target is zero (or equal to the current speed).
    #[default]
    Decelerating,
}

impl SpeedRegime {
    /// Select the regime for a target/current pair.
    pub fn select(target: f32, current: f32) -> Self {
        if target > current {
            Self::Accelerating
        } else if target < current && target > 0.0 {
            Self::SprintRelease
        } else {
            Self::Decelerating
        }
    }

    /// Smoothing time for this regime.
    pub fn smooth_time(self, tuning: &MovementTuning) -> f32 {
        match self {
            Self::Accelerating => tuning.acceleration_time,
            Self::SprintRelease => tuning.sprint_transition_time,
            Self::Decelerating => tuning.deceleration_time,
        }
    }
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` is the rate-of-change auxiliary carried between calls. The
/// result never overshoots `target`.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;

    // Pade approximation of exp(-omega * dt).
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// Inverse linear interpolation clamped to [0, 1].
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    }
}

/// Horizontal locomotion state carried between ticks.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct LocomotionSmoother {
    /// Current horizontal speed, within [0, sprint speed].
    current_speed: f32,
    /// Rate of change of `current_speed` (smoothing auxiliary).
    speed_velocity: f32,
    /// Last target speed.
    target_speed: f32,
    /// Heading, kept when input stops so the character coasts to a stop.
    move_direction: Vec3,
    /// Regime used on the last update.
    regime: SpeedRegime,
    /// Whether the last update was sprinting.
    sprinting: bool,
}

impl Default for LocomotionSmoother {
    fn default() -> Self {
        Self {
            current_speed: 0.0,
            speed_velocity: 0.0,
            target_speed: 0.0,
            move_direction: Vec3::NEG_Z,
            regime: SpeedRegime::default(),
            sprinting: false,
        }
    }
}

impl LocomotionSmoother {
    /// Create a smoother at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether sprint input applies: sprint held while pushing forward.
    #[inline]
    pub fn sprint_active(sprint_held: bool, forward_input: f32) -> bool {
        sprint_held && forward_input > 0.0
    }

    /// Advance one tick and return the horizontal velocity.
    ///
    /// # Arguments
    ///
    /// * `axes` - Movement input (x = strafe right, y = forward)
    /// * `sprint_held` - Whether sprint is held
    /// * `forward` / `right` - Planar basis of the character's heading
    /// * `tuning` - Speeds and smoothing times
    /// * `dt` - Tick duration in seconds
    pub fn update(
        &mut self,
        axes: Vec2,
        sprint_held: bool,
        forward: Vec3,
        right: Vec3,
        tuning: &MovementTuning,
        dt: f32,
    ) -> Vec3 {
        let input_direction = (forward * axes.y + right * axes.x).normalize_or_zero();
        let has_input = input_direction.length() > INPUT_DEADZONE;

        self.sprinting = Self::sprint_active(sprint_held, axes.y);
        self.target_speed = if has_input {
            tuning.max_speed(self.sprinting)
        } else {
            0.0
        };

        self.regime = SpeedRegime::select(self.target_speed, self.current_speed);
        let smooth_time = self.regime.smooth_time(tuning);
        trace!(
            target = self.target_speed,
            current = self.current_speed,
            regime = ?self.regime,
            "speed regime"
        );

        self.current_speed = smooth_damp(
            self.current_speed,
            self.target_speed,
            &mut self.speed_velocity,
            smooth_time,
            dt,
        )
        .clamp(0.0, tuning.sprint_speed);

        if has_input {
            self.move_direction = input_direction;
        }

        self.move_direction * self.current_speed
    }

    /// Current speed as a fraction of sprint speed.
    pub fn speed_fraction(&self, tuning: &MovementTuning) -> f32 {
        inverse_lerp(0.0, tuning.sprint_speed, self.current_speed)
    }

    /// Current horizontal speed.
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Last target speed.
    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    /// Current heading (unit vector on the ground plane).
    pub fn move_direction(&self) -> Vec3 {
        self.move_direction
    }

    /// Regime used on the last update.
    pub fn regime(&self) -> SpeedRegime {
        self.regime
    }

    /// Whether the last update was sprinting.
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }
}
