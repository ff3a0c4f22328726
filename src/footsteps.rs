//! Footstep cadence.
//!
//! Horizontal distance walked on the ground is accumulated every tick. Each
//! time it reaches the step length a footstep is due; the step length is
//! subtracted rather than the total reset, so leftover distance carries into
//! the next stride and the cadence stays even.

use bevy::prelude::*;

use crate::config::FOOTSTEP_MIN_SPEED;
use crate::surface::SurfaceKind;

/// A footstep landed on a classifiable surface.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FootstepEvent {
    /// Material stepped on. Never [`SurfaceKind::None`].
    pub surface: SurfaceKind,
    /// Current speed as a fraction of sprint speed, in [0, 1].
    pub speed_fraction: f32,
    /// Character that stepped, when emitted by the plugin.
    pub character: Option<Entity>,
}

impl FootstepEvent {
    /// Create a footstep event not tied to an entity.
    pub fn new(surface: SurfaceKind, speed_fraction: f32) -> Self {
        Self {
            surface,
            speed_fraction,
            character: None,
        }
    }

    /// Builder: attach the emitting character.
    pub fn with_character(mut self, character: Entity) -> Self {
        self.character = Some(character);
        self
    }
}

/// Distance walked since the last footstep.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct FootstepAccumulator {
    /// Distance since the last step. Never negative.
    distance: f32,
    /// Position at the end of the previous tick.
    last_position: Vec3,
}

impl FootstepAccumulator {
    /// Start accumulating from `position`.
    pub fn new(position: Vec3) -> Self {
        Self {
            distance: 0.0,
            last_position: position,
        }
    }

    /// Record the end-of-tick position, adding the ground-plane distance
    /// moved when `active`.
    pub fn accumulate(&mut self, position: Vec3, active: bool) {
        if active {
            let delta = position - self.last_position;
            self.distance += Vec3::new(delta.x, 0.0, delta.z).length();
        }
        self.last_position = position;
    }

    /// Consume one step if enough distance has built up.
    pub fn take_step(&mut self, step_length: f32) -> bool {
        if self.distance >= step_length {
            self.distance -= step_length;
            true
        } else {
            false
        }
    }

    /// Distance since the last step.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Position at the end of the previous tick.
    pub fn last_position(&self) -> Vec3 {
        self.last_position
    }
}

/// Footstep cadence rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct FootstepCadence;

impl FootstepCadence {
    /// Whether footsteps accumulate this tick.
    #[inline]
    pub fn is_active(grounded: bool, current_speed: f32) -> bool {
        grounded && current_speed > FOOTSTEP_MIN_SPEED
    }

    /// Advance the accumulator and report whether a footstep is due.
    ///
    /// At most one step is consumed per tick.
    pub fn advance(
        accumulator: &mut FootstepAccumulator,
        position: Vec3,
        grounded: bool,
        current_speed: f32,
        step_length: f32,
    ) -> bool {
        let active = Self::is_active(grounded, current_speed);
        accumulator.accumulate(position, active);
        active && accumulator.take_step(step_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn leftover_distance_carries_over() {
        let mut acc = FootstepAccumulator::new(Vec3::ZERO);
        let due = FootstepCadence::advance(&mut acc, Vec3::new(2.5, 0.0, 0.0), true, 5.0, 2.0);
        assert!(due);
        assert_relative_eq!(acc.distance(), 0.5);
    }

    #[test]
    fn only_horizontal_distance_counts() {
        let mut acc = FootstepAccumulator::new(Vec3::ZERO);
        FootstepCadence::advance(&mut acc, Vec3::new(0.0, 3.0, 1.0), true, 5.0, 2.0);
        assert_relative_eq!(acc.distance(), 1.0);
        assert_eq!(acc.last_position(), Vec3::new(0.0, 3.0, 1.0));
    }

    #[test]
    fn inactive_when_airborne_or_slow() {
        let mut acc = FootstepAccumulator::new(Vec3::ZERO);
        assert!(!FootstepCadence::advance(&mut acc, Vec3::new(3.0, 0.0, 0.0), false, 5.0, 2.0));
        assert_eq!(acc.distance(), 0.0);

        assert!(!FootstepCadence::advance(&mut acc, Vec3::new(6.0, 0.0, 0.0), true, 0.05, 2.0));
        assert_eq!(acc.distance(), 0.0);

        // Position still tracked, so inactive travel is never counted later.
        assert_eq!(acc.last_position(), Vec3::new(6.0, 0.0, 0.0));
    }

    #[test]
    fn one_step_per_tick() {
        let mut acc = FootstepAccumulator::new(Vec3::ZERO);
        assert!(FootstepCadence::advance(&mut acc, Vec3::new(5.0, 0.0, 0.0), true, 5.0, 2.0));
        assert_relative_eq!(acc.distance(), 3.0);
        assert!(FootstepCadence::advance(&mut acc, Vec3::new(5.0, 0.0, 0.0), true, 5.0, 2.0));
        assert_relative_eq!(acc.distance(), 1.0);
        assert!(!FootstepCadence::advance(&mut acc, Vec3::new(5.0, 0.0, 0.0), true, 5.0, 2.0));
    }

    #[test]
    fn steady_walk_is_metronomic() {
        // 5 m/s at 60 Hz with 2 m steps: one step every 24 ticks.
        let mut acc = FootstepAccumulator::new(Vec3::ZERO);
        let per_tick = 5.0 / 60.0;
        let mut steps = Vec::new();
        for tick in 1..=250 {
            let position = Vec3::new(per_tick * tick as f32, 0.0, 0.0);
            if FootstepCadence::advance(&mut acc, position, true, 5.0, 2.0) {
                steps.push(tick);
            }
        }
        assert_eq!(steps.len(), 10);
        for pair in steps.windows(2) {
            let gap = pair[1] - pair[0];
            assert!((23..=25).contains(&gap), "gap {gap}");
        }
    }

    #[test]
    fn event_builder() {
        let entity = Entity::from_raw(3);
        let event = FootstepEvent::new(SurfaceKind::Wood, 0.5).with_character(entity);
        assert_eq!(event.surface, SurfaceKind::Wood);
        assert_eq!(event.speed_fraction, 0.5);
        assert_eq!(event.character, Some(entity));
    }
}
