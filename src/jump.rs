//! Jump trigger.
//!
//! A jump launches on the tick a jump press is observed while the character
//! is grounded and the cooldown has elapsed. Presses while airborne or
//! cooling down are dropped, not queued.

use bevy::prelude::*;

/// Cooldown state of the jump trigger.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpState {
    /// Time left before another jump may launch. Never negative.
    cooldown_remaining: f32,

    /// Whether a jump launched during the current tick.
    launched_this_tick: bool,
}

/// Phase of the jump trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    /// A jump may launch.
    Ready,
    /// Waiting for the cooldown to elapse.
    Cooling,
}

impl JumpState {
    /// Create a ready jump state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to launch a jump.
    ///
    /// Returns the launch vertical velocity when the jump fires. Resets the
    /// launched flag every call, so it must run once per tick.
    ///
    /// # Arguments
    ///
    /// * `jump_pressed` - Jump press edge for this tick
    /// * `grounded` - Whether the ground probe found ground this tick
    /// * `launch_velocity` - Vertical velocity to hand over on launch
    /// * `cooldown` - Cooldown to start on launch (seconds)
    pub fn try_launch(
        &mut self,
        jump_pressed: bool,
        grounded: bool,
        launch_velocity: f32,
        cooldown: f32,
    ) -> Option<f32> {
        self.launched_this_tick = false;

        if !jump_pressed || !grounded || self.phase() == JumpPhase::Cooling {
            return None;
        }

        self.launched_this_tick = true;
        self.cooldown_remaining = cooldown.max(0.0);
        debug!(launch_velocity, cooldown, "jump launched");
        Some(launch_velocity)
    }

    /// Advance the cooldown timer by `dt` seconds.
    pub fn tick_cooldown(&mut self, dt: f32) {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
    }

    /// Current phase.
    pub fn phase(&self) -> JumpPhase {
        if self.cooldown_remaining > 0.0 {
            JumpPhase::Cooling
        } else {
            JumpPhase::Ready
        }
    }

    /// Whether a jump launched this tick.
    pub fn launched_this_tick(&self) -> bool {
        self.launched_this_tick
    }

    /// Remaining cooldown in seconds.
    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: f32 = 0.1;
    const VELOCITY: f32 = 5.0;
    const DT: f32 = 1.0 / 60.0;

    // Helper: one tick of trigger then cooldown, like the controller does.
    fn step(state: &mut JumpState, pressed: bool, grounded: bool) -> Option<f32> {
        let launched = state.try_launch(pressed, grounded, VELOCITY, COOLDOWN);
        state.tick_cooldown(DT);
        launched
    }

    #[test]
    fn test_basic_jump() {
        let mut state = JumpState::new();
        assert_eq!(state.phase(), JumpPhase::Ready);

        assert_eq!(state.try_launch(true, true, VELOCITY, COOLDOWN), Some(VELOCITY));
        assert!(state.launched_this_tick());
        assert_eq!(state.phase(), JumpPhase::Cooling);
        assert_eq!(state.cooldown_remaining(), COOLDOWN);
    }

    #[test]
    fn test_cannot_jump_while_airborne() {
        let mut state = JumpState::new();
        assert_eq!(step(&mut state, true, false), None);
        assert!(!state.launched_this_tick());
        assert_eq!(state.phase(), JumpPhase::Ready);
    }

    #[test]
    fn test_cooldown_prevents_jump() {
        let mut state = JumpState::new();
        assert!(step(&mut state, true, true).is_some());
        assert!(step(&mut state, true, true).is_none());
    }

    #[test]
    fn test_jump_after_cooldown() {
        let mut state = JumpState::new();
        assert!(step(&mut state, true, true).is_some());

        let frames = (COOLDOWN / DT).ceil() as usize;
        for _ in 0..frames {
            assert!(step(&mut state, false, true).is_none());
        }
        assert_eq!(state.cooldown_remaining(), 0.0);
        assert!(step(&mut state, true, true).is_some());
    }

    #[test]
    fn test_airborne_presses_are_not_queued() {
        let mut state = JumpState::new();
        assert!(step(&mut state, true, true).is_some());

        // Mash jump all the way through the cooldown while airborne.
        for _ in 0..30 {
            assert!(step(&mut state, true, false).is_none());
        }

        // Landing without a fresh press does nothing.
        assert!(step(&mut state, false, true).is_none());
    }

    #[test]
    fn test_launched_flag_resets_every_tick() {
        let mut state = JumpState::new();
        step(&mut state, true, true);
        assert!(state.launched_this_tick());
        step(&mut state, false, true);
        assert!(!state.launched_this_tick());
    }

    #[test]
    fn test_zero_cooldown() {
        let mut state = JumpState::new();
        assert!(state.try_launch(true, true, VELOCITY, 0.0).is_some());
        assert_eq!(state.phase(), JumpPhase::Ready);
        assert!(state.try_launch(true, true, VELOCITY, 0.0).is_some());
    }

    #[test]
    fn test_cooldown_never_negative() {
        let mut state = JumpState::new();
        state.try_launch(true, true, VELOCITY, COOLDOWN);
        state.tick_cooldown(10.0);
        assert_eq!(state.cooldown_remaining(), 0.0);
    }
}
