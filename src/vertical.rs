//! Vertical velocity integration.

use crate::config::STICK_TO_GROUND_VELOCITY;

/// Gravity integration for the character's vertical velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalMotion;

impl VerticalMotion {
    /// Advance the vertical velocity by one tick.
    ///
    /// Standing on ground while moving down pins the velocity to
    /// [`STICK_TO_GROUND_VELOCITY`] instead of accumulating gravity. Any other
    /// case (airborne, rising, or on the launch tick) integrates gravity with
    /// explicit Euler.
    pub fn integrate(
        vertical_velocity: f32,
        grounded: bool,
        launched_this_tick: bool,
        gravity: f32,
        dt: f32,
    ) -> f32 {
        if grounded && vertical_velocity < 0.0 && !launched_this_tick {
            STICK_TO_GROUND_VELOCITY
        } else {
            vertical_velocity - gravity * dt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn grounded_and_falling_sticks() {
        assert_eq!(VerticalMotion::integrate(-3.0, true, false, 10.0, 0.1), -2.0);
        assert_eq!(VerticalMotion::integrate(-0.5, true, false, 10.0, 0.1), -2.0);
    }

    #[test]
    fn airborne_integrates_gravity() {
        assert_relative_eq!(VerticalMotion::integrate(-3.0, false, false, 10.0, 0.1), -4.0);
        assert_relative_eq!(VerticalMotion::integrate(5.0, false, false, 10.0, 0.1), 4.0);
    }

    #[test]
    fn launch_tick_integrates_gravity() {
        let launch = 30.0_f32.sqrt();
        assert_relative_eq!(
            VerticalMotion::integrate(launch, true, true, 10.0, 0.1),
            launch - 1.0
        );
    }

    #[test]
    fn grounded_at_rest_starts_falling() {
        // Zero is not "moving down", so gravity applies and the next tick sticks.
        let v = VerticalMotion::integrate(0.0, true, false, 10.0, 0.1);
        assert_relative_eq!(v, -1.0);
        assert_eq!(VerticalMotion::integrate(v, true, false, 10.0, 0.1), -2.0);
    }

    #[test]
    fn airborne_velocity_decreases_monotonically() {
        let mut v = 5.0;
        for _ in 0..100 {
            let next = VerticalMotion::integrate(v, false, false, 10.0, 1.0 / 60.0);
            assert!(next < v);
            v = next;
        }
    }
}
