//! Character state.
//!
//! [`CharacterState`] is the kinematic state the controller owns and mutates
//! once per tick. The [`Grounded`] and [`Airborne`] marker components mirror
//! the grounded flag onto entities so other systems can filter on it.

use bevy::prelude::*;

/// Kinematic state of a first-person character.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct CharacterState {
    /// Feet position in world space.
    pub position: Vec3,
    /// Vertical velocity (positive = up).
    pub vertical_velocity: f32,
    /// Whether the ground probe found ground this tick.
    pub grounded: bool,
    /// Grounded flag from the previous tick.
    pub was_grounded: bool,
}

impl CharacterState {
    /// Create a state at rest at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            grounded: false,
            was_grounded: false,
        }
    }

    /// Whether this tick is the first grounded tick after being airborne.
    #[inline]
    pub fn just_landed(&self) -> bool {
        self.grounded && !self.was_grounded
    }
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Marker component indicating the character is grounded.
///
/// Added automatically when the ground probe finds ground. Removed when the
/// character becomes airborne.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use fps_character_controller::prelude::*;
///
/// // Grounded is a marker component - just use it in queries
/// fn check_grounded(grounded: Option<&Grounded>) -> bool {
///     grounded.is_some()
/// }
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating the character is airborne.
///
/// Mutually exclusive with [`Grounded`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;
