//! Movement input components.
//!
//! Input represents what the player (or an AI) wants this tick. It is
//! device-agnostic: your code maps keys, sticks or network packets onto it,
//! and the controller turns it into movement.

use bevy::prelude::*;

/// Per-character input state, written by game code every frame.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use fps_character_controller::prelude::*;
///
/// let mut input = MovementInput::new();
/// input.set_move(Vec2::new(0.0, 1.0));
/// input.set_sprint_held(true);
/// input.set_jump_held(true);
///
/// let tick = input.snapshot();
/// assert!(tick.jump_pressed);
/// assert!(tick.sprint_held);
///
/// // Still holding jump: no new press.
/// assert!(!input.snapshot().jump_pressed);
/// ```
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct MovementInput {
    /// Strafe axis (-1.0 = left, 1.0 = right).
    pub move_x: f32,
    /// Forward axis (-1.0 = backward, 1.0 = forward).
    pub move_z: f32,
    /// Whether sprint is held.
    pub sprint_held: bool,
    /// Whether jump is held.
    pub jump_held: bool,
    /// Pointer delta accumulated since the last tick (+x right, +y up).
    pub look_delta: Vec2,
    /// Previous tick's `jump_held` (for edge detection).
    pub(crate) jump_held_prev: bool,
}

impl MovementInput {
    /// Create an idle input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both movement axes (x = strafe, y = forward), clamped to [-1, 1].
    pub fn set_move(&mut self, axes: Vec2) {
        self.move_x = axes.x.clamp(-1.0, 1.0);
        self.move_z = axes.y.clamp(-1.0, 1.0);
    }

    /// Set sprint held state.
    pub fn set_sprint_held(&mut self, held: bool) {
        self.sprint_held = held;
    }

    /// Set jump held state. A press is detected on the tick this turns true.
    pub fn set_jump_held(&mut self, held: bool) {
        self.jump_held = held;
    }

    /// Add a pointer delta. Deltas accumulate until the next snapshot.
    pub fn add_look(&mut self, delta: Vec2) {
        self.look_delta += delta;
    }

    /// Clear movement and look input (held buttons are left alone).
    pub fn clear(&mut self) {
        self.move_x = 0.0;
        self.move_z = 0.0;
        self.look_delta = Vec2::ZERO;
    }

    /// Movement axes (x = strafe, y = forward).
    pub fn axes(&self) -> Vec2 {
        Vec2::new(self.move_x, self.move_z)
    }

    /// Produce this tick's input, detecting the jump press edge and
    /// consuming the accumulated look delta.
    pub fn snapshot(&mut self) -> TickInput {
        let jump_pressed = self.jump_held && !self.jump_held_prev;
        self.jump_held_prev = self.jump_held;
        TickInput {
            axes: self.axes(),
            sprint_held: self.sprint_held,
            jump_pressed,
            look_delta: std::mem::take(&mut self.look_delta),
        }
    }
}

/// Input consumed by one controller tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Movement axes (x = strafe right, y = forward).
    pub axes: Vec2,
    /// Whether sprint is held.
    pub sprint_held: bool,
    /// Whether jump was pressed this tick (edge, not held).
    pub jump_pressed: bool,
    /// Pointer delta for this tick (+x right, +y up).
    pub look_delta: Vec2,
}

impl TickInput {
    /// Input with movement axes only.
    pub fn moving(axes: Vec2) -> Self {
        Self {
            axes,
            ..default()
        }
    }

    /// Builder: hold sprint.
    pub fn sprinting(mut self) -> Self {
        self.sprint_held = true;
        self
    }

    /// Builder: press jump this tick.
    pub fn jumping(mut self) -> Self {
        self.jump_pressed = true;
        self
    }

    /// Builder: set pointer delta.
    pub fn looking(mut self, delta: Vec2) -> Self {
        self.look_delta = delta;
        self
    }
}
