//! First-person look orientation.
//!
//! Pointer deltas turn the body (yaw) and tilt the camera (pitch). The body
//! heading also defines the planar basis movement input is expressed in.

use bevy::prelude::*;

/// Yaw and pitch of a first-person character, in degrees.
///
/// Yaw grows when turning right and is kept in `[0, 360)`. Pitch grows when
/// looking up and is clamped to the configured vertical limit. At zero yaw
/// the character faces -Z.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct LookState {
    yaw: f32,
    pitch: f32,
}

impl LookState {
    /// Create a look state from yaw and pitch in degrees.
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw: yaw.rem_euclid(360.0),
            pitch,
        }
    }

    /// Apply a pointer delta (+x turns right, +y looks up).
    pub fn apply(&mut self, delta: Vec2, sensitivity: f32, vertical_limit: f32) {
        self.yaw = (self.yaw + delta.x * sensitivity).rem_euclid(360.0);
        self.pitch = (self.pitch + delta.y * sensitivity).clamp(-vertical_limit, vertical_limit);
    }

    /// Yaw in degrees.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Body rotation (yaw only, about +Y).
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw.to_radians())
    }

    /// Camera rotation relative to the body (pitch only, about local X).
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Planar forward direction.
    pub fn forward(&self) -> Vec3 {
        self.body_rotation() * Vec3::NEG_Z
    }

    /// Planar right direction.
    pub fn right(&self) -> Vec3 {
        self.body_rotation() * Vec3::X
    }
}
