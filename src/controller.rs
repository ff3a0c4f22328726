//! The first-person controller.
//!
//! [`FpsController`] owns all per-character state and advances it one tick
//! at a time. Each tick runs a fixed sequence, since every stage reads the
//! previous stage's output:
//!
//! 1. Ground probe (grounded flag, landing detection)
//! 2. Jump trigger
//! 3. Vertical velocity integration
//! 4. Look and horizontal speed smoothing
//! 5. Character displacement through the backend
//! 6. Footstep cadence (surface classification only when a step is due)
//!
//! The controller is engine-agnostic: anything implementing
//! [`CharacterPhysicsBackend`] can drive it, and
//! [`FpsControllerPlugin`](crate::FpsControllerPlugin) runs it from Bevy's
//! `FixedUpdate`.

use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::{MovementTuning, HARD_LANDING_VELOCITY};
use crate::error::TuningError;
use crate::footsteps::{FootstepAccumulator, FootstepCadence, FootstepEvent};
use crate::ground::GroundSampler;
use crate::intent::{MovementInput, TickInput};
use crate::jump::JumpState;
use crate::locomotion::LocomotionSmoother;
use crate::look::LookState;
use crate::state::CharacterState;
use crate::surface::SurfaceKind;
use crate::vertical::VerticalMotion;

/// Impact of a hard landing.
///
/// Reported when the character touches down while falling faster than
/// [`HARD_LANDING_VELOCITY`]. Not turned into an event; consumers that want
/// landing sounds read it from the [`TickReport`].
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct LandingImpact {
    /// Downward speed at touchdown (positive).
    pub speed: f32,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Footstep emitted this tick, if any.
    pub footstep: Option<FootstepEvent>,
    /// Launch velocity if a jump fired this tick.
    pub launch_velocity: Option<f32>,
    /// Hard landing detected this tick.
    pub landing: Option<LandingImpact>,
    /// Displacement actually applied after backend resolution.
    pub displacement: Vec3,
}

impl TickReport {
    /// Whether a jump fired this tick.
    pub fn jumped(&self) -> bool {
        self.launch_velocity.is_some()
    }
}

/// First-person kinematic character controller.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use fps_character_controller::prelude::*;
///
/// let mut scene = StaticScene::new();
/// scene.add_patch(GroundPatch::new(Vec2::splat(-100.0), Vec2::splat(100.0), 0.0));
///
/// let mut controller = FpsController::initialize(MovementTuning::default(), Vec3::ZERO).unwrap();
/// for _ in 0..60 {
///     controller.tick(&mut scene, &TickInput::moving(Vec2::Y), 1.0 / 60.0);
/// }
/// assert!(controller.is_grounded());
/// assert!(controller.position().z < 0.0);
/// ```
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
#[require(MovementInput, Transform)]
pub struct FpsController {
    tuning: MovementTuning,
    state: CharacterState,
    jump: JumpState,
    locomotion: LocomotionSmoother,
    footsteps: FootstepAccumulator,
    look: LookState,
    last_landing: Option<LandingImpact>,
}

impl FpsController {
    /// Create a controller standing at `position` (feet).
    ///
    /// Fails if the tuning cannot drive a controller.
    pub fn initialize(tuning: MovementTuning, position: Vec3) -> Result<Self, TuningError> {
        tuning.validate()?;
        info!(
            walk_speed = tuning.walk_speed,
            sprint_speed = tuning.sprint_speed,
            jump_height = tuning.jump_height,
            "fps controller initialized"
        );
        Ok(Self {
            tuning,
            state: CharacterState::at(position),
            jump: JumpState::new(),
            locomotion: LocomotionSmoother::new(),
            footsteps: FootstepAccumulator::new(position),
            look: LookState::default(),
            last_landing: None,
        })
    }

    /// Builder: start with a look orientation.
    pub fn with_look(mut self, look: LookState) -> Self {
        self.look = look;
        self
    }

    /// Advance the controller by `dt` seconds.
    pub fn tick<B: CharacterPhysicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        input: &TickInput,
        dt: f32,
    ) -> TickReport {
        let dt = dt.max(0.0);
        let probe = &self.tuning.probe;

        // 1. Ground
        self.state.was_grounded = self.state.grounded;
        // Rising characters are airborne even while the probe still reaches the floor.
        self.state.grounded = self.state.vertical_velocity <= 0.0
            && GroundSampler::sample(backend, probe, self.state.position);
        let grounded = self.state.grounded;

        let landing = (self.state.just_landed() && self.state.vertical_velocity < HARD_LANDING_VELOCITY)
            .then(|| LandingImpact {
                speed: self.state.vertical_velocity.abs(),
            });
        if let Some(impact) = landing {
            debug!(speed = impact.speed, "hard landing");
            self.last_landing = Some(impact);
        }

        // 2. Jump
        let launch_velocity = self.jump.try_launch(
            input.jump_pressed,
            grounded,
            self.tuning.jump_velocity(),
            self.tuning.jump_cooldown,
        );
        if let Some(velocity) = launch_velocity {
            self.state.vertical_velocity = velocity;
        }

        // 3. Vertical
        self.state.vertical_velocity = VerticalMotion::integrate(
            self.state.vertical_velocity,
            grounded,
            self.jump.launched_this_tick(),
            self.tuning.gravity,
            dt,
        );

        // 4. Look and horizontal speed
        self.look.apply(
            input.look_delta,
            self.tuning.look_sensitivity,
            self.tuning.vertical_look_limit,
        );
        let horizontal = self.locomotion.update(
            input.axes,
            input.sprint_held,
            self.look.forward(),
            self.look.right(),
            &self.tuning,
            dt,
        );

        // 5. Displacement
        let start = self.state.position;
        let velocity = horizontal + Vec3::Y * self.state.vertical_velocity;
        self.state.position = backend.move_character(start, velocity * dt);

        // 6. Footsteps
        let footstep = FootstepCadence::advance(
            &mut self.footsteps,
            self.state.position,
            grounded,
            self.locomotion.current_speed(),
            self.tuning.step_length,
        )
        .then(|| self.classify_footstep(backend))
        .flatten();

        self.jump.tick_cooldown(dt);

        TickReport {
            footstep,
            launch_velocity,
            landing,
            displacement: self.state.position - start,
        }
    }

    fn classify_footstep<B: CharacterPhysicsBackend + ?Sized>(&self, backend: &B) -> Option<FootstepEvent> {
        let sample = GroundSampler::classify_surface(backend, &self.tuning.probe, self.state.position);
        let speed_fraction = self.speed_fraction();
        if sample.kind == SurfaceKind::None {
            debug!(point = ?sample.point, "footstep suppressed: unclassified surface");
            return None;
        }
        debug!(surface = ?sample.kind, speed_fraction, "footstep");
        Some(FootstepEvent::new(sample.kind, speed_fraction))
    }

    /// Move the character without simulating the path (respawns, portals).
    ///
    /// Clears vertical velocity and footstep distance tracking.
    pub fn teleport(&mut self, position: Vec3) {
        self.state.position = position;
        self.state.vertical_velocity = 0.0;
        self.footsteps = FootstepAccumulator::new(position);
    }

    /// Override the vertical velocity (knockback, launch pads).
    pub fn set_vertical_velocity(&mut self, velocity: f32) {
        self.state.vertical_velocity = velocity;
    }

    /// Movement tuning.
    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// Kinematic state.
    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    /// Feet position.
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    /// Whether the ground probe found ground on the last tick.
    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    /// Vertical velocity.
    pub fn vertical_velocity(&self) -> f32 {
        self.state.vertical_velocity
    }

    /// Horizontal speed.
    pub fn current_speed(&self) -> f32 {
        self.locomotion.current_speed()
    }

    /// Horizontal speed as a fraction of sprint speed, for blending.
    pub fn speed_fraction(&self) -> f32 {
        self.locomotion.speed_fraction(&self.tuning)
    }

    /// Horizontal locomotion state.
    pub fn locomotion(&self) -> &LocomotionSmoother {
        &self.locomotion
    }

    /// Jump cooldown state.
    pub fn jump(&self) -> &JumpState {
        &self.jump
    }

    /// Footstep distance tracking.
    pub fn footsteps(&self) -> &FootstepAccumulator {
        &self.footsteps
    }

    /// Look orientation.
    pub fn look(&self) -> &LookState {
        &self.look
    }

    /// Most recent hard landing.
    pub fn last_landing(&self) -> Option<LandingImpact> {
        self.last_landing
    }
}
