//! # `fps_character_controller`
//!
//! A kinematic first-person character controller with a physics backend
//! abstraction.
//!
//! This crate provides a tuneable first-person controller that:
//! - Detects ground with a short downward probe
//! - Launches jumps to an exact apex height, with a cooldown
//! - Integrates gravity and sticks to the ground while grounded
//! - Critically damps horizontal speed toward walk, sprint or rest targets
//! - Emits footstep events at a distance-based cadence, classified by the
//!   surface underfoot (tagged colliders or terrain splat maps)
//!
//! ## Architecture
//!
//! Each tick runs five stages in order:
//! 1. Ground sampling
//! 2. Jump triggering
//! 3. Vertical motion
//! 4. Horizontal speed smoothing
//! 5. Footstep cadence
//!
//! The whole tick lives in [`FpsController::tick`](controller::FpsController::tick),
//! which only needs a [`CharacterPhysicsBackend`](backend::CharacterPhysicsBackend).
//! [`FpsControllerPlugin`] drives it from `FixedUpdate`.
//!
//! ## Usage
//!
//! ```rust
//! use bevy::prelude::*;
//! use fps_character_controller::prelude::*;
//!
//! let mut scene = StaticScene::new();
//! scene.add_patch(GroundPatch::new(Vec2::splat(-50.0), Vec2::splat(50.0), 0.0));
//!
//! let mut controller = FpsController::initialize(MovementTuning::default(), Vec3::ZERO).unwrap();
//! let report = controller.tick(&mut scene, &TickInput::moving(Vec2::Y), 1.0 / 60.0);
//! assert!(report.footstep.is_none());
//! ```

use bevy::prelude::*;

pub mod backend;
pub mod collision;
pub mod config;
pub mod controller;
pub mod error;
pub mod footsteps;
pub mod ground;
pub mod intent;
pub mod jump;
pub mod locomotion;
pub mod look;
pub mod scene;
pub mod state;
pub mod surface;
pub mod systems;
pub mod vertical;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::{CharacterPhysicsBackend, RaycastRequest};
    pub use crate::collision::CollisionData;
    pub use crate::config::{MovementTuning, ProbeSettings};
    pub use crate::controller::{FpsController, LandingImpact, TickReport};
    pub use crate::error::{SplatMapError, TuningError};
    pub use crate::footsteps::FootstepEvent;
    pub use crate::intent::{MovementInput, TickInput};
    pub use crate::look::LookState;
    pub use crate::scene::{GroundPatch, StaticScene};
    pub use crate::state::{Airborne, Grounded};
    pub use crate::surface::{ColliderTag, SplatMap, SurfaceKind, SurfaceLayerMap};
    pub use crate::systems::FpsCamera;
    pub use crate::FpsControllerPlugin;
}

/// Main plugin for the first-person controller.
///
/// Generic over a physics backend `B`, which must be inserted into the world
/// as a resource.
///
/// # Examples
///
/// With the built-in static scene backend:
/// ```rust,no_run
/// use bevy::prelude::*;
/// use fps_character_controller::prelude::*;
///
/// let scene = StaticScene::new()
///     .with_patch(GroundPatch::new(Vec2::splat(-50.0), Vec2::splat(50.0), 0.0));
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .insert_resource(scene)
///     .add_plugins(FpsControllerPlugin::<StaticScene>::default())
///     .run();
/// ```
pub struct FpsControllerPlugin<B: backend::CharacterPhysicsBackend + Resource> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::CharacterPhysicsBackend + Resource> Default for FpsControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::CharacterPhysicsBackend + Resource> Plugin for FpsControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<config::MovementTuning>();
        app.register_type::<controller::FpsController>();
        app.register_type::<intent::MovementInput>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();
        app.register_type::<surface::ColliderTag>();
        app.register_type::<systems::FpsCamera>();

        app.add_event::<footsteps::FootstepEvent>();

        app.add_systems(
            FixedUpdate,
            (
                systems::initialize_controllers,
                systems::tick_controllers::<B>,
                systems::sync_camera_pitch,
                systems::sync_state_markers,
            )
                .chain(),
        );
    }
}
