//! Controller systems.
//!
//! Thin ECS drivers over [`FpsController::tick`]. They are generic over the
//! physics backend, which lives in the world as a resource.

use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::MovementTuning;
use crate::controller::FpsController;
use crate::footsteps::FootstepEvent;
use crate::intent::MovementInput;
use crate::state::{Airborne, Grounded};

/// Marker for the camera entity of a first-person character.
///
/// Spawn it as a child of the character. Its rotation follows the
/// controller's pitch; the character body carries the yaw.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct FpsCamera;

/// Build controllers for entities spawned with a [`MovementTuning`].
///
/// The controller starts at the entity's translation. Entities whose tuning
/// is rejected lose the tuning component so they are not retried.
pub fn initialize_controllers(
    mut commands: Commands,
    q_pending: Query<(Entity, &MovementTuning, Option<&Transform>), Without<FpsController>>,
) {
    for (entity, tuning, transform) in &q_pending {
        let position = transform.map(|t| t.translation).unwrap_or_default();
        match FpsController::initialize(tuning.clone(), position) {
            Ok(controller) => {
                commands.entity(entity).insert(controller);
            }
            Err(err) => {
                error!(?entity, %err, "rejected movement tuning");
                commands.entity(entity).remove::<MovementTuning>();
            }
        }
    }
}

/// Run one tick for every controller and write the results back.
///
/// Uses the fixed timestep as the tick duration.
pub fn tick_controllers<B: CharacterPhysicsBackend + Resource>(
    backend: Option<ResMut<B>>,
    time: Res<Time<Fixed>>,
    mut q_controllers: Query<(Entity, &mut FpsController, &mut MovementInput, &mut Transform)>,
    mut footsteps: EventWriter<FootstepEvent>,
) {
    let Some(mut backend) = backend else {
        warn_once!("fps controller backend resource is missing; controllers are not ticking");
        return;
    };
    let dt = time.timestep().as_secs_f32();

    for (entity, mut controller, mut input, mut transform) in &mut q_controllers {
        let tick = input.snapshot();
        let report = controller.tick(backend.as_mut(), &tick, dt);

        transform.translation = controller.position();
        transform.rotation = controller.look().body_rotation();

        if let Some(event) = report.footstep {
            footsteps.write(event.with_character(entity));
        }
    }
}

/// Apply each controller's pitch to its camera children.
pub fn sync_camera_pitch(
    q_controllers: Query<&FpsController>,
    mut q_cameras: Query<(&ChildOf, &mut Transform), With<FpsCamera>>,
) {
    for (child_of, mut transform) in &mut q_cameras {
        if let Ok(controller) = q_controllers.get(child_of.parent()) {
            transform.rotation = controller.look().camera_rotation();
        }
    }
}

/// Mirror the grounded flag onto [`Grounded`] / [`Airborne`] markers.
pub fn sync_state_markers(
    mut commands: Commands,
    q_controllers: Query<(Entity, &FpsController, Has<Grounded>, Has<Airborne>)>,
) {
    for (entity, controller, has_grounded, has_airborne) in &q_controllers {
        let grounded = controller.is_grounded();
        if grounded && !has_grounded {
            commands.entity(entity).insert(Grounded).remove::<Airborne>();
        } else if !grounded && !has_airborne {
            commands.entity(entity).insert(Airborne).remove::<Grounded>();
        }
    }
}
