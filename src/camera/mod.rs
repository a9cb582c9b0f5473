//! Camera navigation module
//!
//! Wraps the [`CameraController`] state machine in a resource and connects it
//! to the pan-orbit camera: navigation intents arrive as messages, are drained
//! once per frame, and the resulting pose is written into the orbit camera.

use bevy::prelude::*;
use bevy::window::WindowResized;
use bevy_panorbit_camera::PanOrbitCamera;

pub mod controller;

pub use controller::{CameraController, CameraPose, CameraState, NavigationError, NavigationTarget};

use crate::catalog::Catalog;
use crate::config::SceneConfig;
use crate::scene::Body;

/// Marker for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Camera controller resource
#[derive(Resource, Deref, DerefMut)]
pub struct CameraRig(pub CameraController);

/// Request to move the camera, from the console or the navigation bar
#[derive(Message, Clone, Debug)]
pub struct NavigationRequest(pub NavigationTarget);

/// Published when a navigation request could not be honoured
#[derive(Message, Clone, Debug)]
pub struct NavigationRejected(pub NavigationError);

/// Systems that move the camera; everything that reads the camera pose runs after them
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CameraSet;

/// Plugin for camera setup and navigation
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<NavigationRequest>()
            .add_message::<NavigationRejected>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                (sync_free_pose, handle_navigation_requests, drive_camera)
                    .chain()
                    .in_set(CameraSet)
                    .after(crate::animation::advance_orbits),
            )
            .add_systems(Update, log_window_resize);
    }
}

fn spawn_camera(mut commands: Commands, config: Res<SceneConfig>) {
    let controller = CameraController::new(&config);
    let home = controller.home();
    let (radius, yaw, pitch) = orbit_angles(home);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 60.0_f32.to_radians(),
            near: 0.1,
            far: 3000.0,
            ..default()
        }),
        PanOrbitCamera {
            focus: home.target,
            radius: Some(radius),
            yaw: Some(yaw),
            pitch: Some(pitch),
            force_update: true,
            ..default()
        },
        MainCamera,
        Transform::from_translation(home.position).looking_at(home.target, Vec3::Y),
        Name::new("Main Camera"),
    ));

    commands.insert_resource(CameraRig(controller));
}

/// Radius, yaw and pitch of a pose as the pan-orbit camera understands them
pub fn orbit_angles(pose: CameraPose) -> (f32, f32, f32) {
    let offset = pose.position - pose.target;
    let radius = offset.length().max(f32::EPSILON);
    let yaw = offset.x.atan2(offset.z);
    let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
    (radius, yaw, pitch)
}

fn apply_pose(pan_orbit: &mut PanOrbitCamera, pose: CameraPose) {
    let (radius, yaw, pitch) = orbit_angles(pose);
    // Current and target values move together so the camera's own damping does not lag
    pan_orbit.focus = pose.target;
    pan_orbit.target_focus = pose.target;
    pan_orbit.radius = Some(radius);
    pan_orbit.target_radius = radius;
    pan_orbit.yaw = Some(yaw);
    pan_orbit.target_yaw = yaw;
    pan_orbit.pitch = Some(pitch);
    pan_orbit.target_pitch = pitch;
    pan_orbit.force_update = true;
}

/// Keep the controller's pose in step with the user's free orbit
fn sync_free_pose(
    mut rig: ResMut<CameraRig>,
    camera: Query<(&Transform, &PanOrbitCamera), With<MainCamera>>,
) {
    if rig.state() != CameraState::Free {
        return;
    }
    let Ok((transform, pan_orbit)) = camera.single() else {
        return;
    };
    rig.sync_pose(CameraPose::new(transform.translation, pan_orbit.focus));
}

fn handle_navigation_requests(
    mut requests: MessageReader<NavigationRequest>,
    mut rejected: MessageWriter<NavigationRejected>,
    mut rig: ResMut<CameraRig>,
    catalog: Res<Catalog>,
    time: Res<Time<Real>>,
    bodies: Query<(&Body, &Transform)>,
) {
    let locate = |id: &str| {
        bodies
            .iter()
            .find(|(body, _)| body.id == id)
            .map(|(_, transform)| transform.translation)
    };

    for NavigationRequest(target) in requests.read() {
        match rig.navigate(target, time.elapsed(), &catalog, locate) {
            Ok(()) => info!("Navigating to `{}`", target.id()),
            Err(err) => {
                warn!("Navigation rejected: {err}");
                rejected.write(NavigationRejected(err));
            }
        }
    }
}

fn drive_camera(
    mut rig: ResMut<CameraRig>,
    time: Res<Time<Real>>,
    bodies: Query<(&Body, &Transform), Without<MainCamera>>,
    mut camera: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    let locate = |id: &str| {
        bodies
            .iter()
            .find(|(body, _)| body.id == id)
            .map(|(_, transform)| transform.translation)
    };

    let Some(pose) = rig.update(time.elapsed(), locate) else {
        return;
    };
    let Ok(mut pan_orbit) = camera.single_mut() else {
        warn!("drive_camera: main camera not found");
        return;
    };
    apply_pose(&mut pan_orbit, pose);
}

fn log_window_resize(mut resized: MessageReader<WindowResized>) {
    // Projection aspect follows the window automatically; only report it
    if let Some(event) = resized.read().last() {
        info!("Window resized to {}x{}", event.width, event.height);
    }
}
