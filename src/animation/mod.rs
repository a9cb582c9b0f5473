//! Per-frame body motion
//!
//! Orbits, surface spin and ring spin advance by fixed per-frame increments,
//! so the animation speed follows the frame rate.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::camera::MainCamera;
use crate::config::SceneConfig;
use crate::scene::{Body, RingSystem, SunGlow, Surface};

/// Circular orbit in the XZ plane around the origin
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub distance: f32,
    pub angular_speed: f32,
    /// Current angle in radians, kept in `[0, TAU)`
    pub angle: f32,
}

impl Orbit {
    pub fn new(distance: f32, angular_speed: f32, angle: f32) -> Self {
        Self {
            distance,
            angular_speed,
            angle: angle.rem_euclid(TAU),
        }
    }

    /// Bodies at the centre never move
    pub fn is_stationary(&self) -> bool {
        self.distance <= 0.0
    }

    /// World position at the current angle, at height `y`
    pub fn position(&self, y: f32) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.distance,
            y,
            self.angle.sin() * self.distance,
        )
    }

    /// Step one frame and return the new position. `factor` scales the angular speed.
    pub fn advance(&mut self, factor: f32, y: f32) -> Vec3 {
        if !self.is_stationary() {
            // Wrapped so f32 keeps its resolution over long sessions
            self.angle = (self.angle + self.angular_speed * factor).rem_euclid(TAU);
        }
        self.position(y)
    }
}

/// Plugin for the animation loop
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (advance_orbits, spin_surfaces, spin_rings))
            .add_systems(
                Update,
                face_glow_to_camera.after(crate::camera::CameraSet),
            );
    }
}

/// Move every orbiting body along its circle
pub fn advance_orbits(config: Res<SceneConfig>, mut bodies: Query<(&mut Orbit, &mut Transform), With<Body>>) {
    for (mut orbit, mut transform) in bodies.iter_mut() {
        if orbit.is_stationary() {
            continue;
        }
        let y = transform.translation.y;
        transform.translation = orbit.advance(config.orbit_speed_factor, y);
    }
}

fn spin_surfaces(mut surfaces: Query<(&Surface, &mut Transform)>) {
    for (surface, mut transform) in surfaces.iter_mut() {
        transform.rotate_local_y(surface.spin);
    }
}

fn spin_rings(config: Res<SceneConfig>, mut rings: Query<&mut Transform, With<RingSystem>>) {
    for mut transform in rings.iter_mut() {
        transform.rotate_local_y(config.ring_spin_per_frame);
    }
}

/// Keep the glow quad square to the camera
fn face_glow_to_camera(
    camera: Query<&Transform, (With<MainCamera>, Without<SunGlow>)>,
    mut glows: Query<(&mut Transform, &GlobalTransform), With<SunGlow>>,
) {
    let Ok(camera) = camera.single() else {
        return;
    };
    for (mut transform, global) in glows.iter_mut() {
        let to_camera = camera.translation - global.translation();
        if to_camera.length_squared() <= f32::EPSILON {
            continue;
        }
        // The quad's front face is +Z; the pivot carries no rotation
        transform.look_to(-to_camera, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_after_n_ticks() {
        let mut orbit = Orbit::new(60.0, 0.004, 1.0);
        for _ in 0..1000 {
            orbit.advance(0.5, 0.0);
        }
        assert!((orbit.angle - (1.0 + 1000.0 * 0.004 * 0.5)).abs() < 1e-4);
        let position = orbit.position(0.0);
        assert!((position.length() - 60.0).abs() < 1e-3);
        assert!((position.x - orbit.angle.cos() * 60.0).abs() < 1e-3);
        assert!((position.z - orbit.angle.sin() * 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_central_body_stays_put() {
        let mut orbit = Orbit::new(0.0, 0.001, 2.0);
        for _ in 0..100 {
            assert_eq!(orbit.advance(0.5, 0.0), Vec3::ZERO);
        }
        assert_eq!(orbit.angle, 2.0);
    }

    #[test]
    fn test_angle_wraps_into_one_turn() {
        let orbit = Orbit::new(30.0, 0.008, -1.0);
        assert!((orbit.angle - (TAU - 1.0)).abs() < 1e-6);

        let mut orbit = Orbit::new(30.0, 0.008, TAU - 0.001);
        orbit.advance(0.5, 0.0);
        assert!((0.0..TAU).contains(&orbit.angle));
        assert!((orbit.angle - 0.003).abs() < 1e-5);
    }

    #[test]
    fn test_slow_orbit_keeps_moving_after_long_runs() {
        // Neptune's step, after about an hour at 60 fps
        let speed = 0.0006;
        let frames = 200_000u64;
        let mut orbit = Orbit::new(170.0, speed, 0.0);
        for _ in 0..frames {
            orbit.advance(0.5, 0.0);
        }
        let expected = (frames as f64 * speed as f64 * 0.5).rem_euclid(std::f64::consts::TAU);
        assert!((0.0..TAU).contains(&orbit.angle));
        // Accumulated rounding stays far below a visible offset
        assert!((orbit.angle as f64 - expected).abs() < 0.05, "angle {} vs {expected}", orbit.angle);

        let before = orbit.position(0.0);
        let after = orbit.advance(0.5, 0.0);
        let step = (after - before).length();
        assert!((step - 170.0 * speed * 0.5).abs() < 1e-3, "step {step}");
    }

    #[test]
    fn test_advance_keeps_height() {
        let mut orbit = Orbit::new(30.0, 0.008, 0.0);
        let position = orbit.advance(0.5, 3.0);
        assert_eq!(position.y, 3.0);
    }

    #[test]
    fn test_full_revolution_returns_home() {
        let speed = 0.01;
        let mut orbit = Orbit::new(45.0, speed, 0.0);
        let start = orbit.position(0.0);
        let ticks = (TAU / (speed * 0.5)).round() as usize;
        for _ in 0..ticks {
            orbit.advance(0.5, 0.0);
        }
        assert!((orbit.position(0.0) - start).length() < 0.1);
    }

    #[test]
    fn test_systems_move_bodies_and_spin_surfaces() {
        let mut app = App::new();
        app.insert_resource(SceneConfig::default())
            .add_systems(Update, (advance_orbits, spin_surfaces, spin_rings));

        let orbit = Orbit::new(60.0, 0.004, 0.0);
        let body = app
            .world_mut()
            .spawn((
                Body {
                    id: "earth",
                    name: "Earth",
                },
                orbit,
                Transform::from_translation(orbit.position(0.0)),
            ))
            .id();
        let surface = app.world_mut().spawn((Surface { spin: 0.003 }, Transform::default())).id();
        let sun = app.world_mut().spawn((Surface { spin: 0.0005 }, Transform::default())).id();
        let ring = app.world_mut().spawn((RingSystem, Transform::default())).id();

        for _ in 0..10 {
            app.update();
        }

        let world = app.world();
        let angle = world.get::<Orbit>(body).map(|o| o.angle).unwrap_or_default();
        assert!((angle - 10.0 * 0.004 * 0.5).abs() < 1e-6);
        let translation = world.get::<Transform>(body).map(|t| t.translation).unwrap_or_default();
        assert!((translation - Orbit::new(60.0, 0.004, angle).position(0.0)).length() < 1e-4);

        let spin = |entity| {
            world
                .get::<Transform>(entity)
                .map(|t| t.rotation.to_euler(EulerRot::YXZ).0)
                .unwrap_or_default()
        };
        assert!((spin(surface) - 10.0 * 0.003).abs() < 1e-5);
        assert!((spin(sun) - 10.0 * 0.0005).abs() < 1e-5);
        assert!((spin(ring) - 10.0 * 0.002).abs() < 1e-5);
    }
}
