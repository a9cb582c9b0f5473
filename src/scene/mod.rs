//! Scene assembly
//!
//! Builds the solar system from the catalog at startup. Every body is a
//! translation-only pivot entity carrying [`Body`] and [`Orbit`]; its textured
//! surface, and the ring or glow where present, hang from the pivot as children.

use std::f32::consts::{FRAC_PI_3, TAU};

use bevy::light::{GlobalAmbientLight, NotShadowCaster};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod factory;

use crate::animation::Orbit;
use crate::catalog::{Catalog, PlanetDescriptor};
use crate::config::SceneConfig;
use crate::texture;

/// Catalog id of the body that carries the ring system
pub const RING_BODY_ID: &str = "saturn";
const RING_TILT_RAD: f32 = FRAC_PI_3;

/// Runtime identity of a catalog body, on its pivot entity
#[derive(Component, Clone, Debug)]
pub struct Body {
    pub id: &'static str,
    pub name: &'static str,
}

/// Textured sphere of a body; spins about its own axis
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    /// Rotation per frame in radians
    pub spin: f32,
}

/// Particle ring attached to a body
#[derive(Component)]
pub struct RingSystem;

/// Glow quad around the central body, kept facing the camera
#[derive(Component)]
pub struct SunGlow;

#[derive(Component)]
pub struct Starfield;

#[derive(Component)]
pub struct OrbitGuide;

/// Plugin for scene assembly
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, assemble_scene);
    }
}

/// The central body turns with its own speed, every planet at the shared rate
fn surface_spin(planet: &PlanetDescriptor, config: &SceneConfig) -> f32 {
    if planet.is_central() {
        planet.angular_speed * config.orbit_speed_factor
    } else {
        config.spin_per_frame
    }
}

fn scene_rng(config: &SceneConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Instantiate every catalog body, the orbit guides, the ring, the glow and the starfield
pub fn assemble_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    catalog: Res<Catalog>,
    config: Res<SceneConfig>,
) {
    let mut rng = scene_rng(&config);

    commands.insert_resource(ClearColor(Color::srgb_u8(0x00, 0x00, 0x22)));
    commands.insert_resource(GlobalAmbientLight {
        color: Color::srgb_u8(0x33, 0x33, 0x33),
        brightness: config.ambient_brightness,
        ..default()
    });

    commands.spawn((
        PointLight {
            intensity: config.sun_light_intensity,
            range: 1500.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
        Name::new("Sun Light"),
    ));

    commands.spawn((
        Mesh3d(meshes.add(factory::starfield(config.star_count, &mut rng))),
        MeshMaterial3d(materials.add(factory::point_material())),
        Transform::default(),
        NotShadowCaster,
        Starfield,
        Name::new("Starfield"),
    ));

    for planet in catalog.iter() {
        let raster = texture::generate(planet.color, planet.size, planet.pattern, &mut rng);
        let surface_texture = images.add(raster.into_image());
        let orbit = Orbit::new(planet.distance, planet.angular_speed, rng.random_range(0.0..TAU));

        let mut surface = commands.spawn((
            Mesh3d(meshes.add(factory::planet_mesh(planet))),
            MeshMaterial3d(materials.add(factory::planet_material(planet, surface_texture))),
            Transform::default(),
            Surface {
                spin: surface_spin(planet, &config),
            },
            Name::new(format!("{} Surface", planet.name)),
        ));
        if planet.emissive {
            // The light sits inside this sphere
            surface.insert(NotShadowCaster);
        }
        let surface = surface.id();

        let pivot = commands
            .spawn((
                Body {
                    id: planet.id,
                    name: planet.name,
                },
                Transform::from_translation(orbit.position(0.0)),
                Visibility::default(),
                orbit,
                Name::new(planet.name),
            ))
            .add_child(surface)
            .id();

        if !planet.is_central() {
            commands.spawn((
                Mesh3d(meshes.add(factory::orbit_guide(planet.distance, factory::ORBIT_SEGMENTS))),
                MeshMaterial3d(materials.add(factory::orbit_material(planet.color))),
                Transform::default(),
                NotShadowCaster,
                OrbitGuide,
                Name::new(format!("{} Orbit", planet.name)),
            ));
        }

        if planet.id == RING_BODY_ID {
            let ring = commands
                .spawn((
                    Mesh3d(meshes.add(factory::ring_particles(
                        factory::RING_INNER_RADIUS,
                        factory::RING_OUTER_RADIUS,
                        config.ring_particle_count,
                        &mut rng,
                    ))),
                    MeshMaterial3d(materials.add(factory::ring_material())),
                    Transform::from_rotation(Quat::from_rotation_x(RING_TILT_RAD)),
                    NotShadowCaster,
                    RingSystem,
                    Name::new(format!("{} Rings", planet.name)),
                ))
                .id();
            commands.entity(pivot).add_child(ring);
        }

        if planet.emissive {
            let glow_texture = images.add(texture::glow(texture::GLOW_SIDE).into_image());
            let glow = commands
                .spawn((
                    Mesh3d(meshes.add(factory::glow_mesh())),
                    MeshMaterial3d(materials.add(factory::glow_material(glow_texture))),
                    Transform::default(),
                    NotShadowCaster,
                    SunGlow,
                    Name::new("Sun Glow"),
                ))
                .id();
            commands.entity(pivot).add_child(glow);
        }
    }

    info!(
        "Scene assembled around {}: {} bodies, {} stars, {} ring particles",
        catalog.central().map_or("nothing", |planet| planet.name),
        catalog.len(),
        config.star_count,
        config.ring_particle_count
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembled_world() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .insert_resource(Catalog::solar_system())
            .insert_resource(SceneConfig {
                seed: Some(42),
                star_count: 50,
                ring_particle_count: 40,
                ..SceneConfig::default()
            })
            .add_systems(Startup, assemble_scene);
        app.update();
        app
    }

    #[test]
    fn test_every_body_gets_a_pivot() {
        let mut app = assembled_world();
        let world = app.world_mut();
        let mut ids: Vec<&str> = world.query::<&Body>().iter(world).map(|body| body.id).collect();
        ids.sort_unstable();
        let mut expected: Vec<&str> = Catalog::solar_system().iter().map(|p| p.id).collect();
        expected.sort_unstable();
        assert_eq!(ids, expected);

        assert_eq!(world.query::<&OrbitGuide>().iter(world).count(), 8);
        assert_eq!(world.query::<&Starfield>().iter(world).count(), 1);
        assert_eq!(world.query::<&Surface>().iter(world).count(), 9);
    }

    #[test]
    fn test_ring_hangs_from_saturn() {
        let mut app = assembled_world();
        let world = app.world_mut();
        let parents: Vec<Entity> = world
            .query_filtered::<&ChildOf, With<RingSystem>>()
            .iter(world)
            .map(ChildOf::parent)
            .collect();
        assert_eq!(parents.len(), 1);
        let body = world.get::<Body>(parents[0]).map(|body| body.id);
        assert_eq!(body, Some(RING_BODY_ID));
        assert_eq!(body, Some("saturn"));
    }

    #[test]
    fn test_glow_hangs_from_the_sun() {
        let mut app = assembled_world();
        let world = app.world_mut();
        let parents: Vec<Entity> = world
            .query_filtered::<&ChildOf, With<SunGlow>>()
            .iter(world)
            .map(ChildOf::parent)
            .collect();
        assert_eq!(parents.len(), 1);
        assert_eq!(world.get::<Body>(parents[0]).map(|body| body.id), Some("sun"));
    }

    #[test]
    fn test_surface_spin_rates() {
        let config = SceneConfig::default();
        let catalog = Catalog::solar_system();
        let sun = catalog.get("sun").expect("Sun is in the catalog");
        let earth = catalog.get("earth").expect("Earth is in the catalog");
        assert!((surface_spin(sun, &config) - 0.0005).abs() < 1e-9);
        assert_eq!(surface_spin(earth, &config), 0.003);
    }
}
