//! Renderable primitives for the scene

use std::f32::consts::TAU;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use rand::Rng;

use crate::catalog::{PlanetDescriptor, Rgb};

pub const STARFIELD_RADIUS: f32 = 1200.0;
const STAR_OPACITY: f32 = 0.9;
pub const SUN_GLOW_SCALE: f32 = 40.0;
pub const ORBIT_SEGMENTS: usize = 72;
const ORBIT_TINT: f32 = 0.4;
const ORBIT_OPACITY: f32 = 0.1;
pub const RING_INNER_RADIUS: f32 = 9.0;
pub const RING_OUTER_RADIUS: f32 = 14.0;
const RING_HALF_THICKNESS: f32 = 0.25;
const RING_BASE_COLOR: [f32; 3] = [0.9, 0.85, 0.7];
const RING_OPACITY: f32 = 0.8;

/// Star tint: mostly white, some blue, some red
fn star_color(roll: f32) -> [f32; 3] {
    if roll < 0.7 {
        [1.0, 1.0, 1.0]
    } else if roll < 0.85 {
        [0.5, 0.7, 1.0]
    } else {
        [1.0, 0.5, 0.5]
    }
}

/// Point cloud of stars on a sphere of radius [`STARFIELD_RADIUS`]
pub fn starfield<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Mesh {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        // Uniform direction on the sphere
        let z: f32 = rng.random_range(-1.0..=1.0);
        let theta: f32 = rng.random_range(0.0..TAU);
        let r = (1.0 - z * z).sqrt();
        positions.push([
            r * theta.cos() * STARFIELD_RADIUS,
            r * theta.sin() * STARFIELD_RADIUS,
            z * STARFIELD_RADIUS,
        ]);

        let [red, green, blue] = star_color(rng.random());
        colors.push([red, green, blue, STAR_OPACITY]);
    }

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
}

/// Colour of a ring particle; the outer edge is brighter than the inner one
fn ring_color(radius: f32, inner: f32, outer: f32) -> [f32; 4] {
    let brightness = 0.7 + 0.3 * (radius - inner) / (outer - inner);
    let [red, green, blue] = RING_BASE_COLOR.map(|c| c * brightness);
    [red, green, blue, RING_OPACITY]
}

/// Flat annulus of particles in the XZ plane, centred on the origin
pub fn ring_particles<R: Rng + ?Sized>(inner: f32, outer: f32, count: usize, rng: &mut R) -> Mesh {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        let angle: f32 = rng.random_range(0.0..TAU);
        let radius = rng.random_range(inner..outer);
        let height = rng.random_range(-RING_HALF_THICKNESS..RING_HALF_THICKNESS);
        positions.push([angle.cos() * radius, height, angle.sin() * radius]);
        colors.push(ring_color(radius, inner, outer));
    }

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
}

/// Closed circle of radius `distance` in the XZ plane
pub fn orbit_guide(distance: f32, segments: usize) -> Mesh {
    let positions: Vec<[f32; 3]> = (0..=segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * TAU;
            [angle.cos() * distance, 0.0, angle.sin() * distance]
        })
        .collect();

    Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

pub fn planet_mesh(planet: &PlanetDescriptor) -> Mesh {
    Sphere::new(planet.size).mesh().uv(32, 18)
}

/// Surface material for a body; the emissive body ignores scene lighting
pub fn planet_material(planet: &PlanetDescriptor, texture: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture),
        perceptual_roughness: 0.9,
        metallic: 0.0,
        unlit: planet.emissive,
        ..default()
    }
}

/// Unlit material that shows vertex colours as is
pub fn point_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

/// Ring particles add their light to what is behind them
pub fn ring_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    }
}

/// Faint line in a darkened shade of the body's colour
pub fn orbit_material(color: Rgb) -> StandardMaterial {
    StandardMaterial {
        base_color: orbit_color(color),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

fn orbit_color(color: Rgb) -> Color {
    let base = color.to_color().to_srgba();
    Color::srgba(
        base.red * ORBIT_TINT,
        base.green * ORBIT_TINT,
        base.blue * ORBIT_TINT,
        ORBIT_OPACITY,
    )
}

/// Additive quad for the sun glow
pub fn glow_material(texture: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture),
        unlit: true,
        alpha_mode: AlphaMode::Add,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

pub fn glow_mesh() -> Mesh {
    Rectangle::new(SUN_GLOW_SCALE, SUN_GLOW_SCALE).into()
}
