//! Planet catalog
//!
//! The fixed reference dataset of celestial bodies. Built once at startup and
//! shared read-only through the [`Catalog`] resource.

use bevy::prelude::*;

pub mod planets;

pub use planets::SOLAR_SYSTEM;

/// Id used to address the whole system rather than a single body
pub const OVERVIEW_ID: &str = "solar-system";

/// Procedural surface motif
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    Solid,
    Craters,
    Gas,
    Lava,
    Ice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyCategory {
    Star,
    Terrestrial,
    GasGiant,
    IceGiant,
}

impl BodyCategory {
    pub fn label(self) -> &'static str {
        match self {
            BodyCategory::Star => "Star",
            BodyCategory::Terrestrial => "Terrestrial planet",
            BodyCategory::GasGiant => "Gas giant",
            BodyCategory::IceGiant => "Ice giant",
        }
    }
}

/// 8-bit sRGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_color(self) -> Color {
        Color::srgb_u8(self.r, self.g, self.b)
    }
}

/// Immutable description of one celestial body
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    /// Sphere radius in world units
    pub size: f32,
    /// Orbit radius around the origin; 0 for the central body
    pub distance: f32,
    /// Orbital angle increment per frame before the global speed factor
    pub angular_speed: f32,
    pub color: Rgb,
    pub pattern: PatternKind,
    pub emissive: bool,
    pub category: BodyCategory,
    pub description: &'static str,
    /// Alternative names accepted by the console
    pub aliases: &'static [&'static str],
}

impl PlanetDescriptor {
    pub fn is_central(&self) -> bool {
        self.distance == 0.0
    }

    fn answers_to(&self, key: &str) -> bool {
        self.id == key || self.aliases.contains(&key)
    }
}

/// Read-only catalog resource
#[derive(Resource, Clone, Debug)]
pub struct Catalog {
    planets: Vec<PlanetDescriptor>,
}

impl Catalog {
    pub fn new(planets: Vec<PlanetDescriptor>) -> Self {
        Self { planets }
    }

    /// The stock nine-body solar system
    pub fn solar_system() -> Self {
        Self::new(SOLAR_SYSTEM.to_vec())
    }

    /// Exact lookup by id
    pub fn get(&self, id: &str) -> Option<&PlanetDescriptor> {
        self.planets.iter().find(|planet| planet.id == id)
    }

    /// Case-insensitive lookup by id or alias
    pub fn resolve(&self, key: &str) -> Option<&PlanetDescriptor> {
        let key = key.trim().to_lowercase();
        self.planets.iter().find(|planet| planet.answers_to(&key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanetDescriptor> {
        self.planets.iter()
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// The body everything orbits around
    pub fn central(&self) -> Option<&PlanetDescriptor> {
        self.planets.iter().find(|planet| planet.is_central())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::solar_system()
    }
}

/// Plugin that publishes the catalog resource
pub struct CatalogPlugin;

impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Catalog>();
    }
}
