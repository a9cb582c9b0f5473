//! Scene configuration
//!
//! Tunables for the scene, the camera and the animation. Defaults reproduce the
//! stock solar system; a `config.json` in the platform config directory can
//! override any subset of the fields.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::Deserialize;

const CONFIG_FILE: &str = "config.json";

/// Scene configuration resource
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Camera position of the overview pose (also the startup pose)
    pub home_position: [f32; 3],
    pub transition_ms: u64,
    /// Exponential smoothing factor applied per frame while following a body
    pub follow_smoothing: f32,
    /// Framing distance for a body is `size * framing_size_factor + framing_margin`
    pub framing_size_factor: f32,
    pub framing_margin: f32,
    /// Multiplier applied to a body's angular speed every frame
    pub orbit_speed_factor: f32,
    /// Surface rotation per frame for every body except the central one
    pub spin_per_frame: f32,
    pub ring_spin_per_frame: f32,
    pub star_count: usize,
    pub ring_particle_count: usize,
    /// Fixed seed for procedural textures and scene layout. Random when absent.
    pub seed: Option<u64>,
    pub sun_light_intensity: f32,
    pub ambient_brightness: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            home_position: [0.0, 50.0, 150.0],
            transition_ms: 2000,
            follow_smoothing: 0.05,
            framing_size_factor: 5.0,
            framing_margin: 20.0,
            orbit_speed_factor: 0.5,
            spin_per_frame: 0.003,
            ring_spin_per_frame: 0.002,
            star_count: 1500,
            ring_particle_count: 1500,
            seed: None,
            sun_light_intensity: 2.0e9,
            ambient_brightness: 80.0,
        }
    }
}

impl SceneConfig {
    /// Load the configuration from the platform config directory
    ///
    /// Resolves:
    /// - macOS: ~/Library/Application Support/solar-explorer/config.json
    /// - Linux: ~/.config/solar-explorer/config.json
    /// - Windows: %APPDATA%\solar-explorer\config\config.json
    ///
    /// Returns the defaults when the file does not exist.
    pub fn load() -> Result<Self, anyhow::Error> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the configuration from an explicit file path
    pub fn load_from(path: &Path) -> Result<Self, anyhow::Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn home_position(&self) -> Vec3 {
        Vec3::from_array(self.home_position)
    }

    /// Distance from which a body of the given size is framed
    pub fn framing_distance(&self, size: f32) -> f32 {
        size * self.framing_size_factor + self.framing_margin
    }
}

fn config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "solar-explorer")?;
    Some(dirs.config_dir().join(CONFIG_FILE))
}

/// Plugin that loads the configuration before any startup system runs
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let config = match SceneConfig::load() {
            Ok(config) => config,
            Err(err) => {
                warn!("Falling back to default scene config: {err:#}");
                SceneConfig::default()
            }
        };
        if let Some(seed) = config.seed {
            info!("Scene seed fixed to {seed}");
        }
        app.insert_resource(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "solar-explorer-config-{}-{}-{}",
            test_name,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).expect("Failed to create temp dir");
        dir
    }

    #[test]
    fn test_defaults_match_stock_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.home_position(), Vec3::new(0.0, 50.0, 150.0));
        assert_eq!(config.transition_ms, 2000);
        assert_eq!(config.follow_smoothing, 0.05);
        assert_eq!(config.orbit_speed_factor, 0.5);
        assert_eq!(config.framing_distance(4.2), 4.2 * 5.0 + 20.0);
        assert_eq!(config.spin_per_frame, 0.003);
        assert_eq!(config.ring_spin_per_frame, 0.002);
        assert_eq!(config.star_count, 1500);
        assert_eq!(config.ring_particle_count, 1500);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = unique_temp_dir("missing");
        let config = SceneConfig::load_from(&dir.join(CONFIG_FILE)).expect("Load should succeed");
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_partial_file_overrides_fields() {
        let dir = unique_temp_dir("partial");
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, r#"{ "seed": 42, "star_count": 10, "transition_ms": 500 }"#)
            .expect("Failed to write config");

        let config = SceneConfig::load_from(&path).expect("Load should succeed");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.star_count, 10);
        assert_eq!(config.transition_ms, 500);
        // Untouched fields keep their defaults
        assert_eq!(config.follow_smoothing, 0.05);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = unique_temp_dir("malformed");
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, "{ not json").expect("Failed to write config");

        assert!(SceneConfig::load_from(&path).is_err());
    }
}
