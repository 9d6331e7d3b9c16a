//! Session configuration. Loaded from config.ron at startup, immutable after.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal configuration problems, surfaced at session setup and never during
/// a tick.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Tuning for one session. Every field has a sensible default so a partial
/// config file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SimConfig {
    #[serde(default)]
    pub planet: PlanetConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub tanks: TankConfig,
    #[serde(default)]
    pub weapons: WeaponConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetConfig {
    /// Base sphere radius in world units.
    #[serde(default = "default_planet_radius")]
    pub radius: f32,
    /// Seed for the surface sampler and all session randomness.
    #[serde(default = "default_planet_seed")]
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Hull points.
    #[serde(default = "default_player_hp")]
    pub hp: f32,
    /// Top airspeed at full throttle, units per second.
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    /// Velocity bleed per second.
    #[serde(default = "default_drag")]
    pub drag: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankConfig {
    /// Hull points per tank.
    #[serde(default = "default_tank_hp")]
    pub hp: f32,
    /// Tanks deployed at session start.
    #[serde(default = "default_fleet_size")]
    pub fleet_size: usize,
    /// Live count below which replacements are requested.
    #[serde(default = "default_fleet_floor")]
    pub fleet_floor: usize,
    /// Minimum distance between a tank spawn and the player.
    #[serde(default = "default_spawn_spacing")]
    pub spawn_spacing: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Wing-gun damage per volley (nose-gun rounds hit for half).
    #[serde(default = "default_damage")]
    pub damage: f32,
    /// Wing-gun volleys per second.
    #[serde(default = "default_fire_rate")]
    pub fire_rate: f32,
    /// Nose-gun rounds per second.
    #[serde(default = "default_nose_fire_rate")]
    pub nose_fire_rate: f32,
    /// Nose-gun muzzle velocity base, units per second.
    #[serde(default = "default_bullet_speed")]
    pub bullet_speed: f32,
}

fn default_planet_radius() -> f32 {
    5000.0
}
fn default_planet_seed() -> u64 {
    7
}
fn default_player_hp() -> f32 {
    100.0
}
fn default_max_speed() -> f32 {
    200.0
}
fn default_drag() -> f32 {
    0.3
}
fn default_tank_hp() -> f32 {
    100.0
}
fn default_fleet_size() -> usize {
    10
}
fn default_fleet_floor() -> usize {
    5
}
fn default_spawn_spacing() -> f32 {
    200.0
}
fn default_damage() -> f32 {
    50.0
}
fn default_fire_rate() -> f32 {
    5.0
}
fn default_nose_fire_rate() -> f32 {
    10.0
}
fn default_bullet_speed() -> f32 {
    400.0
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: default_planet_radius(),
            seed: default_planet_seed(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            hp: default_player_hp(),
            max_speed: default_max_speed(),
            drag: default_drag(),
        }
    }
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            hp: default_tank_hp(),
            fleet_size: default_fleet_size(),
            fleet_floor: default_fleet_floor(),
            spawn_spacing: default_spawn_spacing(),
        }
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            damage: default_damage(),
            fire_rate: default_fire_rate(),
            nose_fire_rate: default_nose_fire_rate(),
            bullet_speed: default_bullet_speed(),
        }
    }
}

impl SimConfig {
    /// Load config from `config.ron` in the current directory. A missing
    /// file falls back to defaults; an unparseable one is a setup error.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(data) => ron::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(_) => {
                log::warn!("no config at {:?}, using defaults", path);
                Ok(Self::default())
            }
        }
    }

    /// Check the fatal misconfiguration class: non-positive sizes, speeds,
    /// and rates that would corrupt the simulation from the first tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("planet.radius", self.planet.radius),
            ("player.hp", self.player.hp),
            ("player.max_speed", self.player.max_speed),
            ("tanks.hp", self.tanks.hp),
            ("weapons.damage", self.weapons.damage),
            ("weapons.fire_rate", self.weapons.fire_rate),
            ("weapons.nose_fire_rate", self.weapons.nose_fire_rate),
            ("weapons.bullet_speed", self.weapons.bullet_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !(self.player.drag >= 0.0) {
            return Err(ConfigError::Negative {
                field: "player.drag",
                value: self.player.drag,
            });
        }
        if !(self.tanks.spawn_spacing >= 0.0) {
            return Err(ConfigError::Negative {
                field: "tanks.spawn_spacing",
                value: self.tanks.spawn_spacing,
            });
        }
        Ok(())
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}
