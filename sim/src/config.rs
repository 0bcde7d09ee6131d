//! Configuration for spawn selection and the host world.
//!
//! Thresholds are set once at construction and validated up front, so a bad
//! value fails fast instead of silently skewing every selection.
//! `min_member_distance` may not exceed `max_distance_to_closest_friend`, or no
//! scanned point could ever clear the nearest friend and every selection would
//! fall back.

use crate::error::SpawnError;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DISTANCE_TO_CLOSEST_FRIEND: f32 = 30.0;
pub const DEFAULT_MIN_DISTANCE_TO_CLOSEST_ENEMY: f32 = 10.0;
pub const DEFAULT_MIN_MEMBER_DISTANCE: f32 = 2.0;

fn default_max_distance_to_closest_friend() -> f32 {
    DEFAULT_MAX_DISTANCE_TO_CLOSEST_FRIEND
}

fn default_min_distance_to_closest_enemy() -> f32 {
    DEFAULT_MIN_DISTANCE_TO_CLOSEST_ENEMY
}

fn default_min_member_distance() -> f32 {
    DEFAULT_MIN_MEMBER_DISTANCE
}

fn default_fixed_timestep() -> f32 {
    1.0 / 30.0
}

/// Selection thresholds.
///
/// `spawn_cooldown_duration` has no default: JSON configs must name it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Spawn points farther than this from every friend are never scanned.
    #[serde(default = "default_max_distance_to_closest_friend")]
    pub max_distance_to_closest_friend: f32,
    /// Enemy safety margin for distance-based spawning.
    #[serde(default = "default_min_distance_to_closest_enemy")]
    pub min_distance_to_closest_enemy: f32,
    /// Keeps players from spawning on top of anyone, friend or enemy.
    #[serde(default = "default_min_member_distance")]
    pub min_member_distance: f32,
    /// Seconds a spawn point stays unavailable after being selected.
    pub spawn_cooldown_duration: f32,
}

impl SpawnConfig {
    /// Default thresholds with the given cooldown.
    pub fn new(spawn_cooldown_duration: f32) -> Self {
        Self {
            max_distance_to_closest_friend: DEFAULT_MAX_DISTANCE_TO_CLOSEST_FRIEND,
            min_distance_to_closest_enemy: DEFAULT_MIN_DISTANCE_TO_CLOSEST_ENEMY,
            min_member_distance: DEFAULT_MIN_MEMBER_DISTANCE,
            spawn_cooldown_duration,
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, SpawnError> {
        let config: SpawnConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SpawnError> {
        non_negative("max_distance_to_closest_friend", self.max_distance_to_closest_friend)?;
        non_negative("min_distance_to_closest_enemy", self.min_distance_to_closest_enemy)?;
        non_negative("min_member_distance", self.min_member_distance)?;

        if !self.spawn_cooldown_duration.is_finite() || self.spawn_cooldown_duration <= 0.0 {
            return Err(SpawnError::InvalidConfiguration {
                field: "spawn_cooldown_duration",
                reason: "must be finite and positive",
            });
        }
        if self.min_member_distance > self.max_distance_to_closest_friend {
            return Err(SpawnError::InvalidConfiguration {
                field: "min_member_distance",
                reason: "must not exceed max_distance_to_closest_friend",
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), SpawnError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SpawnError::InvalidConfiguration {
            field,
            reason: "must be finite and non-negative",
        })
    }
}

/// Configuration for the host world.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Fixed timestep in seconds (e.g., 1/30 = 0.0333 for 30 Hz).
    #[serde(default = "default_fixed_timestep")]
    pub fixed_timestep: f32,
    pub spawn: SpawnConfig,
    /// Seed for the selection RNG. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl WorldConfig {
    pub fn new(spawn: SpawnConfig) -> Self {
        Self {
            fixed_timestep: default_fixed_timestep(),
            spawn,
            seed: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SpawnError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SpawnError> {
        if !self.fixed_timestep.is_finite() || self.fixed_timestep <= 0.0 {
            return Err(SpawnError::InvalidConfiguration {
                field: "fixed_timestep",
                reason: "must be finite and positive",
            });
        }
        self.spawn.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpawnConfig::new(2.0);
        assert_eq!(config.max_distance_to_closest_friend, 30.0);
        assert_eq!(config.min_distance_to_closest_enemy, 10.0);
        assert_eq!(config.min_member_distance, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_thresholds() {
        let config = SpawnConfig::from_json(r#"{"spawn_cooldown_duration": 3.5}"#).unwrap();
        assert_eq!(config, SpawnConfig::new(3.5));

        let config = SpawnConfig::from_json(
            r#"{"spawn_cooldown_duration": 1.0, "min_member_distance": 4.0}"#,
        )
        .unwrap();
        assert_eq!(config.min_member_distance, 4.0);
    }

    #[test]
    fn test_cooldown_is_required() {
        let err = SpawnConfig::from_json(r#"{"min_member_distance": 4.0}"#).unwrap_err();
        assert!(matches!(err, SpawnError::ConfigParse(_)));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let config = SpawnConfig {
            min_distance_to_closest_enemy: -1.0,
            ..SpawnConfig::new(2.0)
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            SpawnError::InvalidConfiguration { field: "min_distance_to_closest_enemy", .. }
        ));
    }

    #[test]
    fn test_rejects_non_finite_and_zero_cooldown() {
        assert!(SpawnConfig::new(0.0).validate().is_err());
        assert!(SpawnConfig::new(f32::INFINITY).validate().is_err());

        let config = SpawnConfig {
            max_distance_to_closest_friend: f32::NAN,
            ..SpawnConfig::new(2.0)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_member_distance_beyond_scan_range() {
        let config = SpawnConfig {
            max_distance_to_closest_friend: 1.0,
            min_member_distance: 2.0,
            ..SpawnConfig::new(2.0)
        };
        assert!(matches!(
            config.validate(),
            Err(SpawnError::InvalidConfiguration { field: "min_member_distance", .. })
        ));

        // Equal values are accepted.
        let config = SpawnConfig {
            max_distance_to_closest_friend: 2.0,
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_world_config_json() {
        let config = WorldConfig::from_json(
            r#"{"spawn": {"spawn_cooldown_duration": 2.0}, "seed": 7}"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert!((config.fixed_timestep - 1.0 / 30.0).abs() < 1e-6);

        let err = WorldConfig::from_json(
            r#"{"fixed_timestep": 0.0, "spawn": {"spawn_cooldown_duration": 2.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SpawnError::InvalidConfiguration { field: "fixed_timestep", .. }));
    }
}
