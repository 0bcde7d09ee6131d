//! ECS Components for the spawn selection world.
//!
//! Components are pure data containers attached to player entities.
//! Spawn points are not entities: they live in the selector's pool so a
//! single selection call can sort and mutate them in place.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// SPATIAL COMPONENTS
// ============================================================================

/// 3D position in world units.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance_squared_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        self.distance_squared_to(other).sqrt()
    }
}

// ============================================================================
// IDENTITY COMPONENTS
// ============================================================================

/// Unique identifier for a player.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Stable identifier for a spawn point, assigned at registration.
///
/// The pool is re-sorted on every selection, so callers refer to points by id
/// rather than by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpawnPointId(pub u32);

/// Team allegiance.
///
/// `None` never matches any player; it doubles as the "no opposing team"
/// sentinel for requests that have no team.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[default]
    None,
    TeamA,
    TeamB,
}

impl Team {
    /// The team whose players count as enemies for a request from `self`.
    pub fn opposing(self) -> Team {
        match self {
            Team::TeamA => Team::TeamB,
            Team::TeamB => Team::TeamA,
            Team::None => Team::None,
        }
    }

    /// True when a player on `other` belongs to this team.
    #[inline]
    pub fn includes(self, other: Team) -> bool {
        self != Team::None && self == other
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::None => "None",
            Team::TeamA => "TeamA",
            Team::TeamB => "TeamB",
        }
    }
}

// ============================================================================
// PLAYER STATE COMPONENTS
// ============================================================================

/// Health of a player. A player at zero health is dead.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Marker for players that are switched off (spectating, loading, AFK).
/// Disabled players are invisible to distance evaluation.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Disabled;

// ============================================================================
// COOLDOWN STATE
// ============================================================================

/// Derived respawn cooldown state of a spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CooldownState {
    /// Timer at or below zero; the point may be selected.
    Ready,
    /// Timer armed by a recent selection.
    OnCooldown,
}

impl CooldownState {
    pub fn from_remaining(remaining: f32) -> Self {
        if remaining <= 0.0 {
            Self::Ready
        } else {
            Self::OnCooldown
        }
    }
}

// ============================================================================
// BUNDLE HELPERS
// ============================================================================

/// Bundle for spawning a player entity.
#[derive(Bundle, Default)]
pub struct PlayerBundle {
    pub player_id: PlayerId,
    pub team: Team,
    pub position: Position,
    pub health: Health,
}

impl PlayerBundle {
    pub fn new(id: u32, team: Team, position: Position) -> Self {
        Self {
            player_id: PlayerId(id),
            team,
            position,
            health: Health::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean_in_3d() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(2.0, 3.0, 6.0);
        assert!((a.distance_to(&b) - 7.0).abs() < 0.0001);
        assert!((a.distance_squared_to(&b) - 49.0).abs() < 0.0001);
    }

    #[test]
    fn test_opposing_team() {
        assert_eq!(Team::TeamA.opposing(), Team::TeamB);
        assert_eq!(Team::TeamB.opposing(), Team::TeamA);
        assert_eq!(Team::None.opposing(), Team::None);
    }

    #[test]
    fn test_none_team_matches_nobody() {
        assert!(!Team::None.includes(Team::None));
        assert!(!Team::None.includes(Team::TeamA));
        assert!(Team::TeamA.includes(Team::TeamA));
        assert!(!Team::TeamA.includes(Team::TeamB));
    }

    #[test]
    fn test_health_death_and_revive() {
        let mut health = Health::new(50.0);
        assert!(health.is_alive());
        health.damage(80.0);
        assert!(!health.is_alive());
        assert_eq!(health.current, 0.0);
        health.heal(500.0);
        assert_eq!(health.current, 50.0);
    }

    #[test]
    fn test_cooldown_state_boundary() {
        assert_eq!(CooldownState::from_remaining(0.0), CooldownState::Ready);
        assert_eq!(CooldownState::from_remaining(-0.5), CooldownState::Ready);
        assert_eq!(CooldownState::from_remaining(0.01), CooldownState::OnCooldown);
    }
}
