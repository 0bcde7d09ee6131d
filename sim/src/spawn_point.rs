//! Spawn point data entity.

use crate::components::{CooldownState, Position, SpawnPointId};
use serde::{Deserialize, Serialize};

/// A fixed location players can be spawned at.
///
/// Position never changes after placement. The two distance metrics are
/// transient: they are rewritten for the requesting team on every selection
/// and mean nothing across calls for different teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    id: SpawnPointId,
    position: Position,
    pub(crate) distance_to_closest_friend: f32,
    pub(crate) distance_to_closest_enemy: f32,
    cooldown_remaining: f32,
}

impl SpawnPoint {
    pub fn new(id: SpawnPointId, position: Position) -> Self {
        Self {
            id,
            position,
            distance_to_closest_friend: f32::INFINITY,
            distance_to_closest_enemy: f32::INFINITY,
            cooldown_remaining: 0.0,
        }
    }

    pub fn id(&self) -> SpawnPointId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn distance_to_closest_friend(&self) -> f32 {
        self.distance_to_closest_friend
    }

    pub fn distance_to_closest_enemy(&self) -> f32 {
        self.distance_to_closest_enemy
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    pub fn state(&self) -> CooldownState {
        CooldownState::from_remaining(self.cooldown_remaining)
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    /// Restart the cooldown at its full duration.
    pub fn arm_cooldown(&mut self, duration: f32) {
        self.cooldown_remaining = duration;
    }

    /// Advance the cooldown by `dt` seconds, stopping at zero.
    pub fn tick(&mut self, dt: f32) {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        }
    }
}
