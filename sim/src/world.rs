//! Snapshot types.
//!
//! The `Snapshot` struct provides a serializable view of spawn points and
//! players that a host engine or debug overlay can consume.

use crate::components::*;
use crate::selector::SpawnPointSelector;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Snapshot of a single spawn point.
///
/// Distances are `None` while no eligible player exists for that side
/// (JSON has no infinity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPointSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub cooldown_remaining: f32,
    pub state: CooldownState,
    pub distance_to_closest_friend: Option<f32>,
    pub distance_to_closest_enemy: Option<f32>,
}

/// Snapshot of a single player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: u32,
    pub team: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub alive: bool,
    pub disabled: bool,
}

/// Complete world state snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current simulation tick.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub time: f32,
    /// Spawn points ordered by id. Metrics are from the most recent selection.
    pub spawn_points: Vec<SpawnPointSnapshot>,
    /// Players ordered by id.
    pub players: Vec<PlayerSnapshot>,
}

fn finite(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

impl Snapshot {
    /// Create a snapshot from the ECS world.
    pub fn from_world(world: &mut World, tick: u64, time: f32) -> Self {
        let mut players = Vec::new();
        let mut query = world.query::<(&PlayerId, &Team, &Position, &Health, Has<Disabled>)>();
        for (id, team, pos, health, disabled) in query.iter(world) {
            players.push(PlayerSnapshot {
                id: id.0,
                team: team.as_str().to_string(),
                x: pos.x,
                y: pos.y,
                z: pos.z,
                alive: health.is_alive(),
                disabled,
            });
        }
        players.sort_by_key(|p| p.id);

        let mut spawn_points: Vec<SpawnPointSnapshot> = world
            .get_resource::<SpawnPointSelector>()
            .map(|selector| {
                selector
                    .spawn_points()
                    .iter()
                    .map(|point| {
                        let pos = point.position();
                        SpawnPointSnapshot {
                            id: point.id().0,
                            x: pos.x,
                            y: pos.y,
                            z: pos.z,
                            cooldown_remaining: point.cooldown_remaining(),
                            state: point.state(),
                            distance_to_closest_friend: finite(point.distance_to_closest_friend()),
                            distance_to_closest_enemy: finite(point.distance_to_closest_enemy()),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        spawn_points.sort_by_key(|p| p.id);

        Self {
            tick,
            time,
            spawn_points,
            players,
        }
    }

    /// Serialize snapshot to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize snapshot to pretty JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
