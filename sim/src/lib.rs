//! Squad Spawn - Spawn Point Selection Core
//!
//! Picks where a player respawns in a team-based game: away from enemies,
//! near teammates, never on top of anyone, and never on a point that was
//! just used. Uses `bevy_ecs` to host players and tick cooldowns.

pub mod api;
pub mod components;
pub mod config;
pub mod distance;
pub mod error;
pub mod roster;
pub mod selector;
pub mod spawn_point;
pub mod systems;
pub mod world;

pub use api::SpawnWorld;
pub use components::*;
pub use config::{SpawnConfig, WorldConfig};
pub use distance::DistanceEvaluator;
pub use error::SpawnError;
pub use roster::{PlayerState, Roster};
pub use selector::{SelectionTier, SpawnPointSelector};
pub use spawn_point::SpawnPoint;
pub use systems::*;
pub use world::Snapshot;
