//! ECS Systems for the spawn selection world.
//!
//! Both systems run once per fixed update, in order:
//!
//! - `roster_update_system` - Rebuilds the read-only player roster
//! - `spawn_cooldown_system` - Counts spawn point cooldowns down
//!
//! Selection itself is not a system: it is requested on demand through
//! `SpawnWorld::select_spawn_point`, which refreshes the roster first.

pub mod cooldown;

pub use crate::roster::roster_update_system;
pub use cooldown::*;
