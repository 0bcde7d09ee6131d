//! Read-only player roster consumed by spawn selection.
//!
//! The selector never touches player entities directly. Each tick (and right
//! before every selection) the roster is rebuilt from the ECS world into a
//! flat list, which is what distance evaluation scans.

use crate::components::{Disabled, Health, PlayerId, Position, Team};
use bevy_ecs::prelude::*;

/// Snapshot of one player as seen by spawn selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub id: PlayerId,
    pub team: Team,
    pub position: Position,
    pub alive: bool,
    pub disabled: bool,
}

impl PlayerState {
    pub fn new(id: u32, team: Team, position: Position) -> Self {
        Self {
            id: PlayerId(id),
            team,
            position,
            alive: true,
            disabled: false,
        }
    }

    /// Whether this player counts toward `team`'s closest-member distance.
    #[inline]
    pub fn counts_for(&self, team: Team) -> bool {
        team.includes(self.team) && self.alive && !self.disabled
    }
}

/// Flat list of every known player, dead and disabled ones included.
#[derive(Resource, Debug, Default, Clone)]
pub struct Roster {
    players: Vec<PlayerState>,
}

impl Roster {
    pub fn new(players: Vec<PlayerState>) -> Self {
        Self { players }
    }

    /// Clear all entries (call before rebuilding).
    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn insert(&mut self, player: PlayerState) {
        self.players.push(player);
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Number of players that currently count for `team`.
    pub fn active_count(&self, team: Team) -> usize {
        self.players.iter().filter(|p| p.counts_for(team)).count()
    }

    pub fn total_count(&self) -> usize {
        self.players.len()
    }
}

/// System that rebuilds the roster from player entities.
pub fn roster_update_system(
    mut roster: ResMut<Roster>,
    query: Query<(&PlayerId, &Team, &Position, &Health, Has<Disabled>)>,
) {
    roster.clear();

    for (id, team, pos, health, disabled) in query.iter() {
        roster.insert(PlayerState {
            id: *id,
            team: *team,
            position: *pos,
            alive: health.is_alive(),
            disabled,
        });
    }

    // Query order is archetype-dependent; keep the list stable by id.
    roster.players.sort_by_key(|p| p.id.0);
}
