//! Closest friend / closest enemy distance evaluation.
//!
//! A pure function of the roster: the running minimum starts at `+inf` on
//! every call, so a team with no eligible players always reads as infinitely
//! far away instead of inheriting a previous call's result.
//!
//! When compiled with `--features parallel`, refreshing a pool walks spawn
//! points with rayon. Each point's metrics depend only on its own position
//! and the shared read-only roster, so the result is identical either way.

use crate::components::{Position, Team};
use crate::roster::PlayerState;
use crate::spawn_point::SpawnPoint;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Computes per-team distance metrics for spawn points.
#[derive(Debug, Clone, Copy)]
pub struct DistanceEvaluator<'a> {
    players: &'a [PlayerState],
}

impl<'a> DistanceEvaluator<'a> {
    pub fn new(players: &'a [PlayerState]) -> Self {
        Self { players }
    }

    /// Distance from `position` to the nearest alive, enabled player on `team`.
    /// Returns `f32::INFINITY` when there is no such player (always for `Team::None`).
    pub fn closest_member_distance(&self, position: &Position, team: Team) -> f32 {
        self.players
            .iter()
            .filter(|player| player.counts_for(team))
            .map(|player| position.distance_to(&player.position))
            .fold(f32::INFINITY, f32::min)
    }

    /// Rewrite friend/enemy metrics of every point for a request from `team`.
    pub fn refresh(&self, points: &mut [SpawnPoint], team: Team) {
        let enemy_team = team.opposing();

        #[cfg(feature = "parallel")]
        points
            .par_iter_mut()
            .for_each(|point| self.refresh_point(point, team, enemy_team));

        #[cfg(not(feature = "parallel"))]
        for point in points.iter_mut() {
            self.refresh_point(point, team, enemy_team);
        }
    }

    fn refresh_point(&self, point: &mut SpawnPoint, team: Team, enemy_team: Team) {
        let position = point.position();
        point.distance_to_closest_friend = self.closest_member_distance(&position, team);
        point.distance_to_closest_enemy = self.closest_member_distance(&position, enemy_team);
    }
}
