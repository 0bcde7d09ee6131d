//! Spawn point selection.
//!
//! ## Algorithm
//!
//! Every call runs to completion against the current roster:
//!
//! 1. **Refresh**: friend/enemy distances are recomputed for the requesting team.
//! 2. **Distance-based spawning**: the pool is sorted by friend distance and
//!    only the prefix within `max_distance_to_closest_friend` is scanned. A point
//!    qualifies when it is clear of every player by `min_member_distance`, is
//!    off cooldown, and has no enemy within `min_distance_to_closest_enemy`.
//! 3. **Squad-based spawning**: if nothing qualified, the same prefix is scanned
//!    again without the enemy safety margin, favoring cohesion over avoidance.
//! 4. **Fallback**: if both tiers come up empty, the point closest to a friend
//!    (index 0 of the sorted pool) is used regardless of the predicates.
//! 5. **Pick**: one candidate is returned as is. Otherwise the pick is uniform over
//!    the closer half of the candidates, `[0, floor(count / 2))`.
//!
//! The chosen point's cooldown is armed before the call returns. Sorting is
//! O(n log n) per selection; the sort is stable, so equal distances keep
//! registration order.

use crate::components::{Position, SpawnPointId, Team};
use crate::config::SpawnConfig;
use crate::distance::DistanceEvaluator;
use crate::error::SpawnError;
use crate::roster::PlayerState;
use crate::spawn_point::SpawnPoint;
use bevy_ecs::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Sorted-pool index used when neither tier yields a candidate: the point
/// closest to a friend.
const FALLBACK_INDEX: usize = 0;

/// Filter tier that produced the final candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTier {
    DistanceBased,
    SquadBased,
    Fallback,
}

/// Owns the shared spawn point pool and picks spawn points for teams.
#[derive(Resource, Debug)]
pub struct SpawnPointSelector {
    config: SpawnConfig,
    spawn_points: Vec<SpawnPoint>,
    next_id: u32,
    rng: ChaCha8Rng,
}

impl SpawnPointSelector {
    /// Create an empty selector seeded from OS entropy.
    pub fn new(config: SpawnConfig) -> Result<Self, SpawnError> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Create an empty selector with a deterministic pick sequence.
    pub fn with_seed(config: SpawnConfig, seed: u64) -> Result<Self, SpawnError> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: SpawnConfig, rng: ChaCha8Rng) -> Result<Self, SpawnError> {
        config.validate()?;
        Ok(Self {
            config,
            spawn_points: Vec::new(),
            next_id: 0,
            rng,
        })
    }

    /// Register spawn points in order. Builder-style companion to `add_spawn_point`.
    pub fn with_spawn_points(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        for position in positions {
            self.add_spawn_point(position);
        }
        self
    }

    /// Register a spawn point. Points live for the lifetime of the selector.
    pub fn add_spawn_point(&mut self, position: Position) -> SpawnPointId {
        let id = SpawnPointId(self.next_id);
        self.next_id += 1;
        self.spawn_points.push(SpawnPoint::new(id, position));
        id
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// The pool, in the order left by the most recent selection.
    pub fn spawn_points(&self) -> &[SpawnPoint] {
        &self.spawn_points
    }

    pub fn spawn_point(&self, id: SpawnPointId) -> Option<&SpawnPoint> {
        self.spawn_points.iter().find(|p| p.id() == id)
    }

    pub fn spawn_point_mut(&mut self, id: SpawnPointId) -> Option<&mut SpawnPoint> {
        self.spawn_points.iter_mut().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.spawn_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spawn_points.is_empty()
    }

    /// Advance every cooldown by `dt` seconds.
    pub fn tick_cooldowns(&mut self, dt: f32) {
        for point in &mut self.spawn_points {
            point.tick(dt);
        }
    }

    /// Recompute friend/enemy distances of every point for `team`.
    pub fn refresh(&mut self, team: Team, roster: &[PlayerState]) {
        DistanceEvaluator::new(roster).refresh(&mut self.spawn_points, team);
    }

    /// Refresh and run only the distance-based tier, without fallback.
    /// Ids come back closest friend first.
    pub fn primary_candidates(&mut self, team: Team, roster: &[PlayerState]) -> Vec<SpawnPointId> {
        self.prepare(team, roster);
        self.ids(&self.distance_based_candidates())
    }

    /// Refresh and run only the squad-based tier, without fallback.
    /// Ids come back closest friend first.
    pub fn secondary_candidates(&mut self, team: Team, roster: &[PlayerState]) -> Vec<SpawnPointId> {
        self.prepare(team, roster);
        self.ids(&self.squad_based_candidates())
    }

    /// Choose a spawn point for `team` and arm its cooldown.
    pub fn select_spawn_point(
        &mut self,
        team: Team,
        roster: &[PlayerState],
    ) -> Result<&SpawnPoint, SpawnError> {
        if self.spawn_points.is_empty() {
            return Err(SpawnError::NoSpawnPointsAvailable);
        }

        self.prepare(team, roster);
        let (tier, index, count) = match self.candidates() {
            Some((tier, candidates)) => (tier, self.pick(&candidates), candidates.len()),
            None => {
                trace!("no squad-based candidates, falling back to closest friend");
                (SelectionTier::Fallback, FALLBACK_INDEX, 1)
            }
        };

        let duration = self.config.spawn_cooldown_duration;
        let point = &mut self.spawn_points[index];
        point.arm_cooldown(duration);

        debug!(
            team = team.as_str(),
            ?tier,
            candidates = count,
            spawn_point = point.id().0,
            friend_distance = point.distance_to_closest_friend(),
            enemy_distance = point.distance_to_closest_enemy(),
            "selected spawn point"
        );

        Ok(point)
    }

    fn prepare(&mut self, team: Team, roster: &[PlayerState]) {
        self.refresh(team, roster);
        self.spawn_points.sort_by(|a, b| {
            a.distance_to_closest_friend
                .total_cmp(&b.distance_to_closest_friend)
        });
    }

    /// First tier with a non-empty candidate list, as indices into the sorted
    /// pool. `None` means the caller falls back to `FALLBACK_INDEX`.
    fn candidates(&self) -> Option<(SelectionTier, Vec<usize>)> {
        let candidates = self.distance_based_candidates();
        if !candidates.is_empty() {
            return Some((SelectionTier::DistanceBased, candidates));
        }

        trace!("no distance-based candidates, trying squad-based spawning");
        let candidates = self.squad_based_candidates();
        if !candidates.is_empty() {
            return Some((SelectionTier::SquadBased, candidates));
        }

        None
    }

    /// Leading run of the sorted pool within `max_distance_to_closest_friend`.
    fn scan_prefix(&self) -> impl Iterator<Item = (usize, &SpawnPoint)> {
        let max_friend = self.config.max_distance_to_closest_friend;
        self.spawn_points
            .iter()
            .enumerate()
            .take_while(move |(_, p)| p.distance_to_closest_friend <= max_friend)
    }

    fn is_clear_and_ready(&self, point: &SpawnPoint) -> bool {
        let min_member = self.config.min_member_distance;
        point.distance_to_closest_friend > min_member
            && point.distance_to_closest_enemy > min_member
            && point.is_ready()
    }

    fn distance_based_candidates(&self) -> Vec<usize> {
        let min_enemy = self.config.min_distance_to_closest_enemy;
        self.scan_prefix()
            .filter(|(_, p)| self.is_clear_and_ready(p) && p.distance_to_closest_enemy > min_enemy)
            .map(|(i, _)| i)
            .collect()
    }

    fn squad_based_candidates(&self) -> Vec<usize> {
        self.scan_prefix()
            .filter(|(_, p)| self.is_clear_and_ready(p))
            .map(|(i, _)| i)
            .collect()
    }

    /// Pick among the closer half of a non-empty candidate list.
    /// A lone candidate never consults the RNG.
    fn pick(&mut self, candidates: &[usize]) -> usize {
        debug_assert!(!candidates.is_empty(), "pick needs at least one candidate");
        match candidates {
            [only] => *only,
            _ => candidates[self.rng.gen_range(0..closer_half_len(candidates.len()))],
        }
    }

    fn ids(&self, indices: &[usize]) -> Vec<SpawnPointId> {
        indices.iter().map(|&i| self.spawn_points[i].id()).collect()
    }
}

/// Exclusive upper bound of the random pick for `count` (≥ 2) sorted candidates.
#[inline]
pub fn closer_half_len(count: usize) -> usize {
    count / 2
}
