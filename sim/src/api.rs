//! Public API for the spawn selection world.
//!
//! This module provides the main interface for a host engine (or any other
//! client) to drive spawn selection.
//!
//! ## Fixed Timestep
//!
//! Cooldowns advance on a fixed timestep (default 30 Hz). When `step(dt)` is
//! called, the world accumulates time and runs fixed updates as needed, so
//! cooldown expiry does not depend on the caller's frame rate.
//!
//! ## Selection
//!
//! `select_spawn_point` is synchronous and runs with exclusive access to the
//! world: the roster is refreshed, the selector runs, and the chosen point's
//! cooldown is armed before anything else can observe the pool.

use crate::components::*;
use crate::config::{SpawnConfig, WorldConfig};
use crate::error::SpawnError;
use crate::roster::{roster_update_system, Roster};
use crate::selector::SpawnPointSelector;
use crate::spawn_point::SpawnPoint;
use crate::systems::*;
use crate::world::Snapshot;
use bevy_ecs::prelude::*;
use tracing::debug;

/// The spawn selection world container.
///
/// Holds the ECS world and schedules, providing a clean API for:
/// - Registering spawn points
/// - Managing the player roster
/// - Stepping cooldowns forward
/// - Selecting spawn points
/// - Extracting state snapshots
pub struct SpawnWorld {
    world: World,
    schedule: Schedule,
    roster_schedule: Schedule,
    tick: u64,
    time: f32,
    /// Accumulated time for fixed timestep.
    time_accumulator: f32,
}

impl SpawnWorld {
    /// Create an empty world with default thresholds and the given cooldown.
    pub fn new(spawn_cooldown_duration: f32) -> Result<Self, SpawnError> {
        Self::with_config(WorldConfig::new(SpawnConfig::new(spawn_cooldown_duration)))
    }

    /// Create an empty world with custom configuration.
    pub fn with_config(config: WorldConfig) -> Result<Self, SpawnError> {
        config.validate()?;

        let selector = match config.seed {
            Some(seed) => SpawnPointSelector::with_seed(config.spawn, seed)?,
            None => SpawnPointSelector::new(config.spawn)?,
        };

        let mut world = World::new();
        world.insert_resource(DeltaTime(config.fixed_timestep));
        world.insert_resource(Roster::default());
        world.insert_resource(selector);
        world.insert_resource(config);

        let mut schedule = Schedule::default();
        schedule.add_systems((roster_update_system, spawn_cooldown_system).chain());

        let mut roster_schedule = Schedule::default();
        roster_schedule.add_systems(roster_update_system);

        Ok(Self {
            world,
            schedule,
            roster_schedule,
            tick: 0,
            time: 0.0,
            time_accumulator: 0.0,
        })
    }

    /// Create a test world: a ring of spawn points with one team on each side.
    pub fn new_default_test_world() -> Self {
        let config = WorldConfig {
            seed: Some(0),
            ..WorldConfig::new(SpawnConfig::new(2.0))
        };
        let mut sim = match Self::with_config(config) {
            Ok(sim) => sim,
            Err(err) => unreachable!("default test config is valid: {err}"),
        };

        // Twelve spawn points on a circle of radius 40
        for i in 0..12 {
            let angle = (i as f32 / 12.0) * std::f32::consts::TAU;
            sim.add_spawn_point(40.0 * angle.cos(), 0.0, 40.0 * angle.sin());
        }

        // TeamA gathered west, TeamB east
        for i in 0..4 {
            sim.spawn_player(i, Team::TeamA, -30.0, 0.0, -6.0 + i as f32 * 4.0);
            sim.spawn_player(100 + i, Team::TeamB, 30.0, 0.0, -6.0 + i as f32 * 4.0);
        }

        sim
    }

    /// Register a spawn point.
    pub fn add_spawn_point(&mut self, x: f32, y: f32, z: f32) -> SpawnPointId {
        self.world
            .resource_mut::<SpawnPointSelector>()
            .add_spawn_point(Position::new(x, y, z))
    }

    /// Spawn a player entity.
    pub fn spawn_player(&mut self, id: u32, team: Team, x: f32, y: f32, z: f32) {
        self.world
            .spawn(PlayerBundle::new(id, team, Position::new(x, y, z)));
    }

    /// Move a player to a new position.
    pub fn move_player(&mut self, id: u32, x: f32, y: f32, z: f32) {
        let mut query = self.world.query::<(&PlayerId, &mut Position)>();
        for (player_id, mut pos) in query.iter_mut(&mut self.world) {
            if player_id.0 == id {
                *pos = Position::new(x, y, z);
                break;
            }
        }
    }

    /// Kill a player. Dead players are ignored by distance evaluation.
    pub fn kill_player(&mut self, id: u32) {
        let mut query = self.world.query::<(&PlayerId, &mut Health)>();
        for (player_id, mut health) in query.iter_mut(&mut self.world) {
            if player_id.0 == id {
                let max = health.max;
                health.damage(max);
                break;
            }
        }
    }

    /// Restore a player to full health.
    pub fn revive_player(&mut self, id: u32) {
        let mut query = self.world.query::<(&PlayerId, &mut Health)>();
        for (player_id, mut health) in query.iter_mut(&mut self.world) {
            if player_id.0 == id {
                let max = health.max;
                health.heal(max);
                break;
            }
        }
    }

    /// Enable or disable a player.
    pub fn set_player_disabled(&mut self, id: u32, disabled: bool) {
        let Some(entity) = self.find_player(id) else {
            return;
        };

        if disabled {
            self.world.entity_mut(entity).insert(Disabled);
        } else {
            self.world.entity_mut(entity).remove::<Disabled>();
        }
    }

    fn find_player(&mut self, id: u32) -> Option<Entity> {
        let mut query = self.world.query::<(Entity, &PlayerId)>();
        query
            .iter(&self.world)
            .find(|(_, player_id)| player_id.0 == id)
            .map(|(e, _)| e)
    }

    /// Choose a spawn point for `team` against the current player positions.
    pub fn select_spawn_point(&mut self, team: Team) -> Result<SpawnPoint, SpawnError> {
        self.roster_schedule.run(&mut self.world);
        self.world
            .resource_scope(|world, mut selector: Mut<SpawnPointSelector>| {
                let roster = world.resource::<Roster>();
                debug!(
                    team = team.as_str(),
                    friends = roster.active_count(team),
                    enemies = roster.active_count(team.opposing()),
                    "selecting spawn point"
                );
                selector.select_spawn_point(team, roster.players()).cloned()
            })
    }

    /// Choose a spawn point for an existing player's team.
    /// The player itself is left where it is.
    pub fn select_spawn_point_for_player(&mut self, id: u32) -> Result<SpawnPoint, SpawnError> {
        let entity = self
            .find_player(id)
            .ok_or(SpawnError::UnknownPlayer { id })?;
        let team = self
            .world
            .get::<Team>(entity)
            .copied()
            .unwrap_or_default();

        debug!(player = id, team = team.as_str(), "spawn point requested for player");
        self.select_spawn_point(team)
    }

    /// Step the world forward by `dt` seconds.
    ///
    /// Uses fixed timestep internally - accumulates time and runs fixed updates
    /// as needed.
    pub fn step(&mut self, dt: f32) {
        let fixed_dt = self
            .world
            .get_resource::<WorldConfig>()
            .map(|c| c.fixed_timestep)
            .unwrap_or(1.0 / 30.0);

        self.time_accumulator += dt;

        while self.time_accumulator >= fixed_dt {
            self.fixed_update(fixed_dt);
            self.time_accumulator -= fixed_dt;
        }
    }

    /// Run a single fixed timestep update.
    fn fixed_update(&mut self, dt: f32) {
        if let Some(mut dt_res) = self.world.get_resource_mut::<DeltaTime>() {
            dt_res.0 = dt;
        }

        self.schedule.run(&mut self.world);

        self.tick += 1;
        self.time += dt;
    }

    /// Get a snapshot of the current state.
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot::from_world(&mut self.world, self.tick, self.time)
    }

    /// Get the snapshot as a JSON string.
    pub fn snapshot_json(&mut self) -> String {
        self.snapshot().to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the current tick number.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Get the elapsed time.
    pub fn current_time(&self) -> f32 {
        self.time
    }

    /// Look up a spawn point by id.
    pub fn spawn_point(&self, id: SpawnPointId) -> Option<&SpawnPoint> {
        self.selector().spawn_point(id)
    }

    /// Get the selector.
    pub fn selector(&self) -> &SpawnPointSelector {
        self.world.resource::<SpawnPointSelector>()
    }

    /// Get the roster as of the last tick or selection.
    pub fn roster(&self) -> &Roster {
        self.world.resource::<Roster>()
    }

    /// Get direct access to the ECS world (for advanced usage).
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world (for advanced usage).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(cooldown: f32) -> SpawnWorld {
        SpawnWorld::with_config(WorldConfig {
            fixed_timestep: 0.0625,
            seed: Some(4),
            ..WorldConfig::new(SpawnConfig::new(cooldown))
        })
        .unwrap()
    }

    #[test]
    fn test_new_world() {
        let sim = SpawnWorld::new(2.0).unwrap();
        assert_eq!(sim.current_tick(), 0);
        assert!(sim.selector().is_empty());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        assert!(matches!(
            SpawnWorld::new(-1.0),
            Err(SpawnError::InvalidConfiguration { field: "spawn_cooldown_duration", .. })
        ));
    }

    #[test]
    fn test_empty_pool_error() {
        let mut sim = seeded(2.0);
        sim.spawn_player(1, Team::TeamA, 0.0, 0.0, 0.0);
        let err = sim.select_spawn_point(Team::TeamA).unwrap_err();
        assert!(matches!(err, SpawnError::NoSpawnPointsAvailable));
        // Registering a point afterwards makes the same request succeed.
        assert!(err.is_recoverable());
        sim.add_spawn_point(5.0, 0.0, 0.0);
        assert!(sim.select_spawn_point(Team::TeamA).is_ok());
    }

    #[test]
    fn test_default_test_world() {
        let mut sim = SpawnWorld::new_default_test_world();
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.spawn_points.len(), 12);
        assert_eq!(snapshot.players.len(), 8);

        let point = sim.select_spawn_point(Team::TeamA).unwrap();
        // TeamA is on the west side: the chosen point should be too.
        assert!(point.position().x < 0.0, "picked {:?}", point.position());
        assert!(point.distance_to_closest_friend() <= 30.0);
    }

    #[test]
    fn test_step_advances_tick_and_expires_cooldown() {
        let mut sim = seeded(0.2);
        let id = sim.add_spawn_point(5.0, 0.0, 0.0);
        sim.spawn_player(1, Team::TeamA, 0.0, 0.0, 0.0);

        let point = sim.select_spawn_point(Team::TeamA).unwrap();
        assert_eq!(point.id(), id);
        assert_eq!(point.state(), CooldownState::OnCooldown);

        sim.step(0.125);
        assert_eq!(sim.current_tick(), 2);
        assert_eq!(sim.spawn_point(id).unwrap().state(), CooldownState::OnCooldown);

        sim.step(0.125);
        assert_eq!(sim.current_tick(), 4);
        assert!((sim.current_time() - 0.25).abs() < 1e-6);
        assert_eq!(sim.spawn_point(id).unwrap().state(), CooldownState::Ready);
    }

    #[test]
    fn test_selection_sees_moved_players_without_stepping() {
        let mut sim = seeded(2.0);
        let near_origin = sim.add_spawn_point(5.0, 0.0, 0.0);
        let far_away = sim.add_spawn_point(105.0, 0.0, 0.0);
        sim.spawn_player(1, Team::TeamA, 0.0, 0.0, 0.0);

        assert_eq!(sim.select_spawn_point(Team::TeamA).unwrap().id(), near_origin);

        sim.move_player(1, 100.0, 0.0, 0.0);
        assert_eq!(sim.select_spawn_point(Team::TeamA).unwrap().id(), far_away);
    }

    #[test]
    fn test_dead_and_disabled_friends_are_ignored() {
        let mut sim = seeded(0.1);
        let by_first = sim.add_spawn_point(5.0, 0.0, 0.0);
        let by_second = sim.add_spawn_point(55.0, 0.0, 0.0);
        sim.spawn_player(1, Team::TeamA, 0.0, 0.0, 0.0);
        sim.spawn_player(2, Team::TeamA, 60.0, 0.0, 0.0);

        sim.kill_player(2);
        assert_eq!(sim.select_spawn_point(Team::TeamA).unwrap().id(), by_first);
        assert_eq!(sim.roster().active_count(Team::TeamA), 1);
        sim.step(0.2);

        sim.revive_player(2);
        sim.set_player_disabled(1, true);
        assert_eq!(sim.select_spawn_point(Team::TeamA).unwrap().id(), by_second);
        assert_eq!(sim.roster().active_count(Team::TeamA), 1);
        assert_eq!(sim.roster().total_count(), 2);
        sim.step(0.2);

        sim.set_player_disabled(1, false);
        sim.kill_player(2);
        assert_eq!(sim.select_spawn_point(Team::TeamA).unwrap().id(), by_first);
    }

    #[test]
    fn test_enemy_nearby_pushes_selection_away() {
        let mut sim = seeded(2.0);
        let contested = sim.add_spawn_point(5.0, 0.0, 0.0);
        let safe = sim.add_spawn_point(-8.0, 0.0, 0.0);
        sim.spawn_player(1, Team::TeamA, 0.0, 0.0, 0.0);
        sim.spawn_player(2, Team::TeamB, 10.0, 0.0, 0.0);

        let point = sim.select_spawn_point(Team::TeamA).unwrap();
        assert_eq!(point.id(), safe);
        assert_ne!(point.id(), contested);
    }

    #[test]
    fn test_select_for_player_uses_their_team() {
        let mut sim = seeded(2.0);
        let west = sim.add_spawn_point(-25.0, 0.0, 0.0);
        let east = sim.add_spawn_point(25.0, 0.0, 0.0);
        sim.spawn_player(1, Team::TeamA, -20.0, 0.0, 0.0);
        sim.spawn_player(2, Team::TeamB, 20.0, 0.0, 0.0);

        assert_eq!(sim.select_spawn_point_for_player(1).unwrap().id(), west);
        assert_eq!(sim.select_spawn_point_for_player(2).unwrap().id(), east);
        assert!(matches!(
            sim.select_spawn_point_for_player(9),
            Err(SpawnError::UnknownPlayer { id: 9 })
        ));
    }

    #[test]
    fn test_snapshot_json() {
        let mut sim = SpawnWorld::new_default_test_world();
        sim.select_spawn_point(Team::TeamB).unwrap();
        let json = sim.snapshot_json();
        assert!(json.contains("spawn_points"));
        assert!(json.contains("TeamA"));
        assert!(json.contains("OnCooldown"));
    }
}
