//! Cooldown system - the time source that counts spawn point cooldowns down.

use crate::selector::SpawnPointSelector;
use bevy_ecs::prelude::*;

/// Resource containing the delta time for the current tick.
#[derive(Resource, Default)]
pub struct DeltaTime(pub f32);

/// System that advances every spawn point cooldown by the tick's delta.
pub fn spawn_cooldown_system(dt: Res<DeltaTime>, mut selector: ResMut<SpawnPointSelector>) {
    selector.tick_cooldowns(dt.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{CooldownState, Position, SpawnPointId, Team};
    use crate::config::SpawnConfig;
    use crate::roster::PlayerState;

    #[test]
    fn test_cooldown_counts_down_to_ready() {
        let mut world = World::new();
        world.insert_resource(DeltaTime(0.5));

        let mut selector = SpawnPointSelector::with_seed(SpawnConfig::new(1.0), 1).unwrap();
        selector.add_spawn_point(Position::new(5.0, 0.0, 0.0));
        let roster = vec![PlayerState::new(1, Team::TeamA, Position::default())];
        selector.select_spawn_point(Team::TeamA, &roster).unwrap();
        world.insert_resource(selector);

        let mut schedule = Schedule::default();
        schedule.add_systems(spawn_cooldown_system);

        schedule.run(&mut world);
        let point = world.resource::<SpawnPointSelector>().spawn_point(SpawnPointId(0)).unwrap();
        assert!((point.cooldown_remaining() - 0.5).abs() < 0.001);
        assert_eq!(point.state(), CooldownState::OnCooldown);

        schedule.run(&mut world);
        let point = world.resource::<SpawnPointSelector>().spawn_point(SpawnPointId(0)).unwrap();
        assert_eq!(point.state(), CooldownState::Ready);
    }
}
