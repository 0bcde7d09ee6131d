//! Spawn selection walkthrough on the default test world.
//!
//! Run with: cargo run --example spawn_demo
//!
//! Selector decisions are logged at DEBUG level.

use squad_spawn::{SpawnWorld, Team};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    println!("=== Squad Spawn - Selection Demo ===\n");

    let mut sim = SpawnWorld::new_default_test_world();

    println!("Requesting three TeamA spawns back to back:");
    for _ in 0..3 {
        print_selection(&mut sim, Team::TeamA);
    }

    println!("\nRequesting a TeamB spawn:");
    print_selection(&mut sim, Team::TeamB);

    println!(
        "\nActive players: TeamA={} TeamB={}",
        sim.roster().active_count(Team::TeamA),
        sim.roster().active_count(Team::TeamB)
    );

    println!("\n--- TeamB pushes west ---\n");
    for i in 0..4 {
        sim.move_player(100 + i, -36.0, 0.0, -6.0 + i as f32 * 4.0);
    }
    print_selection(&mut sim, Team::TeamA);

    println!("\n--- Advancing 2 seconds so cooldowns expire ---\n");
    for _ in 0..40 {
        sim.step(0.05);
    }
    println!("t={:.2}s tick={}", sim.current_time(), sim.current_tick());
    print_selection(&mut sim, Team::TeamA);

    println!("\n=== Final State (JSON) ===\n");
    match sim.snapshot().to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("snapshot failed: {err}"),
    }
}

fn print_selection(sim: &mut SpawnWorld, team: Team) {
    match sim.select_spawn_point(team) {
        Ok(point) => {
            let pos = point.position();
            println!(
                "  {:?} -> spawn point {} at ({:.1}, {:.1}, {:.1}) friend={:.1} enemy={:.1}",
                team,
                point.id().0,
                pos.x,
                pos.y,
                pos.z,
                point.distance_to_closest_friend(),
                point.distance_to_closest_enemy()
            );
        }
        Err(err) if err.is_recoverable() => println!("  {:?} -> {} (retry later)", team, err),
        Err(err) => eprintln!("  {:?} -> {}", team, err),
    }
}
