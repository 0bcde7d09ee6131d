use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use squad_spawn::{PlayerState, Position, SpawnConfig, SpawnPointSelector, Team};

fn grid_points(count: usize) -> Vec<Position> {
    let side = (count as f32).sqrt().ceil() as usize;
    (0..count)
        .map(|i| Position::new((i % side) as f32 * 6.0, 0.0, (i / side) as f32 * 6.0))
        .collect()
}

fn roster(count: u32) -> Vec<PlayerState> {
    (0..count)
        .map(|i| {
            let team = if i % 2 == 0 { Team::TeamA } else { Team::TeamB };
            let x = (i * 37 % 97) as f32;
            let z = (i * 53 % 89) as f32;
            PlayerState::new(i, team, Position::new(x, 0.0, z))
        })
        .collect()
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_spawn_point");
    let players = roster(64);

    for &points in &[16usize, 128, 1024] {
        let mut selector = SpawnPointSelector::with_seed(SpawnConfig::new(0.5), 1)
            .expect("valid config")
            .with_spawn_points(grid_points(points));

        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, _| {
            b.iter(|| {
                let id = selector
                    .select_spawn_point(black_box(Team::TeamA), &players)
                    .map(|p| p.id());
                selector.tick_cooldowns(0.1);
                black_box(id)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
