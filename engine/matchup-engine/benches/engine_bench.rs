use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matchup_engine::{
    DefenseProfile, EngineConfig, MatchupEngine, PlayerWeekRecord, SituationalSplits,
};

const TEAMS: [&str; 32] = [
    "ARI", "ATL", "BAL", "BUF", "CAR", "CHI", "CIN", "CLE", "DAL", "DEN", "DET", "GB", "HOU",
    "IND", "JAX", "KC", "LAC", "LAR", "LV", "MIA", "MIN", "NE", "NO", "NYG", "NYJ", "PHI", "PIT",
    "SEA", "SF", "TB", "TEN", "WAS",
];

fn bench_weekly_board(c: &mut Criterion) {
    let defenses = create_defenses();
    let players = create_players(2000);

    let engine = MatchupEngine::new(EngineConfig::default()).unwrap();
    c.bench_function("weekly_board_2000", |b| {
        b.iter(|| black_box(engine.run(black_box(&players), black_box(&defenses))))
    });
}

fn bench_weekly_board_tuned(c: &mut Criterion) {
    let defenses = create_defenses();
    let players = create_players(2000);

    let mut config = EngineConfig::default();
    config.ratios.regression_k = Some(20.0);
    config.blend.deviation_boost = 0.25;
    let engine = MatchupEngine::new(config).unwrap();
    c.bench_function("weekly_board_2000_regressed_deviation", |b| {
        b.iter(|| black_box(engine.run(black_box(&players), black_box(&defenses))))
    });

    let parallel =
        MatchupEngine::new(EngineConfig { parallel: true, ..engine.config().clone() }).unwrap();
    c.bench_function("weekly_board_2000_parallel", |b| {
        b.iter(|| black_box(parallel.run(black_box(&players), black_box(&defenses))))
    });
}

fn create_defenses() -> HashMap<String, DefenseProfile> {
    TEAMS
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let f = i as f64;
            let profile = DefenseProfile::from_percentages(
                *team,
                20.0 + f,
                80.0 - f,
                40.0 + (f * 0.5),
                45.0 - (f * 0.5),
                15.0,
                18.0 + (f % 10.0) * 2.0,
            );
            (team.to_string(), profile)
        })
        .collect()
}

fn create_players(n: usize) -> Vec<PlayerWeekRecord> {
    (0..n)
        .map(|i| {
            let base = 0.8 + (i % 25) as f64 * 0.1;
            let wobble = ((i % 9) as f64 - 4.0) * 0.08;
            let record = PlayerWeekRecord::new(
                format!("Receiver {i}"),
                TEAMS[i % TEAMS.len()],
                TEAMS[(i * 7 + 3) % TEAMS.len()],
                base,
                (50 + (i * 37) % 600) as u32,
            )
            .with_splits(SituationalSplits {
                man: Some(base * (1.0 + wobble)),
                zone: Some(base * (1.0 - wobble)),
                one_high: Some(base * (1.0 + wobble / 2.0)),
                two_high: Some(base * (1.0 - wobble / 2.0)),
                zero_high: Some(base * (1.0 + wobble * 1.5)),
            });
            if i % 4 == 0 {
                record
            } else {
                record.with_blitz(base * (1.0 - wobble))
            }
        })
        .collect()
}

criterion_group!(benches, bench_weekly_board, bench_weekly_board_tuned);
criterion_main!(benches);
