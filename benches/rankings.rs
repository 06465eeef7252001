use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use nhl_clutch::clutch_rankings::compute_clutch_rankings;
use nhl_clutch::splits::{GoalieSplits, SplitKind, SplitRow};

fn synthetic_row(idx: usize, toi: f64, gsax: f64) -> SplitRow {
    SplitRow {
        player: format!("Goalie {idx:03}"),
        team: "SYN".to_string(),
        games_played: 20 + (idx % 45) as u32,
        toi_minutes: toi,
        save_pct: 0.880 + (idx % 40) as f64 * 0.001,
        gsax,
    }
}

/// Roughly a full league's worth of goalies, everyone present in every
/// split. Deterministic so runs are comparable.
fn synthetic_splits(goalies: usize) -> GoalieSplits {
    let anchor = (0..goalies)
        .map(|i| synthetic_row(i, 1200.0 + (i % 30) as f64 * 80.0, (i % 21) as f64 - 10.0))
        .collect();
    let mut splits = GoalieSplits::new(anchor);

    for kind in SplitKind::ALL {
        if kind == SplitKind::RegularAll {
            continue;
        }
        let rows = (0..goalies)
            .map(|i| synthetic_row(i, 60.0 + (i % 12) as f64 * 25.0, (i % 9) as f64 - 4.0))
            .collect();
        splits.insert_split(kind, rows);
    }
    splits
}

fn bench_rankings_compute(c: &mut Criterion) {
    let splits = synthetic_splits(100);
    c.bench_function("clutch_rankings_compute_100", |b| {
        b.iter(|| {
            let rows = compute_clutch_rankings(black_box(&splits));
            black_box(rows.len());
        })
    });
}

criterion_group!(benches, bench_rankings_compute);
criterion_main!(benches);
