use criterion::{criterion_group, criterion_main, Criterion};
use quiver::config::ScoringConfiguration;
use quiver::scorer::{RawArrow, ScoreAggregate};
use std::hint::black_box;

fn setup_session(rng: &mut fastrand::Rng) -> ScoreAggregate {
    let config = ScoringConfiguration::new(6, 20, 10, 10).expect("Failed to build config");
    let mut aggregate = ScoreAggregate::new(config).expect("Failed to build session");

    for _ in 0..aggregate.config().total_arrows() {
        let arrow = match rng.u32(0..=11) {
            11 => RawArrow::X,
            0 => RawArrow::Miss,
            p => RawArrow::Points(p),
        };
        aggregate.record_next(arrow).expect("Failed to record arrow");
    }
    aggregate
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = fastrand::Rng::with_seed(7);
    let mut session = setup_session(&mut rng);

    c.bench_function("record_arrow (20 ends x 6)", |b| {
        b.iter(|| {
            let end = rng.u32(1..=20);
            let slot = rng.usize(0..6);
            session
                .record_arrow(black_box(end), black_box(slot), RawArrow::Points(9))
                .map(|e| e.end_score())
        })
    });

    let complete = setup_session(&mut rng);
    c.bench_function("statistics (120 arrows)", |b| {
        b.iter(|| black_box(&complete).statistics())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
