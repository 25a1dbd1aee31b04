mod common;

use common::{config, scored, shoot};
use quiver::config::RuleSet;
use quiver::error::QuiverError;
use quiver::scorer::metrics::{is_ten_plus, unscored_arrows};
use quiver::scorer::{compute_statistics, EndExtreme, ScoreAggregate};

const EPS: f64 = 1e-9;

#[test]
fn test_statistics_for_two_end_session() {
    let agg = scored(config(3, 2, 10, 10), &[&["10", "9", "X"], &["M", "5", "5"]]);
    let stats = agg.statistics().unwrap();

    assert_eq!(stats.total_score, 39);
    assert_eq!(stats.max_possible, 60);
    assert_eq!(stats.x_count, 1);
    assert_eq!(stats.ten_plus_count, 2);
    assert_eq!(stats.miss_count, 1);
    assert!((stats.average_per_arrow - 6.5).abs() < EPS);
    assert!((stats.average_per_end - 19.5).abs() < EPS);
    assert!((stats.end_standard_deviation - 9.5).abs() < EPS);
    assert!((stats.percentage() - 65.0).abs() < EPS);

    assert_eq!(stats.best_end, EndExtreme { end_number: 1, value: 29 });
    assert_eq!(stats.worst_end, EndExtreme { end_number: 2, value: 10 });

    let series: Vec<(u32, u32)> = stats.end_series.iter().map(|e| (e.end_number, e.total)).collect();
    assert_eq!(series, vec![(1, 29), (2, 10)]);
    let cumulative: Vec<(u32, u32)> = stats
        .cumulative_series
        .iter()
        .map(|c| (c.end_number, c.cumulative))
        .collect();
    assert_eq!(cumulative, vec![(1, 29), (2, 39)]);

    let dist = &stats.distribution;
    assert_eq!(dist.get("X"), Some(1));
    assert_eq!(dist.get("10"), Some(1));
    assert_eq!(dist.get("9"), Some(1));
    assert_eq!(dist.get("5"), Some(2));
    assert_eq!(dist.get("M"), Some(1));
    assert_eq!(dist.get("8"), Some(0));
    assert_eq!(dist.total(), 6);
}

#[test]
fn test_statistics_json_shape() {
    let agg = scored(config(3, 2, 10, 10), &[&["10", "9", "X"], &["M", "5", "5"]]);
    let json = serde_json::to_string(&agg.statistics().unwrap()).unwrap();

    assert!(json.contains("\"totalScore\":39"));
    assert!(json.contains("\"maxPossible\":60"));
    assert!(json.contains("\"bestEnd\":{\"endNumber\":1,\"value\":29}"));
    assert!(json.contains("\"distribution\":{\"X\":1,\"10\":1,\"9\":1,\"8\":0"));
    assert!(json.contains("\"M\":1}"));
}

#[test]
fn test_statistics_not_ready_with_open_slot() {
    let mut agg = scored(
        config(3, 3, 10, 10),
        &[&["9", "9", "9"], &["8", "8", "8"], &["7", "7"]],
    );

    let err = agg.statistics().unwrap_err();
    assert!(err.is_not_ready());
    match err {
        QuiverError::NotReady { missing, total } => {
            assert_eq!(missing, 1);
            assert_eq!(total, 9);
        }
        other => panic!("expected NotReady, got {:?}", other),
    }

    shoot(&mut agg, 3, &["7", "7", "7"]);
    assert!(agg.statistics().is_ok());
}

#[test]
fn test_statistics_not_ready_when_ends_are_missing() {
    let cfg = config(2, 3, 10, 10);
    let agg = scored(cfg.clone(), &[&["9", "9"], &["9", "9"], &["9", "9"]]);

    let partial: Vec<_> = agg.ends()[..2].to_vec();
    assert_eq!(unscored_arrows(&cfg, &partial), 2);
    assert!(compute_statistics(&cfg, &partial).unwrap_err().is_not_ready());
}

#[test]
fn test_fresh_session_is_not_ready() {
    let agg = ScoreAggregate::new(config(3, 10, 10, 10)).unwrap();
    match agg.statistics() {
        Err(QuiverError::NotReady { missing, total }) => {
            assert_eq!(missing, 30);
            assert_eq!(total, 30);
        }
        other => panic!("expected NotReady, got {:?}", other),
    }
}

#[test]
fn test_best_and_worst_ties_go_to_the_earliest_end() {
    let agg = scored(
        config(3, 3, 10, 10),
        &[&["10", "9", "9"], &["10", "10", "10"], &["9", "9", "10"]],
    );
    let stats = agg.statistics().unwrap();

    assert_eq!(stats.best_end, EndExtreme { end_number: 2, value: 30 });
    assert_eq!(stats.worst_end, EndExtreme { end_number: 1, value: 28 });
}

#[test]
fn test_uniform_ends_have_zero_spread() {
    let agg = scored(config(2, 3, 10, 10), &[&["8", "8"], &["9", "7"], &["X", "6"]]);
    let stats = agg.statistics().unwrap();

    assert!(stats.end_standard_deviation.abs() < EPS);
    assert_eq!(stats.best_end.end_number, 1);
    assert_eq!(stats.worst_end.end_number, 1);
}

#[test]
fn test_lancaster_ten_plus_counts_x_and_plain_ten() {
    let cfg = config(3, 1, 10, 11);
    let agg = scored(cfg.clone(), &[&["X", "10", "9"]]);
    let stats = agg.statistics().unwrap();

    assert_eq!(stats.total_score, 30);
    assert_eq!(stats.max_possible, 33);
    assert_eq!(stats.x_count, 1);
    assert_eq!(stats.ten_plus_count, 2);

    assert!(is_ten_plus(&cfg, 11));
    assert!(is_ten_plus(&cfg, 10));
    assert!(!is_ten_plus(&cfg, 9));
}

#[test]
fn test_ten_plus_follows_max_score_on_small_faces() {
    let cfg = RuleSet::Nfaa300.config();
    assert!(is_ten_plus(&cfg, 5));
    assert!(!is_ten_plus(&cfg, 4));
}

#[test]
fn test_asa_distribution_labels() {
    let mut agg = ScoreAggregate::new(RuleSet::Asa3d.config()).unwrap();
    let values = [14, 12, 12, 10, 8, 5, 0, 14, 12, 10, 8, 5, 12, 12, 10, 10, 8, 8, 5, 14];
    for (i, v) in values.iter().enumerate() {
        agg.record_arrow(i as u32 + 1, 0, quiver::scorer::RawArrow::Points(*v))
            .unwrap();
    }
    agg.record_arrow(20, 0, quiver::scorer::RawArrow::X).unwrap();

    let stats = agg.statistics().unwrap();
    let labels: Vec<&str> = stats.distribution.iter().map(|(l, _)| l).collect();
    assert_eq!(labels, vec!["X", "14", "12", "10", "8", "5", "M"]);

    assert_eq!(stats.distribution.get("X"), Some(1));
    assert_eq!(stats.distribution.get("14"), Some(2));
    assert_eq!(stats.distribution.get("M"), Some(1));
    assert_eq!(stats.x_count, 1);
    assert_eq!(stats.ten_plus_count, 3);
    assert_eq!(stats.max_possible, 20 * 14);
}

#[test]
fn test_statistics_reject_ends_of_the_wrong_shape() {
    let three_arrows = config(3, 1, 10, 10);

    let short = scored(config(2, 1, 10, 10), &[&["9", "9"]]);
    let err = compute_statistics(&three_arrows, short.ends()).unwrap_err();
    assert!(err.is_invalid_input(), "got {:?}", err);
    assert_eq!(unscored_arrows(&three_arrows, short.ends()), 1);

    let long = scored(config(4, 1, 10, 10), &[&["9", "9", "9", "9"]]);
    assert!(compute_statistics(&three_arrows, long.ends())
        .unwrap_err()
        .is_invalid_input());
}

#[test]
fn test_statistics_reject_duplicate_end_numbers() {
    let cfg = config(3, 2, 10, 10);
    let agg = scored(cfg.clone(), &[&["9", "9", "9"], &["8", "8", "8"]]);

    let mut ends = agg.ends().to_vec();
    ends.push(agg.ends()[0].clone());
    assert!(compute_statistics(&cfg, &ends).unwrap_err().is_invalid_input());
}
