use proptest::prelude::*;
use sliding_window::SlidingWindow;
use window_stats::{
    classify, standard_deviation, ActivityThresholds, ActivityTier, Aggregator,
    RelationshipAnalyzer, RelationshipResult, RelationshipStrategy, StatsError,
};

fn filled(values: impl IntoIterator<Item = f64>) -> SlidingWindow {
    let mut window = SlidingWindow::with_default_capacity();
    for v in values {
        window.push(v).unwrap();
    }
    window
}

#[test]
fn ascending_pushes_aggregate_in_window_order() {
    let window = filled((1..=12).map(|v| v as f64));
    let snapshot = window.snapshot();
    assert_eq!(snapshot[0], 12.0);

    let aggregator = Aggregator::new(window.capacity()).unwrap();
    let medium = aggregator.aggregate(ActivityTier::Medium, &snapshot).unwrap();
    assert_eq!(medium.values, vec![10.5, 6.5, 2.5]);

    let low = aggregator.aggregate(ActivityTier::Low, &snapshot).unwrap();
    assert_eq!(low.values, vec![6.5]);
}

#[test]
fn calm_light_levels_compress_to_one_value() {
    let window = filled([
        400.0, 410.0, 395.0, 402.0, 398.0, 405.0, 401.0, 399.0, 400.0, 403.0, 397.0, 400.0,
    ]);
    let snapshot = window.snapshot();
    let deviation = standard_deviation(&snapshot);
    let tier = ActivityThresholds::default().classify(deviation);

    assert_eq!(tier, ActivityTier::Low);
    let aggregation = Aggregator::new(12).unwrap().aggregate(tier, &snapshot).unwrap();
    assert_eq!(aggregation.values.len(), 1);
}

#[test]
fn regression_over_parallel_windows() {
    let light = filled((1..=12).map(|v| v as f64 * 100.0));
    let temp = filled((1..=12).map(|v| v as f64 * 0.5 + 20.0));

    let analyzer = RelationshipAnalyzer::new(RelationshipStrategy::Regression);
    let result = analyzer.analyze(&light.snapshot(), &temp.snapshot()).unwrap();

    match result {
        Some(RelationshipResult::Regression(fit)) => {
            assert!((fit.slope - 0.005).abs() < 1e-9);
            assert!((fit.intercept - 20.0).abs() < 1e-9);
            assert!(fit.mean_squared_error < 1e-9);
        }
        other => panic!("expected regression, got {:?}", other),
    }
}

#[test]
fn constant_temperature_is_degenerate() {
    let light = filled((1..=12).map(|v| v as f64));
    let temp = filled(std::iter::repeat(22.0).take(12));

    let analyzer = RelationshipAnalyzer::new(RelationshipStrategy::Correlation);
    assert!(matches!(
        analyzer.analyze(&light.snapshot(), &temp.snapshot()),
        Err(StatsError::DegenerateInput(_))
    ));
}

#[test]
fn results_serialize_with_kind_tag() {
    let result = RelationshipResult::Correlation { coefficient: 0.5 };
    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["kind"], "correlation");
    assert_eq!(json["coefficient"], 0.5);
}

proptest! {
    #[test]
    fn classify_is_monotonic(a in 0.0f64..10_000.0, b in 0.0f64..10_000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let rank = |t: ActivityTier| match t {
            ActivityTier::Low => 0,
            ActivityTier::Medium => 1,
            ActivityTier::High => 2,
        };
        prop_assert!(rank(classify(lo, 1000.0, 3000.0)) <= rank(classify(hi, 1000.0, 3000.0)));
    }

    #[test]
    fn correlation_stays_in_range(
        pairs in prop::collection::vec((-1.0e4f64..1.0e4, -1.0e4f64..1.0e4), 12),
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        if let Ok(r) = window_stats::pearson_correlation(&x, &y) {
            prop_assert!(r.is_finite());
            prop_assert!(r.abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn std_dev_is_shift_invariant(
        values in prop::collection::vec(-1.0e3f64..1.0e3, 12),
        shift in -1.0e3f64..1.0e3,
    ) {
        let shifted: Vec<f64> = values.iter().map(|v| v + shift).collect();
        let delta = (standard_deviation(&values) - standard_deviation(&shifted)).abs();
        prop_assert!(delta < 1e-6);
    }
}
