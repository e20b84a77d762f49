//! Integration tests for the sliding-window evaluator
//!
//! Drives the public API the way the gateway does: one evaluator, many
//! sensors, values arriving one at a time.

mod common;

use veleroguard_core::{AnomalyDetector, AnomalyEvaluator, DetectorConfig, Regime};

use common::{evaluate_all, SignalGenerator, VIBRATION_SPIKE};

#[test]
fn test_window_length_tracks_evaluation_count() {
    let evaluator = AnomalyEvaluator::default();
    let mut generator = SignalGenerator::new(42);

    for k in 1..=45 {
        let value = generator.sample(4.5, 0.15);
        evaluator.evaluate("mast", value);
        assert_eq!(evaluator.store().window_len("mast"), Some(k.min(20)));
    }
}

#[test]
fn test_simulator_scenario_flags_only_the_spike() {
    // baseline phase, normal phase, injected anomaly
    let evaluator = AnomalyEvaluator::default();
    let mut generator = SignalGenerator::new(7);
    let mut values = generator.vibration_series(20);
    values.push(VIBRATION_SPIKE);

    let results = evaluate_all(&evaluator, "mast_accelerometer_01", &values);

    let (spike, healthy) = results.split_last().unwrap();
    assert!(spike.is_anomaly);
    assert!(spike.z_score.unwrap() > 100.0);
    assert!(healthy.iter().all(|r| !r.is_anomaly));
}

#[test]
fn test_constant_sensor_never_flags() {
    let evaluator = AnomalyEvaluator::default();
    let results = evaluate_all(&evaluator, "bilge", &[2.75; 30]);

    for (i, result) in results.iter().enumerate() {
        assert!(!result.is_anomaly);
        assert_eq!(result.z_score, None);
        if i >= 5 {
            assert_eq!(result.std_dev, Some(0.0));
            assert_eq!(result.mean, Some(2.75));
        }
    }
    assert_eq!(evaluator.regime("bilge"), Regime::Flat);
}

#[test]
fn test_flat_then_spike_is_absorbed_then_caught() {
    let evaluator = AnomalyEvaluator::default();
    evaluate_all(&evaluator, "mast", &[4.5; 5]);

    // first deviation after a flat window is never caught
    let first = evaluator.evaluate("mast", 60.0);
    assert!(!first.is_anomaly);

    // once the window has spread, the next spike is judged normally
    let second = evaluator.evaluate("mast", 600.0);
    assert!(second.z_score.is_some());
    assert!(second.is_anomaly);
}

#[test]
fn test_order_sensitivity() {
    let values = [4.4, 4.6, 4.5, 4.4, 4.6, 60.0];

    let forward = AnomalyEvaluator::default();
    let forward_results = evaluate_all(&forward, "mast", &values);

    let mut reordered = values;
    reordered.rotate_right(1); // spike arrives first
    let backward = AnomalyEvaluator::default();
    let backward_results = evaluate_all(&backward, "mast", &reordered);

    assert!(forward_results.iter().any(|r| r.is_anomaly));
    assert!(backward_results.iter().all(|r| !r.is_anomaly));
}

#[test]
fn test_twenty_first_value_evicts_oldest() {
    let evaluator = AnomalyEvaluator::default();
    let values: Vec<f64> = (0..21).map(|i| i as f64).collect();
    evaluate_all(&evaluator, "mast", &values);

    let snapshot = evaluator.snapshot_all();
    let expected: Vec<f64> = (1..21).map(|i| i as f64).collect();
    assert_eq!(snapshot["mast"], expected);
}

#[test]
fn test_snapshot_through_detector_trait() {
    let detector: Box<dyn AnomalyDetector> = Box::new(AnomalyEvaluator::default());
    detector.evaluate("keel", 1.0);
    detector.evaluate("mast", 2.0);
    detector.evaluate("mast", 3.0);

    let snapshot = detector.snapshot_all();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot["mast"], vec![2.0, 3.0]);
    assert_eq!(snapshot, detector.snapshot_all());
}

#[test]
fn test_smaller_window_configuration() {
    let config = DetectorConfig::new().window_capacity(6).warmup_samples(5);
    let evaluator = AnomalyEvaluator::new(config);
    evaluate_all(&evaluator, "mast", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

    assert_eq!(evaluator.snapshot_all()["mast"], vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
}
