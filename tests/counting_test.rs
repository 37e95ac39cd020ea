use approx::assert_relative_eq;
use qcount::operators::{diffusion_matrix, grover_operator, oracle_matrix};
use qcount::prelude::*;

fn counter(target_qubits: usize, estimation_qubits: usize) -> QuantumCounter<f64> {
    let config = CountingConfig {
        target_qubits,
        estimation_qubits,
        ..Default::default()
    };
    QuantumCounter::new(config).unwrap()
}

#[test]
fn test_probabilities_sum_to_one() -> CountingResult<()> {
    let c = counter(4, 4);
    let sets: Vec<Vec<i64>> = vec![
        vec![],
        vec![0],
        vec![5],
        vec![0, 3, 7],
        vec![0, 1, 2, 3],
        (0..8).collect(),
        (0..15).collect(),
        (0..16).collect(),
    ];
    for marked in sets {
        let probs = c.probabilities(&marked)?;
        assert_eq!(probs.len(), 16);
        assert!(probs.iter().all(|p| *p >= 0.0));
        assert_relative_eq!(probs.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn test_all_marked_full_rotation() -> CountingResult<()> {
    let c = counter(4, 4);
    let marked = (0..16).collect::<Vec<_>>();
    let oracle = c.oracle(&marked)?;
    for i in 0..16 {
        for j in 0..16 {
            let expected = if i == j { -1.0 } else { 0.0 };
            assert_eq!(oracle.get(i, j), Complex::new(expected, 0.0));
        }
    }
    let est = c.estimate(&marked)?;
    assert_eq!(est.peak, 8);
    assert_relative_eq!(est.theta, std::f64::consts::PI);
    assert_relative_eq!(est.count, 16.0, epsilon = 1e-9);
    assert_relative_eq!(c.relative_error(&marked)?, 0.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_quarter_marked_nearest_bucket() -> CountingResult<()> {
    // M/N = 1/4 means theta = pi/3, between buckets. 16 * (1/6) = 2.67 rounds to bucket 3, or its
    // mirror 13, both giving 16 sin^2(3 pi / 16).
    let c = counter(4, 4);
    let est = c.estimate(&[0, 1, 2, 3])?;
    assert!(est.peak == 3 || est.peak == 13, "peak was {}", est.peak);
    let expected = 16.0 * (3.0 * std::f64::consts::PI / 16.0).sin().powi(2);
    assert_relative_eq!(est.count, expected, epsilon = 1e-9);
    assert!((est.count - 4.0).abs() < 1.0);
    Ok(())
}

#[test]
fn test_quarter_marked_finer_resolution() -> CountingResult<()> {
    // More estimation qubits bring the estimate closer to the true count.
    let coarse = counter(4, 4).report(&[0, 1, 2, 3])?;
    let fine = counter(4, 7).report(&[0, 1, 2, 3])?;
    assert!(fine.relative_error.abs() < coarse.relative_error.abs());
    assert!(fine.relative_error.abs() < 5.0);
    Ok(())
}

#[test]
fn test_idempotent() -> CountingResult<()> {
    let c = counter(4, 4);
    let marked = [0, 3, 7];
    let a = c.probabilities(&marked)?;
    let b = c.probabilities(&marked)?;
    assert_eq!(a, b);
    assert_eq!(c.relative_error(&marked)?, c.relative_error(&marked)?);
    Ok(())
}

#[test]
fn test_empty_marked_set_is_undefined() {
    let c = counter(4, 4);
    assert!(matches!(
        c.relative_error(&[]),
        Err(CountingError::EmptyMarkedSet)
    ));
}

#[test]
fn test_oracle_single_index_diagonal() -> CountingResult<()> {
    let c = counter(4, 4);
    for i in 0..16 {
        let diag = c.oracle(&[i])?.diagonal();
        for (j, d) in diag.iter().enumerate() {
            let expected = if i == j as i64 { -1.0 } else { 1.0 };
            assert_eq!(*d, Complex::new(expected, 0.0));
        }
    }
    Ok(())
}

#[test]
fn test_counter_matches_manual_pipeline() -> CountingResult<()> {
    let marked = [2, 9];
    let sim = Simulator::<f64>::new(4, 4)?;
    let g = grover_operator(&diffusion_matrix(4), &oracle_matrix(4, &marked))?;
    let manual = sim.estimation_probabilities(&g)?;
    let c = QuantumCounter::with_simulator(CountingConfig::default(), sim)?;
    assert_eq!(c.probabilities(&marked)?, manual);
    Ok(())
}

#[test]
fn test_other_widths() -> CountingResult<()> {
    // N = 8 with 5 bits of phase, M = 2: theta = pi/3, 32/6 = 5.33 rounds to bucket 5 or 27.
    let c = counter(3, 5);
    let est = c.estimate(&[0, 1])?;
    assert!(est.peak == 5 || est.peak == 27, "peak was {}", est.peak);
    let expected = 8.0 * (5.0 * std::f64::consts::PI / 32.0).sin().powi(2);
    assert_relative_eq!(est.count, expected, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_parsed_input_end_to_end() -> CountingResult<()> {
    let marked = parse_marked_indices("0,1,2,3,4,5,6,7\n")?;
    let err = counter(4, 4).relative_error(&marked)?;
    assert_relative_eq!(err, 0.0, epsilon = 1e-7);
    Ok(())
}

#[test]
fn test_parsed_negative_index_is_tolerated() -> CountingResult<()> {
    // -1 addresses no basis state: the oracle marks 0..8 while nine indices are counted.
    let marked = parse_marked_indices("0,1,2,3,4,5,6,7,-1\n")?;
    let err = counter(4, 4).relative_error(&marked)?;
    assert_relative_eq!(err, 100.0 * (8.0 - 9.0) / 9.0, epsilon = 1e-7);
    Ok(())
}

#[test]
fn test_parsed_negative_index_strict() -> CountingResult<()> {
    let marked = parse_marked_indices("0,-1")?;
    let config = CountingConfig {
        index_policy: IndexPolicy::Strict,
        ..Default::default()
    };
    let c = QuantumCounter::<f64>::new(config)?;
    assert!(matches!(
        c.relative_error(&marked),
        Err(CountingError::IndexOutOfRange { index: -1, size: 16 })
    ));
    Ok(())
}

#[test]
fn test_single_precision() -> CountingResult<()> {
    let config = CountingConfig {
        unitary_tolerance: 1e-4,
        ..Default::default()
    };
    let c = QuantumCounter::<f32>::new(config)?;
    let est = c.estimate(&(0..16).collect::<Vec<_>>())?;
    assert_eq!(est.peak, 8);
    assert_relative_eq!(est.count, 16.0f32, epsilon = 1e-3);
    Ok(())
}
