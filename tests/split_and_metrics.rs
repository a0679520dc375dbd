//! Integration tests for the splitter and the accuracy scorer.

use tabbench::data::{train_test_split, Dataset};
use tabbench::error::BenchError;
use tabbench::math::{Array1, Array2};
use tabbench::metrics::accuracy;

fn make_dataset(n: usize) -> Dataset {
    let mut data = Vec::with_capacity(n * 3);
    for i in 0..n {
        data.push(i as f32);
        data.push((i as f32) * 0.5);
        data.push(((i * 7) % 5) as f32);
    }
    let x = Array2::from_shape_vec((n, 3), data).unwrap();
    let y = Array1::from_vec((0..n).map(|i| (i % 2) as u32).collect());
    Dataset::new(
        x,
        y,
        vec!["a".into(), "b".into(), "c".into()],
        vec!["neg".into(), "pos".into()],
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Splitter
// ---------------------------------------------------------------------------

#[test]
fn split_is_deterministic_for_a_fixed_seed() {
    let dataset = make_dataset(50);
    let first = train_test_split(&dataset, 0.33, 7).unwrap();
    let second = train_test_split(&dataset, 0.33, 7).unwrap();
    assert_eq!(first.train_indices, second.train_indices);
    assert_eq!(first.test_indices, second.test_indices);
    assert_eq!(first.y_test, second.y_test);
}

#[test]
fn different_seeds_give_different_partitions() {
    let dataset = make_dataset(50);
    let first = train_test_split(&dataset, 0.33, 1).unwrap();
    let second = train_test_split(&dataset, 0.33, 2).unwrap();
    assert_ne!(first.test_indices, second.test_indices);
}

#[test]
fn partitions_are_disjoint_and_cover_all_rows() {
    let dataset = make_dataset(37);
    let split = train_test_split(&dataset, 0.25, 11).unwrap();

    let mut all: Vec<usize> = split
        .train_indices
        .iter()
        .chain(split.test_indices.iter())
        .copied()
        .collect();
    all.sort_unstable();
    let expected: Vec<usize> = (0..37).collect();
    assert_eq!(all, expected, "train and test must partition the rows");

    for idx in &split.test_indices {
        assert!(!split.train_indices.contains(idx));
    }
}

#[test]
fn test_size_follows_the_fraction() {
    let dataset = make_dataset(10);
    let split = train_test_split(&dataset, 0.33, 0).unwrap();
    assert_eq!(split.n_test(), 3);
    assert_eq!(split.n_train(), 7);
    assert_eq!(split.x_test.nrows(), 3);
    assert_eq!(split.y_test.len(), 3);
}

#[test]
fn selected_rows_match_source_rows() {
    let dataset = make_dataset(20);
    let split = train_test_split(&dataset, 0.3, 3).unwrap();
    for (pos, &idx) in split.test_indices.iter().enumerate() {
        assert_eq!(split.x_test.row_slice(pos), dataset.x.row_slice(idx));
        assert_eq!(split.y_test[pos], dataset.y[idx]);
    }
}

#[test]
fn invalid_fractions_are_config_errors() {
    let dataset = make_dataset(10);
    for bad in [0.0_f32, 1.0, -0.2, 1.5] {
        match train_test_split(&dataset, bad, 0) {
            Err(BenchError::InvalidFraction(v)) => assert_eq!(v, bad),
            other => panic!("expected InvalidFraction, got {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn empty_dataset_is_an_error() {
    let x = Array2::from_shape_vec((0, 3), Vec::new()).unwrap();
    let y = Array1::from_vec(Vec::new());
    let dataset = Dataset::new(x, y, vec![], vec![]).unwrap();
    assert_eq!(
        train_test_split(&dataset, 0.5, 0).err(),
        Some(BenchError::EmptyDataset)
    );
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

#[test]
fn scorer_is_one_on_exact_match_and_zero_on_total_mismatch() {
    let truth = vec![0, 1, 1, 0, 1];
    assert_eq!(accuracy(&truth, &truth).unwrap(), 1.0);

    let flipped: Vec<u32> = truth.iter().map(|&v| 1 - v).collect();
    assert_eq!(accuracy(&flipped, &truth).unwrap(), 0.0);
}

#[test]
fn scorer_is_symmetric() {
    let a = vec![0, 1, 2, 1, 0, 2];
    let b = vec![0, 2, 2, 1, 1, 0];
    assert_eq!(accuracy(&a, &b).unwrap(), accuracy(&b, &a).unwrap());
}

#[test]
fn scorer_rejects_mismatched_lengths() {
    let a = vec![0, 1, 1];
    let b = vec![0, 1];
    assert!(matches!(
        accuracy(&a, &b),
        Err(BenchError::LengthMismatch { .. })
    ));
}

#[test]
fn scorer_counts_partial_agreement() {
    let a = vec![0, 1, 1, 0];
    let b = vec![0, 1, 0, 1];
    assert_eq!(accuracy(&a, &b).unwrap(), 0.5);
}
