//! Randomized train/test partitioning

use crate::core::{Dataset, LogitError, Result};
use crate::data::InMemoryDataset;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Disjoint training and test partitions of one dataset
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: InMemoryDataset,
    pub test: InMemoryDataset,
}

/// Shuffle `0..n` and cut it into (train, test) index lists.
///
/// The test partition takes `ceil(test_size * n)` indices and the training
/// partition the remainder; both must end up non-empty.
pub fn split_indices<R: Rng + ?Sized>(
    n: usize,
    test_size: f64,
    rng: &mut R,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if n == 0 {
        return Err(LogitError::EmptyDataset);
    }
    if test_size.is_nan() || test_size <= 0.0 || test_size >= 1.0 {
        return Err(LogitError::InvalidParameter(format!(
            "Test size must be between 0 and 1, got: {test_size}"
        )));
    }

    let n_test = (test_size * n as f64).ceil() as usize;
    if n_test >= n {
        return Err(LogitError::InvalidParameter(format!(
            "Test size {test_size} leaves no training samples out of {n}"
        )));
    }

    let mut permutation: Vec<usize> = (0..n).collect();
    permutation.shuffle(rng);

    let train = permutation.split_off(n_test);
    Ok((train, permutation))
}

/// Split a dataset into training and test partitions.
///
/// Without a seed the shuffle is drawn from OS entropy, so every call
/// yields a different partition.
pub fn train_test_split<D: Dataset>(
    dataset: &D,
    test_size: f64,
    seed: Option<u64>,
) -> Result<TrainTestSplit> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let (train_indices, test_indices) = split_indices(dataset.len(), test_size, &mut rng)?;

    Ok(TrainTestSplit {
        train: InMemoryDataset::new(dataset.get_batch(&train_indices), dataset.n_classes())?,
        test: InMemoryDataset::new(dataset.get_batch(&test_indices), dataset.n_classes())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::IrisDataset;
    use std::collections::HashSet;

    #[test]
    fn test_split_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let (train, test) = split_indices(150, 0.1, &mut rng).unwrap();
        assert_eq!(train.len(), 135);
        assert_eq!(test.len(), 15);
    }

    #[test]
    fn test_split_is_a_partition() {
        let mut rng = StdRng::seed_from_u64(11);
        let (train, test) = split_indices(150, 0.1, &mut rng).unwrap();

        let train_set: HashSet<_> = train.iter().copied().collect();
        let test_set: HashSet<_> = test.iter().copied().collect();
        assert!(train_set.is_disjoint(&test_set));

        let all: HashSet<_> = train_set.union(&test_set).copied().collect();
        assert_eq!(all, (0..150).collect());
    }

    #[test]
    fn test_test_size_rounds_up() {
        let mut rng = StdRng::seed_from_u64(1);
        let (train, test) = split_indices(10, 0.25, &mut rng).unwrap();
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 7);
    }

    #[test]
    fn test_invalid_test_size() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(split_indices(150, 0.0, &mut rng).is_err());
        assert!(split_indices(150, 1.0, &mut rng).is_err());
        assert!(split_indices(150, f64::NAN, &mut rng).is_err());
        // One sample cannot feed both partitions
        assert!(split_indices(1, 0.5, &mut rng).is_err());
        assert!(matches!(
            split_indices(0, 0.1, &mut rng),
            Err(LogitError::EmptyDataset)
        ));
    }

    #[test]
    fn test_seeded_split_is_reproducible() {
        let iris = IrisDataset::load();
        let first = train_test_split(&iris, 0.1, Some(42)).unwrap();
        let second = train_test_split(&iris, 0.1, Some(42)).unwrap();

        assert_eq!(first.test.samples(), second.test.samples());
        assert_eq!(first.train.samples(), second.train.samples());
        assert_eq!(first.train.n_classes(), 3);
    }

    #[test]
    fn test_unseeded_splits_vary() {
        let iris = IrisDataset::load();
        // 15 of 150 drawn twice: identical test sets are vanishingly unlikely
        let splits: Vec<_> = (0..3)
            .map(|_| train_test_split(&iris, 0.1, None).unwrap().test.into_samples())
            .collect();
        assert!(splits[0] != splits[1] || splits[1] != splits[2]);
    }
}
