//! Dataset compatibility tests
//!
//! Checks the bundled Iris records against well known summary statistics and
//! makes sure the dataset types work interchangeably across the pipeline.

use approx::assert_abs_diff_eq;
use rlogit::data::{train_test_split, FEATURE_NAMES, N_CLASSES, N_FEATURES};
use rlogit::utils::scaling::{ScalingMethod, ScalingParams};
use rlogit::utils::stats::{class_counts, class_mean};
use rlogit::utils::validation::{check_class_balance, validate_finite_features, validate_labels};
use rlogit::{api::LogisticRegression, Dataset, InMemoryDataset, IrisDataset, Species};

fn feature_means(dataset: &IrisDataset) -> Vec<f64> {
    let mut sums = vec![0.0; dataset.dim()];
    for sample in dataset.samples() {
        for (sum, value) in sums.iter_mut().zip(sample.features.as_slice()) {
            *sum += value;
        }
    }
    sums.into_iter().map(|s| s / dataset.len() as f64).collect()
}

#[test]
fn test_iris_shape() {
    let iris = IrisDataset::load();

    assert_eq!(iris.len(), 150);
    assert_eq!(iris.dim(), N_FEATURES);
    assert_eq!(iris.n_classes(), N_CLASSES);
    assert!(!iris.is_empty());
    assert!(validate_labels(&iris).is_ok());
    assert!(validate_finite_features(iris.samples()).is_ok());
}

#[test]
fn test_iris_overall_means() {
    let means = feature_means(&IrisDataset::load());
    let expected = [5.843333, 3.057333, 3.758, 1.199333];

    for (mean, expected) in means.iter().zip(expected) {
        assert_abs_diff_eq!(*mean, expected, epsilon = 1e-5);
    }
}

#[test]
fn test_iris_class_means() {
    let iris = IrisDataset::load();
    let expected = [
        [5.006, 3.428, 1.462, 0.246],
        [5.936, 2.770, 4.260, 1.326],
        [6.588, 2.974, 5.552, 2.026],
    ];

    for (class, expected) in expected.iter().enumerate() {
        let mean = class_mean(iris.samples(), class).expect("class is present");
        for (value, want) in mean.as_slice().iter().zip(expected) {
            assert_abs_diff_eq!(*value, *want, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_iris_value_ranges() {
    let iris = IrisDataset::load();
    let expected = [(4.3, 7.9), (2.0, 4.4), (1.0, 6.9), (0.1, 2.5)];

    for (j, (lo, hi)) in expected.into_iter().enumerate() {
        let column: Vec<f64> = iris.samples().iter().map(|s| s.features.get(j)).collect();
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!((min, max), (lo, hi), "range of {}", FEATURE_NAMES[j]);
    }
}

#[test]
fn test_iris_class_balance() {
    let iris = IrisDataset::load();

    let (counts, ratio) = check_class_balance(&iris);
    assert_eq!(counts, vec![50, 50, 50]);
    assert_eq!(ratio, 1.0);

    // Records are grouped by species
    let labels = iris.get_labels();
    assert!(labels[..50].iter().all(|&l| l == 0));
    assert!(labels[50..100].iter().all(|&l| l == 1));
    assert!(labels[100..].iter().all(|&l| l == 2));
}

#[test]
fn test_iris_names() {
    assert_eq!(
        IrisDataset::target_names(),
        ["setosa", "versicolor", "virginica"]
    );
    assert_eq!(
        IrisDataset::feature_names(),
        [
            "sepal length (cm)",
            "sepal width (cm)",
            "petal length (cm)",
            "petal width (cm)"
        ]
    );
    for (index, species) in Species::ALL.into_iter().enumerate() {
        assert_eq!(species.index(), index);
        assert_eq!(Species::from_index(index).unwrap(), species);
    }
    assert!(Species::from_index(3).is_err());
}

#[test]
fn test_split_preserves_records() {
    let iris = IrisDataset::load();
    let split = train_test_split(&iris, 0.1, Some(17)).unwrap();

    let mut all: Vec<Vec<f64>> = split
        .train
        .samples()
        .iter()
        .chain(split.test.samples())
        .map(|s| {
            let mut row = s.features.as_slice().to_vec();
            row.push(s.label as f64);
            row
        })
        .collect();
    let mut original: Vec<Vec<f64>> = iris
        .samples()
        .iter()
        .map(|s| {
            let mut row = s.features.as_slice().to_vec();
            row.push(s.label as f64);
            row
        })
        .collect();

    let by_value = |a: &Vec<f64>, b: &Vec<f64>| a.partial_cmp(b).unwrap();
    all.sort_by(by_value);
    original.sort_by(by_value);
    assert_eq!(all, original);

    let test_counts = class_counts(&split.test.get_labels(), N_CLASSES);
    assert_eq!(test_counts.iter().sum::<usize>(), 15);
}

#[test]
fn test_in_memory_copy_trains_like_iris() {
    let iris = IrisDataset::load();
    let copy = InMemoryDataset::new(iris.samples().to_vec(), N_CLASSES).unwrap();

    let a = LogisticRegression::new().train(&iris).unwrap();
    let b = LogisticRegression::new().train(&copy).unwrap();

    assert_eq!(a.info().iterations, b.info().iterations);
    for class in 0..N_CLASSES {
        assert_eq!(a.inner().weights(class), b.inner().weights(class));
    }
}

#[test]
fn test_scaling_on_iris() {
    let iris = IrisDataset::load();

    let params = ScalingParams::fit(iris.samples(), ScalingMethod::StandardScore);
    let scaled = params.transform_samples(iris.samples());
    for j in 0..N_FEATURES {
        let mean = scaled.iter().map(|s| s.features.get(j)).sum::<f64>() / scaled.len() as f64;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-9);
    }

    let params = ScalingParams::fit(
        iris.samples(),
        ScalingMethod::MinMax {
            min_val: -1.0,
            max_val: 1.0,
        },
    );
    let scaled = params.transform_samples(iris.samples());
    for sample in &scaled {
        for &value in sample.features.as_slice() {
            assert!((-1.0 - 1e-12..=1.0 + 1e-12).contains(&value));
        }
    }
}
