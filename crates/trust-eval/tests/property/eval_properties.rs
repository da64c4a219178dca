//! Property tests for trust-eval: split invariants and percentile bounds.

use proptest::prelude::*;

use trust_eval::{percentile, precision_at_percentiles, StratifiedShuffleSplit};

proptest! {
    #[test]
    fn prop_split_is_a_stratified_partition(
        counts in prop::collection::vec(2usize..30, 1..5),
        test_size in 0.05f64..0.5,
        seed in any::<u64>(),
    ) {
        let labels: Vec<usize> = counts
            .iter()
            .enumerate()
            .flat_map(|(label, &n)| std::iter::repeat(label).take(n))
            .collect();
        let n = labels.len();
        let n_test = (test_size * n as f64).ceil() as usize;
        prop_assume!(n_test <= n - counts.len());

        let splits = StratifiedShuffleSplit::new(2, test_size, seed).split(&labels).unwrap();
        for split in splits {
            prop_assert_eq!(split.test.len(), n_test);
            let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
            all.sort_unstable();
            prop_assert_eq!(all, (0..n).collect::<Vec<_>>());
            for (label, &count) in counts.iter().enumerate() {
                let in_train = split.train.iter().filter(|&&i| labels[i] == label).count();
                prop_assert!(in_train >= 1);
                let in_test = count - in_train;
                let quota = n_test as f64 * count as f64 / n as f64;
                prop_assert!(in_test as f64 >= quota.floor().min((count - 1) as f64));
            }
        }
    }

    #[test]
    fn prop_percentile_lies_within_data(
        values in prop::collection::vec(-1e6f64..1e6, 1..100),
        q in 0.0f64..=100.0,
    ) {
        let p = percentile(&values, q).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(p >= min - 1e-6 && p <= max + 1e-6);
    }

    #[test]
    fn prop_precision_is_a_fraction(
        rows in prop::collection::vec((-10.0f64..10.0, any::<bool>()), 1..80),
        q in 0.0f64..=100.0,
        predict_correct in any::<bool>(),
    ) {
        let (scores, targets): (Vec<f64>, Vec<bool>) = rows.into_iter().unzip();
        let out = precision_at_percentiles(&[scores], &targets, &[q], predict_correct).unwrap();
        let precision = out[0].as_ref().unwrap()[0];
        prop_assert!((0.0..=1.0).contains(&precision));
    }
}
