//! Property-based tests for pipeline invariants.

use nb_core::{
    estimate_likelihood, estimate_prior, index_by_label, predict, BernoulliNb, Dataset,
    MultinomialNb, MultinomialParams,
};
use proptest::prelude::*;

/// Binary samples of one width with labels drawn from three classes.
fn binary_dataset() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<u8>)> {
    (1usize..8, 1usize..30).prop_flat_map(|(width, n)| {
        (
            prop::collection::vec(prop::collection::vec(0u8..=1, width), n),
            prop::collection::vec(0u8..3, n),
        )
    })
}

fn count_rows() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<u8>)> {
    (1usize..6, 2usize..25).prop_flat_map(|(width, n)| {
        (
            prop::collection::vec(prop::collection::vec(0u8..6, width), n),
            prop::collection::vec(0u8..2, n),
        )
            .prop_map(|(rows, labels)| {
                let rows = rows
                    .into_iter()
                    .map(|row| row.into_iter().map(f64::from).collect())
                    .collect();
                (rows, labels)
            })
    })
}

proptest! {
    #[test]
    fn index_is_disjoint_cover((_, labels) in binary_dataset()) {
        let index = index_by_label(&labels);
        let mut seen: Vec<usize> = index.values().flatten().copied().collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..labels.len()).collect::<Vec<_>>());
        for (label, positions) in index.iter() {
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(positions.iter().all(|&i| labels[i] == *label));
        }
    }

    #[test]
    fn prior_sums_to_one((_, labels) in binary_dataset()) {
        let prior = estimate_prior(&index_by_label(&labels)).unwrap();
        let total: f64 = prior.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-12);
        prop_assert!(prior.values().all(|&p| p > 0.0 && p <= 1.0));
    }

    #[test]
    fn smoothed_likelihood_is_strictly_inside_unit_interval(
        (samples, labels) in binary_dataset(),
        smoothing in 0.01f64..5.0,
    ) {
        let index = index_by_label(&labels);
        let likelihood = estimate_likelihood(&samples, &index, smoothing).unwrap();
        for (_, probs) in likelihood.iter() {
            prop_assert_eq!(probs.len(), samples[0].len());
            prop_assert!(probs.iter().all(|&p| p > 0.0 && p < 1.0));
        }
    }

    #[test]
    fn posteriors_are_distributions(
        (samples, labels) in binary_dataset(),
        smoothing in 0.1f64..3.0,
    ) {
        let index = index_by_label(&labels);
        let prior = estimate_prior(&index).unwrap();
        let likelihood = estimate_likelihood(&samples, &index, smoothing).unwrap();

        let posteriors = predict(&samples, &prior, &likelihood).unwrap();
        prop_assert_eq!(posteriors.len(), samples.len());
        for posterior in &posteriors {
            let labels_in_order: Vec<&u8> = posterior.labels().collect();
            let prior_order: Vec<&u8> = prior.labels().collect();
            prop_assert_eq!(labels_in_order, prior_order);
            let total: f64 = posterior.values().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
            prop_assert!(posterior.values().all(|&p| (0.0..=1.0).contains(&p)));
        }

        // Pure function of its inputs.
        prop_assert_eq!(posteriors, predict(&samples, &prior, &likelihood).unwrap());
    }

    #[test]
    fn bernoulli_prediction_is_posterior_argmax(
        (samples, labels) in binary_dataset(),
        smoothing in 0.1f64..3.0,
    ) {
        let dataset = Dataset::new(samples.clone(), labels).unwrap();
        let model = BernoulliNb::fit(&dataset, smoothing).unwrap();
        let posteriors = model.predict_proba(&samples).unwrap();
        let predicted = model.predict(&samples).unwrap();
        for (posterior, label) in posteriors.iter().zip(&predicted) {
            let best = posterior.values().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert_eq!(posterior.get(label).copied(), Some(best));
        }
    }

    #[test]
    fn multinomial_rows_sum_to_one(
        (rows, labels) in count_rows(),
        alpha in 0.1f64..3.0,
    ) {
        let params = MultinomialParams { alpha, ..MultinomialParams::default() };
        let model = MultinomialNb::fit(&rows, &labels, params).unwrap();
        for row in model.predict_proba(&rows).unwrap() {
            prop_assert_eq!(row.len(), model.classes().len());
            let total: f64 = row.iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }
        for probs in model.feature_log_prob() {
            let total: f64 = probs.iter().map(|lp| lp.exp()).sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }
    }
}
