//! `demo`: the four-sample toy problem run through the Bernoulli pipeline.

use crate::dataset::{Dataset, Sample};
use crate::error::Result;
use crate::inference::{unnormalized_scores, LabelIndex, LabelMap, Likelihood, Posterior, Prior};
use crate::models::BernoulliNb;
use serde::Serialize;
use std::fmt;
use tracing::info;

pub type ToyLabel = &'static str;

/// Training samples `[[0,1,1],[0,0,1],[0,0,0],[1,1,0]]` labelled `Y N Y Y`.
pub fn toy_dataset() -> Result<Dataset<ToyLabel>> {
    Ok(Dataset::new(
        vec![vec![0, 1, 1], vec![0, 0, 1], vec![0, 0, 0], vec![1, 1, 0]],
        vec!["Y", "N", "Y", "Y"],
    )?)
}

pub fn toy_queries() -> Vec<Sample> {
    vec![vec![1, 1, 0]]
}

/// Everything the pipeline computed for the toy problem.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub smoothing: f64,
    pub label_index: LabelIndex<ToyLabel>,
    pub prior: Prior<ToyLabel>,
    pub likelihood: Likelihood<ToyLabel>,
    pub queries: Vec<QueryResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub sample: Sample,
    pub scores: LabelMap<ToyLabel, f64>,
    pub posterior: Posterior<ToyLabel>,
    pub predicted: ToyLabel,
}

pub fn run_demo(smoothing: f64) -> Result<DemoReport> {
    let dataset = toy_dataset()?;
    let model = BernoulliNb::fit(&dataset, smoothing)?;

    let queries = toy_queries();
    let posteriors = model.predict_proba(&queries)?;
    let predicted = model.predict(&queries)?;

    let results = queries
        .into_iter()
        .zip(posteriors)
        .zip(predicted)
        .map(|((sample, posterior), predicted)| {
            let scores = unnormalized_scores(&sample, model.prior(), model.likelihood())?;
            Ok(QueryResult {
                sample,
                scores,
                posterior,
                predicted,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(smoothing, queries = results.len(), "demo complete");
    Ok(DemoReport {
        smoothing,
        label_index: model.label_index().clone(),
        prior: model.prior().clone(),
        likelihood: model.likelihood().clone(),
        queries: results,
    })
}

fn write_probs(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.4}")).collect();
    write!(f, "[{}]", parts.join(", "))
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bernoulli naive Bayes (smoothing = {})", self.smoothing)?;

        writeln!(f, "\nLabel index")?;
        for (label, positions) in self.label_index.iter() {
            writeln!(f, "  {label}: {positions:?}")?;
        }

        writeln!(f, "\nPrior")?;
        for (label, p) in self.prior.iter() {
            writeln!(f, "  {label}: {p:.4}")?;
        }

        writeln!(f, "\nLikelihood P(feature = 1 | label)")?;
        for (label, probs) in self.likelihood.iter() {
            write!(f, "  {label}: ")?;
            write_probs(f, probs)?;
            writeln!(f)?;
        }

        for query in &self.queries {
            writeln!(f, "\nQuery {:?}", query.sample)?;
            write!(f, "  raw score")?;
            for (label, s) in query.scores.iter() {
                write!(f, "  {label}: {s:.6}")?;
            }
            write!(f, "\n  posterior")?;
            for (label, p) in query.posterior.iter() {
                write!(f, "  {label}: {p:.4}")?;
            }
            writeln!(f, "\n  predicted  {}", query.predicted)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::inference::InferenceError;

    #[test]
    fn demo_reproduces_toy_numbers() {
        let report = run_demo(1.0).unwrap();
        assert_eq!(report.prior.get(&"Y"), Some(&0.75));
        let q = &report.queries[0];
        assert_eq!(q.predicted, "Y");
        let y = *q.posterior.get(&"Y").unwrap();
        assert!((y - 0.921).abs() < 1e-3);
    }

    #[test]
    fn text_output_lists_every_stage() {
        let text = run_demo(1.0).unwrap().to_string();
        assert!(text.contains("Y: [0, 2, 3]"));
        assert!(text.contains("Y: 0.7500"));
        assert!(text.contains("N: [0.3333, 0.3333, 0.6667]"));
        assert!(text.contains("predicted  Y"));
    }

    #[test]
    fn negative_smoothing_is_rejected() {
        let err = run_demo(-1.0).unwrap_err();
        assert!(matches!(
            err,
            Error::Inference(InferenceError::InvalidInput { field: "smoothing", .. })
        ));
    }
}
