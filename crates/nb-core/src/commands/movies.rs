//! `movies`: predict whether users would recommend a movie from their other ratings.
//!
//! Steps: load the rating matrix, pick the target movie (most rated unless
//! configured), build the binary dataset, split, fit [`MultinomialNb`], and
//! evaluate on the held-out users.

use crate::config::ExperimentConfig;
use crate::error::Result;
use crate::evaluate::{
    auc_roc, roc_points, ClassificationReport, ConfusionMatrix, EvaluationError, RocPoint,
    ScoredOutcome,
};
use crate::models::MultinomialNb;
use crate::ratings::{build_recommendation_dataset, load_ratings_file, RatingsError};
use crate::split::train_test_split;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

const POSITIVE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingCount {
    pub rating: f32,
    pub count: usize,
}

fn to_counts(pairs: Vec<(f32, usize)>) -> Vec<RatingCount> {
    pairs
        .into_iter()
        .map(|(rating, count)| RatingCount { rating, count })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRow {
    /// Probabilities in `classes` order.
    pub probabilities: Vec<f64>,
    pub predicted: u8,
    pub actual: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieReport {
    pub ratings_path: PathBuf,
    pub n_users: usize,
    pub n_movies: usize,
    pub distribution: Vec<RatingCount>,
    pub target_movie: u32,
    pub target_rating_count: usize,
    pub threshold: f64,
    pub n_samples: usize,
    pub n_features: usize,
    pub target_distribution: Vec<RatingCount>,
    pub positives: usize,
    pub negatives: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub classes: Vec<u8>,
    pub preview: Vec<PredictionRow>,
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub precision: f64,
    pub recall: f64,
    pub f1_negative: f64,
    pub f1_positive: f64,
    pub classification_report: ClassificationReport<u8>,
    /// `None` when the test split holds a single class or training saw no positives.
    pub auc: Option<f64>,
    pub roc: Option<Vec<RocPoint>>,
}

/// Keep a metric only when both classes are present in the test split.
fn if_both_classes<T>(
    metric: std::result::Result<T, EvaluationError>,
    name: &str,
) -> Result<Option<T>> {
    match metric {
        Ok(value) => Ok(Some(value)),
        Err(EvaluationError::SingleClass {
            positives,
            negatives,
        }) => {
            warn!(positives, negatives, "test split has one class; skipping {name}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Probability of the positive class for each row, or `None` when the model
/// never saw a positive sample.
fn positive_scores(classes: &[u8], proba: &[Vec<f64>]) -> Option<Vec<f64>> {
    let column = classes.iter().position(|&c| c == POSITIVE)?;
    Some(proba.iter().map(|row| row[column]).collect())
}

pub fn run_movies(config: &ExperimentConfig) -> Result<MovieReport> {
    let ratings = &config.ratings;
    let matrix = load_ratings_file(&ratings.path, &ratings.options())?;

    let (target_movie, target_rating_count) = match ratings.target_movie {
        Some(id) => {
            let count = matrix
                .rating_count(id)
                .ok_or(RatingsError::UnknownMovie { movie_id: id })?;
            (id, count)
        }
        None => matrix.most_rated().ok_or(RatingsError::Empty)?,
    };
    info!(target_movie, ratings = target_rating_count, "selected target movie");

    let dataset =
        build_recommendation_dataset(&matrix, target_movie, ratings.recommend_threshold)?;

    let split = train_test_split(dataset.len(), config.split.test_fraction, config.split.seed)?;
    let (x_train, x_test) = split.apply(dataset.features());
    let (y_train, y_test) = split.apply(dataset.targets());

    let model = MultinomialNb::fit(&x_train, &y_train, config.multinomial)?;
    let proba = model.predict_proba(&x_test)?;
    let predicted = model.predict(&x_test)?;

    let confusion = ConfusionMatrix::from_predictions(&y_test, &predicted, &POSITIVE)?;
    let classification_report = ClassificationReport::from_predictions(&y_test, &predicted)?;
    let (auc, roc) = match positive_scores(model.classes(), &proba) {
        Some(scores) => {
            let outcomes = ScoredOutcome::zip(&scores, &y_test, &POSITIVE)?;
            (
                if_both_classes(auc_roc(&outcomes), "AUC")?,
                if_both_classes(roc_points(&outcomes, config.report.roc_step), "ROC")?,
            )
        }
        None => {
            warn!(
                train_size = y_train.len(),
                "training split has no positive samples; skipping AUC and ROC"
            );
            (None, None)
        }
    };

    let preview = proba
        .iter()
        .zip(&predicted)
        .zip(&y_test)
        .take(config.report.preview_rows)
        .map(|((probabilities, &predicted), &actual)| PredictionRow {
            probabilities: probabilities.clone(),
            predicted,
            actual,
        })
        .collect();

    info!(
        accuracy = confusion.accuracy(),
        test_size = y_test.len(),
        "movie experiment complete"
    );
    Ok(MovieReport {
        ratings_path: ratings.path.clone(),
        n_users: matrix.n_users(),
        n_movies: matrix.n_movies(),
        distribution: to_counts(matrix.distribution()),
        target_movie,
        target_rating_count,
        threshold: ratings.recommend_threshold,
        n_samples: dataset.len(),
        n_features: dataset.n_features(),
        target_distribution: to_counts(dataset.target_distribution()),
        positives: dataset.positives(),
        negatives: dataset.negatives(),
        train_size: y_train.len(),
        test_size: y_test.len(),
        classes: model.classes().to_vec(),
        preview,
        accuracy: confusion.accuracy(),
        precision: confusion.precision(),
        recall: confusion.recall(),
        f1_negative: confusion.swapped().f1(),
        f1_positive: confusion.f1(),
        confusion,
        classification_report,
        auc,
        roc,
    })
}

fn write_distribution(f: &mut fmt::Formatter<'_>, counts: &[RatingCount]) -> fmt::Result {
    for c in counts {
        writeln!(f, " rating {}:{:>8}", c.rating, c.count)?;
    }
    Ok(())
}

impl fmt::Display for MovieReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Ratings: {} ({} users x {} movies)",
            self.ratings_path.display(),
            self.n_users,
            self.n_movies
        )?;
        writeln!(f, "\nData distribution")?;
        write_distribution(f, &self.distribution)?;

        writeln!(
            f,
            "\nMovie ID {} has {} ratings",
            self.target_movie, self.target_rating_count
        )?;
        writeln!(f, "Shape of X: ({}, {})", self.n_samples, self.n_features)?;
        writeln!(f, "Shape of Y: ({},)", self.n_samples)?;
        writeln!(f, "\nTarget distribution")?;
        write_distribution(f, &self.target_distribution)?;
        writeln!(
            f,
            "\nThere are {} positive samples and {} negative samples (threshold > {})",
            self.positives, self.negatives, self.threshold
        )?;
        writeln!(f, "Training: {}\tTest: {}", self.train_size, self.test_size)?;

        writeln!(f, "\nPredictions (classes {:?})", self.classes)?;
        for row in &self.preview {
            let probs: Vec<String> = row.probabilities.iter().map(|p| format!("{p:.4}")).collect();
            writeln!(
                f,
                "  [{}] -> {} (actual {})",
                probs.join(", "),
                row.predicted,
                row.actual
            )?;
        }
        writeln!(f, "Accuracy: {:.1}%", self.accuracy * 100.0)?;

        writeln!(f, "\nConfusion matrix")?;
        for row in self.confusion.as_table() {
            writeln!(f, "  [{:>6} {:>6}]", row[0], row[1])?;
        }
        writeln!(f, "\nprecision: {:.2}", self.precision)?;
        writeln!(f, "recall: {:.2};  a.k.a TPR", self.recall)?;
        writeln!(f, "f1 (neg) score: {:.2}", self.f1_negative)?;
        writeln!(f, "f1 (pos) score: {:.2}", self.f1_positive)?;

        writeln!(f, "\nClassification report")?;
        write!(f, "{}", self.classification_report)?;

        match self.auc {
            Some(auc) => writeln!(f, "\nAUC Score: {auc:.2}")?,
            None => writeln!(f, "\nAUC Score: n/a (one class missing)")?,
        }
        if let Some(roc) = &self.roc {
            writeln!(f, "\nROC (threshold  TPR  FPR)")?;
            for point in roc {
                writeln!(
                    f,
                    "  {:.2}  {:.3}  {:.3}",
                    point.threshold, point.true_positive_rate, point.false_positive_rate
                )?;
            }
        }
        Ok(())
    }
}
