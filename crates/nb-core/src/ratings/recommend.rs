//! Binary "would recommend" dataset built around one target movie.

use super::{value_distribution, RatingMatrix, RatingsError};
use tracing::debug;

/// Users who rated the target movie, their other ratings as features, and
/// whether they liked the target.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationDataset {
    target_movie: u32,
    threshold: f64,
    /// 0-based user rows that rated the target.
    users: Vec<usize>,
    features: Vec<Vec<f64>>,
    target_ratings: Vec<f32>,
    targets: Vec<u8>,
}

/// Drop the target movie's column and keep only users who rated it.
///
/// A user's target is 1 when their rating is above `threshold`, else 0.
pub fn build_recommendation_dataset(
    matrix: &RatingMatrix,
    movie_id: u32,
    threshold: f64,
) -> Result<RecommendationDataset, RatingsError> {
    let column = matrix
        .column_of(movie_id)
        .ok_or(RatingsError::UnknownMovie { movie_id })?;

    let mut users = Vec::new();
    let mut features = Vec::new();
    let mut target_ratings = Vec::new();
    let mut targets = Vec::new();

    for (user, row) in matrix.rows().enumerate() {
        let rating = row[column];
        if rating <= 0.0 {
            continue;
        }
        let other: Vec<f64> = row
            .iter()
            .enumerate()
            .filter(|&(c, _)| c != column)
            .map(|(_, &r)| f64::from(r))
            .collect();
        users.push(user);
        features.push(other);
        target_ratings.push(rating);
        targets.push(u8::from(f64::from(rating) > threshold));
    }

    if users.is_empty() {
        return Err(RatingsError::NoRaters { movie_id });
    }

    debug!(
        movie_id,
        users = users.len(),
        positives = targets.iter().filter(|&&t| t == 1).count(),
        "built recommendation dataset"
    );
    Ok(RecommendationDataset {
        target_movie: movie_id,
        threshold,
        users,
        features,
        target_ratings,
        targets,
    })
}

impl RecommendationDataset {
    pub fn target_movie(&self) -> u32 {
        self.target_movie
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    pub fn users(&self) -> &[usize] {
        &self.users
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn targets(&self) -> &[u8] {
        &self.targets
    }

    /// Raw ratings of the target movie, before thresholding.
    pub fn target_ratings(&self) -> &[f32] {
        &self.target_ratings
    }

    pub fn target_distribution(&self) -> Vec<(f32, usize)> {
        value_distribution(self.target_ratings.iter().copied())
    }

    pub fn positives(&self) -> usize {
        self.targets.iter().filter(|&&t| t == 1).count()
    }

    pub fn negatives(&self) -> usize {
        self.len() - self.positives()
    }
}
