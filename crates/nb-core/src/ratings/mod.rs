//! Movie-rating loader.
//!
//! Reads `user::movie::rating::timestamp` lines (the MovieLens `ratings.dat`
//! layout) into a dense user × movie matrix where 0 means "not rated".
//!
//! # Layout
//! - Row `u - 1` holds user `u` (user ids are 1-based).
//! - Columns are assigned to movie ids in first-seen order.

pub mod recommend;

pub use recommend::{build_recommendation_dataset, RecommendationDataset};

use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

const FIELD_SEPARATOR: &str = "::";

/// Upper bound on `n_users × n_movies` (4 GiB of `f32` cells).
pub const MAX_MATRIX_CELLS: usize = 1 << 30;

/// Errors raised while loading ratings.
#[derive(Debug, Error)]
pub enum RatingsError {
    #[error("I/O error reading ratings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed rating at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("{what} {value} exceeds the configured limit of {limit}")]
    OutOfRange {
        what: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("movie {movie_id} does not appear in the ratings")]
    UnknownMovie { movie_id: u32 },

    #[error("no user has rated movie {movie_id}")]
    NoRaters { movie_id: u32 },

    #[error("ratings input contains no rating lines")]
    Empty,
}

/// One parsed line of a ratings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingRecord {
    pub user_id: u32,
    pub movie_id: u32,
    pub rating: u8,
    pub timestamp: u64,
}

/// Parse a single `user::movie::rating::timestamp` line.
///
/// `line_no` is the 1-based line number used in error messages.
pub fn parse_rating_line(line: &str, line_no: usize) -> Result<RatingRecord, RatingsError> {
    let parse_err = |message: String| RatingsError::Parse {
        line: line_no,
        message,
    };

    let fields: Vec<&str> = line.trim().split(FIELD_SEPARATOR).collect();
    if fields.len() != 4 {
        return Err(parse_err(format!(
            "expected 4 '::'-separated fields, found {}",
            fields.len()
        )));
    }

    let user_id: u32 = fields[0]
        .parse()
        .map_err(|e| parse_err(format!("user id {:?}: {e}", fields[0])))?;
    if user_id == 0 {
        return Err(parse_err("user ids start at 1".to_string()));
    }
    let movie_id: u32 = fields[1]
        .parse()
        .map_err(|e| parse_err(format!("movie id {:?}: {e}", fields[1])))?;
    let rating: u8 = fields[2]
        .parse()
        .map_err(|e| parse_err(format!("rating {:?}: {e}", fields[2])))?;
    let timestamp: u64 = fields[3]
        .parse()
        .map_err(|e| parse_err(format!("timestamp {:?}: {e}", fields[3])))?;

    Ok(RatingRecord {
        user_id,
        movie_id,
        rating,
        timestamp,
    })
}

/// Options for [`load_ratings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingsOptions {
    /// Drop the first line of the input.
    pub skip_header: bool,
    /// Fixed row count; users beyond it are rejected. Sized from data when `None`.
    pub n_users: Option<usize>,
    /// Fixed column count; extra distinct movies are rejected. Sized from data when `None`.
    pub n_movies: Option<usize>,
}

impl Default for RatingsOptions {
    fn default() -> Self {
        Self {
            skip_header: true,
            n_users: None,
            n_movies: None,
        }
    }
}

/// Dense user × movie rating matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix {
    n_users: usize,
    n_movies: usize,
    /// Row-major `n_users × n_movies`.
    data: Vec<f32>,
    /// Column → movie id, first-seen order.
    movie_ids: Vec<u32>,
    columns: HashMap<u32, usize>,
    /// Column → number of ratings > 0.
    rating_counts: Vec<usize>,
}

impl RatingMatrix {
    pub fn n_users(&self) -> usize {
        self.n_users
    }

    pub fn n_movies(&self) -> usize {
        self.n_movies
    }

    /// Ratings given by the user in row `user` (0-based).
    pub fn row(&self, user: usize) -> Option<&[f32]> {
        if user >= self.n_users {
            return None;
        }
        let start = user * self.n_movies;
        self.data.get(start..start + self.n_movies)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks(self.n_movies.max(1)).take(self.n_users)
    }

    pub fn get(&self, user: usize, column: usize) -> Option<f32> {
        if user >= self.n_users || column >= self.n_movies {
            return None;
        }
        Some(self.data[user * self.n_movies + column])
    }

    /// Column assigned to `movie_id`.
    pub fn column_of(&self, movie_id: u32) -> Option<usize> {
        self.columns.get(&movie_id).copied()
    }

    /// Movie ids in column order. Shorter than `n_movies` when the matrix was
    /// sized larger than the data.
    pub fn movie_ids(&self) -> &[u32] {
        &self.movie_ids
    }

    pub fn rating_count(&self, movie_id: u32) -> Option<usize> {
        self.column_of(movie_id).map(|c| self.rating_counts[c])
    }

    /// `(movie_id, rating count)` in column order.
    pub fn rating_counts(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.movie_ids
            .iter()
            .zip(&self.rating_counts)
            .map(|(&id, &count)| (id, count))
    }

    /// Movie with the most ratings; ties go to the movie seen first.
    pub fn most_rated(&self) -> Option<(u32, usize)> {
        self.rating_counts()
            .fold(None, |best: Option<(u32, usize)>, (id, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((id, count)),
            })
    }

    /// Ascending `(value, count)` over every cell, unrated zeros included.
    pub fn distribution(&self) -> Vec<(f32, usize)> {
        value_distribution(self.data.iter().copied())
    }
}

/// Ascending `(value, count)` pairs for a stream of ratings.
pub fn value_distribution(values: impl IntoIterator<Item = f32>) -> Vec<(f32, usize)> {
    let mut counts: Vec<(f32, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| v.total_cmp(&value).is_eq()) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    counts.sort_by(|a, b| a.0.total_cmp(&b.0));
    counts
}

/// Load a ratings file from disk.
pub fn load_ratings_file(
    path: &Path,
    options: &RatingsOptions,
) -> Result<RatingMatrix, RatingsError> {
    let file = File::open(path)?;
    let matrix = load_ratings(BufReader::new(file), options)?;
    info!(
        path = %path.display(),
        users = matrix.n_users(),
        movies = matrix.n_movies(),
        "loaded ratings"
    );
    Ok(matrix)
}

/// Build a [`RatingMatrix`] from `user::movie::rating::timestamp` lines.
///
/// Blank lines are ignored. A later rating for the same user and movie
/// overwrites the earlier cell, but every positive line still counts toward
/// that movie's rating count.
pub fn load_ratings<R: BufRead>(
    reader: R,
    options: &RatingsOptions,
) -> Result<RatingMatrix, RatingsError> {
    let skip = usize::from(options.skip_header);
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate().skip(skip) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_rating_line(&line, i + 1)?);
    }
    if records.is_empty() {
        return Err(RatingsError::Empty);
    }

    let mut movie_ids: Vec<u32> = Vec::new();
    let mut columns: HashMap<u32, usize> = HashMap::new();
    for record in &records {
        if !columns.contains_key(&record.movie_id) {
            columns.insert(record.movie_id, movie_ids.len());
            movie_ids.push(record.movie_id);
        }
    }

    let max_user = records
        .iter()
        .map(|r| r.user_id as usize)
        .max()
        .unwrap_or(0);
    let n_users = match options.n_users {
        Some(limit) if max_user > limit => {
            return Err(RatingsError::OutOfRange {
                what: "user id",
                value: max_user,
                limit,
            })
        }
        Some(limit) => limit,
        None => max_user,
    };
    let n_movies = match options.n_movies {
        Some(limit) if movie_ids.len() > limit => {
            return Err(RatingsError::OutOfRange {
                what: "distinct movie count",
                value: movie_ids.len(),
                limit,
            })
        }
        Some(limit) => limit,
        None => movie_ids.len(),
    };

    let cells = n_users
        .checked_mul(n_movies)
        .filter(|&cells| cells <= MAX_MATRIX_CELLS)
        .ok_or(RatingsError::OutOfRange {
            what: "matrix cell count",
            value: n_users.saturating_mul(n_movies),
            limit: MAX_MATRIX_CELLS,
        })?;
    let mut data = vec![0.0f32; cells];
    let mut rating_counts = vec![0usize; movie_ids.len()];
    for record in &records {
        let column = columns[&record.movie_id];
        let row = record.user_id as usize - 1;
        data[row * n_movies + column] = f32::from(record.rating);
        if record.rating > 0 {
            rating_counts[column] += 1;
        }
    }

    debug!(
        lines = records.len(),
        users = n_users,
        movies = n_movies,
        "built rating matrix"
    );
    Ok(RatingMatrix {
        n_users,
        n_movies,
        data,
        movie_ids,
        columns,
        rating_counts,
    })
}
