//! Fuzz target for loading a whole ratings file into a matrix.
//!
//! Sizes are capped so huge user ids fail with OutOfRange instead of
//! allocating.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nb_core::ratings::{load_ratings, RatingsOptions};

fuzz_target!(|data: &[u8]| {
    let options = RatingsOptions {
        skip_header: false,
        n_users: Some(1_000),
        n_movies: Some(1_000),
    };
    if let Ok(matrix) = load_ratings(data, &options) {
        let _ = matrix.most_rated();
        let _ = matrix.distribution();
    }
});
