//! Fuzz target for single rating line parsing.
//!
//! Arbitrary text must yield a record or a parse error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nb_core::ratings::parse_rating_line;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let _ = parse_rating_line(line, 1);
    }
});
