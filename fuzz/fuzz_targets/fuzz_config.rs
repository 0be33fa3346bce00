//! Fuzz target for nb.toml parsing and validation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nb_core::config::{parse_config_str, validate_config};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(config) = parse_config_str(text) {
            let _ = validate_config(&config);
        }
    }
});
