//! Structured logging for the nb-core CLI.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSON lines for scripted runs
//!
//! stdout is reserved for command output; every log line goes to stderr.
//! Each command runs inside a span carrying its `run_id`.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events are shown by default.
const LOG_TARGETS: &[&str] = &["nb_core", "nb_math"];

/// Build the event filter.
///
/// A `RUST_LOG` directive string wins unless `NB_LOG` or a flag chose the level.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || {
        let directives: Vec<String> = LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, config.level))
            .collect();
        EnvFilter::new(directives.join(","))
    };
    if config.level_explicit {
        return fallback();
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs.
pub fn init_logging(config: &LogConfig) {
    let filter = build_filter(config);

    match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_span_list(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .init();
        }
    }
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // First 12 hex chars of the simple (dash-free) form.
    format!("run-{}", &uuid.simple().to_string()[..12])
}
