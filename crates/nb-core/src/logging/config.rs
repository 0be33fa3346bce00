//! Logging settings from `NB_LOG`, `NB_LOG_FORMAT` and the `-v` / `-q` flags.
//!
//! `RUST_LOG` is not parsed here; [`super::build_filter`] hands it to
//! `EnvFilter` untouched when neither `NB_LOG` nor a flag picked a level.

use std::str::FromStr;

pub const ENV_LOG_LEVEL: &str = "NB_LOG";
pub const ENV_LOG_FORMAT: &str = "NB_LOG_FORMAT";

/// Where log lines go is fixed (stderr); this picks their shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per event.
    Jsonl,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(LogFormat::Human),
            "jsonl" => Ok(LogFormat::Jsonl),
            other => Err(format!("{ENV_LOG_FORMAT} must be human or jsonl, got {other:?}")),
        }
    }
}

/// Minimum level for `nb_core` and `nb_math` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// `-q` wins over any number of `-v`; no flag at all defers to the env.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Option<Self> {
        match (quiet, verbose) {
            (true, _) => Some(LogLevel::Error),
            (false, 0) => None,
            (false, 1) => Some(LogLevel::Debug),
            (false, _) => Some(LogLevel::Trace),
        }
    }

    /// Directive name understood by `EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
            LogLevel::Off,
        ]
        .into_iter()
        .find(|level| level.as_directive() == wanted)
        .ok_or_else(|| format!("{ENV_LOG_LEVEL}: unknown level {s:?}"))
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_directive())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Set when `NB_LOG` or a flag chose `level`, which then overrides `RUST_LOG`.
    pub level_explicit: bool,
}

impl LogConfig {
    pub fn from_env(cli_level: Option<LogLevel>) -> Self {
        Self::from_env_with(|key| std::env::var(key).ok(), cli_level)
    }

    /// Unparseable env values are ignored rather than failing startup.
    pub fn from_env_with(env: impl Fn(&str) -> Option<String>, cli_level: Option<LogLevel>) -> Self {
        let env_level = env(ENV_LOG_LEVEL).and_then(|v| v.parse().ok());
        let format = env(ENV_LOG_FORMAT)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let chosen = cli_level.or(env_level);
        LogConfig {
            format,
            level: chosen.unwrap_or_default(),
            level_explicit: chosen.is_some(),
        }
    }
}
