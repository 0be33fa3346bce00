//! Configuration file discovery.
//!
//! Resolution order: CLI argument → `NB_CONFIG` → `NB_CONFIG_DIR/nb.toml` →
//! XDG config dir → built-in defaults.

use super::ConfigError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Environment variable holding an explicit config file path.
pub const ENV_CONFIG_PATH: &str = "NB_CONFIG";
/// Environment variable holding a directory searched for [`CONFIG_FILENAME`].
pub const ENV_CONFIG_DIR: &str = "NB_CONFIG_DIR";
pub const CONFIG_FILENAME: &str = "nb.toml";

/// Application name for XDG directories.
const APP_NAME: &str = "naive-bayes";

/// Where the configuration came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    /// Explicitly provided via `--config`.
    CliArgument,
    /// Path from `NB_CONFIG`.
    Environment,
    /// Found in `NB_CONFIG_DIR`.
    ConfigDir,
    /// Found in the XDG config directory.
    XdgConfig,
    /// No file; built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::ConfigDir => write!(f, "config directory"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// XDG config directory for this application.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Resolve the config file path from the process environment.
pub fn resolve_config_path(
    cli_path: Option<&Path>,
) -> Result<Option<(PathBuf, ConfigSource)>, ConfigError> {
    resolve_config_path_with(cli_path, |key| std::env::var(key).ok(), xdg_config_dir())
}

/// Resolve the config file path with an injectable environment.
///
/// Paths named explicitly (CLI or `NB_CONFIG`) must exist; directory lookups
/// fall through silently when the file is absent.
pub fn resolve_config_path_with(
    cli_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
    xdg_dir: Option<PathBuf>,
) -> Result<Option<(PathBuf, ConfigSource)>, ConfigError> {
    if let Some(path) = cli_path {
        return explicit(path.to_path_buf(), ConfigSource::CliArgument);
    }

    if let Some(path) = env(ENV_CONFIG_PATH).filter(|p| !p.is_empty()) {
        return explicit(PathBuf::from(path), ConfigSource::Environment);
    }

    if let Some(dir) = env(ENV_CONFIG_DIR).filter(|d| !d.is_empty()) {
        let path = PathBuf::from(dir).join(CONFIG_FILENAME);
        if path.is_file() {
            return Ok(Some((path, ConfigSource::ConfigDir)));
        }
    }

    if let Some(dir) = xdg_dir {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            return Ok(Some((path, ConfigSource::XdgConfig)));
        }
    }

    Ok(None)
}

fn explicit(
    path: PathBuf,
    source: ConfigSource,
) -> Result<Option<(PathBuf, ConfigSource)>, ConfigError> {
    if path.is_file() {
        Ok(Some((path, source)))
    } else {
        Err(ConfigError::NotFound { path })
    }
}
