//! `config show`: the effective configuration and where it came from.

use crate::config::ResolvedConfig;
use crate::error::Result;
use serde::Serialize;
use std::fmt;

/// Resolved config plus its TOML rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigView {
    #[serde(flatten)]
    pub resolved: ResolvedConfig,
    #[serde(skip)]
    toml: String,
}

pub fn show_config(resolved: ResolvedConfig) -> Result<ConfigView> {
    let toml = toml::to_string(&resolved.config)?;
    Ok(ConfigView { resolved, toml })
}

impl fmt::Display for ConfigView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# source: {}", self.resolved.source)?;
        if let Some(path) = &self.resolved.path {
            writeln!(f, "# path: {}", path.display())?;
        }
        if let Some(hash) = &self.resolved.hash {
            writeln!(f, "# sha256: {hash}")?;
        }
        write!(f, "{}", self.toml)
    }
}
