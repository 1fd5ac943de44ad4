//! Generator configuration.
//!
//! Values come from an optional YAML file (`--config`, or `puffs-gen.yaml` in
//! the working directory) and are then overridden by command-line flags.

use crate::format::{self, CommandFormatter, Formatter, Passthrough};
use serde_derive::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "puffs-gen.yaml";
pub const DEFAULT_PREFIX: &str = "puffs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("invalid config {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// Which translation units to write for each package.
#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Emit {
    /* Header only (.h) */
    Header,
    /* Full source only (.c) */
    Source,
    /* Both .h and .c */
    #[default]
    Both,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct FormatterConfig {
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: format::DEFAULT_PROGRAM.to_string(),
            args: vec![format!("-style={}", format::DEFAULT_STYLE)],
            timeout_secs: format::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl FormatterConfig {
    pub fn build(&self) -> Box<dyn Formatter> {
        if self.enabled {
            Box::new(CommandFormatter::new(
                self.program.clone(),
                self.args.clone(),
                Duration::from_secs(self.timeout_secs),
            ))
        } else {
            Box::new(Passthrough)
        }
    }
}

/// Command-line values that replace what the config file says.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub emit: Option<Emit>,
    pub prefix: Option<String>,
    pub formatter: Option<String>,
    pub style: Option<String>,
    pub no_format: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct GenConfig {
    /* Leading component of every generated C name */
    pub prefix: String,
    pub emit: Emit,
    pub formatter: FormatterConfig,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            emit: Emit::default(),
            formatter: FormatterConfig::default(),
        }
    }
}

impl GenConfig {
    /// Loads `path` if given, else `puffs-gen.yaml` when present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// `load`, then `apply`.
    pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply(overrides);
        Ok(config)
    }

    /* A new formatter program starts with no arguments: the default
     * `-style=` belongs to clang-format. `--style` then adds its own. */
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(emit) = overrides.emit {
            self.emit = emit;
        }
        if let Some(prefix) = &overrides.prefix {
            self.prefix = prefix.clone();
        }
        if let Some(program) = &overrides.formatter {
            self.formatter.program = program.clone();
            self.formatter.args.clear();
        }
        if let Some(style) = &overrides.style {
            self.formatter.args = vec![format!("-style={}", style)];
        }
        if overrides.no_format {
            self.formatter.enabled = false;
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GenConfig = serde_yml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.formatter.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: "formatter.timeout-secs must be at least 1".to_string(),
            });
        }
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
