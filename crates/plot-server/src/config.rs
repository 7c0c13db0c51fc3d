// File: crates/plot-server/src/config.rs
// Summary: TOML configuration with built-in defaults; loaded once and shared read-only.
//
// Lookup order:
// 1. `--config <path>` on the command line
// 2. `$PLOT_CONFIG` environment variable
// 3. Built-in defaults (every key is optional)

use std::path::{Path, PathBuf};

use plot_core::types::{HEIGHT, MAX_EDGE, MIN_EDGE, WIDTH};
use plot_expr::{ExprError, SymbolTable};
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_ENV: &str = "PLOT_CONFIG";

/// Ceiling for `limits.max_expression_len`. Left-leaning operator chains are
/// evaluated recursively, so expression length bounds evaluation stack depth.
pub const MAX_EXPRESSION_LEN_CAP: usize = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("invalid [expression] functions: {0}")]
    Functions(#[from] ExprError),
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub limits: LimitsConfig,
    pub image: ImageConfig,
    pub expression: ExpressionConfig,
}

/// HTTP listener settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Request bodies above this size are answered with 413.
    pub max_body_bytes: usize,
}

/// Per-request work bounds.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_samples: usize,
    /// Counted in characters, not bytes.
    pub max_expression_len: usize,
}

/// Output image size in pixels.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExpressionConfig {
    /// Subset of the standard function table. `None` keeps all of it.
    pub functions: Option<Vec<String>>,
}

// --- Defaults ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8001".into(),
            max_body_bytes: 1_000_000,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_samples: 10_000,
            max_expression_len: 1_000,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT }
    }
}

impl Config {
    /// Parse and validate a TOML document. `origin` is only used in error messages.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Invalid("server.max_body_bytes must be > 0".into()));
        }
        if self.limits.max_samples == 0 {
            return Err(ConfigError::Invalid("limits.max_samples must be > 0".into()));
        }
        if self.limits.max_expression_len == 0 || self.limits.max_expression_len > MAX_EXPRESSION_LEN_CAP {
            return Err(ConfigError::Invalid(format!(
                "limits.max_expression_len must be in 1..={MAX_EXPRESSION_LEN_CAP}"
            )));
        }
        let edge = MIN_EDGE..=MAX_EDGE;
        if !edge.contains(&self.image.width) || !edge.contains(&self.image.height) {
            return Err(ConfigError::Invalid(format!(
                "image size {}x{} outside {MIN_EDGE}..={MAX_EDGE}",
                self.image.width, self.image.height
            )));
        }
        self.symbol_table()?;
        Ok(())
    }

    /// Fresh evaluation context for one request.
    pub fn symbol_table(&self) -> Result<SymbolTable, ExprError> {
        match &self.expression.functions {
            Some(names) => SymbolTable::with_functions(names.as_slice()),
            None => Ok(SymbolTable::standard()),
        }
    }
}

/// Load config from `explicit`, then `$PLOT_CONFIG`, else defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = config_path(explicit) else {
        return Ok(Config::default());
    };
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = Config::from_toml_str(&content, &path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    std::env::var_os(CONFIG_ENV).map(PathBuf::from)
}
