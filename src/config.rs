use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Summary thresholds
// ---------------------------------------------------------------------------

/// Numeric columns with at most this many distinct values are categorical.
pub const DEFAULT_CATEGORICAL_CUTOFF: usize = 3;
/// Number of histogram buckets for numerical columns.
pub const DEFAULT_BIN_COUNT: usize = 10;
/// Raw values shown under each chart.
pub const DEFAULT_PREVIEW_ROWS: usize = 15;
/// Numeric targets with more distinct values than this are regression targets.
pub const DEFAULT_PROBLEM_TYPE_THRESHOLD: usize = 10;

/// Environment variable holding the path to a JSON config file.
pub const CONFIG_ENV_VAR: &str = "DATA_GLANCE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable policy for classification and bucketing.
///
/// Every field is optional in the JSON form:
///
/// ```json
/// { "categorical_cutoff": 5, "bin_count": 20 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    pub categorical_cutoff: usize,
    pub bin_count: usize,
    pub preview_rows: usize,
    pub problem_type_threshold: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            categorical_cutoff: DEFAULT_CATEGORICAL_CUTOFF,
            bin_count: DEFAULT_BIN_COUNT,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            problem_type_threshold: DEFAULT_PROBLEM_TYPE_THRESHOLD,
        }
    }
}

impl SummaryConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: SummaryConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Load from `DATA_GLANCE_CONFIG` if set, falling back to defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::from_json_file(Path::new(&path)) {
            Ok(config) => {
                log::info!("Using summary config {config:?}");
                config
            }
            Err(e) => {
                log::warn!("Ignoring {CONFIG_ENV_VAR}: {e}");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bin_count == 0 {
            return Err(ConfigError::Invalid("bin_count must be at least 1".into()));
        }
        if self.problem_type_threshold < 2 {
            return Err(ConfigError::Invalid(
                "problem_type_threshold must be at least 2".into(),
            ));
        }
        Ok(())
    }
}
