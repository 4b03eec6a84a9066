//! harmony.toml configuration parser.
//!
//! Every table and field is optional; an empty file yields the defaults.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::types::{DEFAULT_HISTORY_CAPACITY, DEFAULT_TREND_WINDOW};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyConfig {
    pub scorer: ScorerConfig,
    pub trend: TrendConfig,
    pub export: ExportConfig,
}

/// Construction parameters for a scorer instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Maximum snapshots kept in history.
    pub history_capacity: usize,
    /// Reserved; accepted but does not change scoring.
    pub enable_advanced_metrics: bool,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            enable_advanced_metrics: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Number of recent snapshots fed to the slope fit.
    pub window: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_TREND_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Value of the `instance` label in text exposition.
    pub instance: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            instance: "local".to_string(),
        }
    }
}

impl HarmonyConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        content.parse()
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the scorer cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scorer.history_capacity == 0 {
            return Err(ConfigError::Invalid(
                "scorer.history_capacity must be at least 1".to_string(),
            ));
        }
        if self.trend.window < 2 {
            return Err(ConfigError::Invalid(format!(
                "trend.window must be at least 2, got {}",
                self.trend.window
            )));
        }
        if self.export.instance.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "export.instance must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl FromStr for HarmonyConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        let config: HarmonyConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
