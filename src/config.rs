use crate::environment::{default_environments, EnvironmentSet, EnvironmentSpec};
use crate::error::ConfigError;
use crate::pricing::PriceTable;
use crate::usage::UsageInputs;
use crate::validation::validate_usage;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default config file name, looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = ".devcost.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Unit prices and free tiers
    pub pricing: PriceTable,
    /// Starting point for `devcost estimate`
    pub defaults: UsageInputs,
    /// Environments for `devcost compare`; replaces the stock set when non-empty
    pub environments: Vec<EnvironmentSpec>,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Width in characters of the longest bar in text charts
    pub chart_width: usize,
    /// Print the pricing rules under every estimate
    pub explain: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            chart_width: 40,
            explain: false,
        }
    }
}

impl Config {
    /// Config with the stock environment table written out, used by `devcost init`.
    pub fn with_stock_environments() -> Self {
        Self {
            environments: default_environments(),
            ..Self::default()
        }
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .devcost.toml in current dir, then ~/.config/devcost/config.toml
            let local = PathBuf::from(LOCAL_CONFIG_FILE);
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("devcost").join("config.toml"))
                    .unwrap_or(local)
            }
        };

        if config_path.exists() {
            debug!("Loading config from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))
                .with_context(|| {
                    let mut err = format!("Failed to parse config: {}", config_path.display());
                    err.push_str("\n  Common issues:");
                    err.push_str("\n    - Invalid TOML syntax");
                    err.push_str("\n    - Incorrect value types");
                    err.push_str("\n  Tip: Run 'devcost init' to create a new config file");
                    err
                })?;
            config.validate()?;
            Ok(config)
        } else {
            // Use defaults but warn if user explicitly provided a path
            if path.is_some() {
                warn!(
                    "Config file not found: {}, using default configuration",
                    config_path.display()
                );
            }
            Ok(Config::default())
        }
    }

    /// Check rates, default usage and the environment table.
    pub fn validate(&self) -> crate::error::Result<()> {
        self.pricing.validate()?;
        validate_usage(&self.defaults)?;
        if self.report.chart_width == 0 {
            return Err(ConfigError::InvalidValue {
                field: "report.chart_width".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        self.environment_set()?;
        Ok(())
    }

    /// Configured environments, or the stock four when none are configured.
    pub fn environment_set(&self) -> crate::error::Result<EnvironmentSet> {
        if self.environments.is_empty() {
            Ok(EnvironmentSet::default())
        } else {
            EnvironmentSet::new(self.environments.clone())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = Config::with_stock_environments();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}
