//! Error types for devcost
//!
//! There are two error types: `CostError` (main error enum) and `ConfigError`
//! (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! The calculator itself never fails: every formula is total over non-negative
//! inputs. Errors only come from the boundary around it (loading config,
//! validating user-supplied usage, looking up environments, writing exports).
//!
//! Library code uses `crate::error::Result<T>` which returns `CostError`.
//! CLI code uses `anyhow::Result<T>` for top-level error handling and maps
//! `CostError` to an exit code via `crate::exit_codes`.
//!
//! ## When to Use Which Error
//!
//! - `ConfigError`: configuration parsing and validation issues
//!   - Automatically converted to `CostError::Config` via `#[from]`
//!
//! - `Validation`: usage inputs or CLI arguments outside the accepted range
//!
//! - `UnknownEnvironment` / `UnknownService`: name lookups that matched nothing
//!
//! - `Export`: unsupported export format or a failed export write

use thiserror::Error;

/// Main error type for devcost
#[derive(Error, Debug)]
pub enum CostError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate environment name: {0}")]
    DuplicateEnvironment(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CostError>;

impl CostError {
    /// Shorthand for building a `Validation` error.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CostError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
