//! Exit code standardization for devcost
//!
//! Provides consistent exit codes for different error types so scripts can
//! tell bad input apart from a broken config.
//!
//! ## Exit Code Convention
//!
//! - `0` = Success
//! - `1` = User error (invalid input, unknown environment or service)
//! - `2` = System error (I/O failure, export write failure)
//! - `3` = Configuration error (config parse error, invalid rates)

use crate::error::{ConfigError, CostError};

/// Standard exit codes for devcost
pub mod codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// User error (invalid input, validation failure)
    pub const USER_ERROR: i32 = 1;
    /// System error (I/O failure)
    pub const SYSTEM_ERROR: i32 = 2;
    /// Configuration error (unparseable or invalid config)
    pub const CONFIG_ERROR: i32 = 3;
}

/// Map a CostError to an appropriate exit code
pub fn exit_code_for_error(error: &CostError) -> i32 {
    use CostError::*;
    match error {
        Config(_) => codes::CONFIG_ERROR,

        Validation { .. } => codes::USER_ERROR,
        UnknownEnvironment(_) => codes::USER_ERROR,
        UnknownService(_) => codes::USER_ERROR,

        Export(_) => codes::SYSTEM_ERROR,
        Io(_) => codes::SYSTEM_ERROR,
        Json(_) => codes::SYSTEM_ERROR,
    }
}

/// Exit code for an error that reached `main`.
///
/// Looks through the anyhow chain for a typed error; anything else is a
/// system error.
pub fn exit_code_for_anyhow(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<CostError>() {
            return exit_code_for_error(err);
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return codes::CONFIG_ERROR;
        }
    }
    codes::SYSTEM_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_user_errors() {
        let err = CostError::validation("codebuild.builds", "too many");
        assert_eq!(exit_code_for_error(&err), codes::USER_ERROR);
        let err = CostError::UnknownEnvironment("qa".to_string());
        assert_eq!(exit_code_for_error(&err), codes::USER_ERROR);
    }

    #[test]
    fn test_config_errors() {
        let err: CostError = ConfigError::DuplicateEnvironment("qa".to_string()).into();
        assert_eq!(exit_code_for_error(&err), codes::CONFIG_ERROR);
    }

    #[test]
    fn test_anyhow_chain_is_searched() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::ParseError("bad".to_string()));
        let err = result.context("Failed to parse config").unwrap_err();
        assert_eq!(exit_code_for_anyhow(&err), codes::CONFIG_ERROR);

        let err = anyhow::Error::from(CostError::UnknownService("x".to_string()));
        assert_eq!(exit_code_for_anyhow(&err), codes::USER_ERROR);

        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for_anyhow(&err), codes::SYSTEM_ERROR);
        assert_ne!(exit_code_for_anyhow(&err), codes::SUCCESS);
    }
}
