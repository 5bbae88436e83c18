//! Input validation utilities
//!
//! Usage values are checked here, at the boundary, before they reach the
//! calculator.

use crate::error::{CostError, Result};
use crate::usage::UsageInputs;

/// Maximum length of an environment name
pub const MAX_ENVIRONMENT_NAME_LEN: usize = 64;

/// Inclusive range accepted for one usage field.
struct Limit {
    field: &'static str,
    min: f64,
    max: f64,
}

const LIMITS: &[Limit] = &[
    Limit {
        field: "codecommit.active_users",
        min: 0.0,
        max: 1_000.0,
    },
    Limit {
        field: "codepipeline.v1_pipelines",
        min: 0.0,
        max: 500.0,
    },
    Limit {
        field: "codepipeline.v2_minutes",
        min: 0.0,
        max: 100_000.0,
    },
    Limit {
        field: "codeguru.repositories",
        min: 1.0,
        max: 500.0,
    },
    Limit {
        field: "codeguru.lines_per_repository",
        min: 1.0,
        max: 1_000_000.0,
    },
    Limit {
        field: "codebuild.builds",
        min: 0.0,
        max: 100_000.0,
    },
    Limit {
        field: "codebuild.duration_minutes",
        min: 1.0,
        max: 600.0,
    },
    Limit {
        field: "codeartifact.storage_gb",
        min: 0.0,
        max: 1_000.0,
    },
    Limit {
        field: "codeartifact.requests",
        min: 0.0,
        max: 10_000_000.0,
    },
    Limit {
        field: "codeartifact.intra_region_gb",
        min: 0.0,
        max: 10_000.0,
    },
    Limit {
        field: "codeartifact.outbound_gb",
        min: 0.0,
        max: 10_000.0,
    },
    Limit {
        field: "codedeploy.instances",
        min: 0.0,
        max: 1_000.0,
    },
    Limit {
        field: "codedeploy.deployments",
        min: 0.0,
        max: 100_000.0,
    },
];

fn field_values(usage: &UsageInputs) -> [f64; 13] {
    [
        f64::from(usage.codecommit.active_users),
        f64::from(usage.codepipeline.v1_pipelines),
        usage.codepipeline.v2_minutes as f64,
        f64::from(usage.codeguru.repositories),
        usage.codeguru.lines_per_repository as f64,
        f64::from(usage.codebuild.builds),
        f64::from(usage.codebuild.duration_minutes),
        usage.codeartifact.storage_gb,
        usage.codeartifact.requests as f64,
        usage.codeartifact.intra_region_gb,
        usage.codeartifact.outbound_gb,
        f64::from(usage.codedeploy.instances),
        f64::from(usage.codedeploy.deployments),
    ]
}

/// Validate a full set of usage inputs against the accepted ranges.
///
/// Returns the first offending field.
pub fn validate_usage(usage: &UsageInputs) -> Result<()> {
    for (limit, value) in LIMITS.iter().zip(field_values(usage)) {
        validate_range(limit.field, value, limit.min, limit.max)?;
    }
    Ok(())
}

/// Validate a single value: finite and within `[min, max]`.
pub fn validate_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CostError::validation(
            field,
            format!("must be a finite number, got: {}", value),
        ));
    }

    if value < min || value > max {
        return Err(CostError::validation(
            field,
            format!("must be between {} and {}, got: {}", min, max, value),
        ));
    }

    Ok(())
}

/// Validate environment name
///
/// Names must be non-empty, at most 64 characters, and free of control characters.
pub fn validate_environment_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CostError::validation(
            "environment",
            "Environment name cannot be empty",
        ));
    }

    if name.chars().count() > MAX_ENVIRONMENT_NAME_LEN {
        return Err(CostError::validation(
            "environment",
            format!(
                "Environment name must be <= {} characters, got: {} (len: {})",
                MAX_ENVIRONMENT_NAME_LEN,
                name,
                name.chars().count()
            ),
        ));
    }

    if name.chars().any(char::is_control) {
        return Err(CostError::validation(
            "environment",
            format!("Environment name contains control characters: {:?}", name),
        ));
    }

    Ok(())
}

/// Validate export format
pub fn validate_export_format(format: &str) -> Result<()> {
    match format {
        "csv" | "html" | "json" => Ok(()),
        other => Err(CostError::validation(
            "format",
            format!("Unsupported export format: {}. Use 'csv', 'html' or 'json'", other),
        )),
    }
}
