//! Command handlers behind the `devcost` binary.
//!
//! Handlers take an already-loaded `Config`; the binary owns loading and
//! logging setup.

use crate::calculator::CostCalculator;
use crate::config::Config;
use crate::environment::EnvironmentSet;
use crate::error::{CostError, Result};
use crate::export;
use crate::report::{self, ComparisonReport, EstimateReport};
use crate::usage::UsageInputs;
use crate::validation::validate_usage;
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};

/// Per-field overrides for `devcost estimate`. Unset flags keep the base value.
#[derive(Args, Debug, Clone, Default)]
pub struct UsageOverrides {
    /// CodeCommit: active users (first 5 free)
    #[arg(long)]
    pub codecommit_users: Option<u32>,
    /// CodePipeline V1: active pipelines (first one free)
    #[arg(long)]
    pub codepipeline_v1: Option<u32>,
    /// CodePipeline V2: action minutes (first 100 free)
    #[arg(long)]
    pub codepipeline_v2: Option<u64>,
    /// CodeGuru: repositories analysed
    #[arg(long)]
    pub codeguru_repos: Option<u32>,
    /// CodeGuru: lines of code per repository
    #[arg(long)]
    pub codeguru_lines: Option<u64>,
    /// CodeBuild: builds per month
    #[arg(long)]
    pub codebuild_builds: Option<u32>,
    /// CodeBuild: average build duration (minutes)
    #[arg(long)]
    pub codebuild_duration: Option<u32>,
    /// CodeArtifact: storage (GB, first 2 free)
    #[arg(long)]
    pub codeartifact_storage: Option<f64>,
    /// CodeArtifact: requests per month (first 100,000 free)
    #[arg(long)]
    pub codeartifact_requests: Option<u64>,
    /// CodeArtifact: intra-region transfer (GB)
    #[arg(long)]
    pub codeartifact_intra: Option<f64>,
    /// CodeArtifact: outbound transfer to the internet (GB)
    #[arg(long)]
    pub codeartifact_outbound: Option<f64>,
    /// CodeDeploy: on-premises instances
    #[arg(long)]
    pub codedeploy_instances: Option<u32>,
    /// CodeDeploy: deployments per instance per month
    #[arg(long)]
    pub codedeploy_deployments: Option<u32>,
}

impl UsageOverrides {
    pub fn apply(&self, usage: &mut UsageInputs) {
        macro_rules! set {
            ($flag:ident => $group:ident . $field:ident) => {
                if let Some(v) = self.$flag {
                    usage.$group.$field = v;
                }
            };
        }
        set!(codecommit_users => codecommit.active_users);
        set!(codepipeline_v1 => codepipeline.v1_pipelines);
        set!(codepipeline_v2 => codepipeline.v2_minutes);
        set!(codeguru_repos => codeguru.repositories);
        set!(codeguru_lines => codeguru.lines_per_repository);
        set!(codebuild_builds => codebuild.builds);
        set!(codebuild_duration => codebuild.duration_minutes);
        set!(codeartifact_storage => codeartifact.storage_gb);
        set!(codeartifact_requests => codeartifact.requests);
        set!(codeartifact_intra => codeartifact.intra_region_gb);
        set!(codeartifact_outbound => codeartifact.outbound_gb);
        set!(codedeploy_instances => codedeploy.instances);
        set!(codedeploy_deployments => codedeploy.deployments);
    }
}

/// Options shared by `estimate` and `compare`.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// `text` or `json`
    pub output: String,
    pub export: Option<String>,
    pub export_file: Option<PathBuf>,
    pub explain: bool,
}

fn check_output_format(output: &str) -> Result<()> {
    match output {
        "text" | "json" => Ok(()),
        other => Err(CostError::validation(
            "output",
            format!("Unsupported output format: {}. Use 'text' or 'json'", other),
        )),
    }
}

/// Build the validated usage for an estimate: environment (or config
/// defaults), then flag overrides. Returns the environment's canonical name
/// alongside the usage.
pub fn resolve_usage(
    config: &Config,
    environment: Option<&str>,
    overrides: &UsageOverrides,
) -> Result<(Option<String>, UsageInputs)> {
    let (label, mut usage) = match environment {
        Some(name) => {
            let set = config.environment_set()?;
            let spec = set.find(name)?;
            (Some(spec.name.clone()), spec.usage.clone())
        }
        None => (None, config.defaults.clone()),
    };
    overrides.apply(&mut usage);
    validate_usage(&usage)?;
    Ok((label, usage))
}

pub fn estimate(
    config: &Config,
    environment: Option<&str>,
    overrides: &UsageOverrides,
    options: &OutputOptions,
) -> Result<()> {
    check_output_format(&options.output)?;
    let (label, usage) = resolve_usage(config, environment, overrides)?;
    let calculator = CostCalculator::new(config.pricing.clone());
    let costs = calculator.calculate(&usage);

    info!(total = costs.total(), "Estimated monthly cost");
    let report = EstimateReport::new(label, usage, costs);

    if let Some(format) = &options.export {
        return export::export(&report, format, options.export_file.as_deref());
    }

    if options.output == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut settings = config.report.clone();
        settings.explain |= options.explain;
        print!(
            "{}",
            report::render_estimate(&report, calculator.rates(), &settings)
        );
    }
    Ok(())
}

pub fn compare(config: &Config, names: &[String], options: &OutputOptions) -> Result<()> {
    check_output_format(&options.output)?;
    let set: EnvironmentSet = config.environment_set()?;
    debug!("Comparing environments: {:?}", set.names());

    let calculator = CostCalculator::new(config.pricing.clone());
    let comparison = set.compare(&calculator, names)?;
    let report = ComparisonReport::new(&comparison);

    if let Some(format) = &options.export {
        return export::export(&report, format, options.export_file.as_deref());
    }

    if options.output == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render_comparison(&report, &config.report));
        if options.explain || config.report.explain {
            print!("{}", report::render_rates(calculator.rates()));
        }
    }
    Ok(())
}

pub fn rates(config: &Config, output: &str) -> Result<()> {
    check_output_format(output)?;
    if output == "json" {
        println!("{}", serde_json::to_string_pretty(&config.pricing)?);
    } else {
        print!("{}", report::render_rates(&config.pricing));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvironmentSpec;

    #[test]
    fn test_overrides_apply_only_set_fields() {
        let mut usage = UsageInputs::default();
        let overrides = UsageOverrides {
            codebuild_builds: Some(250),
            codeartifact_outbound: Some(0.5),
            ..Default::default()
        };
        overrides.apply(&mut usage);
        assert_eq!(usage.codebuild.builds, 250);
        assert_eq!(usage.codeartifact.outbound_gb, 0.5);
        assert_eq!(usage.codecommit.active_users, 500);
    }

    #[test]
    fn test_resolve_usage_from_environment() {
        let config = Config::default();
        let overrides = UsageOverrides {
            codecommit_users: Some(7),
            ..Default::default()
        };
        let (label, usage) = resolve_usage(&config, Some("staging"), &overrides).unwrap();
        assert_eq!(label.as_deref(), Some("Staging"));
        assert_eq!(usage.codecommit.active_users, 7);
        assert_eq!(usage.codebuild.builds, 1_000);
    }

    #[test]
    fn test_resolve_usage_rejects_out_of_range_override() {
        let config = Config::default();
        let overrides = UsageOverrides {
            codeartifact_storage: Some(-3.0),
            ..Default::default()
        };
        assert!(resolve_usage(&config, None, &overrides).is_err());
    }

    #[test]
    fn test_resolve_usage_unknown_environment() {
        let config = Config {
            environments: vec![EnvironmentSpec::new("Sandbox", UsageInputs::default())],
            ..Config::default()
        };
        let err = resolve_usage(&config, Some("Production"), &UsageOverrides::default())
            .unwrap_err();
        assert!(matches!(err, CostError::UnknownEnvironment(_)));
    }

    #[test]
    fn test_bad_output_format() {
        let options = OutputOptions {
            output: "yaml".to_string(),
            ..Default::default()
        };
        let err = estimate(&Config::default(), None, &UsageOverrides::default(), &options)
            .unwrap_err();
        assert!(matches!(err, CostError::Validation { ref field, .. } if field == "output"));
    }
}
