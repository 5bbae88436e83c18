//! Named usage scenarios and side-by-side comparison.
//!
//! An environment is a label plus its own `UsageInputs`. Environments never
//! interact: each one is priced independently and the comparison only sums
//! the results.

use crate::breakdown::CostBreakdown;
use crate::calculator::CostCalculator;
use crate::error::{ConfigError, CostError, Result};
use crate::service::Service;
use crate::usage::{
    CodeArtifactUsage, CodeBuildUsage, CodeCommitUsage, CodeDeployUsage, CodeGuruUsage,
    CodePipelineUsage, UsageInputs,
};
use crate::validation::{validate_environment_name, validate_usage};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A named scenario as it appears in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub name: String,
    #[serde(default)]
    pub usage: UsageInputs,
}

/// The configured environments, in config order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSet {
    specs: Vec<EnvironmentSpec>,
}

/// One priced environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Environment {
    pub name: String,
    pub usage: UsageInputs,
    pub costs: CostBreakdown,
}

/// Result of pricing several environments side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub environments: Vec<Environment>,
}

impl EnvironmentSpec {
    pub fn new(name: impl Into<String>, usage: UsageInputs) -> Self {
        Self {
            name: name.into(),
            usage,
        }
    }
}

impl EnvironmentSet {
    /// Build a set, rejecting invalid names, duplicate names (case-insensitive)
    /// and out-of-range usage.
    pub fn new(specs: Vec<EnvironmentSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for spec in &specs {
            validate_environment_name(&spec.name)?;
            if !seen.insert(name_key(&spec.name)) {
                return Err(ConfigError::DuplicateEnvironment(spec.name.clone()).into());
            }
            validate_usage(&spec.usage).map_err(|e| match e {
                CostError::Validation { field, reason } => CostError::Validation {
                    field: format!("environments.{}.{}", spec.name, field),
                    reason,
                },
                other => other,
            })?;
        }
        Ok(Self { specs })
    }

    pub fn specs(&self) -> &[EnvironmentSpec] {
        &self.specs
    }

    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Result<&EnvironmentSpec> {
        let wanted = name_key(name);
        self.specs
            .iter()
            .find(|s| name_key(&s.name) == wanted)
            .ok_or_else(|| CostError::UnknownEnvironment(name.to_string()))
    }

    /// The named subset in the requested order, or every environment when
    /// `names` is empty. Repeated names are priced once, at their first
    /// position.
    pub fn select(&self, names: &[String]) -> Result<Vec<&EnvironmentSpec>> {
        if names.is_empty() {
            return Ok(self.specs.iter().collect());
        }
        let mut seen = HashSet::new();
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let spec = self.find(name)?;
            if seen.insert(name_key(&spec.name)) {
                selected.push(spec);
            } else {
                debug!(environment = %spec.name, "skipping repeated environment");
            }
        }
        Ok(selected)
    }

    /// Price every selected environment.
    pub fn compare(&self, calculator: &CostCalculator, names: &[String]) -> Result<Comparison> {
        let selected = self.select(names)?;
        Ok(Comparison::evaluate(calculator, selected))
    }
}

impl Default for EnvironmentSet {
    fn default() -> Self {
        Self {
            specs: default_environments(),
        }
    }
}

impl Environment {
    pub fn evaluate(calculator: &CostCalculator, spec: &EnvironmentSpec) -> Self {
        let costs = calculator.calculate(&spec.usage);
        debug!(environment = %spec.name, total = costs.total(), "priced environment");
        Self {
            name: spec.name.clone(),
            usage: spec.usage.clone(),
            costs,
        }
    }

    pub fn total(&self) -> f64 {
        self.costs.total()
    }
}

impl Comparison {
    pub fn evaluate<'a>(
        calculator: &CostCalculator,
        specs: impl IntoIterator<Item = &'a EnvironmentSpec>,
    ) -> Self {
        let environments = specs
            .into_iter()
            .map(|spec| Environment::evaluate(calculator, spec))
            .collect();
        Self { environments }
    }

    /// `(environment name, monthly total)` in comparison order.
    pub fn totals(&self) -> Vec<(&str, f64)> {
        self.environments
            .iter()
            .map(|e| (e.name.as_str(), e.total()))
            .collect()
    }

    /// Per-service cost summed across all environments.
    pub fn service_totals(&self) -> CostBreakdown {
        self.environments
            .iter()
            .fold(CostBreakdown::default(), |acc, e| acc.combined(&e.costs))
    }

    pub fn service_total(&self, service: Service) -> f64 {
        self.environments.iter().map(|e| e.costs.get(service)).sum()
    }

    /// Sum of every environment's monthly total.
    pub fn grand_total(&self) -> f64 {
        self.environments.iter().map(Environment::total).sum()
    }

    /// Costliest environment; ties go to the first one compared.
    pub fn most_expensive(&self) -> Option<&Environment> {
        let mut best: Option<&Environment> = None;
        for env in &self.environments {
            match best {
                Some(b) if env.total() <= b.total() => {}
                _ => best = Some(env),
            }
        }
        best
    }
}

/// Key used for every name comparison: trimmed and lowercased.
fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The four stock environments used when the config defines none.
pub fn default_environments() -> Vec<EnvironmentSpec> {
    vec![
        EnvironmentSpec::new(
            "Production",
            UsageInputs {
                codecommit: CodeCommitUsage { active_users: 50 },
                codepipeline: CodePipelineUsage {
                    v1_pipelines: 5,
                    v2_minutes: 5_000,
                },
                codeguru: CodeGuruUsage {
                    repositories: 20,
                    lines_per_repository: 50_000,
                },
                codebuild: CodeBuildUsage {
                    builds: 3_000,
                    duration_minutes: 12,
                },
                codeartifact: CodeArtifactUsage {
                    storage_gb: 200.0,
                    requests: 2_000_000,
                    intra_region_gb: 50.0,
                    outbound_gb: 500.0,
                },
                codedeploy: CodeDeployUsage {
                    instances: 40,
                    deployments: 30,
                },
            },
        ),
        EnvironmentSpec::new(
            "Staging",
            UsageInputs {
                codecommit: CodeCommitUsage { active_users: 25 },
                codepipeline: CodePipelineUsage {
                    v1_pipelines: 3,
                    v2_minutes: 2_000,
                },
                codeguru: CodeGuruUsage {
                    repositories: 10,
                    lines_per_repository: 50_000,
                },
                codebuild: CodeBuildUsage {
                    builds: 1_000,
                    duration_minutes: 10,
                },
                codeartifact: CodeArtifactUsage {
                    storage_gb: 50.0,
                    requests: 500_000,
                    intra_region_gb: 20.0,
                    outbound_gb: 100.0,
                },
                codedeploy: CodeDeployUsage {
                    instances: 10,
                    deployments: 20,
                },
            },
        ),
        EnvironmentSpec::new(
            "Development",
            UsageInputs {
                codecommit: CodeCommitUsage { active_users: 40 },
                codepipeline: CodePipelineUsage {
                    v1_pipelines: 4,
                    v2_minutes: 3_000,
                },
                codeguru: CodeGuruUsage {
                    repositories: 20,
                    lines_per_repository: 50_000,
                },
                codebuild: CodeBuildUsage {
                    builds: 4_000,
                    duration_minutes: 8,
                },
                codeartifact: CodeArtifactUsage {
                    storage_gb: 80.0,
                    requests: 1_000_000,
                    intra_region_gb: 10.0,
                    outbound_gb: 50.0,
                },
                codedeploy: CodeDeployUsage {
                    instances: 5,
                    deployments: 60,
                },
            },
        ),
        EnvironmentSpec::new(
            "Testing",
            UsageInputs {
                codecommit: CodeCommitUsage { active_users: 15 },
                codepipeline: CodePipelineUsage {
                    v1_pipelines: 2,
                    v2_minutes: 1_500,
                },
                codeguru: CodeGuruUsage {
                    repositories: 10,
                    lines_per_repository: 50_000,
                },
                codebuild: CodeBuildUsage {
                    builds: 2_000,
                    duration_minutes: 15,
                },
                codeartifact: CodeArtifactUsage {
                    storage_gb: 30.0,
                    requests: 300_000,
                    intra_region_gb: 5.0,
                    outbound_gb: 20.0,
                },
                codedeploy: CodeDeployUsage {
                    instances: 5,
                    deployments: 40,
                },
            },
        ),
    ]
}
