//! Unit prices and free-tier thresholds.
//!
//! Every constant the calculator uses lives here so a config file can override
//! individual rates. Defaults are US East (N. Virginia) list prices.

use crate::error::{ConfigError, Result};
use crate::service::Service;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PriceTable {
    pub codecommit: CodeCommitRates,
    pub codepipeline: CodePipelineRates,
    pub codeguru: CodeGuruRates,
    pub codebuild: CodeBuildRates,
    pub codeartifact: CodeArtifactRates,
    pub codedeploy: CodeDeployRates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeCommitRates {
    pub free_users: u32,
    pub price_per_user: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodePipelineRates {
    pub free_v1_pipelines: u32,
    pub price_per_v1_pipeline: f64,
    pub free_v2_minutes: u64,
    pub price_per_v2_minute: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeGuruRates {
    /// Lines of code per billing tier; partial tiers round up
    pub lines_per_tier: u64,
    /// Price of the first tier
    pub base_price: f64,
    pub price_per_extra_tier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeBuildRates {
    pub price_per_build_minute: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeArtifactRates {
    pub free_storage_gb: f64,
    pub price_per_storage_gb: f64,
    pub free_requests: u64,
    pub price_per_request: f64,
    /// 0.01 in + 0.01 out
    pub price_per_intra_gb: f64,
    pub price_per_outbound_gb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeDeployRates {
    pub price_per_deployment: f64,
}

impl Default for CodeCommitRates {
    fn default() -> Self {
        Self {
            free_users: 5,
            price_per_user: 1.00,
        }
    }
}

impl Default for CodePipelineRates {
    fn default() -> Self {
        Self {
            free_v1_pipelines: 1,
            price_per_v1_pipeline: 1.00,
            free_v2_minutes: 100,
            price_per_v2_minute: 0.002,
        }
    }
}

impl Default for CodeGuruRates {
    fn default() -> Self {
        Self {
            lines_per_tier: 100_000,
            base_price: 10.00,
            price_per_extra_tier: 30.00,
        }
    }
}

impl Default for CodeBuildRates {
    fn default() -> Self {
        Self {
            price_per_build_minute: 0.09,
        }
    }
}

impl Default for CodeArtifactRates {
    fn default() -> Self {
        Self {
            free_storage_gb: 2.0,
            price_per_storage_gb: 0.05,
            free_requests: 100_000,
            price_per_request: 0.000005,
            price_per_intra_gb: 0.02,
            price_per_outbound_gb: 0.09,
        }
    }
}

impl Default for CodeDeployRates {
    fn default() -> Self {
        Self {
            price_per_deployment: 0.02,
        }
    }
}

impl PriceTable {
    /// Reject rates the formulas cannot use.
    ///
    /// A zero tier size would make the CodeGuru tier count undefined, and a
    /// negative or non-finite price would break the non-negativity of costs.
    pub fn validate(&self) -> Result<()> {
        if self.codeguru.lines_per_tier == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pricing.codeguru.lines_per_tier".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        for (field, value) in self.prices() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("pricing.{}", field),
                    reason: format!("must be a non-negative number, got {}", value),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Every floating-point rate, keyed by its dotted config path.
    pub fn prices(&self) -> [(&'static str, f64); 12] {
        [
            ("codecommit.price_per_user", self.codecommit.price_per_user),
            (
                "codepipeline.price_per_v1_pipeline",
                self.codepipeline.price_per_v1_pipeline,
            ),
            (
                "codepipeline.price_per_v2_minute",
                self.codepipeline.price_per_v2_minute,
            ),
            ("codeguru.base_price", self.codeguru.base_price),
            (
                "codeguru.price_per_extra_tier",
                self.codeguru.price_per_extra_tier,
            ),
            (
                "codebuild.price_per_build_minute",
                self.codebuild.price_per_build_minute,
            ),
            (
                "codeartifact.free_storage_gb",
                self.codeartifact.free_storage_gb,
            ),
            (
                "codeartifact.price_per_storage_gb",
                self.codeartifact.price_per_storage_gb,
            ),
            (
                "codeartifact.price_per_request",
                self.codeartifact.price_per_request,
            ),
            (
                "codeartifact.price_per_intra_gb",
                self.codeartifact.price_per_intra_gb,
            ),
            (
                "codeartifact.price_per_outbound_gb",
                self.codeartifact.price_per_outbound_gb,
            ),
            (
                "codedeploy.price_per_deployment",
                self.codedeploy.price_per_deployment,
            ),
        ]
    }

    /// The pricing rule for one service, rendered with the effective rates.
    pub fn describe(&self, service: Service) -> String {
        match service {
            Service::CodeCommit => format!(
                "max(users - {}, 0) x ${:.2}",
                self.codecommit.free_users, self.codecommit.price_per_user
            ),
            Service::CodePipeline => format!(
                "max(v1 pipelines - {}, 0) x ${:.2} + max(v2 minutes - {}, 0) x ${}",
                self.codepipeline.free_v1_pipelines,
                self.codepipeline.price_per_v1_pipeline,
                self.codepipeline.free_v2_minutes,
                self.codepipeline.price_per_v2_minute
            ),
            Service::CodeGuru => format!(
                "tiers = ceil(total lines / {}), at least 1; ${:.2} + (tiers - 1) x ${:.2}",
                self.codeguru.lines_per_tier,
                self.codeguru.base_price,
                self.codeguru.price_per_extra_tier
            ),
            Service::CodeBuild => format!(
                "builds x duration (min) x ${}",
                self.codebuild.price_per_build_minute
            ),
            Service::CodeArtifact => format!(
                "max(GB - {}, 0) x ${} + max(requests - {}, 0) x ${} + intra GB x ${} + outbound GB x ${}",
                self.codeartifact.free_storage_gb,
                self.codeartifact.price_per_storage_gb,
                self.codeartifact.free_requests,
                self.codeartifact.price_per_request,
                self.codeartifact.price_per_intra_gb,
                self.codeartifact.price_per_outbound_gb
            ),
            Service::CodeDeploy => format!(
                "instances x deployments x ${}",
                self.codedeploy.price_per_deployment
            ),
        }
    }
}
