//! Usage inputs, one group per priced service.
//!
//! Counts are unsigned so they can never go negative. Data volumes are `f64`
//! and are checked at the boundary by `crate::validation` before they reach
//! the calculator.

use serde::{Deserialize, Serialize};

/// Everything the calculator needs to price one environment for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UsageInputs {
    pub codecommit: CodeCommitUsage,
    pub codepipeline: CodePipelineUsage,
    pub codeguru: CodeGuruUsage,
    pub codebuild: CodeBuildUsage,
    pub codeartifact: CodeArtifactUsage,
    pub codedeploy: CodeDeployUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeCommitUsage {
    /// Active users this month
    pub active_users: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CodePipelineUsage {
    /// Active V1 pipelines
    pub v1_pipelines: u32,
    /// V2 action execution minutes
    pub v2_minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeGuruUsage {
    /// Repositories under review
    pub repositories: u32,
    pub lines_per_repository: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeBuildUsage {
    /// Builds per month
    pub builds: u32,
    /// Average build duration in minutes
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeArtifactUsage {
    pub storage_gb: f64,
    /// Requests per month
    pub requests: u64,
    /// Transfer between regions (in + out)
    pub intra_region_gb: f64,
    /// Transfer out to the internet
    pub outbound_gb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CodeDeployUsage {
    /// On-premises instances targeted
    pub instances: u32,
    /// Deployments per instance per month
    pub deployments: u32,
}

impl Default for CodeCommitUsage {
    fn default() -> Self {
        Self { active_users: 500 }
    }
}

impl Default for CodeGuruUsage {
    fn default() -> Self {
        Self {
            repositories: 1,
            lines_per_repository: 1000,
        }
    }
}

impl Default for CodeBuildUsage {
    fn default() -> Self {
        Self {
            builds: 1,
            duration_minutes: 10,
        }
    }
}

impl Default for CodeArtifactUsage {
    fn default() -> Self {
        Self {
            storage_gb: 100.0,
            requests: 100_000,
            intra_region_gb: 0.0,
            outbound_gb: 100.0,
        }
    }
}

impl UsageInputs {
    /// No usage anywhere. CodeGuru keeps its minimum of one repository.
    pub fn idle() -> Self {
        Self {
            codecommit: CodeCommitUsage { active_users: 0 },
            codepipeline: CodePipelineUsage {
                v1_pipelines: 0,
                v2_minutes: 0,
            },
            codeguru: CodeGuruUsage {
                repositories: 1,
                lines_per_repository: 0,
            },
            codebuild: CodeBuildUsage {
                builds: 0,
                duration_minutes: 0,
            },
            codeartifact: CodeArtifactUsage {
                storage_gb: 0.0,
                requests: 0,
                intra_region_gb: 0.0,
                outbound_gb: 0.0,
            },
            codedeploy: CodeDeployUsage {
                instances: 0,
                deployments: 0,
            },
        }
    }

    /// Total lines of code analysed by CodeGuru.
    pub fn codeguru_total_lines(&self) -> u64 {
        u64::from(self.codeguru.repositories).saturating_mul(self.codeguru.lines_per_repository)
    }
}
