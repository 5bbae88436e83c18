//! The six priced AWS developer-tooling services.

use crate::error::CostError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed services the calculator prices.
///
/// Variant order is the display order used by every table, chart and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Service {
    CodeCommit,
    CodePipeline,
    CodeGuru,
    CodeBuild,
    CodeArtifact,
    CodeDeploy,
}

impl Service {
    /// All services in declaration order.
    pub const ALL: [Service; 6] = [
        Service::CodeCommit,
        Service::CodePipeline,
        Service::CodeGuru,
        Service::CodeBuild,
        Service::CodeArtifact,
        Service::CodeDeploy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Service::CodeCommit => "CodeCommit",
            Service::CodePipeline => "CodePipeline",
            Service::CodeGuru => "CodeGuru",
            Service::CodeBuild => "CodeBuild",
            Service::CodeArtifact => "CodeArtifact",
            Service::CodeDeploy => "CodeDeploy",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Service {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.strip_prefix("aws").unwrap_or(wanted.as_str());
        Service::ALL
            .into_iter()
            .find(|svc| {
                let name = svc.name().to_ascii_lowercase();
                name == wanted || name.strip_prefix("code") == Some(wanted)
            })
            .ok_or_else(|| CostError::UnknownService(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order() {
        let names: Vec<_> = Service::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "CodeCommit",
                "CodePipeline",
                "CodeGuru",
                "CodeBuild",
                "CodeArtifact",
                "CodeDeploy"
            ]
        );
    }

    #[test]
    fn test_parse_service_names() {
        assert_eq!("CodeBuild".parse::<Service>().unwrap(), Service::CodeBuild);
        assert_eq!("codeguru".parse::<Service>().unwrap(), Service::CodeGuru);
        assert_eq!("deploy".parse::<Service>().unwrap(), Service::CodeDeploy);
        assert_eq!(
            "AWSCodeArtifact".parse::<Service>().unwrap(),
            Service::CodeArtifact
        );
    }

    #[test]
    fn test_parse_unknown_service() {
        let err = "lambda".parse::<Service>().unwrap_err();
        assert!(matches!(err, CostError::UnknownService(ref s) if s == "lambda"));
    }
}
