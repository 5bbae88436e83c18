//! devcost library
//!
//! Estimates the monthly cost of AWS developer tooling (CodeCommit,
//! CodePipeline, CodeGuru, CodeBuild, CodeArtifact, CodeDeploy) from usage
//! figures, for a single scenario or for several named environments side by
//! side.
//!
//! ```
//! use devcost::{CostCalculator, Service, UsageInputs};
//!
//! let costs = CostCalculator::default().calculate(&UsageInputs::default());
//! assert_eq!(costs.most_expensive(), Service::CodeCommit);
//! assert_eq!(costs.get(Service::CodeCommit), 495.0);
//! ```

pub mod breakdown;
pub mod calculator;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod exit_codes;
pub mod export;
pub mod pricing;
pub mod report;
pub mod service;
pub mod usage;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use breakdown::CostBreakdown;
pub use calculator::CostCalculator;
pub use environment::{Comparison, Environment, EnvironmentSet, EnvironmentSpec};
pub use pricing::PriceTable;
pub use service::Service;
pub use usage::UsageInputs;
