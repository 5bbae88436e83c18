//! Cost calculator
//!
//! Maps a `UsageInputs` record to a `CostBreakdown`. Each service is priced by
//! its own function; free tiers are subtracted before multiplying by the unit
//! price, so usage below a threshold costs exactly zero.
//!
//! The calculator is pure: same inputs and rates, bit-identical output. It does
//! not validate; callers go through `crate::validation` first.

use crate::breakdown::CostBreakdown;
use crate::pricing::PriceTable;
use crate::service::Service;
use crate::usage::UsageInputs;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct CostCalculator {
    rates: PriceTable,
}

impl CostCalculator {
    pub fn new(rates: PriceTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &PriceTable {
        &self.rates
    }

    pub fn calculate(&self, usage: &UsageInputs) -> CostBreakdown {
        let mut breakdown = CostBreakdown::default();
        for service in Service::ALL {
            breakdown.set(service, self.service_cost(service, usage));
        }
        debug!(total = breakdown.total(), "calculated monthly costs");
        breakdown
    }

    pub fn service_cost(&self, service: Service, usage: &UsageInputs) -> f64 {
        match service {
            Service::CodeCommit => self.codecommit(usage),
            Service::CodePipeline => self.codepipeline(usage),
            Service::CodeGuru => self.codeguru(usage),
            Service::CodeBuild => self.codebuild(usage),
            Service::CodeArtifact => self.codeartifact(usage),
            Service::CodeDeploy => self.codedeploy(usage),
        }
    }

    fn codecommit(&self, usage: &UsageInputs) -> f64 {
        let rates = &self.rates.codecommit;
        let billable = usage.codecommit.active_users.saturating_sub(rates.free_users);
        f64::from(billable) * rates.price_per_user
    }

    fn codepipeline(&self, usage: &UsageInputs) -> f64 {
        let rates = &self.rates.codepipeline;
        let pipelines = usage
            .codepipeline
            .v1_pipelines
            .saturating_sub(rates.free_v1_pipelines);
        let minutes = usage
            .codepipeline
            .v2_minutes
            .saturating_sub(rates.free_v2_minutes);
        f64::from(pipelines) * rates.price_per_v1_pipeline
            + minutes as f64 * rates.price_per_v2_minute
    }

    fn codeguru(&self, usage: &UsageInputs) -> f64 {
        let rates = &self.rates.codeguru;
        let tiers = codeguru_tiers(usage.codeguru_total_lines(), rates.lines_per_tier);
        rates.base_price + (tiers - 1) as f64 * rates.price_per_extra_tier
    }

    fn codebuild(&self, usage: &UsageInputs) -> f64 {
        let build_minutes =
            u64::from(usage.codebuild.builds) * u64::from(usage.codebuild.duration_minutes);
        build_minutes as f64 * self.rates.codebuild.price_per_build_minute
    }

    fn codeartifact(&self, usage: &UsageInputs) -> f64 {
        let rates = &self.rates.codeartifact;
        let artifact = &usage.codeartifact;

        let storage = (artifact.storage_gb - rates.free_storage_gb).max(0.0);
        let requests = artifact.requests.saturating_sub(rates.free_requests);

        storage * rates.price_per_storage_gb
            + requests as f64 * rates.price_per_request
            + artifact.intra_region_gb * rates.price_per_intra_gb
            + artifact.outbound_gb * rates.price_per_outbound_gb
    }

    fn codedeploy(&self, usage: &UsageInputs) -> f64 {
        let deployments =
            u64::from(usage.codedeploy.instances) * u64::from(usage.codedeploy.deployments);
        deployments as f64 * self.rates.codedeploy.price_per_deployment
    }
}

/// Number of CodeGuru billing tiers: `ceil(lines / lines_per_tier)`, at least 1.
///
/// A `lines_per_tier` of zero is treated as one line per tier.
pub fn codeguru_tiers(total_lines: u64, lines_per_tier: u64) -> u64 {
    total_lines.div_ceil(lines_per_tier.max(1)).max(1)
}
