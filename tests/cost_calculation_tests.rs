//! Tests for the per-service pricing formulas and breakdown aggregates.

use devcost::{CostBreakdown, CostCalculator, PriceTable, Service, UsageInputs};

fn idle() -> UsageInputs {
    UsageInputs::idle()
}

fn cost(usage: &UsageInputs, service: Service) -> f64 {
    CostCalculator::default().calculate(usage).get(service)
}

#[test]
fn test_idle_usage_only_pays_codeguru_minimum() {
    let b = CostCalculator::default().calculate(&idle());
    assert_eq!(b.get(Service::CodeCommit), 0.0);
    assert_eq!(b.get(Service::CodePipeline), 0.0);
    assert_eq!(b.get(Service::CodeGuru), 10.0);
    assert_eq!(b.get(Service::CodeBuild), 0.0);
    assert_eq!(b.get(Service::CodeArtifact), 0.0);
    assert_eq!(b.get(Service::CodeDeploy), 0.0);
}

#[test]
fn test_codecommit_boundaries() {
    let mut usage = idle();
    usage.codecommit.active_users = 5;
    assert_eq!(cost(&usage, Service::CodeCommit), 0.0);
    usage.codecommit.active_users = 6;
    assert_eq!(cost(&usage, Service::CodeCommit), 1.0);
    usage.codecommit.active_users = 505;
    assert_eq!(cost(&usage, Service::CodeCommit), 500.0);
}

#[test]
fn test_codeguru_boundaries() {
    let mut usage = idle();
    usage.codeguru.repositories = 1;
    usage.codeguru.lines_per_repository = 100_000;
    assert_eq!(cost(&usage, Service::CodeGuru), 10.0);
    usage.codeguru.lines_per_repository = 100_001;
    assert_eq!(cost(&usage, Service::CodeGuru), 40.0);
}

#[test]
fn test_codeguru_zero_lines_still_one_tier() {
    let mut usage = idle();
    usage.codeguru.repositories = 0;
    usage.codeguru.lines_per_repository = 0;
    assert_eq!(cost(&usage, Service::CodeGuru), 10.0);
}

#[test]
fn test_codepipeline_boundaries() {
    let mut usage = idle();
    usage.codepipeline.v1_pipelines = 1;
    usage.codepipeline.v2_minutes = 100;
    assert_eq!(cost(&usage, Service::CodePipeline), 0.0);

    usage.codepipeline.v1_pipelines = 2;
    usage.codepipeline.v2_minutes = 200;
    assert!((cost(&usage, Service::CodePipeline) - 1.20).abs() < 1e-12);
}

#[test]
fn test_codebuild_uses_per_minute_rate() {
    let mut usage = idle();
    usage.codebuild.builds = 1;
    usage.codebuild.duration_minutes = 10;
    assert!((cost(&usage, Service::CodeBuild) - 0.90).abs() < 1e-12);
}

#[test]
fn test_codeartifact_has_no_flat_offset() {
    let mut usage = idle();
    usage.codeartifact.storage_gb = 1.5;
    usage.codeartifact.requests = 50_000;
    assert_eq!(cost(&usage, Service::CodeArtifact), 0.0);
}

#[test]
fn test_total_equals_sum_of_services() {
    let b = CostCalculator::default().calculate(&UsageInputs::default());
    let sum = b.iter().map(|(_, c)| c).fold(0.0, |acc, c| acc + c);
    assert_eq!(b.total(), sum);
}

#[test]
fn test_most_expensive_tie_goes_to_first_declared() {
    let b = CostBreakdown {
        codepipeline: 5.0,
        codedeploy: 5.0,
        ..Default::default()
    };
    assert_eq!(b.most_expensive(), Service::CodePipeline);
    assert_eq!(b.max_cost(), 5.0);
}

#[test]
fn test_annual_cost_per_service() {
    let b = CostCalculator::default().calculate(&UsageInputs::default());
    for service in Service::ALL {
        assert_eq!(b.annual(service), b.get(service) * 12.0);
    }
}

#[test]
fn test_zero_rates_price_everything_at_zero() {
    let mut rates = PriceTable::default();
    rates.codecommit.price_per_user = 0.0;
    rates.codepipeline.price_per_v1_pipeline = 0.0;
    rates.codepipeline.price_per_v2_minute = 0.0;
    rates.codeguru.base_price = 0.0;
    rates.codeguru.price_per_extra_tier = 0.0;
    rates.codebuild.price_per_build_minute = 0.0;
    rates.codeartifact.price_per_storage_gb = 0.0;
    rates.codeartifact.price_per_request = 0.0;
    rates.codeartifact.price_per_intra_gb = 0.0;
    rates.codeartifact.price_per_outbound_gb = 0.0;
    rates.codedeploy.price_per_deployment = 0.0;

    let b = CostCalculator::new(rates).calculate(&UsageInputs::default());
    assert_eq!(b.total(), 0.0);
}
