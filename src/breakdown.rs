//! Monthly cost per service and the aggregates derived from it.

use crate::service::Service;
use serde::{Deserialize, Serialize};

/// Months used to annualise a monthly figure.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Monthly USD cost for each of the six services.
///
/// All fields are always present; iteration follows `Service::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub codecommit: f64,
    pub codepipeline: f64,
    pub codeguru: f64,
    pub codebuild: f64,
    pub codeartifact: f64,
    pub codedeploy: f64,
}

/// One row of the detailed cost table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub service: Service,
    pub monthly: f64,
    pub annual: f64,
    /// Percent of the monthly total
    pub share: f64,
}

impl CostBreakdown {
    pub fn get(&self, service: Service) -> f64 {
        match service {
            Service::CodeCommit => self.codecommit,
            Service::CodePipeline => self.codepipeline,
            Service::CodeGuru => self.codeguru,
            Service::CodeBuild => self.codebuild,
            Service::CodeArtifact => self.codeartifact,
            Service::CodeDeploy => self.codedeploy,
        }
    }

    pub(crate) fn set(&mut self, service: Service, cost: f64) {
        let slot = match service {
            Service::CodeCommit => &mut self.codecommit,
            Service::CodePipeline => &mut self.codepipeline,
            Service::CodeGuru => &mut self.codeguru,
            Service::CodeBuild => &mut self.codebuild,
            Service::CodeArtifact => &mut self.codeartifact,
            Service::CodeDeploy => &mut self.codedeploy,
        };
        *slot = cost;
    }

    /// `(service, monthly cost)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Service, f64)> + '_ {
        Service::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Sum of all services, accumulated in declaration order.
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, cost)| cost).sum()
    }

    /// The costliest service. Ties go to the first service in declaration order.
    pub fn most_expensive(&self) -> Service {
        let mut best = (Service::ALL[0], self.get(Service::ALL[0]));
        for (service, cost) in self.iter().skip(1) {
            if cost > best.1 {
                best = (service, cost);
            }
        }
        best.0
    }

    /// The cheapest service, with the same tie rule as `most_expensive`.
    pub fn cheapest(&self) -> Service {
        let mut best = (Service::ALL[0], self.get(Service::ALL[0]));
        for (service, cost) in self.iter().skip(1) {
            if cost < best.1 {
                best = (service, cost);
            }
        }
        best.0
    }

    pub fn max_cost(&self) -> f64 {
        self.get(self.most_expensive())
    }

    pub fn min_cost(&self) -> f64 {
        self.get(self.cheapest())
    }

    pub fn annual(&self, service: Service) -> f64 {
        self.get(service) * MONTHS_PER_YEAR
    }

    pub fn annual_total(&self) -> f64 {
        self.total() * MONTHS_PER_YEAR
    }

    /// Percent of the monthly total spent on `service`, 0 when nothing is spent.
    pub fn share(&self, service: Service) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.get(service) / total * 100.0
        } else {
            0.0
        }
    }

    pub fn lines(&self) -> Vec<CostLine> {
        self.iter()
            .map(|(service, monthly)| CostLine {
                service,
                monthly,
                annual: monthly * MONTHS_PER_YEAR,
                share: self.share(service),
            })
            .collect()
    }

    /// Element-wise sum, used for cross-environment totals.
    pub fn combined(&self, other: &CostBreakdown) -> CostBreakdown {
        let mut out = *self;
        for (service, cost) in other.iter() {
            out.set(service, out.get(service) + cost);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CostBreakdown {
        CostBreakdown {
            codecommit: 495.0,
            codepipeline: 1.2,
            codeguru: 10.0,
            codebuild: 0.9,
            codeartifact: 13.9,
            codedeploy: 0.0,
        }
    }

    #[test]
    fn test_total_is_sum_of_values() {
        let b = sample();
        let manual = 495.0 + 1.2 + 10.0 + 0.9 + 13.9 + 0.0;
        assert_eq!(b.total(), manual);
    }

    #[test]
    fn test_most_expensive_and_max() {
        let b = sample();
        assert_eq!(b.most_expensive(), Service::CodeCommit);
        assert_eq!(b.max_cost(), 495.0);
        assert_eq!(b.cheapest(), Service::CodeDeploy);
        assert_eq!(b.min_cost(), 0.0);
    }

    #[test]
    fn test_ties_resolve_to_first_declared() {
        let b = CostBreakdown {
            codeguru: 10.0,
            codebuild: 10.0,
            codedeploy: 10.0,
            ..Default::default()
        };
        assert_eq!(b.most_expensive(), Service::CodeGuru);

        let zero = CostBreakdown::default();
        assert_eq!(zero.most_expensive(), Service::CodeCommit);
        assert_eq!(zero.cheapest(), Service::CodeCommit);
    }

    #[test]
    fn test_annual_is_twelve_months() {
        let b = sample();
        assert_eq!(b.annual(Service::CodeGuru), 120.0);
        assert_eq!(b.annual_total(), b.total() * 12.0);
    }

    #[test]
    fn test_share_sums_to_hundred() {
        let b = sample();
        let sum: f64 = Service::ALL.iter().map(|s| b.share(*s)).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(CostBreakdown::default().share(Service::CodeBuild), 0.0);
    }

    #[test]
    fn test_lines_follow_declaration_order() {
        let lines = sample().lines();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0].service, Service::CodeCommit);
        assert_eq!(lines[5].service, Service::CodeDeploy);
        assert_eq!(lines[2].annual, 120.0);
    }

    #[test]
    fn test_combined_adds_per_service() {
        let a = sample();
        let both = a.combined(&a);
        assert_eq!(both.codecommit, 990.0);
        assert_eq!(both.codeguru, 20.0);
    }
}
