//! Terminal and JSON rendering of estimates and comparisons.
//!
//! Report structs are plain serialisable snapshots; `render_*` functions turn
//! them into the text shown by the CLI. Nothing here computes prices.

use crate::breakdown::{CostBreakdown, CostLine};
use crate::config::ReportConfig;
use crate::environment::Comparison;
use crate::pricing::PriceTable;
use crate::service::Service;
use crate::usage::UsageInputs;
use crate::utils::{bar, format_percent, format_usd};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, CellAlignment, Color, Table};
use console::style;
use serde::Serialize;
use std::fmt::Write;

/// Snapshot of a single estimate.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub environment: Option<String>,
    pub usage: UsageInputs,
    pub costs: CostBreakdown,
    pub lines: Vec<CostLine>,
    pub total: f64,
    pub annual_total: f64,
    pub most_expensive: Service,
    pub max_cost: f64,
    pub generated_at: DateTime<Utc>,
}

/// Per-environment row of a comparison snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentTotals {
    pub name: String,
    pub costs: CostBreakdown,
    pub total: f64,
    pub annual_total: f64,
    pub most_expensive: Service,
}

/// Snapshot of a comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub environments: Vec<EnvironmentTotals>,
    pub service_totals: CostBreakdown,
    pub grand_total: f64,
    pub annual_grand_total: f64,
    pub most_expensive_environment: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl EstimateReport {
    pub fn new(environment: Option<String>, usage: UsageInputs, costs: CostBreakdown) -> Self {
        Self {
            environment,
            lines: costs.lines(),
            total: costs.total(),
            annual_total: costs.annual_total(),
            most_expensive: costs.most_expensive(),
            max_cost: costs.max_cost(),
            usage,
            costs,
            generated_at: Utc::now(),
        }
    }
}

impl ComparisonReport {
    pub fn new(comparison: &Comparison) -> Self {
        Self {
            environments: comparison
                .environments
                .iter()
                .map(|e| EnvironmentTotals {
                    name: e.name.clone(),
                    costs: e.costs,
                    total: e.total(),
                    annual_total: e.costs.annual_total(),
                    most_expensive: e.costs.most_expensive(),
                })
                .collect(),
            service_totals: comparison.service_totals(),
            grand_total: comparison.grand_total(),
            annual_grand_total: comparison.grand_total() * crate::breakdown::MONTHS_PER_YEAR,
            most_expensive_environment: comparison.most_expensive().map(|e| e.name.clone()),
            generated_at: Utc::now(),
        }
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", style(title).bold());
}

/// Colour the highest row red and the lowest green, as long as they differ.
fn highlight(cell: Cell, value: f64, max: f64, min: f64) -> Cell {
    if max > min && value == max {
        cell.fg(Color::Red)
    } else if max > min && value == min {
        cell.fg(Color::Green)
    } else {
        cell
    }
}

pub fn breakdown_table(costs: &CostBreakdown) -> Table {
    let max = costs.max_cost();
    let min = costs.min_cost();

    let mut table = Table::new();
    table.set_header(vec!["Service", "Monthly", "Annual", "Share"]);
    for line in costs.lines() {
        table.add_row(vec![
            Cell::new(line.service.name()),
            highlight(Cell::new(format_usd(line.monthly)), line.monthly, max, min)
                .set_alignment(CellAlignment::Right),
            highlight(Cell::new(format_usd(line.annual)), line.monthly, max, min)
                .set_alignment(CellAlignment::Right),
            Cell::new(format_percent(line.share)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(format_usd(costs.total())).set_alignment(CellAlignment::Right),
        Cell::new(format_usd(costs.annual_total())).set_alignment(CellAlignment::Right),
        Cell::new(format_percent(if costs.total() > 0.0 { 100.0 } else { 0.0 }))
            .set_alignment(CellAlignment::Right),
    ]);
    table
}

fn chart_rows(out: &mut String, rows: &[(String, f64)], width: usize, percent: bool) {
    let max = rows.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    for (label, value) in rows {
        let shown = if percent {
            format_percent(*value)
        } else {
            format_usd(*value)
        };
        let _ = writeln!(
            out,
            "  {:<label_width$}  {} {}",
            label,
            bar(*value, max, width),
            shown,
            label_width = label_width
        );
    }
}

pub fn render_estimate(
    report: &EstimateReport,
    rates: &PriceTable,
    settings: &ReportConfig,
) -> String {
    let mut out = String::new();
    let title = match &report.environment {
        Some(env) => format!("AWS Developer Tooling Cost Estimate: {}", env),
        None => "AWS Developer Tooling Cost Estimate".to_string(),
    };
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "{}", style(title).bold());
    let _ = writeln!(out, "{}", "=".repeat(80));

    heading(&mut out, "Key Metrics");
    let _ = writeln!(out, "  Total monthly cost:        {} USD", format_usd(report.total));
    let _ = writeln!(out, "  Most expensive service:    {}", report.most_expensive);
    let _ = writeln!(out, "  Highest individual cost:   {} USD", format_usd(report.max_cost));
    let _ = writeln!(out, "  Annual projection:         {} USD", format_usd(report.annual_total));

    heading(&mut out, "Cost by Service");
    let monthly: Vec<(String, f64)> = report
        .lines
        .iter()
        .map(|l| (l.service.to_string(), l.monthly))
        .collect();
    chart_rows(&mut out, &monthly, settings.chart_width, false);

    heading(&mut out, "Share of Total");
    let shares: Vec<(String, f64)> = report
        .lines
        .iter()
        .map(|l| (l.service.to_string(), l.share))
        .collect();
    chart_rows(&mut out, &shares, settings.chart_width, true);

    heading(&mut out, "Detailed Breakdown");
    let _ = writeln!(out, "{}", breakdown_table(&report.costs));

    if settings.explain {
        out.push_str(&render_rates(rates));
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}",
        style("* Prices based on the US East (N. Virginia) region").dim()
    );
    out
}

pub fn render_rates(rates: &PriceTable) -> String {
    let mut out = String::new();
    heading(&mut out, "Calculation Details");
    for service in Service::ALL {
        let _ = writeln!(out, "  {:<13} {}", service.name(), rates.describe(service));
    }
    out
}

pub fn render_comparison(report: &ComparisonReport, settings: &ReportConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "{}", style("Environment Cost Comparison").bold());
    let _ = writeln!(out, "{}", "=".repeat(80));

    heading(&mut out, "Key Metrics");
    let _ = writeln!(
        out,
        "  Combined monthly cost:     {} USD",
        format_usd(report.grand_total)
    );
    let _ = writeln!(
        out,
        "  Combined annual cost:      {} USD",
        format_usd(report.annual_grand_total)
    );
    if let Some(name) = &report.most_expensive_environment {
        let _ = writeln!(out, "  Most expensive environment: {}", name);
    }

    heading(&mut out, "Monthly Total by Environment");
    let totals: Vec<(String, f64)> = report
        .environments
        .iter()
        .map(|e| (e.name.clone(), e.total))
        .collect();
    chart_rows(&mut out, &totals, settings.chart_width, false);

    heading(&mut out, "Environment Totals");
    let mut table = Table::new();
    table.set_header(vec![
        "Environment",
        "Monthly",
        "Annual",
        "Share",
        "Top Service",
    ]);
    for env in &report.environments {
        let share = if report.grand_total > 0.0 {
            env.total / report.grand_total * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(&env.name),
            Cell::new(format_usd(env.total)).set_alignment(CellAlignment::Right),
            Cell::new(format_usd(env.annual_total)).set_alignment(CellAlignment::Right),
            Cell::new(format_percent(share)).set_alignment(CellAlignment::Right),
            Cell::new(env.most_expensive.name()),
        ]);
    }
    let _ = writeln!(out, "{}", table);

    heading(&mut out, "Service x Environment (monthly)");
    let _ = writeln!(out, "{}", comparison_matrix(report));
    out
}

/// One row per service, one column per environment, plus a total row and column.
pub fn comparison_matrix(report: &ComparisonReport) -> Table {
    let mut table = Table::new();
    let mut header = vec!["Service".to_string()];
    header.extend(report.environments.iter().map(|e| e.name.clone()));
    header.push("Total".to_string());
    table.set_header(header);

    for service in Service::ALL {
        let mut row = vec![Cell::new(service.name())];
        for env in &report.environments {
            row.push(
                Cell::new(format_usd(env.costs.get(service))).set_alignment(CellAlignment::Right),
            );
        }
        row.push(
            Cell::new(format_usd(report.service_totals.get(service)))
                .set_alignment(CellAlignment::Right),
        );
        table.add_row(row);
    }

    let mut total_row = vec![Cell::new("Total")];
    for env in &report.environments {
        total_row.push(Cell::new(format_usd(env.total)).set_alignment(CellAlignment::Right));
    }
    total_row.push(Cell::new(format_usd(report.grand_total)).set_alignment(CellAlignment::Right));
    table.add_row(total_row);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::CostCalculator;
    use crate::environment::EnvironmentSet;

    fn estimate() -> EstimateReport {
        let usage = UsageInputs::default();
        let costs = CostCalculator::default().calculate(&usage);
        EstimateReport::new(None, usage, costs)
    }

    #[test]
    fn test_estimate_report_aggregates() {
        let report = estimate();
        assert_eq!(report.lines.len(), 6);
        assert_eq!(report.most_expensive, Service::CodeCommit);
        assert_eq!(report.max_cost, 495.0);
        assert_eq!(report.total, report.costs.total());
        assert_eq!(report.annual_total, report.total * 12.0);
    }

    #[test]
    fn test_render_estimate_contains_metrics_and_table() {
        let text = render_estimate(&estimate(), &PriceTable::default(), &ReportConfig::default());
        assert!(text.contains("Key Metrics"));
        assert!(text.contains("Most expensive service:    CodeCommit"));
        assert!(text.contains("$495.00"));
        assert!(text.contains("$5,940.00")); // CodeCommit annual
        for service in Service::ALL {
            assert!(text.contains(service.name()));
        }
        assert!(!text.contains("Calculation Details"));
    }

    #[test]
    fn test_render_estimate_explain() {
        let settings = ReportConfig {
            explain: true,
            ..ReportConfig::default()
        };
        let text = render_estimate(&estimate(), &PriceTable::default(), &settings);
        assert!(text.contains("Calculation Details"));
        assert!(text.contains("max(users - 5, 0)"));
    }

    #[test]
    fn test_estimate_report_serializes() {
        let json = serde_json::to_value(estimate()).unwrap();
        assert_eq!(json["most_expensive"], "CodeCommit");
        assert_eq!(json["costs"]["codecommit"], 495.0);
        assert_eq!(json["lines"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_render_comparison() {
        let comparison = EnvironmentSet::default()
            .compare(&CostCalculator::default(), &[])
            .unwrap();
        let report = ComparisonReport::new(&comparison);
        assert_eq!(report.environments.len(), 4);
        assert_eq!(report.most_expensive_environment.as_deref(), Some("Production"));

        let text = render_comparison(&report, &ReportConfig::default());
        assert!(text.contains("Environment Totals"));
        for name in ["Production", "Staging", "Development", "Testing"] {
            assert!(text.contains(name));
        }
        assert!(text.contains(&format_usd(report.grand_total)));
    }
}
