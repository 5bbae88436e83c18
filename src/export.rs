//! Export functions for estimates and comparisons

use crate::error::{CostError, Result};
use crate::report::{ComparisonReport, EstimateReport};
use crate::service::Service;
use crate::validation::validate_export_format;
use std::path::Path;
use tracing::info;

/// Anything that can be written out by `export`.
pub trait Exportable: serde::Serialize {
    fn to_csv(&self) -> String;
    fn to_html(&self) -> String;
}

/// Render `report` in `format` and write it to `file`, or stdout when `None`.
pub fn export<R: Exportable>(report: &R, format: &str, file: Option<&Path>) -> Result<()> {
    let content = render(report, format)?;

    if let Some(path) = file {
        std::fs::write(path, content).map_err(|e| {
            CostError::Export(format!("Failed to write {}: {}", path.display(), e))
        })?;
        info!("Exported {} report to {}", format, path.display());
        println!("Exported to {}", path.display());
    } else {
        print!("{}", content);
    }

    Ok(())
}

pub fn render<R: Exportable>(report: &R, format: &str) -> Result<String> {
    validate_export_format(format)?;
    match format {
        "csv" => Ok(report.to_csv()),
        "html" => Ok(report.to_html()),
        _ => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
    }
}

impl Exportable for EstimateReport {
    fn to_csv(&self) -> String {
        let mut csv = String::from("Service,Monthly (USD),Annual (USD),Share (%)\n");
        for line in &self.lines {
            csv.push_str(&format!(
                "{},{:.2},{:.2},{:.2}\n",
                line.service, line.monthly, line.annual, line.share
            ));
        }
        let share = if self.total > 0.0 { 100.0 } else { 0.0 };
        csv.push_str(&format!(
            "Total,{:.2},{:.2},{:.2}\n",
            self.total, self.annual_total, share
        ));
        csv
    }

    fn to_html(&self) -> String {
        let title = match &self.environment {
            Some(env) => format!("Cost Estimate: {}", escape_html(env)),
            None => "Cost Estimate".to_string(),
        };
        let generated = self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
        let mut html = html_head(&title, &generated);

        html.push_str(&format!(
            "    <p>Total monthly cost: <strong>${:.2}</strong> &middot; Most expensive service: <strong>{}</strong> &middot; Highest individual cost: <strong>${:.2}</strong></p>\n",
            self.total, self.most_expensive, self.max_cost
        ));
        html.push_str("    <table>\n        <tr><th>Service</th><th>Monthly</th><th>Annual</th><th>Share</th></tr>\n");

        let max = self.costs.max_cost();
        let min = self.costs.min_cost();
        for line in &self.lines {
            let class = if max > min && line.monthly == max {
                " class=\"max\""
            } else if max > min && line.monthly == min {
                " class=\"min\""
            } else {
                ""
            };
            html.push_str(&format!(
                "        <tr{}><td>{}</td><td>${:.2}</td><td>${:.2}</td><td>{:.1}%</td></tr>\n",
                class, line.service, line.monthly, line.annual, line.share
            ));
        }
        html.push_str(&format!(
            "        <tr class=\"total\"><td>Total</td><td>${:.2}</td><td>${:.2}</td><td></td></tr>\n",
            self.total, self.annual_total
        ));
        html.push_str(HTML_TAIL);
        html
    }
}

impl Exportable for ComparisonReport {
    fn to_csv(&self) -> String {
        let mut csv = String::from("Service");
        for env in &self.environments {
            csv.push(',');
            csv.push_str(&escape_csv(&env.name));
        }
        csv.push_str(",Total\n");

        for service in Service::ALL {
            csv.push_str(service.name());
            for env in &self.environments {
                csv.push_str(&format!(",{:.2}", env.costs.get(service)));
            }
            csv.push_str(&format!(",{:.2}\n", self.service_totals.get(service)));
        }

        csv.push_str("Total");
        for env in &self.environments {
            csv.push_str(&format!(",{:.2}", env.total));
        }
        csv.push_str(&format!(",{:.2}\n", self.grand_total));
        csv
    }

    fn to_html(&self) -> String {
        let mut html = html_head(
            "Environment Cost Comparison",
            &self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
        html.push_str(&format!(
            "    <p>Combined monthly cost: <strong>${:.2}</strong> &middot; Combined annual cost: <strong>${:.2}</strong></p>\n",
            self.grand_total, self.annual_grand_total
        ));

        html.push_str("    <table>\n        <tr><th>Service</th>");
        for env in &self.environments {
            html.push_str(&format!("<th>{}</th>", escape_html(&env.name)));
        }
        html.push_str("<th>Total</th></tr>\n");

        for service in Service::ALL {
            html.push_str(&format!("        <tr><td>{}</td>", service));
            for env in &self.environments {
                html.push_str(&format!("<td>${:.2}</td>", env.costs.get(service)));
            }
            html.push_str(&format!(
                "<td>${:.2}</td></tr>\n",
                self.service_totals.get(service)
            ));
        }

        html.push_str("        <tr class=\"total\"><td>Total</td>");
        for env in &self.environments {
            html.push_str(&format!("<td>${:.2}</td>", env.total));
        }
        html.push_str(&format!("<td>${:.2}</td></tr>\n", self.grand_total));
        html.push_str(HTML_TAIL);
        html
    }
}

fn html_head(title: &str, generated: &str) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>devcost Report</title>
    <style>
        body { font-family: monospace; margin: 20px; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: right; }
        th:first-child, td:first-child { text-align: left; }
        th { background-color: #4CAF50; color: white; }
        tr:nth-child(even) { background-color: #f2f2f2; }
        .max { background-color: #FF0000; color: white; }
        .min { background-color: #90EE90; }
        .total { font-weight: bold; }
    </style>
</head>
<body>
"#,
    );
    html.push_str(&format!("    <h1>{}</h1>\n", title));
    html.push_str(&format!("    <p>Generated: {}</p>\n", generated));
    html
}

const HTML_TAIL: &str = r#"    </table>
    <p><em>* Prices based on the US East (N. Virginia) region</em></p>
</body>
</html>
"#;

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::CostCalculator;
    use crate::environment::EnvironmentSet;
    use crate::usage::UsageInputs;

    fn estimate() -> EstimateReport {
        let usage = UsageInputs::default();
        let costs = CostCalculator::default().calculate(&usage);
        EstimateReport::new(Some("Prod <main>".to_string()), usage, costs)
    }

    fn comparison() -> ComparisonReport {
        let comparison = EnvironmentSet::default()
            .compare(&CostCalculator::default(), &[])
            .unwrap();
        ComparisonReport::new(&comparison)
    }

    #[test]
    fn test_estimate_csv() {
        let csv = estimate().to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Service,Monthly (USD),Annual (USD),Share (%)");
        assert!(lines[1].starts_with("CodeCommit,495.00,5940.00,"));
        assert!(lines[7].starts_with("Total,"));
    }

    #[test]
    fn test_estimate_html_escapes_environment() {
        let html = estimate().to_html();
        assert!(html.contains("Prod &lt;main&gt;"));
        assert!(html.contains("class=\"max\""));
        assert!(html.contains("</html>"));
    }

    #[test]
    fn test_comparison_csv_columns() {
        let csv = comparison().to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Service,Production,Staging,Development,Testing,Total");
        assert_eq!(lines.len(), 8);
        assert!(lines[7].starts_with("Total,"));
    }

    #[test]
    fn test_render_json() {
        let json = render(&comparison(), "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["environments"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_unsupported_format() {
        let err = render(&estimate(), "pdf").unwrap_err();
        assert!(matches!(err, CostError::Validation { ref field, .. } if field == "format"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("estimate.csv");
        export(&estimate(), "csv", Some(&path)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Service,"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
