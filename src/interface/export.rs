use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::CalculationReport;

/// Round to n decimal places.
fn round(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn optional(value: Option<f64>, decimals: u32) -> String {
    value
        .map(|v| round(v, decimals).to_string())
        .unwrap_or_default()
}

/// Write one row per product to a CSV file.
pub fn write_csv(report: &CalculationReport, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "product",
        "category",
        "application_rate",
        "rate_unit",
        "total_product_needed",
        "measure",
        "packages_needed",
        "packages",
        "undiscounted_cost",
        "discounted_cost",
        "cost_per_acre",
        "cost_per_seed_unit",
    ])?;

    for result in report.all_results() {
        wtr.write_record([
            result.product_name.clone(),
            result.category.to_string(),
            round(result.application_rate, 4).to_string(),
            result.rate_label.clone(),
            round(result.total_product_needed, 2).to_string(),
            result.measure.label().to_string(),
            result.packages_needed.to_string(),
            result.package_description.clone(),
            format!("{:.2}", result.undiscounted_cost),
            format!("{:.2}", result.discounted_cost),
            format!("{:.2}", result.cost_per_acre),
            optional(result.cost_per_seed_unit, 4),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the full report as pretty-printed JSON.
pub fn write_json(report: &CalculationReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
