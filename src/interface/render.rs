use crate::catalog::Catalog;
use crate::engine::currency::format_currency;
use crate::models::{
    CalculationReport, ProductCalculationResult, ProductCategory, RateSource, RoiProjection,
    SeedTotals,
};

/// Display a calculation report as formatted tables.
pub fn display_report(report: &CalculationReport) {
    if report.all_results().next().is_none() {
        println!("No products selected.");
        return;
    }

    if let Some(seed) = &report.seed_totals {
        display_seed_totals(seed);
    }

    if !report.seed_treatments.is_empty() {
        display_results("Seed Treatments", &report.seed_treatments);
    }

    if !report.foliar.results.is_empty() {
        display_results("In-Furrow / Foliar", &report.foliar.results);
    }

    println!("--- Program Totals ---");
    println!(
        "Total MSRP:             {}",
        format_currency(report.totals.total_undiscounted_cost)
    );
    println!(
        "Total after discounts:  {}",
        format_currency(report.totals.total_discounted_cost)
    );
    println!(
        "Cost per acre:          {}",
        format_currency(report.totals.total_cost_per_acre)
    );
    println!();

    display_roi(&report.roi);
}

fn display_seed_totals(seed: &SeedTotals) {
    println!();
    println!("=== Seed ===");
    println!("Acres:          {:.1}", seed.acres);
    println!("Total seeds:    {:.0}", seed.total_seeds);
    println!("Seed weight:    {:.1} lbs", seed.total_seed_weight);
    println!("Seed units:     {:.1}", seed.total_units);
    println!("Seeds per unit: {:.0}", seed.seeds_per_unit);
}

fn display_results(title: &str, results: &[ProductCalculationResult]) {
    println!();
    println!("=== {} ===", title);
    println!();

    // Find max product name length for alignment
    let width = results
        .iter()
        .map(|r| r.product_name.len())
        .max()
        .unwrap_or(10);

    for result in results {
        let unresolved = if result.rate_source == RateSource::Unresolved {
            "  [no rate on file]"
        } else {
            ""
        };

        println!(
            "{:<width$}  {:>8.3} {:<10} | need {:>10.2} {:<5} | {}",
            result.product_name,
            result.application_rate,
            result.rate_label,
            result.total_product_needed,
            result.measure.label(),
            result.package_description,
            width = width
        );

        let per_unit = match result.cost_per_seed_unit {
            Some(c) => format!(" | {}/unit", format_currency(c)),
            None => String::new(),
        };
        println!(
            "{:<width$}  MSRP {} | net {} | {}/acre{}{}",
            "",
            format_currency(result.undiscounted_cost),
            format_currency(result.discounted_cost),
            format_currency(result.cost_per_acre),
            per_unit,
            unresolved,
            width = width
        );
    }

    println!();
}

fn display_roi(roi: &RoiProjection) {
    match roi {
        RoiProjection::NotRequested => {}
        RoiProjection::Omitted { reason } => {
            println!("ROI omitted: {}", reason);
            println!();
        }
        RoiProjection::Projected {
            result,
            price,
            unit,
        } => {
            println!("--- ROI at {}/{} ---", format_currency(*price), unit);
            println!("Breakeven: {:>8.2} {}/acre", result.breakeven, unit);
            println!("2:1 ROI:   {:>8.2} {}/acre", result.roi_2_to_1, unit);
            println!("3:1 ROI:   {:>8.2} {}/acre", result.roi_3_to_1, unit);
            println!("4:1 ROI:   {:>8.2} {}/acre", result.roi_4_to_1, unit);
            println!("5:1 ROI:   {:>8.2} {}/acre", result.roi_5_to_1, unit);
            println!();
        }
    }
}

/// Display the catalog grouped by category.
pub fn display_catalog(catalog: &Catalog) {
    if catalog.is_empty() {
        println!("Catalog is empty.");
        return;
    }

    println!();
    println!("=== Seed Types ({} items) ===", catalog.seed_type_count());
    for seed in catalog.seed_types() {
        println!(
            "  {} - {} seeds/lb, {} lbs/unit",
            seed.crop, seed.seeds_per_lb, seed.lbs_per_unit
        );
    }

    for category in [ProductCategory::SeedTreatment, ProductCategory::InFurrowFoliar] {
        let products = catalog.products_in(category);
        println!();
        println!("=== {} ({} items) ===", category, products.len());
        for p in products {
            let rate = match p.basis.catalog_rate() {
                Some(r) => format!("{} {}", r, p.rate_label()),
                None => "no rate on file".to_string(),
            };
            println!(
                "  {} - {} {} {}, {} ({}/{}), {}",
                p.name,
                p.package_size,
                p.package_units,
                p.packaging,
                format_currency(p.cost_per_package),
                format_currency(p.basis.cost_per_measure()),
                p.basis.measure().label(),
                rate
            );
        }
    }

    println!();
}
