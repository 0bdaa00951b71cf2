use crate::engine::costing::{price, resolve_rate};
use crate::engine::discount::Discounts;
use crate::error::{CalcError, Result};
use crate::models::{ProductCalculationResult, Product, ProductCategory, SeedTotals};

/// Cost one seed-treatment product over the normalized seed quantity.
///
/// The rate is per seed unit. A product with no resolvable rate costs zero
/// and is reported with [`crate::models::RateSource::Unresolved`].
pub fn cost_seed_treatment(
    product: &Product,
    seeding: &SeedTotals,
    discounts: &Discounts,
    rate_override: Option<f64>,
) -> Result<ProductCalculationResult> {
    if product.category != ProductCategory::SeedTreatment {
        return Err(CalcError::InvalidCatalog(format!(
            "{} is a {} product, not a seed treatment",
            product.name, product.category
        )));
    }
    if !(seeding.acres > 0.0 && seeding.total_units > 0.0) {
        return Err(CalcError::InvalidInput(format!(
            "seed totals must cover a positive acreage and unit count, got {} acres and {} units",
            seeding.acres, seeding.total_units
        )));
    }

    let factor = discounts.factor()?;
    let (application_rate, rate_source) =
        resolve_rate(rate_override, product.basis.catalog_rate())?;

    let total_product_needed = application_rate * seeding.total_units;
    let pricing = price(product, total_product_needed, factor)?;

    Ok(ProductCalculationResult {
        product_name: product.name.clone(),
        category: product.category,
        measure: product.basis.measure(),
        application_rate,
        rate_label: product.rate_label(),
        rate_source,
        total_product_needed,
        packages_needed: pricing.packages_needed,
        package_description: product.package_description(pricing.packages_needed),
        undiscounted_cost: pricing.undiscounted_cost,
        discounted_cost: pricing.discounted_cost,
        cost_per_acre: pricing.applied_cost / seeding.acres,
        cost_per_seed_unit: Some(pricing.applied_cost / seeding.total_units),
        seed_totals: Some(*seeding),
    })
}
