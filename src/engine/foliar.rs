use crate::engine::costing::{price, resolve_rate};
use crate::engine::discount::Discounts;
use crate::engine::seeding::require_positive;
use crate::error::{CalcError, Result};
use crate::models::{FoliarBatch, Product, ProductCalculationResult, ProductCategory};

/// Cost one foliar or in-furrow product applied across `acres`.
pub fn cost_foliar_product(
    product: &Product,
    acres: f64,
    discounts: &Discounts,
    rate_override: Option<f64>,
) -> Result<ProductCalculationResult> {
    if product.category != ProductCategory::InFurrowFoliar {
        return Err(CalcError::InvalidCatalog(format!(
            "{} is a {} product, not an in-furrow or foliar product",
            product.name, product.category
        )));
    }
    let acres = require_positive("acreage", acres)?;
    let factor = discounts.factor()?;

    // Foliar entries always carry a catalog rate once loaded, so Unresolved
    // only shows up for hand-built products.
    let (application_rate, rate_source) =
        resolve_rate(rate_override, product.basis.catalog_rate())?;

    let total_product_needed = application_rate * acres;
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
        cost_per_acre: pricing.applied_cost / acres,
        cost_per_seed_unit: None,
        seed_totals: None,
    })
}

/// Cost every selected foliar product and sum the results.
pub fn cost_foliar_products(
    selections: &[(&Product, Option<f64>)],
    acres: f64,
    discounts: &Discounts,
) -> Result<FoliarBatch> {
    let results = selections
        .iter()
        .map(|(product, rate_override)| {
            cost_foliar_product(product, acres, discounts, *rate_override)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FoliarBatch {
        total_cost_per_acre: results.iter().map(|r| r.cost_per_acre).sum(),
        total_undiscounted_cost: results.iter().map(|r| r.undiscounted_cost).sum(),
        total_discounted_cost: results.iter().map(|r| r.discounted_cost).sum(),
        results,
    })
}
