use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::engine::discount::{DiscountPolicy, Discounts};
use crate::engine::foliar::cost_foliar_products;
use crate::engine::program::aggregate_program_cost;
use crate::engine::roi::project_roi;
use crate::engine::seed_treatment::cost_seed_treatment;
use crate::engine::seeding::{normalize_seeding, require_positive};
use crate::error::{CalcError, Result};
use crate::models::{
    CalculationInput, CalculationReport, MarketPrice, ProgramTotals, RateSource, RoiProjection,
};

/// Run one full "Calculate" action against a catalog.
///
/// Discounts come from the input and are combined under `policy`. Seeding
/// inputs are only required when seed treatments are selected. An unusable
/// market price drops the ROI panel but keeps the costing.
pub fn calculate(
    catalog: &Catalog,
    input: &CalculationInput,
    policy: DiscountPolicy,
) -> Result<CalculationReport> {
    let acres = require_positive("acreage", input.acres)?;
    let discounts =
        Discounts::new(input.dealer_discount, input.grower_discount).with_policy(policy);
    let factor = discounts.factor()?;
    debug!(
        dealer = discounts.dealer,
        grower = discounts.grower,
        %policy,
        factor,
        "discounts"
    );

    let (seed_totals, seed_treatments) = if input.seed_treatments.is_empty() {
        (None, Vec::new())
    } else {
        let crop = input.crop.as_deref().ok_or_else(|| {
            CalcError::InvalidInput("a crop is required to cost seed treatments".to_string())
        })?;
        let rate = input.seeding_rate.ok_or_else(|| {
            CalcError::InvalidInput(
                "a seeding rate is required to cost seed treatments".to_string(),
            )
        })?;
        let seed_type = catalog.find_seed_type(crop)?;
        let totals = normalize_seeding(
            seed_type,
            acres,
            rate.value,
            rate.unit,
            input.seeds_per_lb_override,
        )?;
        debug!(
            crop,
            total_seeds = totals.total_seeds,
            total_units = totals.total_units,
            "normalized seeding"
        );

        let results = input
            .seed_treatments
            .iter()
            .map(|sel| {
                let product = catalog.find_product(&sel.name)?;
                cost_seed_treatment(product, &totals, &discounts, sel.rate_override)
            })
            .collect::<Result<Vec<_>>>()?;
        (Some(totals), results)
    };

    for result in &seed_treatments {
        if result.rate_source == RateSource::Unresolved {
            warn!(
                product = %result.product_name,
                "no application rate on file or supplied; product contributes no cost"
            );
        }
    }

    let foliar_products = input
        .foliar_products
        .iter()
        .map(|sel| {
            catalog
                .find_product(&sel.name)
                .map(|product| (product, sel.rate_override))
        })
        .collect::<Result<Vec<_>>>()?;
    let foliar = cost_foliar_products(&foliar_products, acres, &discounts)?;

    let totals = aggregate_program_cost(&seed_treatments, &foliar.results);
    debug!(
        undiscounted = totals.total_undiscounted_cost,
        discounted = totals.total_discounted_cost,
        per_acre = totals.total_cost_per_acre,
        "program totals"
    );

    let roi = project(&totals, input.market_price.as_ref())?;

    Ok(CalculationReport {
        seed_totals,
        seed_treatments,
        foliar,
        totals,
        roi,
    })
}

fn project(totals: &ProgramTotals, market_price: Option<&MarketPrice>) -> Result<RoiProjection> {
    let Some(market) = market_price else {
        return Ok(RoiProjection::NotRequested);
    };

    match project_roi(totals.total_cost_per_acre, market.price) {
        Ok(result) => Ok(RoiProjection::Projected {
            result,
            price: market.price,
            unit: market.unit.clone(),
        }),
        Err(e @ CalcError::InvalidMarketPrice(_)) => Ok(RoiProjection::Omitted {
            reason: e.to_string(),
        }),
        Err(e) => Err(e),
    }
}
