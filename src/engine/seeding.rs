use crate::engine::constants::{LBS_PER_BUSHEL, fixed_seeds_per_unit};
use crate::error::{CalcError, Result};
use crate::models::{SeedTotals, SeedTypeReference, SeedingRateUnit};

/// Require a strictly positive, finite value.
pub fn require_positive(label: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput(format!(
            "{} must be a positive number, got {}",
            label, value
        )))
    }
}

/// Seeds in one purchasing unit of this crop.
///
/// Corn and soybeans are sold by fixed seed count; everything else by weight.
pub fn seeds_per_unit(seed_type: &SeedTypeReference, seeds_per_lb: f64) -> f64 {
    fixed_seeds_per_unit(&seed_type.crop).unwrap_or(seeds_per_lb * seed_type.lbs_per_unit)
}

/// Convert a seeding rate over an acreage into seed count, weight and units.
pub fn normalize_seeding(
    seed_type: &SeedTypeReference,
    acres: f64,
    seeding_rate: f64,
    rate_unit: SeedingRateUnit,
    seeds_per_lb_override: Option<f64>,
) -> Result<SeedTotals> {
    let acres = require_positive("acreage", acres)?;
    let rate = require_positive("seeding rate", seeding_rate)?;

    let seeds_per_lb = match seeds_per_lb_override {
        Some(v) => require_positive("seeds per pound override", v)?,
        None => require_positive(
            &format!("{} seeds per pound", seed_type.crop),
            seed_type.seeds_per_lb,
        )?,
    };
    let lbs_per_unit = require_positive(
        &format!("{} pounds per unit", seed_type.crop),
        seed_type.lbs_per_unit,
    )?;

    let seeds_per_unit = seeds_per_unit(seed_type, seeds_per_lb);

    let (total_seeds, total_seed_weight, total_units) = match rate_unit {
        SeedingRateUnit::SeedsPerAcre => {
            let total_seeds = rate * acres;
            (
                total_seeds,
                total_seeds / seeds_per_lb,
                total_seeds / seeds_per_unit,
            )
        }
        SeedingRateUnit::LbsPerAcre => by_weight(rate * acres, seeds_per_lb, lbs_per_unit),
        SeedingRateUnit::BuPerAcre => {
            by_weight(rate * LBS_PER_BUSHEL * acres, seeds_per_lb, lbs_per_unit)
        }
    };

    if ![total_seeds, total_seed_weight, total_units]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(CalcError::InvalidInput(format!(
            "seeding {} {} over {} acres is too large to total",
            rate, rate_unit, acres
        )));
    }

    Ok(SeedTotals {
        acres,
        total_seeds,
        total_seed_weight,
        total_units,
        seeds_per_unit,
    })
}

fn by_weight(total_seed_weight: f64, seeds_per_lb: f64, lbs_per_unit: f64) -> (f64, f64, f64) {
    (
        total_seed_weight * seeds_per_lb,
        total_seed_weight,
        total_seed_weight / lbs_per_unit,
    )
}
