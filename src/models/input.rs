use serde::{Deserialize, Serialize};

use crate::models::seed::SeedingRateUnit;

/// A product the grower picked, with an optional rate override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSelection {
    pub name: String,
    pub rate_override: Option<f64>,
}

impl ProductSelection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rate_override: None,
        }
    }

    pub fn with_rate(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate_override: Some(rate),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeedingRate {
    pub value: f64,
    pub unit: SeedingRateUnit,
}

/// Commodity price the ROI panel is expressed in, e.g. 5.00 per "bu".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub price: f64,
    pub unit: String,
}

/// Already-parsed inputs for one "Calculate" action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Seed type name; required only when seed treatments are selected.
    pub crop: Option<String>,
    pub acres: f64,
    pub seeding_rate: Option<SeedingRate>,
    pub seeds_per_lb_override: Option<f64>,
    pub seed_treatments: Vec<ProductSelection>,
    pub foliar_products: Vec<ProductSelection>,
    pub dealer_discount: f64,
    pub grower_discount: f64,
    pub market_price: Option<MarketPrice>,
}

impl Default for CalculationInput {
    fn default() -> Self {
        Self {
            crop: None,
            acres: 0.0,
            seeding_rate: None,
            seeds_per_lb_override: None,
            seed_treatments: Vec::new(),
            foliar_products: Vec::new(),
            dealer_discount: 0.0,
            grower_discount: 0.0,
            market_price: None,
        }
    }
}
