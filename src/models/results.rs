use serde::{Deserialize, Serialize};

use crate::models::product::{Measure, ProductCategory};

/// Seed quantities for the whole field on a common basis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeedTotals {
    pub acres: f64,
    pub total_seeds: f64,
    /// Pounds of seed.
    pub total_seed_weight: f64,
    /// Seed units (bags) of seed.
    pub total_units: f64,
    pub seeds_per_unit: f64,
}

/// Where a product's application rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateSource {
    Override,
    Catalog,
    /// Neither an override nor a catalog rate; the product costs nothing.
    Unresolved,
}

/// Costing for one selected product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCalculationResult {
    pub product_name: String,
    pub category: ProductCategory,
    pub measure: Measure,
    pub application_rate: f64,
    pub rate_label: String,
    pub rate_source: RateSource,
    pub total_product_needed: f64,
    pub packages_needed: u64,
    pub package_description: String,
    pub undiscounted_cost: f64,
    pub discounted_cost: f64,
    pub cost_per_acre: f64,
    /// Seed treatments only.
    pub cost_per_seed_unit: Option<f64>,
    /// Seed treatments only.
    pub seed_totals: Option<SeedTotals>,
}

/// Foliar / in-furrow results plus their running sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoliarBatch {
    pub results: Vec<ProductCalculationResult>,
    pub total_cost_per_acre: f64,
    pub total_undiscounted_cost: f64,
    pub total_discounted_cost: f64,
}

/// Whole-program totals across both costing stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramTotals {
    pub total_undiscounted_cost: f64,
    pub total_discounted_cost: f64,
    pub total_cost_per_acre: f64,
}

/// Yields (price units per acre) needed to break even or hit a return multiple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub breakeven: f64,
    pub roi_2_to_1: f64,
    pub roi_3_to_1: f64,
    pub roi_4_to_1: f64,
    pub roi_5_to_1: f64,
}

impl RoiResult {
    /// Required yield for a supported return multiple (1 through 5).
    pub fn yield_at_multiple(&self, multiple: u32) -> Option<f64> {
        match multiple {
            1 => Some(self.breakeven),
            2 => Some(self.roi_2_to_1),
            3 => Some(self.roi_3_to_1),
            4 => Some(self.roi_4_to_1),
            5 => Some(self.roi_5_to_1),
            _ => None,
        }
    }
}

/// Outcome of the ROI stage of a full calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoiProjection {
    /// No market price was supplied.
    NotRequested,
    Projected { result: RoiResult, price: f64, unit: String },
    /// The market price was unusable; costing is still valid.
    Omitted { reason: String },
}

/// Everything one "Calculate" action produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    pub seed_totals: Option<SeedTotals>,
    pub seed_treatments: Vec<ProductCalculationResult>,
    pub foliar: FoliarBatch,
    pub totals: ProgramTotals,
    pub roi: RoiProjection,
}

impl CalculationReport {
    /// Seed-treatment results followed by foliar results.
    pub fn all_results(&self) -> impl Iterator<Item = &ProductCalculationResult> {
        self.seed_treatments.iter().chain(self.foliar.results.iter())
    }
}
