pub mod input;
pub mod product;
pub mod results;
pub mod seed;

pub use input::{CalculationInput, MarketPrice, ProductSelection, SeedingRate};
pub use product::{
    ApplicationBasis, CurrencyField, Measure, Product, ProductCatalogEntry, ProductCategory,
};
pub use results::{
    CalculationReport, FoliarBatch, ProductCalculationResult, ProgramTotals, RateSource,
    RoiProjection, RoiResult, SeedTotals,
};
pub use seed::{SeedTypeReference, SeedingRateUnit};
