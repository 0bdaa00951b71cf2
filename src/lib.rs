pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;

pub use catalog::Catalog;
pub use engine::{DiscountPolicy, Discounts, calculate};
pub use error::{CalcError, Result};
pub use models::{CalculationInput, CalculationReport, Product, ProductCalculationResult};
