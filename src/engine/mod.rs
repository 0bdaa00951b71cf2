pub mod constants;
pub mod costing;
pub mod currency;
pub mod discount;
pub mod foliar;
pub mod pipeline;
pub mod program;
pub mod roi;
pub mod seed_treatment;
pub mod seeding;

pub use constants::*;
pub use costing::{packages_needed, resolve_rate};
pub use currency::{format_currency, parse_currency};
pub use discount::{DiscountPolicy, Discounts, discount_factor};
pub use foliar::{cost_foliar_product, cost_foliar_products};
pub use pipeline::calculate;
pub use program::aggregate_program_cost;
pub use roi::project_roi;
pub use seed_treatment::cost_seed_treatment;
pub use seeding::{normalize_seeding, seeds_per_unit};
