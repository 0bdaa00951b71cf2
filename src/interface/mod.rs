pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_csv, write_json};
pub use prompts::{
    collect_calculation_input, prompt_discount, prompt_positive, prompt_products, prompt_yes_no,
};
pub use render::{display_catalog, display_report};
