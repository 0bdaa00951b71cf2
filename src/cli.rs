use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{ProductSelection, SeedingRateUnit};

/// Seed ROI calculator: product quantities, program cost and breakeven yield.
#[derive(Parser, Debug)]
#[command(name = "seed_roi_calc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the product catalog JSON file.
    #[arg(short, long, default_value = "data/catalog.json")]
    pub catalog: PathBuf,

    /// Path to the settings JSON file (optional).
    #[arg(short, long, default_value = "seed_roi.json")]
    pub settings: PathBuf,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enter inputs interactively.
    Interactive,

    /// Calculate from command-line inputs.
    Calculate(CalculateArgs),

    /// List the products and seed types in the catalog.
    Products,
}

impl Default for Command {
    fn default() -> Self {
        Command::Interactive
    }
}

#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Acres to treat.
    #[arg(long)]
    pub acres: f64,

    /// Crop (seed type) name; required with --seed-treatment.
    #[arg(long)]
    pub crop: Option<String>,

    /// Seeding rate in --rate-unit.
    #[arg(long)]
    pub seeding_rate: Option<f64>,

    /// Seeding rate unit: seeds/acre, lbs/acre or bu/acre.
    #[arg(long, default_value = "seeds/acre")]
    pub rate_unit: String,

    /// Override the catalog's seeds per pound.
    #[arg(long)]
    pub seeds_per_lb: Option<f64>,

    /// Seed treatment to cost, as NAME or NAME=RATE (repeatable).
    #[arg(long = "seed-treatment", value_parser = parse_selection)]
    pub seed_treatments: Vec<ProductSelection>,

    /// In-furrow or foliar product to cost, as NAME or NAME=RATE (repeatable).
    #[arg(long = "foliar", value_parser = parse_selection)]
    pub foliar_products: Vec<ProductSelection>,

    /// Dealer discount percent (defaults to settings).
    #[arg(long)]
    pub dealer_discount: Option<f64>,

    /// Grower discount percent (defaults to settings).
    #[arg(long)]
    pub grower_discount: Option<f64>,

    /// Market price per price unit, for the ROI panel.
    #[arg(long)]
    pub market_price: Option<f64>,

    /// Unit the market price is quoted per (defaults to settings).
    #[arg(long)]
    pub price_unit: Option<String>,

    /// Write per-product results to a CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the full report to a JSON file.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

impl CalculateArgs {
    pub fn rate_unit(&self) -> crate::Result<SeedingRateUnit> {
        self.rate_unit.parse()
    }
}

/// Parse `NAME` or `NAME=RATE` into a product selection.
pub fn parse_selection(s: &str) -> Result<ProductSelection, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("product name cannot be empty".to_string());
    }

    match s.rsplit_once('=') {
        Some((name, rate)) => {
            let name = name.trim();
            let rate: f64 = rate
                .trim()
                .parse()
                .map_err(|_| format!("invalid rate '{}' for {}", rate.trim(), name))?;
            if name.is_empty() {
                return Err("product name cannot be empty".to_string());
            }
            Ok(ProductSelection::with_rate(name, rate))
        }
        None => Ok(ProductSelection::new(s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            parse_selection("Root Shield").unwrap(),
            ProductSelection::new("Root Shield")
        );
        assert_eq!(
            parse_selection("Leaf Guard = 8").unwrap(),
            ProductSelection::with_rate("Leaf Guard", 8.0)
        );
        assert!(parse_selection("Leaf Guard=lots").is_err());
        assert!(parse_selection("=4").is_err());
    }

    #[test]
    fn test_cli_parses_calculate() {
        let cli = Cli::try_parse_from([
            "seed_roi_calc",
            "calculate",
            "--acres",
            "500",
            "--crop",
            "Corn",
            "--seeding-rate",
            "32000",
            "--seed-treatment",
            "Root Shield",
            "--foliar",
            "Leaf Guard=8",
            "--market-price",
            "5",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Calculate(args)) => {
                assert_eq!(args.acres, 500.0);
                assert_eq!(args.rate_unit().unwrap(), SeedingRateUnit::SeedsPerAcre);
                assert_eq!(args.seed_treatments.len(), 1);
                assert_eq!(args.foliar_products[0].rate_override, Some(8.0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
