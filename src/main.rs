use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use seed_roi_calc::catalog::{Catalog, load_catalog};
use seed_roi_calc::cli::{CalculateArgs, Cli, Command};
use seed_roi_calc::config::Settings;
use seed_roi_calc::engine::calculate;
use seed_roi_calc::error::Result;
use seed_roi_calc::interface::{
    collect_calculation_input, display_catalog, display_report, prompt_yes_no, write_csv,
    write_json,
};
use seed_roi_calc::models::{CalculationInput, CalculationReport, MarketPrice, SeedingRate};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        if e.is_catalog_defect() {
            eprintln!("Product data issue: {}", e);
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(&cli.settings)?;
    let catalog = load_catalog(&cli.catalog)?;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Interactive => cmd_interactive(&catalog, &settings),
        Command::Calculate(args) => cmd_calculate(&catalog, &settings, &args),
        Command::Products => {
            display_catalog(&catalog);
            Ok(())
        }
    }
}

/// Collect inputs with prompts and display the results.
fn cmd_interactive(catalog: &Catalog, settings: &Settings) -> Result<()> {
    println!(
        "Loaded {} products and {} seed types",
        catalog.product_count(),
        catalog.seed_type_count()
    );
    println!();

    loop {
        let outcome = collect_calculation_input(catalog, settings)
            .and_then(|input| calculate(catalog, &input, settings.discount_policy));

        match outcome {
            Ok(report) => display_report(&report),
            // Input mistakes get another try; catalog defects and terminal errors do not.
            Err(e) if e.is_input_mistake() => eprintln!("Error: {}", e),
            Err(e) => return Err(e),
        }

        if !prompt_yes_no("Run another calculation?", false)? {
            return Ok(());
        }
    }
}

/// Calculate from command-line inputs.
fn cmd_calculate(catalog: &Catalog, settings: &Settings, args: &CalculateArgs) -> Result<()> {
    let seeding_rate = match args.seeding_rate {
        Some(value) => Some(SeedingRate {
            value,
            unit: args.rate_unit()?,
        }),
        None => None,
    };

    let discounts = settings.discounts(args.dealer_discount, args.grower_discount);

    let input = CalculationInput {
        crop: args.crop.clone(),
        acres: args.acres,
        seeding_rate,
        seeds_per_lb_override: args.seeds_per_lb,
        seed_treatments: args.seed_treatments.clone(),
        foliar_products: args.foliar_products.clone(),
        dealer_discount: discounts.dealer,
        grower_discount: discounts.grower,
        market_price: args.market_price.map(|price| MarketPrice {
            price,
            unit: args
                .price_unit
                .clone()
                .unwrap_or_else(|| settings.price_unit.clone()),
        }),
    };

    let report = calculate(catalog, &input, discounts.policy)?;
    display_report(&report);
    export(&report, args)
}

fn export(report: &CalculationReport, args: &CalculateArgs) -> Result<()> {
    if let Some(path) = &args.csv {
        write_csv(report, path)?;
        info!(path = %path.display(), "wrote CSV");
        println!("Results written to {}", path.display());
    }
    if let Some(path) = &args.json {
        write_json(report, path)?;
        info!(path = %path.display(), "wrote JSON");
        println!("Report written to {}", path.display());
    }
    Ok(())
}
