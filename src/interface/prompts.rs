use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::engine::discount::validate_discount;
use crate::error::{CalcError, Result};
use crate::models::{
    CalculationInput, MarketPrice, Product, ProductCategory, ProductSelection, SeedingRate,
    SeedingRateUnit,
};

fn parse_number(input: &str) -> Result<f64> {
    input
        .trim()
        .parse()
        .map_err(|_| CalcError::InvalidInput(format!("'{}' is not a number", input.trim())))
}

fn positive_number(input: &str) -> Result<f64> {
    let value = parse_number(input)?;
    if !(value.is_finite() && value > 0.0) {
        return Err(CalcError::InvalidInput(format!(
            "{} must be greater than 0",
            input.trim()
        )));
    }
    Ok(value)
}

fn discount_percent(label: &str, input: &str) -> Result<f64> {
    let value = parse_number(input)?;
    validate_discount(label, value)?;
    Ok(value)
}

/// Blank or the catalog default means "keep the catalog rate".
fn rate_override(input: &str, default: &str) -> Result<Option<f64>> {
    let input = input.trim();
    if input.is_empty() || input == default {
        return Ok(None);
    }

    let rate = parse_number(input)?;
    if !(rate.is_finite() && rate >= 0.0) {
        return Err(CalcError::InvalidInput(format!(
            "rate must be non-negative, got {}",
            input
        )));
    }
    Ok(Some(rate))
}

/// Adapt a parser into a dialoguer validator so bad entries are re-prompted.
fn accepts<T>(
    parse: impl Fn(&str) -> Result<T>,
) -> impl FnMut(&String) -> std::result::Result<(), String> {
    move |input: &String| parse(input).map(|_| ()).map_err(|e| e.to_string())
}

/// Prompt for a strictly positive number.
pub fn prompt_positive(prompt: &str, default: Option<&str>) -> Result<f64> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(accepts(positive_number));
    if let Some(d) = default {
        input = input.default(d.to_string());
    }
    positive_number(&input.interact_text()?)
}

/// Prompt for a discount percentage in [0, 100].
pub fn prompt_discount(label: &str, default: f64) -> Result<f64> {
    let name = label.to_lowercase();
    let input: String = Input::new()
        .with_prompt(format!("{} discount (%)", label))
        .default(default.to_string())
        .validate_with(accepts(|s| discount_percent(&name, s)))
        .interact_text()?;

    discount_percent(&name, &input)
}

/// Prompt for a yes/no answer.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Let the user pick products from one catalog category.
pub fn prompt_products(
    catalog: &Catalog,
    category: ProductCategory,
) -> Result<Vec<ProductSelection>> {
    let products: Vec<&Product> = catalog.products_in(category);
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let labels: Vec<String> = products
        .iter()
        .map(|p| match p.basis.catalog_rate() {
            Some(rate) => format!("{} ({} {})", p.name, rate, p.rate_label()),
            None => format!("{} (no rate on file)", p.name),
        })
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt(format!("Select {} products (space to toggle)", category))
        .items(&labels)
        .interact()?;

    let mut selections = Vec::with_capacity(chosen.len());
    for idx in chosen {
        let product = products[idx];
        let rate_override = prompt_rate_override(product)?;
        selections.push(ProductSelection {
            name: product.name.clone(),
            rate_override,
        });
    }
    Ok(selections)
}

fn prompt_rate_override(product: &Product) -> Result<Option<f64>> {
    let default = product
        .basis
        .catalog_rate()
        .map(|r| r.to_string())
        .unwrap_or_default();

    let input: String = Input::new()
        .with_prompt(format!(
            "{} rate ({}), Enter to keep",
            product.name,
            product.rate_label()
        ))
        .default(default.clone())
        .allow_empty(true)
        .validate_with(accepts(|s| rate_override(s, &default)))
        .interact_text()?;

    rate_override(&input, &default)
}

/// Walk the user through every input of one calculation.
pub fn collect_calculation_input(catalog: &Catalog, settings: &Settings) -> Result<CalculationInput> {
    let acres = prompt_positive("Acres", None)?;

    let seed_treatments = prompt_products(catalog, ProductCategory::SeedTreatment)?;

    let mut crop = None;
    let mut seeding_rate = None;
    let mut seeds_per_lb_override = None;

    if !seed_treatments.is_empty() {
        let seed_types = catalog.seed_types();
        if seed_types.is_empty() {
            return Err(CalcError::InvalidInput(
                "catalog has no seed types for seed-treatment costing".to_string(),
            ));
        }

        let crop_names: Vec<&str> = seed_types.iter().map(|s| s.crop.as_str()).collect();
        let crop_idx = Select::new()
            .with_prompt("Crop")
            .items(&crop_names)
            .default(0)
            .interact()?;
        let seed_type = seed_types[crop_idx];

        let unit_labels: Vec<&str> = SeedingRateUnit::ALL.iter().map(|u| u.as_str()).collect();
        let unit_idx = Select::new()
            .with_prompt("Seeding rate unit")
            .items(&unit_labels)
            .default(0)
            .interact()?;
        let unit = SeedingRateUnit::ALL[unit_idx];

        let value = prompt_positive(&format!("Seeding rate ({})", unit), None)?;

        let spl: String = Input::new()
            .with_prompt(format!(
                "Seeds per lb for {} (Enter for catalog value {})",
                seed_type.crop, seed_type.seeds_per_lb
            ))
            .allow_empty(true)
            .validate_with(accepts(|s| match s.trim() {
                "" => Ok(0.0),
                s => positive_number(s),
            }))
            .interact_text()?;
        if !spl.trim().is_empty() {
            seeds_per_lb_override = Some(positive_number(&spl)?);
        }

        crop = Some(seed_type.crop.clone());
        seeding_rate = Some(SeedingRate { value, unit });
    }

    let foliar_products = prompt_products(catalog, ProductCategory::InFurrowFoliar)?;

    let dealer_discount = prompt_discount("Dealer", settings.dealer_discount)?;
    let grower_discount = prompt_discount("Grower", settings.grower_discount)?;

    let market_price = if prompt_yes_no("Project ROI from a market price?", true)? {
        let unit: String = Input::new()
            .with_prompt("Price unit")
            .default(settings.price_unit.clone())
            .interact_text()?;
        let input: String = Input::new()
            .with_prompt(format!("Market price ($/{})", unit))
            .validate_with(accepts(parse_number))
            .interact_text()?;
        // Zero or negative prices are reported as an omitted ROI panel.
        Some(MarketPrice {
            price: parse_number(&input)?,
            unit,
        })
    } else {
        None
    };

    Ok(CalculationInput {
        crop,
        acres,
        seeding_rate,
        seeds_per_lb_override,
        seed_treatments,
        foliar_products,
        dealer_discount,
        grower_discount,
        market_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 32000 ").unwrap(), 32000.0);
        assert!(matches!(
            parse_number("lots"),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_positive_number() {
        assert_eq!(positive_number("500").unwrap(), 500.0);
        for bad in ["0", "-2", "inf", "NaN", "five"] {
            assert!(positive_number(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(discount_percent("dealer", "10").unwrap(), 10.0);
        assert_eq!(discount_percent("dealer", "100").unwrap(), 100.0);
        assert!(discount_percent("dealer", "101").is_err());
        assert!(discount_percent("grower", "-1").is_err());
    }

    #[test]
    fn test_rate_override() {
        assert_eq!(rate_override("", "16").unwrap(), None);
        assert_eq!(rate_override("16", "16").unwrap(), None);
        assert_eq!(rate_override(" 8 ", "16").unwrap(), Some(8.0));
        assert_eq!(rate_override("0", "16").unwrap(), Some(0.0));
        assert!(rate_override("-3", "16").is_err());
        assert!(rate_override("lots", "").is_err());
    }

    #[test]
    fn test_validator_rejects_with_message() {
        let mut validate = accepts(positive_number);
        assert!(validate(&"32000".to_string()).is_ok());
        let message = validate(&"-1".to_string()).unwrap_err();
        assert!(message.contains("greater than 0"));
    }
}
