use crate::error::{CalcError, Result};
use crate::models::{Product, RateSource};

/// Pick the application rate: a usable override, else the catalog rate, else zero.
///
/// A `NaN` override counts as "not supplied".
pub fn resolve_rate(rate_override: Option<f64>, catalog_rate: Option<f64>) -> Result<(f64, RateSource)> {
    match rate_override {
        Some(v) if v.is_nan() => {}
        Some(v) if v.is_finite() && v >= 0.0 => return Ok((v, RateSource::Override)),
        Some(v) => {
            return Err(CalcError::InvalidInput(format!(
                "application rate override must be a non-negative number, got {}",
                v
            )));
        }
        None => {}
    }

    Ok(match catalog_rate {
        Some(rate) => (rate, RateSource::Catalog),
        None => (0.0, RateSource::Unresolved),
    })
}

/// Whole packages needed to cover `total_needed`.
pub fn packages_needed(total_needed: f64, package_size: f64) -> u64 {
    if total_needed <= 0.0 {
        return 0;
    }
    (total_needed / package_size).ceil() as u64
}

/// Money side of a product costing, shared by both costing stages.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pricing {
    pub packages_needed: u64,
    pub undiscounted_cost: f64,
    pub discounted_cost: f64,
    /// Discounted cost of exactly the product applied, ignoring package rounding.
    pub applied_cost: f64,
}

/// Reject package sizes and costs that would turn into infinite or NaN money.
///
/// `Product::try_from` already enforces this for catalog entries; products
/// built by hand go through the same gate here.
pub fn check_product(product: &Product) -> Result<()> {
    if !(product.package_size.is_finite() && product.package_size > 0.0) {
        return Err(CalcError::InvalidCatalog(format!(
            "{} has package size {}, expected a positive number",
            product.name, product.package_size
        )));
    }
    for cost in [product.cost_per_package, product.basis.cost_per_measure()] {
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(CalcError::MalformedCost {
                product: product.name.clone(),
                value: cost.to_string(),
            });
        }
    }
    Ok(())
}

pub(crate) fn price(product: &Product, total_needed: f64, factor: f64) -> Result<Pricing> {
    check_product(product)?;
    if !(total_needed.is_finite() && total_needed >= 0.0) {
        return Err(CalcError::InvalidInput(format!(
            "{} needs {} units of product, expected a finite amount",
            product.name, total_needed
        )));
    }

    let packages = packages_needed(total_needed, product.package_size);
    let undiscounted_cost = packages as f64 * product.cost_per_package;

    Ok(Pricing {
        packages_needed: packages,
        undiscounted_cost,
        discounted_cost: undiscounted_cost * factor,
        applied_cost: total_needed * product.basis.cost_per_measure() * factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplicationBasis, ProductCategory};

    fn jug(package_size: f64, cost_per_fl_oz: f64) -> Product {
        Product {
            name: "Leaf Guard".to_string(),
            category: ProductCategory::InFurrowFoliar,
            package_size,
            package_units: "fl oz".to_string(),
            packaging: "Jug".to_string(),
            cost_per_package: 400.0,
            basis: ApplicationBasis::Liquid {
                rate_fl_oz: Some(16.0),
                cost_per_fl_oz,
            },
        }
    }

    #[test]
    fn test_override_wins() {
        assert_eq!(
            resolve_rate(Some(2.5), Some(1.0)).unwrap(),
            (2.5, RateSource::Override)
        );
        assert_eq!(
            resolve_rate(Some(0.0), Some(1.0)).unwrap(),
            (0.0, RateSource::Override)
        );
    }

    #[test]
    fn test_falls_back_to_catalog_then_zero() {
        assert_eq!(
            resolve_rate(None, Some(1.0)).unwrap(),
            (1.0, RateSource::Catalog)
        );
        assert_eq!(
            resolve_rate(Some(f64::NAN), Some(1.0)).unwrap(),
            (1.0, RateSource::Catalog)
        );
        assert_eq!(
            resolve_rate(None, None).unwrap(),
            (0.0, RateSource::Unresolved)
        );
    }

    #[test]
    fn test_bad_override_rejected() {
        assert!(matches!(
            resolve_rate(Some(-1.0), Some(1.0)),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            resolve_rate(Some(f64::INFINITY), None),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_packages_round_up() {
        assert_eq!(packages_needed(200.0, 120.0), 2);
        assert_eq!(packages_needed(240.0, 120.0), 2);
        assert_eq!(packages_needed(0.01, 120.0), 1);
        assert_eq!(packages_needed(0.0, 120.0), 0);
    }

    #[test]
    fn test_price_rejects_unusable_package_size() {
        for size in [0.0, -320.0, f64::NAN, f64::INFINITY] {
            let err = price(&jug(size, 1.25), 1600.0, 1.0).unwrap_err();
            assert!(matches!(err, CalcError::InvalidCatalog(_)), "size {}", size);
        }
    }

    #[test]
    fn test_price_rejects_malformed_cost() {
        for cost in [f64::NAN, -1.25, f64::INFINITY] {
            let err = price(&jug(320.0, cost), 1600.0, 1.0).unwrap_err();
            assert!(matches!(err, CalcError::MalformedCost { .. }), "cost {}", cost);
        }

        let mut product = jug(320.0, 1.25);
        product.cost_per_package = f64::NAN;
        assert!(matches!(
            price(&product, 1600.0, 1.0),
            Err(CalcError::MalformedCost { .. })
        ));
    }

    #[test]
    fn test_price_valid_product() {
        let pricing = price(&jug(320.0, 1.25), 1600.0, 0.855).unwrap();
        assert_eq!(pricing.packages_needed, 5);
        assert!((pricing.undiscounted_cost - 2000.0).abs() < 1e-9);
        assert!((pricing.discounted_cost - 1710.0).abs() < 1e-9);
        assert!((pricing.applied_cost - 1710.0).abs() < 1e-9);
    }
}
