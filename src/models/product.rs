use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::currency::parse_currency;
use crate::error::{CalcError, Result};

/// Which costing stage a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    /// Applied to seed; dosed per seed unit.
    SeedTreatment,
    /// Applied in-furrow or as a foliar spray; dosed per acre.
    #[serde(alias = "Foliar", alias = "InFurrow")]
    InFurrowFoliar,
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCategory::SeedTreatment => f.write_str("Seed Treatment"),
            ProductCategory::InFurrowFoliar => f.write_str("In-Furrow / Foliar"),
        }
    }
}

/// Physical measure a product is dosed and priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Measure {
    FluidOunce,
    Ounce,
    Gram,
}

impl Measure {
    pub fn label(&self) -> &'static str {
        match self {
            Measure::FluidOunce => "fl oz",
            Measure::Ounce => "oz",
            Measure::Gram => "g",
        }
    }
}

/// A cost as stored in the catalog: either a bare number or a display string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrencyField {
    Amount(f64),
    Text(String),
}

impl CurrencyField {
    fn resolve(&self, product: &str) -> Result<f64> {
        match self {
            CurrencyField::Amount(v) if v.is_finite() => Ok(*v),
            CurrencyField::Amount(v) => Err(CalcError::MalformedCost {
                product: product.to_string(),
                value: v.to_string(),
            }),
            CurrencyField::Text(s) => parse_currency(product, s),
        }
    }
}

/// A product exactly as it appears in the catalog file.
///
/// Liquid, mass and granular products populate different optional fields.
/// Convert to [`Product`] before costing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCatalogEntry {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Category")]
    pub category: ProductCategory,

    #[serde(rename = "PackageSize")]
    pub package_size: f64,

    #[serde(rename = "PackageUnits", default)]
    pub package_units: String,

    #[serde(rename = "PackageType", default)]
    pub packaging: String,

    #[serde(rename = "CostPerPackage", default, skip_serializing_if = "Option::is_none")]
    pub cost_per_package: Option<CurrencyField>,

    #[serde(rename = "CostPerFlOz", default, skip_serializing_if = "Option::is_none")]
    pub cost_per_fl_oz: Option<CurrencyField>,

    #[serde(rename = "CostPerOz", default, skip_serializing_if = "Option::is_none")]
    pub cost_per_oz: Option<CurrencyField>,

    #[serde(rename = "CostPerGram", default, skip_serializing_if = "Option::is_none")]
    pub cost_per_gram: Option<CurrencyField>,

    #[serde(rename = "ApplicationRateFlOz", default, skip_serializing_if = "Option::is_none")]
    pub application_rate_fl_oz: Option<f64>,

    #[serde(rename = "ApplicationRateOz", default, skip_serializing_if = "Option::is_none")]
    pub application_rate_oz: Option<f64>,

    #[serde(rename = "ApplicationRateGrams", default, skip_serializing_if = "Option::is_none")]
    pub application_rate_grams: Option<f64>,
}

/// Measurement basis of a product, fixed when the catalog is loaded.
///
/// Rates are per seed unit for seed treatments and per acre otherwise. A
/// seed treatment may carry no catalog rate at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ApplicationBasis {
    Liquid {
        rate_fl_oz: Option<f64>,
        cost_per_fl_oz: f64,
    },
    Mass {
        rate_oz: Option<f64>,
        cost_per_oz: f64,
    },
    Granular {
        rate_grams: Option<f64>,
        cost_per_gram: f64,
    },
}

impl ApplicationBasis {
    fn new(measure: Measure, rate: Option<f64>, cost_per_measure: f64) -> Self {
        match measure {
            Measure::FluidOunce => ApplicationBasis::Liquid {
                rate_fl_oz: rate,
                cost_per_fl_oz: cost_per_measure,
            },
            Measure::Ounce => ApplicationBasis::Mass {
                rate_oz: rate,
                cost_per_oz: cost_per_measure,
            },
            Measure::Gram => ApplicationBasis::Granular {
                rate_grams: rate,
                cost_per_gram: cost_per_measure,
            },
        }
    }

    pub fn measure(&self) -> Measure {
        match self {
            ApplicationBasis::Liquid { .. } => Measure::FluidOunce,
            ApplicationBasis::Mass { .. } => Measure::Ounce,
            ApplicationBasis::Granular { .. } => Measure::Gram,
        }
    }

    pub fn catalog_rate(&self) -> Option<f64> {
        match *self {
            ApplicationBasis::Liquid { rate_fl_oz, .. } => rate_fl_oz,
            ApplicationBasis::Mass { rate_oz, .. } => rate_oz,
            ApplicationBasis::Granular { rate_grams, .. } => rate_grams,
        }
    }

    pub fn cost_per_measure(&self) -> f64 {
        match *self {
            ApplicationBasis::Liquid { cost_per_fl_oz, .. } => cost_per_fl_oz,
            ApplicationBasis::Mass { cost_per_oz, .. } => cost_per_oz,
            ApplicationBasis::Granular { cost_per_gram, .. } => cost_per_gram,
        }
    }
}

/// A validated, purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: ProductCategory,
    pub package_size: f64,
    pub package_units: String,
    pub packaging: String,
    pub cost_per_package: f64,
    pub basis: ApplicationBasis,
}

impl Product {
    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Unit label for the application rate, e.g. `fl oz/unit`.
    pub fn rate_label(&self) -> String {
        let per = match self.category {
            ProductCategory::SeedTreatment => "unit",
            ProductCategory::InFurrowFoliar => "acre",
        };
        format!("{}/{}", self.basis.measure().label(), per)
    }

    /// Human-readable description of the packages to buy.
    pub fn package_description(&self, packages: u64) -> String {
        let packaging = if self.packaging.is_empty() {
            "Package"
        } else {
            self.packaging.as_str()
        };
        let plural = if packages == 1 { "" } else { "s" };
        let units = if self.package_units.is_empty() {
            self.basis.measure().label()
        } else {
            self.package_units.as_str()
        };
        format!(
            "{} {}{} ({} {})",
            packages, packaging, plural, self.package_size, units
        )
    }
}

impl TryFrom<ProductCatalogEntry> for Product {
    type Error = CalcError;

    fn try_from(entry: ProductCatalogEntry) -> Result<Self> {
        let name = entry.name.trim().to_string();
        if name.is_empty() {
            return Err(CalcError::InvalidCatalog(
                "product with an empty name".to_string(),
            ));
        }

        if !(entry.package_size.is_finite() && entry.package_size > 0.0) {
            return Err(CalcError::InvalidCatalog(format!(
                "{} has package size {}, must be positive",
                name, entry.package_size
            )));
        }

        let rates: Vec<(Measure, f64)> = [
            (Measure::FluidOunce, entry.application_rate_fl_oz),
            (Measure::Ounce, entry.application_rate_oz),
            (Measure::Gram, entry.application_rate_grams),
        ]
        .into_iter()
        .filter_map(|(m, r)| r.map(|r| (m, r)))
        .collect();

        for (_, rate) in &rates {
            if !(rate.is_finite() && *rate >= 0.0) {
                return Err(CalcError::InvalidCatalog(format!(
                    "{} has application rate {}, must be non-negative",
                    name, rate
                )));
            }
        }

        let costs = [
            (Measure::FluidOunce, entry.cost_per_fl_oz.as_ref()),
            (Measure::Ounce, entry.cost_per_oz.as_ref()),
            (Measure::Gram, entry.cost_per_gram.as_ref()),
        ];

        let (measure, rate) = match (rates.as_slice(), entry.category) {
            ([(m, r)], _) => (*m, Some(*r)),
            ([], ProductCategory::SeedTreatment) => {
                // No rate on file: the basis comes from the one priced measure.
                let priced: Vec<Measure> = costs
                    .iter()
                    .filter(|(_, c)| c.is_some())
                    .map(|(m, _)| *m)
                    .collect();
                match priced.as_slice() {
                    [m] => (*m, None),
                    _ => {
                        return Err(CalcError::AmbiguousProductShape {
                            product: name,
                            populated: 0,
                        });
                    }
                }
            }
            (populated, _) => {
                return Err(CalcError::AmbiguousProductShape {
                    product: name,
                    populated: populated.len(),
                });
            }
        };

        let package_cost = entry
            .cost_per_package
            .as_ref()
            .map(|c| c.resolve(&name))
            .transpose()?;

        let measure_cost = costs
            .iter()
            .find(|(m, _)| *m == measure)
            .and_then(|(_, c)| *c)
            .map(|c| c.resolve(&name))
            .transpose()?;

        let (cost_per_measure, cost_per_package) = match (measure_cost, package_cost) {
            (Some(per), Some(pkg)) => (per, pkg),
            (Some(per), None) => (per, per * entry.package_size),
            (None, Some(pkg)) => (pkg / entry.package_size, pkg),
            (None, None) => {
                return Err(CalcError::MalformedCost {
                    product: name,
                    value: format!("no cost per {} or per package", measure.label()),
                });
            }
        };

        for cost in [cost_per_measure, cost_per_package] {
            if cost < 0.0 {
                return Err(CalcError::MalformedCost {
                    product: name,
                    value: cost.to_string(),
                });
            }
        }

        Ok(Product {
            name,
            category: entry.category,
            package_size: entry.package_size,
            package_units: entry.package_units,
            packaging: entry.packaging,
            cost_per_package,
            basis: ApplicationBasis::new(measure, rate, cost_per_measure),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: ProductCategory) -> ProductCatalogEntry {
        ProductCatalogEntry {
            name: "Test Product".to_string(),
            category,
            package_size: 120.0,
            package_units: "fl oz".to_string(),
            packaging: "Jug".to_string(),
            cost_per_package: None,
            cost_per_fl_oz: None,
            cost_per_oz: None,
            cost_per_gram: None,
            application_rate_fl_oz: None,
            application_rate_oz: None,
            application_rate_grams: None,
        }
    }

    #[test]
    fn test_liquid_product_derives_package_cost() {
        let mut e = entry(ProductCategory::SeedTreatment);
        e.cost_per_fl_oz = Some(CurrencyField::Text("$9.16".to_string()));
        e.application_rate_fl_oz = Some(1.0);

        let product = Product::try_from(e).unwrap();
        assert_eq!(product.basis.measure(), Measure::FluidOunce);
        assert_eq!(product.basis.catalog_rate(), Some(1.0));
        assert!((product.cost_per_package - 1099.2).abs() < 1e-9);
        assert_eq!(product.rate_label(), "fl oz/unit");
    }

    #[test]
    fn test_granular_product_derives_measure_cost() {
        let mut e = entry(ProductCategory::InFurrowFoliar);
        e.package_size = 2000.0;
        e.package_units = "g".to_string();
        e.packaging = "Pail".to_string();
        e.cost_per_package = Some(CurrencyField::Amount(700.0));
        e.application_rate_grams = Some(10.0);

        let product = Product::try_from(e).unwrap();
        assert!(matches!(
            product.basis,
            ApplicationBasis::Granular { rate_grams: Some(r), cost_per_gram } if r == 10.0 && (cost_per_gram - 0.35).abs() < 1e-12
        ));
        assert_eq!(product.rate_label(), "g/acre");
    }

    #[test]
    fn test_foliar_without_rate_is_ambiguous() {
        let mut e = entry(ProductCategory::InFurrowFoliar);
        e.cost_per_fl_oz = Some(CurrencyField::Amount(2.0));

        let err = Product::try_from(e).unwrap_err();
        assert!(matches!(err, CalcError::AmbiguousProductShape { populated: 0, .. }));
    }

    #[test]
    fn test_two_rate_fields_are_ambiguous() {
        let mut e = entry(ProductCategory::InFurrowFoliar);
        e.cost_per_fl_oz = Some(CurrencyField::Amount(2.0));
        e.application_rate_fl_oz = Some(8.0);
        e.application_rate_grams = Some(100.0);

        let err = Product::try_from(e).unwrap_err();
        assert!(matches!(err, CalcError::AmbiguousProductShape { populated: 2, .. }));
        assert!(err.is_catalog_defect());
    }

    #[test]
    fn test_seed_treatment_without_rate_uses_priced_measure() {
        let mut e = entry(ProductCategory::SeedTreatment);
        e.cost_per_oz = Some(CurrencyField::Text("$3.50".to_string()));

        let product = Product::try_from(e).unwrap();
        assert_eq!(product.basis.measure(), Measure::Ounce);
        assert_eq!(product.basis.catalog_rate(), None);
    }

    #[test]
    fn test_malformed_cost_string() {
        let mut e = entry(ProductCategory::SeedTreatment);
        e.cost_per_fl_oz = Some(CurrencyField::Text("TBD".to_string()));
        e.application_rate_fl_oz = Some(1.0);

        let err = Product::try_from(e).unwrap_err();
        assert!(matches!(err, CalcError::MalformedCost { .. }));
    }

    #[test]
    fn test_missing_costs_are_malformed() {
        let mut e = entry(ProductCategory::SeedTreatment);
        e.application_rate_fl_oz = Some(1.0);

        let err = Product::try_from(e).unwrap_err();
        assert!(matches!(err, CalcError::MalformedCost { .. }));
    }

    #[test]
    fn test_zero_package_size_rejected() {
        let mut e = entry(ProductCategory::SeedTreatment);
        e.package_size = 0.0;
        e.cost_per_fl_oz = Some(CurrencyField::Amount(1.0));
        e.application_rate_fl_oz = Some(1.0);

        let err = Product::try_from(e).unwrap_err();
        assert!(matches!(err, CalcError::InvalidCatalog(_)));
    }

    #[test]
    fn test_package_description() {
        let mut e = entry(ProductCategory::SeedTreatment);
        e.cost_per_fl_oz = Some(CurrencyField::Amount(9.16));
        e.application_rate_fl_oz = Some(1.0);
        let product = Product::try_from(e).unwrap();

        assert_eq!(product.package_description(1), "1 Jug (120 fl oz)");
        assert_eq!(product.package_description(2), "2 Jugs (120 fl oz)");
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "Name": "Liquid Boost",
            "Category": "Foliar",
            "PackageSize": 320,
            "PackageUnits": "fl oz",
            "PackageType": "Jug",
            "CostPerFlOz": "$1.25",
            "ApplicationRateFlOz": 16
        }"#;
        let entry: ProductCatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.category, ProductCategory::InFurrowFoliar);

        let product = Product::try_from(entry).unwrap();
        assert!((product.cost_per_package - 400.0).abs() < 1e-9);
    }
}
