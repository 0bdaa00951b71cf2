use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{CalcError, Result};
use crate::models::{Product, ProductCategory, SeedTypeReference};

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Read-only product and seed-type reference data.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Products keyed by lowercase name.
    products: HashMap<String, Product>,
    /// Seed types keyed by lowercase crop name.
    seed_types: HashMap<String, SeedTypeReference>,
}

impl Catalog {
    /// Build a catalog; later duplicates replace earlier ones.
    pub fn new(products: Vec<Product>, seed_types: Vec<SeedTypeReference>) -> Self {
        let products = products.into_iter().map(|p| (p.key(), p)).collect();
        let seed_types = seed_types.into_iter().map(|s| (s.key(), s)).collect();
        Self {
            products,
            seed_types,
        }
    }

    /// Get a product by name (case-insensitive).
    pub fn get_product(&self, name: &str) -> Option<&Product> {
        self.products.get(&name.trim().to_lowercase())
    }

    /// Get a product by name, or fail with a fuzzy suggestion.
    pub fn find_product(&self, name: &str) -> Result<&Product> {
        self.get_product(name)
            .ok_or_else(|| CalcError::ProductNotFound {
                name: name.to_string(),
                suggestion: self.suggest_product(name),
            })
    }

    /// Closest product name above the similarity threshold.
    pub fn suggest_product(&self, name: &str) -> Option<String> {
        let needle = name.trim().to_lowercase();
        self.products
            .iter()
            .map(|(key, p)| (p, jaro_winkler(key, &needle)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(p, _)| p.name.clone())
    }

    /// Get a seed type by crop name (case-insensitive).
    pub fn get_seed_type(&self, crop: &str) -> Option<&SeedTypeReference> {
        self.seed_types.get(&crop.trim().to_lowercase())
    }

    pub fn find_seed_type(&self, crop: &str) -> Result<&SeedTypeReference> {
        self.get_seed_type(crop)
            .ok_or_else(|| CalcError::SeedTypeNotFound(crop.to_string()))
    }

    /// Products in one category, sorted by name.
    pub fn products_in(&self, category: ProductCategory) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .values()
            .filter(|p| p.category == category)
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    /// All seed types, sorted by crop name.
    pub fn seed_types(&self) -> Vec<&SeedTypeReference> {
        let mut seeds: Vec<&SeedTypeReference> = self.seed_types.values().collect();
        seeds.sort_by(|a, b| a.crop.cmp(&b.crop));
        seeds
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn seed_type_count(&self) -> usize {
        self.seed_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.seed_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApplicationBasis;

    fn product(name: &str, category: ProductCategory) -> Product {
        Product {
            name: name.to_string(),
            category,
            package_size: 100.0,
            package_units: "fl oz".to_string(),
            packaging: "Jug".to_string(),
            cost_per_package: 100.0,
            basis: ApplicationBasis::Liquid {
                rate_fl_oz: Some(1.0),
                cost_per_fl_oz: 1.0,
            },
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(
            vec![
                product("Root Shield", ProductCategory::SeedTreatment),
                product("Leaf Guard", ProductCategory::InFurrowFoliar),
                product("Bio Start", ProductCategory::InFurrowFoliar),
            ],
            vec![
                SeedTypeReference::new("Corn", 1600.0, 50.0),
                SeedTypeReference::new("Wheat", 15000.0, 60.0),
            ],
        )
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let catalog = sample_catalog();
        assert!(catalog.get_product("root shield").is_some());
        assert!(catalog.get_product("  LEAF GUARD ").is_some());
        assert!(catalog.get_seed_type("corn").is_some());
        assert!(catalog.find_seed_type("Barley").is_err());
    }

    #[test]
    fn test_fuzzy_suggestion() {
        let catalog = sample_catalog();
        let err = catalog.find_product("Root Sheild").unwrap_err();
        match err {
            CalcError::ProductNotFound { suggestion, .. } => {
                assert_eq!(suggestion.as_deref(), Some("Root Shield"));
            }
            other => panic!("unexpected error: {}", other),
        }

        assert!(catalog.suggest_product("zzzz").is_none());
    }

    #[test]
    fn test_products_by_category_sorted() {
        let catalog = sample_catalog();
        let foliar: Vec<&str> = catalog
            .products_in(ProductCategory::InFurrowFoliar)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(foliar, vec!["Bio Start", "Leaf Guard"]);
        assert_eq!(catalog.products_in(ProductCategory::SeedTreatment).len(), 1);
    }

    #[test]
    fn test_duplicates_last_wins() {
        let mut later = product("root shield", ProductCategory::SeedTreatment);
        later.cost_per_package = 250.0;
        let catalog = Catalog::new(
            vec![product("Root Shield", ProductCategory::SeedTreatment), later],
            vec![],
        );
        assert_eq!(catalog.product_count(), 1);
        assert_eq!(catalog.get_product("Root Shield").unwrap().cost_per_package, 250.0);
    }
}
