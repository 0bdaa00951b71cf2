use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::store::Catalog;
use crate::error::{CalcError, Result};
use crate::models::{Product, ProductCatalogEntry, SeedTypeReference};

/// On-disk catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(rename = "SeedTypes", default)]
    pub seed_types: Vec<SeedTypeReference>,

    #[serde(rename = "Products", default)]
    pub products: Vec<ProductCatalogEntry>,
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CalcError;

    /// Validate every entry; the first defective product aborts the load.
    fn try_from(file: CatalogFile) -> Result<Self> {
        let products = file
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>>>()?;

        for seed in &file.seed_types {
            debug!(crop = %seed.crop, seeds_per_lb = seed.seeds_per_lb, lbs_per_unit = seed.lbs_per_unit, "seed type");
        }

        Ok(Catalog::new(products, file.seed_types))
    }
}

/// Parse a catalog from a JSON string.
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let file: CatalogFile = serde_json::from_str(json)?;
    Catalog::try_from(file)
}

/// Load a catalog from a JSON file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let catalog = parse_catalog(&content)?;

    info!(
        path = %path.display(),
        products = catalog.product_count(),
        seed_types = catalog.seed_type_count(),
        "loaded catalog"
    );
    Ok(catalog)
}
