mod persistence;
mod store;

pub use persistence::{CatalogFile, load_catalog, parse_catalog};
pub use store::Catalog;
