pub mod config;
pub mod loader;
pub mod manager;

pub use config::RecommenderConfig;
pub use loader::{load_catalog, load_catalog_from_reader, LoadReport, SkippedRow, REQUIRED_COLUMNS};
pub use manager::{CatalogState, Recommender};
