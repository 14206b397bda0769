//! # dishx
//!
//! A content-based restaurant recommender.
//!
//! dishx encodes every restaurant in a catalog into a fixed-layout feature
//! vector (scaled numerics, a one-hot city block, a multi-hot cuisine block),
//! encodes a user's preference the same way, and returns the top matches by
//! cosine similarity after applying the user's hard constraints.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! cargo install dishx
//! dishx --catalog restaurants.csv --city Pune --cuisine Chinese --min-rating 3.5 --max-budget 400
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use dishx::prelude::*;
//!
//! let catalog = Catalog::from_records(vec![
//!     RestaurantRecord::new("Wok Express", "Pune", "Chinese", 4.0).with_cost(300.0),
//!     RestaurantRecord::new("Punjab Grill", "Pune", "North Indian, Chinese", 4.5).with_cost(500.0),
//!     RestaurantRecord::new("Dragon Bowl", "Delhi", "Chinese", 4.2).with_cost(350.0),
//! ]).unwrap();
//!
//! let recommender = Recommender::new(catalog, RecommenderConfig::default()).unwrap();
//! let response = recommender.recommend(&Preference {
//!     city: "Pune".to_string(),
//!     cuisine: "Chinese".to_string(),
//!     min_rating: 3.5,
//!     max_budget: 400.0,
//! }).unwrap();
//!
//! assert_eq!(response.result.len(), 1);
//! assert_eq!(response.result[0].name, "Wok Express");
//! ```
//!
//! ## Crate Structure
//!
//! - [`dishx-core`](https://docs.rs/dishx-core) - Records, catalog, cuisine sets, filters, vectors
//! - [`dishx-schema`](https://docs.rs/dishx-schema) - Feature schema, scaler, one-hot/multi-hot encoders
//! - [`dishx-similarity`](https://docs.rs/dishx-similarity) - Catalog index, query builder, ranker, explanations
//! - [`dishx-storage`](https://docs.rs/dishx-storage) - CSV loader, config, reloadable recommender
//!
//! ## Features
//!
//! - **Deterministic encoding**: sorted vocabularies, versioned schema manifest
//! - **Unknown-safe**: unseen cities and cuisines encode to an all-zero block
//! - **Filter-then-sort ranking**: hard constraints first, stable top-K by cosine
//! - **Explainable scores**: per-block contribution of every result
//! - **Atomic reload**: refit and swap without disturbing in-flight queries

// Re-export core types
pub use dishx_core::{
    Catalog, CuisineSet, Error, Filter, FilterCondition, NumericColumn, NumericSummary,
    RecordFilter, RestaurantRecord, Result, RowId, Vector,
};

// Re-export schema
pub use dishx_schema::{EncoderBuilder, FeatureBlock, FeatureEncoder, FeatureRecord, FeatureSchema};

// Re-export similarity
pub use dishx_similarity::{
    BlockScores, CatalogIndex, Preference, QueryBuilder, RankedResult, Ranker, Ranking,
    RecommendResponse, Recommendation, RecommendationSummary, NO_MATCH_MESSAGE,
};

// Re-export storage
pub use dishx_storage::{load_catalog, LoadReport, Recommender, RecommenderConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, CatalogIndex, Error, FeatureEncoder, FeatureSchema, Preference, QueryBuilder,
        Ranker, RecommendResponse, Recommender, RecommenderConfig, RestaurantRecord, Result,
    };
}

/// SIMD-optimized vector operations
pub mod simd {
    pub use dishx_core::simd::{dot_product_simd, norm_simd};
}
