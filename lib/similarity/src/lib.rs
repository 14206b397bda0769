//! # dishx Similarity
//!
//! Filtered cosine ranking over an encoded restaurant catalog.
//!
//! ## Features
//!
//! - **Catalog Index**: Encoded matrix of every catalog row, built once
//! - **Query Builder**: User preferences to encoder input and hard filters
//! - **Ranker**: Filter-then-sort top-K by cosine similarity
//! - **Explainability**: Per-block (numeric, city, cuisine) score breakdown
//!
//! ## Example
//!
//! ```rust
//! use dishx_core::{Catalog, RestaurantRecord};
//! use dishx_schema::FeatureEncoder;
//! use dishx_similarity::{CatalogIndex, Preference, QueryBuilder, Ranker, RecommendResponse};
//!
//! let catalog = Catalog::from_records(vec![
//!     RestaurantRecord::new("Wok Express", "Pune", "Chinese", 4.0).with_cost(300.0),
//!     RestaurantRecord::new("Punjab Grill", "Pune", "North Indian", 4.5).with_cost(500.0),
//!     RestaurantRecord::new("Dragon Bowl", "Delhi", "Chinese", 4.2).with_cost(350.0),
//! ]).unwrap();
//!
//! let encoder = FeatureEncoder::fit(&catalog).unwrap();
//! let index = CatalogIndex::build(&catalog, &encoder).unwrap();
//!
//! let query = QueryBuilder::new(&catalog).build(&Preference {
//!     city: "Pune".to_string(),
//!     cuisine: "Chinese".to_string(),
//!     min_rating: 3.5,
//!     max_budget: 400.0,
//! }).unwrap();
//! let query_encoded = encoder.encode(&query.record).unwrap();
//!
//! let ranking = Ranker::default().rank(&catalog, &index, &query_encoded, &query.filter).unwrap();
//! let response = RecommendResponse::from_ranking(&ranking, &catalog);
//! assert_eq!(response.result[0].name, "Wok Express");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Catalog    │────>│  Encoder    │────>│   Catalog   │
//! │  (records)  │     │ (fit once)  │     │   Index     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//! ┌─────────────┐     ┌──────┴──────┐     ┌──────┴──────┐
//! │ Preference  │────>│ QueryBuilder│────>│   Ranker    │
//! └─────────────┘     └─────────────┘     │ filter+sort │
//!                                         └─────────────┘
//!                                                │
//!                                         ┌─────────────┐
//!                                         │  Explain    │
//!                                         │  (results)  │
//!                                         └─────────────┘
//! ```

pub mod explain;
pub mod index;
pub mod query;
pub mod rank;

// Re-export main types for convenience
pub use explain::{Recommendation, RecommendResponse, RecommendationSummary, NO_MATCH_MESSAGE};
pub use index::CatalogIndex;
pub use query::{Preference, PreparedQuery, QueryBuilder};
pub use rank::{BlockScores, RankedResult, Ranker, Ranking, DEFAULT_TOP_K};
