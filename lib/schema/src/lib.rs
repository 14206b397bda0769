//! # dishx Schema
//!
//! Feature encoding for restaurant catalogs.
//!
//! ## Overview
//!
//! A restaurant row mixes numeric metrics, a single categorical city and a
//! multi-valued cuisine field. The [`FeatureEncoder`] is fitted once over the
//! whole catalog and maps both catalog rows and user queries into the same
//! fixed-width vector space:
//!
//! 1. **Numeric block**: standardized `rating`, `rating_count`, `cost`
//!    (only the columns the catalog has)
//! 2. **City block**: one-hot over the distinct catalog cities
//! 3. **Cuisine block**: multi-hot over the distinct cuisine tags
//!
//! Unknown cities and tags encode to zeros, never to an error.
//!
//! ## Example
//!
//! ```rust
//! use dishx_core::{Catalog, CuisineSet, RestaurantRecord};
//! use dishx_schema::{FeatureEncoder, FeatureRecord};
//!
//! let catalog = Catalog::from_records(vec![
//!     RestaurantRecord::new("Wok Express", "Pune", "Chinese", 3.9).with_cost(250.0),
//!     RestaurantRecord::new("Roma", "Delhi", "Italian/Pizzas", 4.4).with_cost(700.0),
//! ]).unwrap();
//!
//! let encoder = FeatureEncoder::fit(&catalog).unwrap();
//! let query_encoded = encoder.encode(&FeatureRecord {
//!     rating: Some(4.0),
//!     rating_count: None,
//!     cost: Some(400.0),
//!     city: "Pune".to_string(),
//!     cuisines: CuisineSet::parse("Chinese, Thai"),
//! }).unwrap();
//!
//! assert_eq!(query_encoded.dim(), encoder.schema().width());
//! ```
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────┬──────────────────┬───────────────────────┐
//! │   numeric    │  city (one-hot)  │  cuisine (multi-hot)  │
//! │ (x-mean)/std │ 1 slot per city  │  1 slot per tag       │
//! └──────────────┴──────────────────┴───────────────────────┘
//! ```

pub mod categorical;
pub mod encoder;
pub mod scaler;
pub mod schema;

// Re-export main types
pub use categorical::{MultiHotEncoder, OneHotEncoder, Vocabulary};
pub use encoder::{EncoderBuilder, FeatureEncoder, FeatureRecord, DEFAULT_NEUTRAL_VALUE};
pub use scaler::{ColumnScaler, StandardScaler, MAX_SCALED_MAGNITUDE, ZERO_VARIANCE_EPSILON};
pub use schema::{FeatureBlock, FeatureSchema, SchemaError};
