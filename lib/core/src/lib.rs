//! # dishx Core
//!
//! Core library for the dishx restaurant recommender.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`RestaurantRecord`] - A catalog row, identified by its [`RowId`]
//! - [`Catalog`] - The immutable, ordered set of records and its numeric columns
//! - [`CuisineSet`] - Parsed multi-valued cuisine tags
//! - [`Vector`] - Dense feature vector with cosine similarity
//! - [`RecordFilter`] - Hard filters over raw record fields
//!
//! ## Example
//!
//! ```rust
//! use dishx_core::{Catalog, RestaurantRecord, RecordFilter, FilterCondition, Filter};
//!
//! let catalog = Catalog::from_records(vec![
//!     RestaurantRecord::new("Spice Hub", "Pune", "North Indian, Chinese", 4.2).with_cost(300.0),
//!     RestaurantRecord::new("Roma", "Pune", "Italian", 3.8).with_cost(600.0),
//! ]).unwrap();
//!
//! let filter = RecordFilter::all(vec![
//!     FilterCondition::CityEquals("Pune".to_string()),
//!     FilterCondition::MaxCost(400.0),
//! ]);
//! let matching: Vec<_> = catalog.iter().filter(|(_, r)| filter.matches(r)).collect();
//! assert_eq!(matching.len(), 1);
//! ```

pub mod catalog;
pub mod cuisine;
pub mod error;
pub mod filter;
pub mod record;
pub mod vector;

/// Dense dot product and norm kernels
///
/// AVX2/FMA on x86_64 for wide vectors, scalar elsewhere.
pub mod simd;

pub use catalog::{Catalog, NumericSummary};
pub use cuisine::{CuisineSet, CUISINE_DELIMITERS};
pub use error::{Error, Result};
pub use filter::{AcceptAll, Filter, FilterCondition, RecordFilter};
pub use record::{NumericColumn, RestaurantRecord, RowId};
pub use vector::{cosine_with_norms, Vector};
