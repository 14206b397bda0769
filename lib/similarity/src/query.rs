//! Query building
//!
//! Turns raw user preferences into the record shape the encoder expects and
//! the hard filters the ranker applies.

use dishx_core::{Catalog, CuisineSet, Error, FilterCondition, NumericColumn, RecordFilter, Result};
use dishx_schema::FeatureRecord;
use serde::{Deserialize, Serialize};

/// Preferences supplied with one user interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub city: String,
    /// Cuisine selection; may name several delimited tags
    pub cuisine: String,
    pub min_rating: f64,
    pub max_budget: f64,
}

/// A preference translated for the encoder and the ranker
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub record: FeatureRecord,
    pub filter: RecordFilter,
}

/// Builds queries against one catalog
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'a> {
    catalog: &'a Catalog,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Translate a preference
    ///
    /// The rating and budget feed the numeric block directly. `rating_count`
    /// is left unknown, so the encoder fills in its neutral value. The cuisine
    /// selection is split like catalog cuisine fields. The budget filter is only added when the
    /// catalog has a `cost` column.
    pub fn build(&self, preference: &Preference) -> Result<PreparedQuery> {
        if !preference.min_rating.is_finite() {
            return Err(Error::malformed(None, "min_rating is not a finite number"));
        }
        if !preference.max_budget.is_finite() {
            return Err(Error::malformed(None, "max_budget is not a finite number"));
        }

        let record = FeatureRecord {
            rating: Some(preference.min_rating),
            rating_count: None,
            cost: Some(preference.max_budget),
            city: preference.city.clone(),
            cuisines: CuisineSet::parse(&preference.cuisine),
        };

        let mut conditions = vec![FilterCondition::MinRating(preference.min_rating)];
        if self.catalog.has_column(NumericColumn::Cost) {
            conditions.push(FilterCondition::MaxCost(preference.max_budget));
        }
        conditions.push(FilterCondition::CityEquals(preference.city.clone()));

        Ok(PreparedQuery {
            record,
            filter: RecordFilter::all(conditions),
        })
    }

    /// The preference pre-selected before the user changes anything: first
    /// city and cuisine in sorted order, median rating and median cost.
    ///
    /// `None` for an empty catalog.
    pub fn defaults(&self) -> Option<Preference> {
        let city = self.catalog.distinct_cities().into_iter().next()?;
        let cuisine = self
            .catalog
            .distinct_cuisines()
            .into_iter()
            .next()
            .unwrap_or_default();
        let min_rating = self.catalog.rating_summary()?.median;
        let max_budget = self
            .catalog
            .cost_summary()
            .map(|s| s.median)
            .unwrap_or(f64::MAX);
        Some(Preference {
            city,
            cuisine,
            min_rating,
            max_budget,
        })
    }
}
