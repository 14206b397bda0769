//! Feature Encoder
//!
//! Fits numeric scaling, city one-hot and cuisine multi-hot transforms over a
//! catalog, then maps any record (a catalog row or a user query) onto the
//! fixed [`FeatureSchema`] layout.

use crate::categorical::{MultiHotEncoder, OneHotEncoder};
use crate::scaler::StandardScaler;
use crate::schema::FeatureSchema;
use dishx_core::{Catalog, CuisineSet, Error, NumericColumn, RestaurantRecord, Result, Vector};
use tracing::{debug, info};

/// Raw value used for numeric fields the caller does not know
pub const DEFAULT_NEUTRAL_VALUE: f64 = 0.0;

/// The logical fields of a record, as the encoder sees them
///
/// Numeric values may be unknown (`None`); they take the encoder's neutral
/// default before scaling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    pub rating: Option<f64>,
    pub rating_count: Option<f64>,
    pub cost: Option<f64>,
    pub city: String,
    pub cuisines: CuisineSet,
}

impl FeatureRecord {
    pub fn numeric(&self, column: NumericColumn) -> Option<f64> {
        match column {
            NumericColumn::Rating => self.rating,
            NumericColumn::RatingCount => self.rating_count,
            NumericColumn::Cost => self.cost,
        }
    }
}

impl From<&RestaurantRecord> for FeatureRecord {
    fn from(record: &RestaurantRecord) -> Self {
        Self {
            rating: Some(record.rating),
            rating_count: record.rating_count,
            cost: record.cost,
            city: record.city.clone(),
            cuisines: record.cuisines(),
        }
    }
}

/// Fitted encoder from records to feature vectors
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: FeatureSchema,
    scaler: StandardScaler,
    city: OneHotEncoder,
    cuisine: MultiHotEncoder,
    neutral_value: f64,
}

impl FeatureEncoder {
    /// Fit with every supported numeric column and a neutral value of 0.0
    pub fn fit(catalog: &Catalog) -> Result<Self> {
        EncoderBuilder::new().fit(catalog)
    }

    /// Get a reference to the fitted schema
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Width of every vector this encoder produces
    pub fn width(&self) -> usize {
        self.schema.width()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn neutral_value(&self) -> f64 {
        self.neutral_value
    }

    /// Encode a record onto the fitted layout
    ///
    /// Unknown cities and cuisine tags leave their block at zero. Only a
    /// non-finite numeric value is rejected.
    pub fn encode(&self, record: &FeatureRecord) -> Result<Vector> {
        for column in &self.schema.numeric {
            if let Some(value) = record.numeric(*column) {
                if !value.is_finite() {
                    return Err(Error::malformed(
                        None,
                        format!("{} is not a finite number ({})", column, value),
                    ));
                }
            }
        }

        let mut vector = Vector::zeros(self.width());
        let data = vector.as_mut_slice();

        self.scaler.transform_into(
            |column| record.numeric(column).unwrap_or(self.neutral_value),
            &mut data[self.schema.numeric_range()],
        );

        if !self.city.encode_into(&record.city, &mut data[self.schema.city_range()]) {
            debug!(city = %record.city, "unknown city, city block left at zero");
        }

        let unknown = self
            .cuisine
            .encode_into(&record.cuisines, &mut data[self.schema.cuisine_range()]);
        if !unknown.is_empty() {
            debug!(tags = ?unknown, "dropping unknown cuisine tags");
        }

        Ok(vector)
    }

    /// Encode a catalog row
    pub fn encode_row(&self, record: &RestaurantRecord) -> Result<Vector> {
        self.encode(&FeatureRecord::from(record))
    }
}

/// Builder for fitting a [`FeatureEncoder`] with custom options
#[derive(Debug, Clone)]
pub struct EncoderBuilder {
    numeric_columns: Vec<NumericColumn>,
    neutral_value: f64,
}

impl Default for EncoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderBuilder {
    pub fn new() -> Self {
        Self {
            numeric_columns: NumericColumn::SUPPORTED.to_vec(),
            neutral_value: DEFAULT_NEUTRAL_VALUE,
        }
    }

    /// Declared numeric columns. Only those the catalog has end up in the schema.
    pub fn numeric_columns(mut self, columns: impl IntoIterator<Item = NumericColumn>) -> Self {
        self.numeric_columns = columns.into_iter().collect();
        self
    }

    pub fn neutral_value(mut self, value: f64) -> Self {
        self.neutral_value = value;
        self
    }

    pub fn fit(self, catalog: &Catalog) -> Result<FeatureEncoder> {
        if catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        if !self.neutral_value.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "neutral value must be finite, got {}",
                self.neutral_value
            )));
        }

        let mut numeric: Vec<NumericColumn> = Vec::with_capacity(self.numeric_columns.len());
        for column in self.numeric_columns {
            if catalog.has_column(column) && !numeric.contains(&column) {
                numeric.push(column);
            }
        }

        let scaler = StandardScaler::fit(catalog, &numeric);
        for column in scaler.columns().iter().filter(|c| c.is_constant()) {
            debug!(column = %column.column, "zero variance, column encodes to 0");
        }

        let city = OneHotEncoder::fit(catalog.records().iter().map(|r| r.city.clone()));
        let cuisine_sets: Vec<CuisineSet> = catalog.records().iter().map(|r| r.cuisines()).collect();
        let cuisine = MultiHotEncoder::fit(cuisine_sets.iter());

        let schema = FeatureSchema::new(
            numeric,
            city.vocabulary().terms().to_vec(),
            cuisine.vocabulary().terms().to_vec(),
        );
        schema.validate()?;

        info!(
            rows = catalog.len(),
            numeric = schema.numeric.len(),
            cities = schema.cities.len(),
            cuisines = schema.cuisines.len(),
            width = schema.width(),
            "feature encoder fitted"
        );

        Ok(FeatureEncoder {
            schema,
            scaler,
            city,
            cuisine,
            neutral_value: self.neutral_value,
        })
    }
}
