//! The restaurant catalog
//!
//! A [`Catalog`] is loaded once and never mutated. Row identity is the
//! position of a record, exposed as [`RowId`]. Besides the records it tracks
//! which optional numeric columns the source actually had, so the feature
//! schema can adapt to them.

use serde::Serialize;
use std::collections::BTreeSet;
use crate::record::{NumericColumn, RestaurantRecord, RowId};
use crate::{Error, Result};

/// Immutable, ordered set of restaurant records
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<RestaurantRecord>,
    columns: Vec<NumericColumn>,
}

impl Catalog {
    /// Create a catalog with an explicit set of present numeric columns.
    ///
    /// Every record must pass [`RestaurantRecord::validate`] and carry a value
    /// for each present column.
    pub fn new(
        records: Vec<RestaurantRecord>,
        columns: impl IntoIterator<Item = NumericColumn>,
    ) -> Result<Self> {
        let present: BTreeSet<NumericColumn> = columns.into_iter().collect();
        let columns: Vec<NumericColumn> = present.into_iter().collect();

        for (row, record) in records.iter().enumerate() {
            record.validate().map_err(|e| match e {
                Error::MalformedRecord { reason, .. } => Error::malformed(Some(row), reason),
                other => other,
            })?;
            for column in &columns {
                if record.numeric(*column).is_none() {
                    return Err(Error::malformed(
                        Some(row),
                        format!("missing value for column '{}'", column),
                    ));
                }
            }
        }

        Ok(Self { records, columns })
    }

    /// Create a catalog and detect optional columns from the records.
    ///
    /// `rating` is always present. `rating_count` and `cost` count as present
    /// only when every record has a value.
    pub fn from_records(records: Vec<RestaurantRecord>) -> Result<Self> {
        let columns: Vec<NumericColumn> = NumericColumn::SUPPORTED
            .into_iter()
            .filter(|column| {
                *column == NumericColumn::Rating
                    || (!records.is_empty()
                        && records.iter().all(|r| r.numeric(*column).is_some()))
            })
            .collect();
        Self::new(records, columns)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: RowId) -> Option<&RestaurantRecord> {
        self.records.get(row.index())
    }

    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }

    /// Records paired with their row ids, in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &RestaurantRecord)> {
        self.records.iter().enumerate().map(|(i, r)| (RowId(i), r))
    }

    /// Numeric columns present in this catalog, in schema order
    pub fn numeric_columns(&self) -> &[NumericColumn] {
        &self.columns
    }

    pub fn has_column(&self, column: NumericColumn) -> bool {
        self.columns.contains(&column)
    }

    /// Sorted distinct city names
    pub fn distinct_cities(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.city.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted distinct raw cuisine fields, as a user would pick them
    pub fn distinct_cuisines(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.cuisine.clone())
            .filter(|c| !c.trim().is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Range and median of a numeric column, `None` if the column is absent
    pub fn summary(&self, column: NumericColumn) -> Option<NumericSummary> {
        if !self.has_column(column) {
            return None;
        }
        let values: Vec<f64> = self
            .records
            .iter()
            .filter_map(|r| r.numeric(column))
            .collect();
        NumericSummary::compute(values)
    }

    pub fn rating_summary(&self) -> Option<NumericSummary> {
        self.summary(NumericColumn::Rating)
    }

    pub fn cost_summary(&self) -> Option<NumericSummary> {
        self.summary(NumericColumn::Cost)
    }
}

/// Min, max and median of a numeric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl NumericSummary {
    fn compute(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));
        let n = values.len();
        let median = if n % 2 == 1 {
            values[n / 2]
        } else {
            (values[n / 2 - 1] + values[n / 2]) / 2.0
        };
        Some(Self {
            min: values[0],
            max: values[n - 1],
            median,
        })
    }
}
