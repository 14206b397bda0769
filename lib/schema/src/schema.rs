//! Feature schema manifest
//!
//! The manifest records exactly what the encoder was fitted on: which numeric
//! columns were present, and the city and cuisine vocabularies. It fixes the
//! width and column order of every encoded vector for the encoder's lifetime.

use dishx_core::NumericColumn;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Fitted feature schema
///
/// Layout: `[numeric columns | one-hot cities | multi-hot cuisine tags]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureSchema {
    /// Schema version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Numeric columns, in declared order
    pub numeric: Vec<NumericColumn>,

    /// Sorted distinct cities seen at fit time
    pub cities: Vec<String>,

    /// Sorted distinct cuisine tags seen at fit time
    pub cuisines: Vec<String>,
}

fn default_version() -> u32 {
    1
}

impl FeatureSchema {
    pub fn new(numeric: Vec<NumericColumn>, cities: Vec<String>, cuisines: Vec<String>) -> Self {
        Self {
            version: 1,
            numeric,
            cities,
            cuisines,
        }
    }

    /// Total width of an encoded vector
    pub fn width(&self) -> usize {
        self.numeric.len() + self.cities.len() + self.cuisines.len()
    }

    pub fn numeric_range(&self) -> Range<usize> {
        0..self.numeric.len()
    }

    pub fn city_range(&self) -> Range<usize> {
        let start = self.numeric.len();
        start..start + self.cities.len()
    }

    pub fn cuisine_range(&self) -> Range<usize> {
        let start = self.numeric.len() + self.cities.len();
        start..start + self.cuisines.len()
    }

    /// Offset range of a block
    pub fn range(&self, block: FeatureBlock) -> Range<usize> {
        match block {
            FeatureBlock::Numeric => self.numeric_range(),
            FeatureBlock::City => self.city_range(),
            FeatureBlock::Cuisine => self.cuisine_range(),
        }
    }

    /// Human-readable label for every column, in layout order
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.width());
        names.extend(self.numeric.iter().map(|c| c.name().to_string()));
        names.extend(self.cities.iter().map(|c| format!("city={}", c)));
        names.extend(self.cuisines.iter().map(|c| format!("cuisine={}", c)));
        names
    }

    /// Check the manifest is internally consistent
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (i, column) in self.numeric.iter().enumerate() {
            if self.numeric[..i].contains(column) {
                return Err(SchemaError::DuplicateColumn(*column));
            }
        }
        if !is_strictly_sorted(&self.cities) {
            return Err(SchemaError::UnsortedVocabulary(FeatureBlock::City));
        }
        if !is_strictly_sorted(&self.cuisines) {
            return Err(SchemaError::UnsortedVocabulary(FeatureBlock::Cuisine));
        }
        Ok(())
    }
}

fn is_strictly_sorted(terms: &[String]) -> bool {
    terms.windows(2).all(|w| w[0] < w[1])
}

/// The three sub-vectors of the layout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FeatureBlock {
    Numeric,
    City,
    Cuisine,
}

impl std::fmt::Display for FeatureBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeatureBlock::Numeric => "numeric",
            FeatureBlock::City => "city",
            FeatureBlock::Cuisine => "cuisine",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during schema validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchemaError {
    #[error("Numeric column '{0}' declared more than once")]
    DuplicateColumn(NumericColumn),

    #[error("Vocabulary of the {0} block is not sorted and unique")]
    UnsortedVocabulary(FeatureBlock),
}

impl From<SchemaError> for dishx_core::Error {
    fn from(e: SchemaError) -> Self {
        dishx_core::Error::Schema(e.to_string())
    }
}
