use serde::{Deserialize, Serialize};
use crate::cuisine::CuisineSet;
use crate::{Error, Result};

/// Numeric columns a catalog may carry, in feature schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Rating,
    RatingCount,
    Cost,
}

impl NumericColumn {
    /// Every supported numeric column
    pub const SUPPORTED: [NumericColumn; 3] = [
        NumericColumn::Rating,
        NumericColumn::RatingCount,
        NumericColumn::Cost,
    ];

    /// Column header as it appears in catalog files
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::Rating => "rating",
            NumericColumn::RatingCount => "rating_count",
            NumericColumn::Cost => "cost",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Row identity: the position of a record in its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub usize);

impl RowId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for RowId {
    fn from(i: usize) -> Self {
        RowId(i)
    }
}

/// A restaurant in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub name: String,
    pub city: String,
    /// Raw cuisine field, possibly several delimited tags
    pub cuisine: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default)]
    pub address: String,
}

impl RestaurantRecord {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        cuisine: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            cuisine: cuisine.into(),
            rating,
            rating_count: None,
            cost: None,
            address: String::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_rating_count(mut self, rating_count: f64) -> Self {
        self.rating_count = Some(rating_count);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Parsed cuisine tags
    pub fn cuisines(&self) -> CuisineSet {
        CuisineSet::parse(&self.cuisine)
    }

    /// Value of a numeric column, if the record carries one
    pub fn numeric(&self, column: NumericColumn) -> Option<f64> {
        match column {
            NumericColumn::Rating => Some(self.rating),
            NumericColumn::RatingCount => self.rating_count,
            NumericColumn::Cost => self.cost,
        }
    }

    /// Check the structural fields every record needs
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::malformed(None, "name is empty"));
        }
        if self.city.trim().is_empty() {
            return Err(Error::malformed(None, "city is empty"));
        }
        for column in NumericColumn::SUPPORTED {
            if let Some(value) = self.numeric(column) {
                if !value.is_finite() {
                    return Err(Error::malformed(
                        None,
                        format!("{} is not a finite number ({})", column, value),
                    ));
                }
            }
        }
        Ok(())
    }
}
