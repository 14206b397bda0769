//! Standardization of numeric columns
//!
//! Each column is rescaled with `(x - mean) / std` using population statistics
//! of the catalog. A column with no spread is constant: it encodes to 0.0 for
//! every input, so neither fitting nor later use ever divides by zero.

use dishx_core::{Catalog, NumericColumn};
use serde::Serialize;

/// Standard deviations at or below this are treated as zero
pub const ZERO_VARIANCE_EPSILON: f64 = 1e-12;

/// Bound on a scaled value, small enough that squares and dot products of a
/// few such values stay finite in f32
pub const MAX_SCALED_MAGNITUDE: f64 = 1e15;

/// Fitted statistics of a single numeric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnScaler {
    pub column: NumericColumn,
    pub mean: f64,
    pub std: f64,
}

impl ColumnScaler {
    /// Fit from the column values. Returns `None` for an empty slice.
    pub fn fit(column: NumericColumn, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        // Summing v / n keeps the mean finite for any finite input
        let mean = values.iter().map(|v| v / n).sum::<f64>();
        // Deviations are divided by the largest one so squaring cannot overflow
        let largest = values.iter().map(|v| (v - mean).abs()).fold(0.0, f64::max);
        let std = if largest > 0.0 && largest.is_finite() {
            let sum_sq = values
                .iter()
                .map(|v| ((v - mean) / largest).powi(2))
                .sum::<f64>();
            largest * (sum_sq / n).sqrt()
        } else {
            largest
        };
        Some(Self { column, mean, std })
    }

    /// True when the column had no spread at fit time
    pub fn is_constant(&self) -> bool {
        self.std <= ZERO_VARIANCE_EPSILON
    }

    /// Scale a raw value, clamped to [`MAX_SCALED_MAGNITUDE`]
    #[inline]
    pub fn transform(&self, value: f64) -> f32 {
        if self.is_constant() {
            return 0.0;
        }
        let scaled = (value - self.mean) / self.std;
        if scaled.is_nan() {
            return 0.0;
        }
        scaled.clamp(-MAX_SCALED_MAGNITUDE, MAX_SCALED_MAGNITUDE) as f32
    }
}

/// Per-column standard scaler over the numeric block
#[derive(Debug, Clone, Default, Serialize)]
pub struct StandardScaler {
    columns: Vec<ColumnScaler>,
}

impl StandardScaler {
    /// Fit one scaler per column, in the given order. Every column must be
    /// present in the catalog; an empty catalog yields an empty scaler.
    pub fn fit(catalog: &Catalog, columns: &[NumericColumn]) -> Self {
        let columns = columns
            .iter()
            .filter_map(|column| {
                let values: Vec<f64> = catalog
                    .records()
                    .iter()
                    .filter_map(|r| r.numeric(*column))
                    .collect();
                ColumnScaler::fit(*column, &values)
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnScaler] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Write the scaled values into `out`, which must be `len()` long.
    /// `value_of` supplies the raw value of each column.
    pub fn transform_into<F>(&self, mut value_of: F, out: &mut [f32])
    where
        F: FnMut(NumericColumn) -> f64,
    {
        debug_assert_eq!(out.len(), self.columns.len());
        for (slot, scaler) in out.iter_mut().zip(&self.columns) {
            *slot = scaler.transform(value_of(scaler.column));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dishx_core::RestaurantRecord;

    #[test]
    fn test_population_statistics() {
        let scaler = ColumnScaler::fit(NumericColumn::Cost, &[200.0, 400.0]).unwrap();
        assert_eq!(scaler.mean, 300.0);
        assert_eq!(scaler.std, 100.0);
        assert_eq!(scaler.transform(400.0), 1.0);
        assert_eq!(scaler.transform(100.0), -2.0);
    }

    #[test]
    fn test_zero_variance_is_constant_zero() {
        let scaler = ColumnScaler::fit(NumericColumn::Rating, &[4.1, 4.1, 4.1]).unwrap();
        assert!(scaler.is_constant());
        assert_eq!(scaler.transform(4.1), 0.0);
        // Later inputs stay at zero too, whatever their value
        assert_eq!(scaler.transform(2.0), 0.0);
        assert!(!scaler.transform(1e9).is_nan());
    }

    #[test]
    fn test_extreme_values_stay_finite() {
        let scaler = ColumnScaler::fit(NumericColumn::Cost, &[200.0, 400.0]).unwrap();
        assert_eq!(scaler.transform(1e300), MAX_SCALED_MAGNITUDE as f32);
        assert_eq!(scaler.transform(-1e300), -MAX_SCALED_MAGNITUDE as f32);

        let huge = ColumnScaler::fit(NumericColumn::Cost, &[f64::MAX, f64::MAX / 2.0]).unwrap();
        assert!(huge.mean.is_finite());
        assert!(huge.std.is_finite());
        assert!(huge.transform(f64::MAX).is_finite());

        let spread = ColumnScaler::fit(NumericColumn::Cost, &[f64::MAX, -f64::MAX]).unwrap();
        assert!(spread.transform(f64::MAX).is_finite());
        assert!(spread.transform(0.0).is_finite());
    }

    #[test]
    fn test_empty_values() {
        assert!(ColumnScaler::fit(NumericColumn::Rating, &[]).is_none());
    }

    #[test]
    fn test_fit_from_catalog() {
        let catalog = Catalog::from_records(vec![
            RestaurantRecord::new("A", "Pune", "Chinese", 3.0).with_cost(100.0),
            RestaurantRecord::new("B", "Pune", "Chinese", 5.0).with_cost(100.0),
        ])
        .unwrap();
        let scaler = StandardScaler::fit(&catalog, catalog.numeric_columns());
        assert_eq!(scaler.len(), 2);

        let mut out = [9.0f32; 2];
        scaler.transform_into(
            |c| match c {
                NumericColumn::Rating => 5.0,
                _ => 100.0,
            },
            &mut out,
        );
        assert_eq!(out, [1.0, 0.0]);
    }
}
