//! Catalog index
//!
//! Holds the encoded feature matrix of the whole catalog, one row per record
//! in catalog order, built once through a fitted [`FeatureEncoder`].

use dishx_core::{Catalog, Result, RowId, Vector};
use dishx_schema::{FeatureEncoder, FeatureSchema};
use rayon::prelude::*;
use tracing::info;

/// Read-only encoded matrix aligned with the catalog rows
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    rows: Vec<Vector>,
    norms: Vec<f32>,
    schema: FeatureSchema,
}

impl CatalogIndex {
    /// Encode every catalog row with the fitted encoder
    pub fn build(catalog: &Catalog, encoder: &FeatureEncoder) -> Result<Self> {
        let catalog_encoded: Vec<Vector> = catalog
            .records()
            .par_iter()
            .map(|record| encoder.encode_row(record))
            .collect::<Result<_>>()?;
        let norms = catalog_encoded.iter().map(Vector::norm).collect();

        info!(
            rows = catalog_encoded.len(),
            width = encoder.width(),
            "catalog index built"
        );

        Ok(Self {
            rows: catalog_encoded,
            norms,
            schema: encoder.schema().clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of every row
    pub fn width(&self) -> usize {
        self.schema.width()
    }

    /// Schema the rows were encoded with
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn row(&self, row: RowId) -> Option<&Vector> {
        self.rows.get(row.index())
    }

    /// Cached L2 norm of a row
    pub fn norm(&self, row: RowId) -> Option<f32> {
        self.norms.get(row.index()).copied()
    }

    pub fn rows(&self) -> &[Vector] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dishx_core::RestaurantRecord;

    fn create_test_catalog() -> Catalog {
        Catalog::from_records(
            (0..20)
                .map(|i| {
                    RestaurantRecord::new(
                        format!("R{}", i),
                        if i % 2 == 0 { "Pune" } else { "Delhi" },
                        if i % 3 == 0 { "Chinese" } else { "Italian, Pizzas" },
                        3.0 + (i as f64) * 0.1,
                    )
                    .with_cost(100.0 + i as f64 * 25.0)
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_rows_follow_catalog_order() {
        let catalog = create_test_catalog();
        let encoder = FeatureEncoder::fit(&catalog).unwrap();
        let index = CatalogIndex::build(&catalog, &encoder).unwrap();

        assert_eq!(index.len(), catalog.len());
        assert_eq!(index.width(), encoder.width());
        for (id, record) in catalog.iter() {
            let expected = encoder.encode_row(record).unwrap();
            assert_eq!(index.row(id).unwrap(), &expected);
            assert!((index.norm(id).unwrap() - expected.norm()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_out_of_range_row() {
        let catalog = create_test_catalog();
        let encoder = FeatureEncoder::fit(&catalog).unwrap();
        let index = CatalogIndex::build(&catalog, &encoder).unwrap();
        assert!(index.row(RowId(catalog.len())).is_none());
        assert!(index.norm(RowId(catalog.len())).is_none());
    }
}
