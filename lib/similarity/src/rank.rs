//! Ranker for filtered cosine similarity
//!
//! Applies the hard filters to the raw catalog fields, scores the passing
//! rows against the encoded query by cosine similarity and keeps the top K.

use crate::index::CatalogIndex;
use dishx_core::{cosine_with_norms, simd, Catalog, Error, Filter, Result, RowId, Vector};
use dishx_schema::FeatureSchema;
use serde::Serialize;
use tracing::debug;

/// Number of results returned when the caller does not choose
pub const DEFAULT_TOP_K: usize = 5;

/// Per-block share of a cosine score
///
/// Each field is the block's partial dot product divided by the full norm
/// product, so the three add up to the total score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BlockScores {
    pub numeric: f32,
    pub city: f32,
    pub cuisine: f32,
}

impl BlockScores {
    pub fn total(&self) -> f32 {
        self.numeric + self.city + self.cuisine
    }

    /// Name of the block contributing most, if any contributes positively
    pub fn top_block(&self) -> Option<&'static str> {
        [("numeric", self.numeric), ("city", self.city), ("cuisine", self.cuisine)]
            .into_iter()
            .filter(|(_, v)| *v > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name)
    }
}

/// A catalog row that passed the filters, with its similarity
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub row: RowId,
    /// Cosine similarity to the query
    pub score: f32,
    pub explain: BlockScores,
}

/// Outcome of a ranking pass
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    /// At most K results, best first
    pub results: Vec<RankedResult>,
    /// Catalog size
    pub total: usize,
    /// Rows that passed the hard filters
    pub matching: usize,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Ranks catalog rows by similarity to an encoded query
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    top_k: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl Ranker {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Filter, score and sort catalog rows
    ///
    /// # Arguments
    /// * `catalog` - Raw records the filters are evaluated on
    /// * `index` - Encoded matrix built from the same catalog
    /// * `query_encoded` - Query vector from the same fitted encoder
    /// * `filter` - Hard filters; rows failing them are never scored
    ///
    /// # Returns
    /// Up to `top_k` results by descending similarity; ties keep catalog
    /// order. No passing rows gives an empty ranking, not an error.
    ///
    /// # Errors
    /// [`Error::SchemaMismatch`] if the query width differs from the index,
    /// [`Error::IndexOutOfSync`] if the index was built from another catalog.
    pub fn rank(
        &self,
        catalog: &Catalog,
        index: &CatalogIndex,
        query_encoded: &Vector,
        filter: &dyn Filter,
    ) -> Result<Ranking> {
        check_width(index, query_encoded)?;
        if catalog.len() != index.len() {
            return Err(Error::IndexOutOfSync {
                catalog: catalog.len(),
                index: index.len(),
            });
        }

        let schema = index.schema();
        let query_norm = query_encoded.norm();

        let mut results: Vec<RankedResult> = catalog
            .iter()
            .filter(|(_, record)| filter.matches(record))
            .filter_map(|(row, _)| {
                let encoded = index.row(row)?;
                let norm = index.norm(row)?;
                let explain = block_scores(schema, query_encoded, query_norm, encoded, norm);
                let score = cosine_with_norms(query_encoded.dot(encoded), query_norm, norm);
                Some(RankedResult { row, score, explain })
            })
            .collect();
        let matching = results.len();

        // sort_by is stable: equal scores keep catalog order
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(self.top_k);

        debug!(
            total = catalog.len(),
            matching,
            returned = results.len(),
            "ranked catalog"
        );

        Ok(Ranking {
            results,
            total: catalog.len(),
            matching,
        })
    }

    /// Unfiltered similarity of every row, in catalog order
    pub fn scores(&self, index: &CatalogIndex, query_encoded: &Vector) -> Result<Vec<f32>> {
        check_width(index, query_encoded)?;
        let query_norm = query_encoded.norm();
        Ok(index
            .rows()
            .iter()
            .enumerate()
            .map(|(i, encoded)| {
                let norm = index.norm(RowId(i)).unwrap_or_else(|| encoded.norm());
                cosine_with_norms(query_encoded.dot(encoded), query_norm, norm)
            })
            .collect())
    }
}

fn check_width(index: &CatalogIndex, query_encoded: &Vector) -> Result<()> {
    if query_encoded.dim() != index.width() {
        return Err(Error::SchemaMismatch {
            expected: index.width(),
            actual: query_encoded.dim(),
        });
    }
    Ok(())
}

fn block_scores(
    schema: &FeatureSchema,
    query: &Vector,
    query_norm: f32,
    row: &Vector,
    row_norm: f32,
) -> BlockScores {
    let share = |range: std::ops::Range<usize>| {
        let dot = simd::dot_product_simd(query.block(range.clone()), row.block(range));
        cosine_with_norms(dot, query_norm, row_norm)
    };
    BlockScores {
        numeric: share(schema.numeric_range()),
        city: share(schema.city_range()),
        cuisine: share(schema.cuisine_range()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dishx_core::{AcceptAll, FilterCondition, RecordFilter, RestaurantRecord};
    use dishx_schema::FeatureEncoder;

    fn pune_catalog() -> Catalog {
        Catalog::from_records(vec![
            RestaurantRecord::new("Low", "Pune", "Chinese", 3.0).with_cost(200.0),
            RestaurantRecord::new("Pricey", "Pune", "Chinese", 4.5).with_cost(500.0),
            RestaurantRecord::new("Match", "Pune", "Chinese", 4.0).with_cost(300.0),
        ])
        .unwrap()
    }

    fn setup(catalog: &Catalog) -> (FeatureEncoder, CatalogIndex) {
        let encoder = FeatureEncoder::fit(catalog).unwrap();
        let index = CatalogIndex::build(catalog, &encoder).unwrap();
        (encoder, index)
    }

    fn pune_filter(min_rating: f64, max_budget: f64, city: &str) -> RecordFilter {
        RecordFilter::all(vec![
            FilterCondition::MinRating(min_rating),
            FilterCondition::MaxCost(max_budget),
            FilterCondition::CityEquals(city.to_string()),
        ])
    }

    #[test]
    fn test_only_filtered_rows_returned() {
        let catalog = pune_catalog();
        let (_, index) = setup(&catalog);
        let query = index.row(RowId(0)).unwrap().clone();

        let ranking = Ranker::default()
            .rank(&catalog, &index, &query, &pune_filter(4.0, 400.0, "Pune"))
            .unwrap();
        assert_eq!(ranking.results.len(), 1);
        assert_eq!(ranking.results[0].row, RowId(2));
        assert_eq!(ranking.total, 3);
        assert_eq!(ranking.matching, 1);
    }

    #[test]
    fn test_unseen_city_is_empty_not_error() {
        let catalog = pune_catalog();
        let (_, index) = setup(&catalog);
        let query = Vector::zeros(index.width());

        let ranking = Ranker::default()
            .rank(&catalog, &index, &query, &pune_filter(0.0, 1e9, "Atlantis"))
            .unwrap();
        assert!(ranking.is_empty());
        assert_eq!(ranking.matching, 0);
    }

    #[test]
    fn test_schema_mismatch() {
        let catalog = pune_catalog();
        let (_, index) = setup(&catalog);
        let query = Vector::zeros(index.width() + 1);

        let err = Ranker::default().rank(&catalog, &index, &query, &AcceptAll).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaMismatch { expected, actual } if expected == index.width() && actual == expected + 1
        ));
        assert!(Ranker::default().scores(&index, &query).is_err());
    }

    #[test]
    fn test_index_out_of_sync() {
        let catalog = pune_catalog();
        let (_, index) = setup(&catalog);
        let mut records = catalog.records().to_vec();
        records.pop();
        let smaller = Catalog::from_records(records).unwrap();
        let query = Vector::zeros(index.width());

        let err = Ranker::default().rank(&smaller, &index, &query, &AcceptAll).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfSync { catalog: 2, index: 3 }));
    }

    #[test]
    fn test_descending_order_and_top_k() {
        let catalog = Catalog::from_records(
            (0..12)
                .map(|i| {
                    RestaurantRecord::new(format!("R{}", i), "Pune", "Chinese", 3.0 + i as f64 * 0.15)
                        .with_cost(100.0 + i as f64 * 40.0)
                })
                .collect(),
        )
        .unwrap();
        let (_, index) = setup(&catalog);
        let query = index.row(RowId(5)).unwrap().clone();

        let ranking = Ranker::new(4).rank(&catalog, &index, &query, &AcceptAll).unwrap();
        assert_eq!(ranking.results.len(), 4);
        assert_eq!(ranking.matching, 12);
        assert_eq!(ranking.results[0].row, RowId(5));
        for pair in ranking.results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::from_records(vec![
            RestaurantRecord::new("A", "Pune", "Thai", 4.0).with_cost(300.0),
            RestaurantRecord::new("B", "Delhi", "Thai", 4.0).with_cost(300.0),
            RestaurantRecord::new("C", "Pune", "Thai", 4.0).with_cost(300.0),
            RestaurantRecord::new("D", "Pune", "Thai", 4.0).with_cost(300.0),
        ])
        .unwrap();
        let (_, index) = setup(&catalog);
        let query = index.row(RowId(0)).unwrap().clone();
        let filter = RecordFilter::new(FilterCondition::CityEquals("Pune".to_string()));

        let ranking = Ranker::default().rank(&catalog, &index, &query, &filter).unwrap();
        let rows: Vec<RowId> = ranking.results.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![RowId(0), RowId(2), RowId(3)]);
    }

    #[test]
    fn test_zero_query_scores_zero() {
        let catalog = pune_catalog();
        let (_, index) = setup(&catalog);
        let scores = Ranker::default().scores(&index, &Vector::zeros(index.width())).unwrap();
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_block_scores_sum_to_score() {
        let catalog = Catalog::from_records(vec![
            RestaurantRecord::new("A", "Pune", "Chinese, Thai", 3.5).with_cost(250.0),
            RestaurantRecord::new("B", "Delhi", "Italian", 4.2).with_cost(650.0),
            RestaurantRecord::new("C", "Pune", "Chinese", 4.8).with_cost(400.0),
        ])
        .unwrap();
        let (_, index) = setup(&catalog);
        let query = index.row(RowId(0)).unwrap().clone();

        let ranking = Ranker::default().rank(&catalog, &index, &query, &AcceptAll).unwrap();
        for result in &ranking.results {
            assert!((result.explain.total() - result.score).abs() < 1e-5);
        }
    }

    #[test]
    fn test_top_block() {
        let explain = BlockScores { numeric: -0.2, city: 0.3, cuisine: 0.5 };
        assert_eq!(explain.top_block(), Some("cuisine"));
        assert_eq!(BlockScores::default().top_block(), None);
    }
}
