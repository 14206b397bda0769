//! Recommendation output
//!
//! Turns a [`Ranking`] into the rows shown to a user, with the similarity
//! score and its per-block breakdown, plus summary counters.

use crate::rank::{BlockScores, RankedResult, Ranking};
use dishx_core::Catalog;
use serde::Serialize;

/// Message shown when no restaurant passes the filters
pub const NO_MATCH_MESSAGE: &str = "No restaurants match your criteria. Try adjusting the filters.";

/// One recommended restaurant
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub city: String,
    pub cuisine: String,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub address: String,
    /// Cosine similarity to the query
    pub score: f32,
    /// Per-block contributions to `score`
    pub explain: BlockScores,
}

impl Recommendation {
    /// Join a ranked row with its catalog record. `None` if the row is not in
    /// the catalog.
    pub fn from_ranked(ranked: &RankedResult, catalog: &Catalog) -> Option<Self> {
        let record = catalog.get(ranked.row)?;
        Some(Self {
            name: record.name.clone(),
            city: record.city.clone(),
            cuisine: record.cuisine.clone(),
            rating: record.rating,
            cost: record.cost,
            address: record.address.clone(),
            score: ranked.score,
            explain: ranked.explain,
        })
    }
}

/// Summary counters for a query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecommendationSummary {
    /// Restaurants analyzed
    pub total: usize,
    /// Restaurants matching the filters
    pub matching: usize,
    /// Recommendations returned
    pub returned: usize,
    /// Score of the best result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score: Option<f32>,
}

/// Response to a recommendation request
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub result: Vec<Recommendation>,
    pub summary: RecommendationSummary,
    /// Set when nothing matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecommendResponse {
    pub fn from_ranking(ranking: &Ranking, catalog: &Catalog) -> Self {
        let result: Vec<Recommendation> = ranking
            .results
            .iter()
            .filter_map(|r| Recommendation::from_ranked(r, catalog))
            .collect();

        let summary = RecommendationSummary {
            total: ranking.total,
            matching: ranking.matching,
            returned: result.len(),
            best_score: result.first().map(|r| r.score),
        };

        let message = result.is_empty().then(|| NO_MATCH_MESSAGE.to_string());

        Self {
            result,
            summary,
            message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    pub fn to_json(&self) -> dishx_core::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| dishx_core::Error::Serialization(e.to_string()))
    }
}
