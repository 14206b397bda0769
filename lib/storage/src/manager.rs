use crate::config::RecommenderConfig;
use crate::loader::{load_catalog, LoadReport};
use dishx_core::{Catalog, Error, Result};
use dishx_schema::{EncoderBuilder, FeatureEncoder};
use dishx_similarity::{CatalogIndex, Preference, QueryBuilder, Ranker, RecommendResponse};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A catalog together with the encoder fitted on it and its encoded index
///
/// Built in one piece and never mutated, so it can be shared across threads
/// without locking.
#[derive(Debug)]
pub struct CatalogState {
    catalog: Catalog,
    encoder: FeatureEncoder,
    index: CatalogIndex,
}

impl CatalogState {
    /// Fit the encoder and build the index for a catalog
    pub fn build(catalog: Catalog, config: &RecommenderConfig) -> Result<Self> {
        let encoder = EncoderBuilder::new()
            .numeric_columns(config.numeric_columns.iter().copied())
            .neutral_value(config.neutral_value)
            .fit(&catalog)?;
        let index = CatalogIndex::build(&catalog, &encoder)?;
        Ok(Self {
            catalog,
            encoder,
            index,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Encode a preference and rank the catalog against it
    pub fn recommend(&self, preference: &Preference, ranker: &Ranker) -> Result<RecommendResponse> {
        let query = QueryBuilder::new(&self.catalog).build(preference)?;
        let query_encoded = self.encoder.encode(&query.record)?;
        if query_encoded.is_zero() {
            debug!("query encodes to the zero vector, every score is 0");
        }
        let ranking = ranker.rank(&self.catalog, &self.index, &query_encoded, &query.filter)?;
        debug!(
            city = %preference.city,
            cuisine = %preference.cuisine,
            matching = ranking.matching,
            returned = ranking.results.len(),
            "query ranked"
        );
        Ok(RecommendResponse::from_ranking(&ranking, &self.catalog))
    }
}

/// Owns the process-wide recommender state
///
/// Queries take a snapshot of the current state and run without holding the
/// lock. A reload builds the complete replacement first and swaps it in with
/// a single write, so a query never sees a half-built index.
pub struct Recommender {
    state: RwLock<Arc<CatalogState>>,
    config: RecommenderConfig,
    source: Option<PathBuf>,
}

impl Recommender {
    /// Create a recommender over an in-memory catalog
    pub fn new(catalog: Catalog, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        let state = CatalogState::build(catalog, &config)?;
        Ok(Self {
            state: RwLock::new(Arc::new(state)),
            config,
            source: None,
        })
    }

    /// Load a CSV catalog and create a recommender that can reload from it
    pub fn open<P: AsRef<Path>>(path: P, config: RecommenderConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let LoadReport { catalog, skipped } = load_catalog(&path)?;
        if !skipped.is_empty() {
            warn!("{} catalog rows skipped while loading {:?}", skipped.len(), path);
        }
        let mut recommender = Self::new(catalog, config)?;
        recommender.source = Some(path);
        Ok(recommender)
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// File the catalog was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Current state, consistent for as long as the caller holds it
    pub fn snapshot(&self) -> Arc<CatalogState> {
        self.state.read().clone()
    }

    /// Answer one preference query
    pub fn recommend(&self, preference: &Preference) -> Result<RecommendResponse> {
        let state = self.snapshot();
        state.recommend(preference, &Ranker::new(self.config.top_k))
    }

    /// Reload the catalog from its source file, refit and swap
    ///
    /// On error the previous state keeps serving.
    pub fn reload(&self) -> Result<LoadReport> {
        let path = self.source.as_ref().ok_or_else(|| {
            Error::InvalidConfig("recommender has no source file to reload from".to_string())
        })?;
        let report = load_catalog(path)?;
        self.replace(report.catalog.clone())?;
        Ok(report)
    }

    /// Swap in a new catalog, refitting the encoder and rebuilding the index
    pub fn replace(&self, catalog: Catalog) -> Result<()> {
        let state = Arc::new(CatalogState::build(catalog, &self.config)?);
        let rows = state.catalog().len();
        *self.state.write() = state;
        info!(rows, "catalog reloaded");
        Ok(())
    }
}
