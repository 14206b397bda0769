use dishx_core::{Error, NumericColumn, Result};
use dishx_schema::DEFAULT_NEUTRAL_VALUE;
use dishx_similarity::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a recommender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    /// Results returned per query
    pub top_k: usize,
    /// Raw value for numeric fields a query leaves unknown
    pub neutral_value: f64,
    /// Declared numeric columns, used when the catalog has them
    pub numeric_columns: Vec<NumericColumn>,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            neutral_value: DEFAULT_NEUTRAL_VALUE,
            numeric_columns: NumericColumn::SUPPORTED.to_vec(),
        }
    }
}

impl RecommenderConfig {
    /// Read a JSON config file; missing fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::InvalidConfig(format!("invalid config JSON in {:?}: {}", path, e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.neutral_value.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "neutral_value must be finite, got {}",
                self.neutral_value
            )));
        }
        Ok(())
    }
}
