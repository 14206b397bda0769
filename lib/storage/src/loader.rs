//! CSV catalog loader
//!
//! Reads a cleaned restaurant dataset with a header row. Columns `name`,
//! `city`, `cuisine`, `rating` and `address` are required; `rating_count`
//! and `cost` are optional and the feature schema adapts to whichever exist.
//! Rows that cannot be parsed are skipped and reported, the rest load.

use dishx_core::{Catalog, Error, NumericColumn, RestaurantRecord, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Columns every catalog file must have
pub const REQUIRED_COLUMNS: [&str; 5] = ["name", "city", "cuisine", "rating", "address"];

/// A data row that was not loaded
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line in the source file
    pub line: u64,
    pub reason: String,
}

/// Result of loading a catalog file
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub skipped: Vec<SkippedRow>,
}

/// Load a catalog from a CSV file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<LoadReport> {
    let path = path.as_ref();
    let file = File::open(path)?;
    info!("Loading catalog from {:?}", path);
    load_catalog_from_reader(file)
}

/// Load a catalog from any CSV source
pub fn load_catalog_from_reader<R: Read>(source: R) -> Result<LoadReport> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| Error::Csv(format!("failed to read headers: {}", e)))?
        .clone();
    let layout = HeaderLayout::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (i, result) in reader.records().enumerate() {
        // Header is line 1
        let fallback_line = i as u64 + 2;
        let parsed = match result {
            Ok(row) => {
                let line = row.position().map(|p| p.line()).unwrap_or(fallback_line);
                layout.parse(&row).map_err(|reason| SkippedRow { line, reason })
            }
            Err(e) => Err(SkippedRow {
                line: e.position().map(|p| p.line()).unwrap_or(fallback_line),
                reason: e.to_string(),
            }),
        };

        match parsed {
            Ok(record) => records.push(record),
            Err(skip) => {
                warn!("Skipping catalog line {}: {}", skip.line, skip.reason);
                skipped.push(skip);
            }
        }
    }

    let catalog = Catalog::new(records, layout.numeric_columns())?;
    info!(
        rows = catalog.len(),
        skipped = skipped.len(),
        columns = ?catalog.numeric_columns(),
        "catalog loaded"
    );

    Ok(LoadReport { catalog, skipped })
}

/// Positions of the known columns in the header row
#[derive(Debug, Clone, Copy)]
struct HeaderLayout {
    name: usize,
    city: usize,
    cuisine: usize,
    rating: usize,
    address: usize,
    rating_count: Option<usize>,
    cost: Option<usize>,
}

impl HeaderLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let required = |name: &str| {
            find(name).ok_or_else(|| {
                Error::malformed(
                    None,
                    format!(
                        "missing required column '{}' (found: {:?})",
                        name,
                        headers.iter().collect::<Vec<_>>()
                    ),
                )
            })
        };

        Ok(Self {
            name: required("name")?,
            city: required("city")?,
            cuisine: required("cuisine")?,
            rating: required("rating")?,
            address: required("address")?,
            rating_count: find(NumericColumn::RatingCount.name()),
            cost: find(NumericColumn::Cost.name()),
        })
    }

    fn numeric_columns(&self) -> Vec<NumericColumn> {
        let mut columns = vec![NumericColumn::Rating];
        if self.rating_count.is_some() {
            columns.push(NumericColumn::RatingCount);
        }
        if self.cost.is_some() {
            columns.push(NumericColumn::Cost);
        }
        columns
    }

    fn parse(&self, row: &csv::StringRecord) -> std::result::Result<RestaurantRecord, String> {
        let text = |idx: usize| row.get(idx).unwrap_or("").to_string();
        let number = |column: NumericColumn, idx: usize| -> std::result::Result<f64, String> {
            let raw = row.get(idx).unwrap_or("");
            if raw.is_empty() {
                return Err(format!("missing value for '{}'", column));
            }
            raw.parse::<f64>()
                .map_err(|_| format!("invalid number '{}' for '{}'", raw, column))
        };

        let mut record = RestaurantRecord {
            name: text(self.name),
            city: text(self.city),
            cuisine: text(self.cuisine),
            rating: number(NumericColumn::Rating, self.rating)?,
            rating_count: None,
            cost: None,
            address: text(self.address),
        };
        if let Some(idx) = self.rating_count {
            record.rating_count = Some(number(NumericColumn::RatingCount, idx)?);
        }
        if let Some(idx) = self.cost {
            record.cost = Some(number(NumericColumn::Cost, idx)?);
        }

        record.validate().map_err(|e| match e {
            Error::MalformedRecord { reason, .. } => reason,
            other => other.to_string(),
        })?;
        Ok(record)
    }
}
