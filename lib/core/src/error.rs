use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema mismatch: expected vector of width {expected}, got {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("Index out of sync: catalog has {catalog} rows, index has {index}")]
    IndexOutOfSync { catalog: usize, index: usize },

    #[error("Malformed record{}: {reason}", row_suffix(.row))]
    MalformedRecord { row: Option<usize>, reason: String },

    #[error("Catalog is empty, nothing to fit")]
    EmptyCatalog,

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" at row {}", r),
        None => String::new(),
    }
}

impl Error {
    /// Shorthand for a malformed record error
    pub fn malformed(row: Option<usize>, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }
}
