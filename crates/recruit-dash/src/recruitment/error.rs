use std::path::PathBuf;

/// Failures while building a record table. All of them abort startup.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to read recruitment data from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid recruitment CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("recruitment data contains no records")]
    Empty,
    #[error("column '{0}' is declared more than once")]
    DuplicateColumn(String),
    #[error("record {row} has {found} values but the table declares {expected} columns")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("record {row} has status '{value}' outside the recruitment vocabulary")]
    UnknownStatus { row: usize, value: String },
}

/// Validation errors raised by the filter and aggregation steps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("filter refers to unknown column '{0}'")]
    InvalidFilterColumn(String),
    #[error("column '{0}' does not exist in the record table")]
    UnknownColumn(String),
    #[error("value '{value}' in column '{column}' is not a recognisable date or month")]
    UnparseableDate { column: String, value: String },
}
