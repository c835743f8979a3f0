//! Errors
//!
//! Error type shared by the dataset loader, the tree builder and the game.
use thiserror::Error;

/// Errors that can occur while loading data or playing the game.
#[derive(Debug, Error)]
pub enum GuessError {
    /// The dataset has no rows.
    #[error("The dataset is empty.")]
    EmptyDataset,
    /// Rows need at least one feature followed by the label.
    #[error("Rows need at least one feature and a label, but {0} value(s) were found.")]
    TooFewColumns(usize),
    /// A row has a different length than the first one.
    #[error("Row {row} has {found} values, expected {expected}.")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Number of feature names differs from the number of feature columns.
    #[error("Got {names} feature names for {features} feature columns.")]
    FeatureNamesMismatch { names: usize, features: usize },
    /// Requested column is not present in the header.
    #[error("Column {0} was not found in the header.")]
    UnknownColumn(String),
    /// Columns can only be selected by name when the file has a header.
    #[error("Selecting columns by name requires a header row.")]
    NoHeaders,
    /// Answer token is empty or collides with another token.
    #[error("Invalid answer token {0:?}.")]
    InvalidToken(String),
    /// An answer was given after the session reached an outcome.
    #[error("The play session has already finished.")]
    SessionFinished,
    /// Input ended in the middle of a round.
    #[error("Input was closed before the game finished.")]
    InputClosed,
    /// Unable to read or parse the CSV source.
    #[error("Unable to read dataset: {0}")]
    Csv(#[from] csv::Error),
    /// Console or file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
