use thiserror::Error;

/// Result type for loading and bootstrapping
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed reward table input. Fatal to loading (or editing) that table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Duplicate hero id: {0}")]
    DuplicateHero(String),

    #[error("Unknown hero: {0}")]
    UnknownHero(String),

    #[error("Invalid cost {cost} for hero {hero}: must be a finite, non-negative number")]
    InvalidCost { hero: String, cost: f64 },

    #[error("Invalid yield {value} of token {token} for hero {hero}: must be a non-negative integer")]
    InvalidYield {
        hero: String,
        token: String,
        value: f64,
    },

    #[error("Missing hero id in row {row}")]
    EmptyHeroId { row: usize },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Duplicate token column: {0}")]
    DuplicateToken(String),

    #[error("Invalid number {value:?} in column {column} (row {row})")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

/// Crate level errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Unknown act: {0}")]
    UnknownAct(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
