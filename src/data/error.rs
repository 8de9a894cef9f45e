use thiserror::Error;

/// Recoverable, user-facing problems in the filter workflow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error(
        "The file must contain the following columns: Birth, Death, Other (missing: {})",
        .0.join(", ")
    )]
    MissingColumns(Vec<String>),

    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("Sheet '{name}' not found (available: {})", .available.join(", "))]
    UnknownSheet {
        name: String,
        available: Vec<String>,
    },
}
