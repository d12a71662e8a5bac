use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No rows matched where at least one was required.
    #[error("no rows found")]
    NotFound,

    /// More than one row matched where at most one was expected.
    #[error("query returned more than one row")]
    NonUnique,

    /// Two candidate rows of a re-keyed join resolved to the same key.
    #[error("ambiguous join key: {0}")]
    AmbiguousKey(String),

    /// Error mapping a row into its entity type.
    #[error("row mapping error: {0}")]
    Mapping(String),

    /// Provider failures pass through unmodified.
    #[cfg(feature = "rusqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for query operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
