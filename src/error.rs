use thiserror::Error;

/// All failure modes surfaced by the catalog and gallery layers.
///
/// Store-open failures are fatal to the application; everything else is
/// reported to the caller and never crashes the presentation layer.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest header is missing required column '{0}'")]
    MissingColumn(String),

    #[error("manifest header names unknown column '{0}'")]
    UnknownColumn(String),

    #[error("manifest line {line}: expected {expected} values, found {found}")]
    RowArity {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("manifest is empty (no header row)")]
    EmptyManifest,

    #[error("'{0}' does not look like an image file")]
    NotAnImage(String),

    #[error("no image with id {0} in the catalog")]
    UnknownImage(i64),

    #[error("could not determine a data directory for the catalog database")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
