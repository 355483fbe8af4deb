//! Error types for the progression service layer.

use timebank_levels::CatalogError;

/// Errors that can occur while orchestrating a completion event.
#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    /// The level catalog rejected a derivation (malformed table).
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The backing store failed to load or apply a record.
    ///
    /// The store behind the [`ProgressionStore`] port is deployment
    /// specific (document store in production, in-memory in tests), so
    /// its failure is carried as a message rather than a typed source.
    ///
    /// [`ProgressionStore`]: crate::store::ProgressionStore
    #[error("store error: {0}")]
    Store(String),
}
