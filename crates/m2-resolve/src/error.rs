//! Error types for m2-resolve

/// Result type for m2-resolve operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a resolution pass
///
/// Binding never fails on its own: unknown profiles are skipped, missing
/// servers mean anonymous access and undecryptable passwords fall back to
/// the raw value. Only loading the settings documents can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Settings error from m2-settings
    #[error(transparent)]
    Settings(#[from] m2_settings::Error),
}
