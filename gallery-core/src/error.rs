use thiserror::Error;

/// Errors surfaced by the gallery engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    /// Content could not be fetched or the CMS answered with something unusable.
    #[error("network error: {0}")]
    Network(String),
    /// A category index outside the loaded categories.
    #[error("category index {index} out of range (have {len})")]
    Range { index: usize, len: usize },
    /// The loaded content breaks an assumption of the pagination engine,
    /// e.g. a category without sculptures.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// A deep link named a category or sculpture that does not exist.
    #[error("unknown slug: {0}")]
    UnknownSlug(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GalleryError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        GalleryError::Network(err.to_string())
    }

    /// Whether the user can reasonably retry the failed operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GalleryError::Network(_))
    }
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;
