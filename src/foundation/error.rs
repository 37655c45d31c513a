/// Convenience result type used across the engine.
pub type StudioResult<T> = Result<T, StudioError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    /// The operation was invoked with unusable input (e.g. save with no
    /// garment assigned). The operation is a no-op and no state was mutated.
    #[error("input error: {0}")]
    Input(String),

    /// A source image failed to load or decode. A composite that hits this is
    /// aborted as a whole; no partial raster is produced.
    #[error("decode error: {0}")]
    Decode(String),

    /// The underlying key-value store failed to read or write. In-memory
    /// session state is preserved so the caller may retry.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// A gallery record with the same id already exists. Benign: the record is
    /// treated as already saved, not stored twice.
    #[error("duplicate record: {0}")]
    Duplicate(String),

    /// Invalid session or record data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StudioError {
    /// Build a [`StudioError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`StudioError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`StudioError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`StudioError::Duplicate`] value.
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Build a [`StudioError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
