use thiserror::Error;

/// Errors caused by a malformed handler catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Failed to parse format cache JSON: {0}")]
    JsonParseError(String),

    #[error("Could not read format cache '{path}': {message}")]
    ReadError { path: String, message: String },

    #[error("Handler at catalog position {position} has an empty name")]
    EmptyHandlerName { position: usize },

    #[error("Handler '{handler}' is registered more than once")]
    DuplicateHandler { handler: String },

    #[error("Format entry {position} of handler '{handler}' has no MIME type")]
    MissingMime { handler: String, position: usize },

    #[error("Format entry {position} of handler '{handler}' has a malformed MIME type: '{mime}'")]
    MalformedMime {
        handler: String,
        position: usize,
        mime: String,
    },
}

/// Errors caused by an unusable cost policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("Failed to parse cost policy JSON: {0}")]
    JsonParseError(String),

    #[error("Could not read cost policy '{path}': {message}")]
    ReadError { path: String, message: String },

    #[error("Cost policy constant '{name}' must be finite and non-negative, found {value}")]
    InvalidConstant { name: String, value: f64 },

    #[error("Category penalty '{from}' -> '{to}' must be finite and non-negative, found {value}")]
    InvalidCategoryPenalty { from: String, to: String, value: f64 },
}

/// Errors that abort graph construction. No partial graph is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Errors raised while saving or loading a graph snapshot.
#[derive(Error, Debug, Clone)]
pub enum SnapshotError {
    #[error("Snapshot error: {0}")]
    Generic(String),
}
