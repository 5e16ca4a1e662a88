use thiserror::Error;

/// Failure kinds surfaced by the engine's public operations.
///
/// Every variant is a user-facing diagnostic: callers report it and keep
/// serving. None of these abort the process.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("document source not found: {0}")]
    SourceNotFound(String),

    #[error("document source could not be parsed: {0}")]
    SourceMalformed(String),

    #[error("document id and content must both be non-empty")]
    InvalidDocument,

    #[error("no document with id '{0}' in the collection")]
    DocumentNotFound(String),

    #[error("malformed boolean query: {0}")]
    QuerySyntax(String),

    #[error("the collection is empty; nothing has been indexed yet")]
    EmptyCollection,
}
