use thiserror::Error;

/// Errors raised by table sources (workbook readers).
///
/// These are never swallowed by the extraction pipeline: an unreadable
/// workbook propagates to the caller rather than degrading into a fallback.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to open workbook '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised by the external extraction oracle collaborator.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("oracle response was not valid JSON: {0}")]
    InvalidJson(String),

    #[error("oracle call failed: {0}")]
    Upstream(String),
}

/// Errors raised by the extraction orchestrator.
///
/// A template validation that merely fails the direct-parse gate is not an
/// error: it is returned as data and triggers fallback. This enum covers the
/// cases where no fallback is available or permitted.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("template parsing failed and no fallback is permitted: {0}")]
    TemplateRejected(String),

    #[error("no extraction oracle is configured")]
    OracleUnavailable,

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Source(#[from] SourceError),
}
