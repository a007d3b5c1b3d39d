//! Error types for formatter backends.

use derive_more::Display;

pub type EngineResult<T> = Result<T, EngineError>;

/// Failure reported by a formatting engine.
///
/// The boundary layer collapses any of these into a plain error status, so
/// the message only matters for native embedders and tests.
#[derive(Display, Debug)]
pub enum EngineError {
    /// The configured style could not be resolved for this input.
    #[display("Invalid style configuration: {_0}")]
    InvalidStyle(String),

    /// The engine failed while rewriting the source.
    #[display("Formatting failed: {_0}")]
    FormatFailure(String),
}

impl EngineError {
    pub fn invalid_style(msg: impl std::fmt::Display) -> Self {
        EngineError::InvalidStyle(msg.to_string())
    }

    pub fn format_failure(msg: impl std::fmt::Display) -> Self {
        EngineError::FormatFailure(msg.to_string())
    }
}

impl std::error::Error for EngineError {}
