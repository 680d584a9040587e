//! Error taxonomy shared by the runtime and every template.

use thiserror::Error;

/// Top-level error type for generation, registration and seed resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// An inclusive integer range was requested with `max < min`.
    #[error("invalid range: max {max} is less than min {min}")]
    InvalidRange {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
    },

    /// A choice was requested from an empty sequence.
    #[error("cannot pick from an empty sequence")]
    EmptyInput,

    /// A template id was empty or blank.
    #[error("invalid template id: {0:?}")]
    InvalidId(String),

    /// A descriptor was structurally unusable.
    #[error("invalid template descriptor: {0}")]
    InvalidDescriptor(String),

    /// A descriptor declared an id different from the one it was registered under.
    #[error("template id mismatch: registered as {registered:?} but declares {declared:?}")]
    IdMismatch {
        /// The id passed to `register`.
        registered: String,
        /// The id the descriptor declares for itself.
        declared: String,
    },

    /// No template is registered under the requested id.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// An arithmetic expression could not be evaluated.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// A seed value could not be interpreted as an unsigned 32-bit integer.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// A seed store backend failed.
    #[error("storage error: {0}")]
    Storage(String),
}
