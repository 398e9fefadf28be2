use crate::model::ModelError;

/// Errors surfaced by the interview and minutes operations.
#[derive(Debug, thiserror::Error)]
pub enum MinutesError {
    /// Blank or whitespace-only input. Callers re-prompt; nothing was stored.
    #[error("input is empty")]
    EmptyInput,
    /// The model call failed. The underlying cause is kept unmodified.
    #[error("generation failed: {0}")]
    Generation(#[from] ModelError),
    #[error("there is no unanswered message to retry")]
    NothingToRetry,
    /// Minutes were requested before the interview allowed it.
    #[error("minutes are not available yet: {0}")]
    PreconditionNotMet(String),
}
