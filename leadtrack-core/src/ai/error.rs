use thiserror::Error;

/// Failure modes of a single generation call. There are no automatic
/// retries; the turn driver maps every variant to a neutral, user-safe
/// fallback message and the only retry is the user re-sending.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Transport failure: the backend could not be reached or timed out.
    #[error("backend unavailable: {0}")]
    Unavailable(anyhow::Error),

    /// The backend answered with an error-shaped or malformed body.
    #[error("backend error: {0}")]
    Backend(String),

    /// Well-formed response carrying no usable text.
    #[error("backend returned an empty response")]
    EmptyResponse,
}
