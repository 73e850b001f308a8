use kokoro_core::error::CoreError;

/// Errors from the generation pipeline and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A domain-level error (stale id, invalid prompt or settings).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The HTTP request to the generation backend failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The generation backend answered with a non-2xx status.
    #[error("Generation backend error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The collaborator answered but refused or produced nothing usable.
    #[error("Generation rejected: {0}")]
    Rejected(String),
}

impl PipelineError {
    /// Collapse into the domain error used for notices and HTTP mapping.
    pub fn into_core(self) -> CoreError {
        match self {
            PipelineError::Core(core) => core,
            other => CoreError::Generation(other.to_string()),
        }
    }
}
