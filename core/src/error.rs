use thiserror::Error;

/// Failures surfaced by the pipeline. All fetch-side variants mean the
/// same thing to callers: the snapshot refresh failed and the previously
/// installed snapshot (possibly empty) stays in place. Join and query
/// operations are total and never produce one of these.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Source request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Source returned status {status} for {url}")]
    SourceStatus { url: String, status: u16 },

    #[error("Malformed payload from {url}: {source}")]
    MalformedPayload {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ViewResult<T> = Result<T, ViewError>;
