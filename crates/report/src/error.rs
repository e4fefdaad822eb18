use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("report service returned an empty response")]
    EmptyResponse,
}
