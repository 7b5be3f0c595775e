use thiserror::Error;

/// Errors building a request before it reaches dispatch.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown request method '{0}'")]
    UnknownMethod(String),

    #[error("query parameter '{0}' must look like key=value")]
    MalformedQuery(String),

    #[error("request body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),
}
