use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid response encoding: {0}")]
    InvalidEncoding(String),

    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a catalog query.
///
/// Not-found on a single recipe lookup is reported as `Ok(None)` by
/// [`crate::CatalogClient::get_detail`]; the `NotFound` variant only appears
/// where a missing recipe has to travel as an error, e.g. inside a browse batch.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] FetchError),

    #[error("Unexpected response shape: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Recipe not found: {0}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}
