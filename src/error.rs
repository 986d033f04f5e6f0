use thiserror::Error;

/// Kegagalan saat mengambil atau membaca respons dari API / cache.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request to {url} failed with status {code}")]
    Status { url: String, code: u16 },
    #[error("failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    pub fn parse(url: impl Into<String>, source: serde_json::Error) -> Self {
        FetchError::Parse {
            url: url.into(),
            source,
        }
    }
}
