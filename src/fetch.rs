use crate::error::FetchError;
use std::{future::Future, time::Duration};
use tracing::debug;

/// Sumber byte untuk sebuah URL. Dipakai oleh API client dan offline cache,
/// sehingga jaringan bisa diganti stub saat testing.
pub trait Fetch: Send + Sync + 'static {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Fetcher HTTP sungguhan berbasis reqwest.
#[derive(Clone)]
pub struct HttpFetch {
    client: reqwest::Client,
}

impl HttpFetch {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wbw-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetch {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                code: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}
