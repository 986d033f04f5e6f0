use crate::{
    data::{DatasetDescriptor, DatasetDocument, parse_catalog},
    error::FetchError,
    fetch::Fetch,
    freshness::LastUpdated,
};
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://covid.yapie.me";

/// Client untuk endpoint `/list`, `/data/<id>` dan `/data/last_updated.json`.
pub struct Api<F> {
    base_url: String,
    fetcher: Arc<F>,
}

impl<F> Clone for Api<F> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<F: Fetch> Api<F> {
    pub fn new(base_url: &str, fetcher: Arc<F>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fetcher,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn catalog(&self) -> Result<Vec<DatasetDescriptor>, FetchError> {
        let url = self.url("list");
        let body = self.fetcher.get(&url).await?;
        parse_catalog(&body).map_err(|e| FetchError::parse(url, e))
    }

    pub async fn dataset(&self, dataset: &DatasetDescriptor) -> Result<DatasetDocument, FetchError> {
        let url = self.url(&dataset.path);
        let body = self.fetcher.get(&url).await?;
        DatasetDocument::parse(&body).map_err(|e| FetchError::parse(url, e))
    }

    pub async fn last_updated(&self) -> Result<LastUpdated, FetchError> {
        let url = self.url("data/last_updated.json");
        let body = self.fetcher.get(&url).await?;
        LastUpdated::parse(&body).map_err(|e| FetchError::parse(url, e))
    }
}
