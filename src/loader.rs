use crate::{
    api::Api,
    dashboard::RequestToken,
    data::{DatasetDescriptor, DatasetDocument},
    error::FetchError,
    fetch::Fetch,
};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;

/// Hasil kerja background yang dikirim kembali ke event loop UI.
pub enum LoadEvent {
    Catalog(Result<Vec<DatasetDescriptor>, FetchError>),
    Dataset(RequestToken, Result<DatasetDocument, FetchError>),
    Freshness(Result<DateTime<Utc>, FetchError>),
}

pub fn spawn_catalog<F: Fetch>(api: &Api<F>, tx: &UnboundedSender<LoadEvent>) {
    let (api, tx) = (api.clone(), tx.clone());
    tokio::spawn(async move {
        let result = api.catalog().await;
        let _ = tx.send(LoadEvent::Catalog(result));
    });
}

/// Tidak ada pembatalan: request lama tetap jalan, hasilnya difilter lewat token.
pub fn spawn_dataset<F: Fetch>(
    api: &Api<F>,
    tx: &UnboundedSender<LoadEvent>,
    token: RequestToken,
    dataset: DatasetDescriptor,
) {
    let (api, tx) = (api.clone(), tx.clone());
    tokio::spawn(async move {
        let result = api.dataset(&dataset).await;
        let _ = tx.send(LoadEvent::Dataset(token, result));
    });
}

pub fn spawn_freshness<F: Fetch>(api: &Api<F>, tx: &UnboundedSender<LoadEvent>) {
    let (api, tx) = (api.clone(), tx.clone());
    tokio::spawn(async move {
        let result = api.last_updated().await.map(|l| l.updated_at);
        let _ = tx.send(LoadEvent::Freshness(result));
    });
}
