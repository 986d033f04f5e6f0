use crate::{error::FetchError, fetch::Fetch};
use futures::future::try_join_all;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::fs;
use tracing::{debug, info, warn};

pub const DEFAULT_CACHE_NAME: &str = "wbw-cache-v1";
pub const BULMA_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/bulma/0.9.3/css/bulma.min.css";

/// Aset statis default, relatif terhadap base URL kecuali yang absolut.
pub fn default_assets(base_url: &str) -> Vec<String> {
    let base = base_url.trim_end_matches('/');
    ["", "index.html", "main.js", "style.css", "manifest.json"]
        .iter()
        .map(|p| format!("{base}/{p}"))
        .chain(std::iter::once(BULMA_CSS.to_string()))
        .collect()
}

/// Cache aset di disk: `<root>/<name>/<url ter-encode>`.
#[derive(Clone, Debug)]
pub struct OfflineCache {
    dir: PathBuf,
}

impl OfflineCache {
    pub fn new(root: &Path, name: &str) -> Self {
        Self {
            dir: root.join(name),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        entry_in(&self.dir, url)
    }

    /// Direktori sementara di sebelah cache, dipakai selama install.
    fn staging_dir(&self) -> PathBuf {
        let mut name = self.dir.file_name().map(OsString::from).unwrap_or_default();
        name.push(".partial");
        self.dir.with_file_name(name)
    }

    /// Ambil semua aset lalu pasang sebagai cache baru. Satu aset gagal diambil
    /// atau gagal ditulis = seluruh install gagal, cache lama tetap utuh.
    pub async fn install<F: Fetch>(&self, fetcher: &F, assets: &[String]) -> Result<usize, FetchError> {
        info!(cache = %self.dir.display(), count = assets.len(), "installing offline cache");
        let bodies = try_join_all(assets.iter().map(|url| fetcher.get(url))).await?;

        let staging = self.staging_dir();
        if let Err(e) = write_entries(&staging, assets, &bodies).await {
            warn!(error = %e, "offline cache install failed, discarding partial entries");
            let _ = fs::remove_dir_all(&staging).await;
            return Err(e.into());
        }
        if fs::try_exists(&self.dir).await? {
            fs::remove_dir_all(&self.dir).await?;
        }
        fs::rename(&staging, &self.dir).await?;

        info!(count = bodies.len(), "offline cache installed");
        Ok(bodies.len())
    }

    pub async fn lookup(&self, url: &str) -> Option<Vec<u8>> {
        fs::read(self.entry_path(url)).await.ok()
    }
}

fn entry_in(dir: &Path, url: &str) -> PathBuf {
    dir.join(urlencoding::encode(url).as_ref())
}

async fn write_entries(dir: &Path, assets: &[String], bodies: &[Vec<u8>]) -> std::io::Result<()> {
    if fs::try_exists(dir).await? {
        fs::remove_dir_all(dir).await?;
    }
    fs::create_dir_all(dir).await?;
    for (url, body) in assets.iter().zip(bodies) {
        fs::write(entry_in(dir, url), body).await?;
    }
    Ok(())
}

/// Cache-first: pakai entri cache kalau ada, selain itu teruskan ke jaringan.
pub struct CachedFetch<F> {
    cache: OfflineCache,
    inner: Arc<F>,
}

impl<F: Fetch> CachedFetch<F> {
    pub fn new(cache: OfflineCache, inner: Arc<F>) -> Self {
        Self { cache, inner }
    }
}

impl<F: Fetch> Fetch for CachedFetch<F> {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if let Some(body) = self.cache.lookup(url).await {
            debug!(url, "served from offline cache");
            return Ok(body);
        }
        self.inner.get(url).await
    }
}
