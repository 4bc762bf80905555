//! Read-through in-memory cache for remote assets such as cover art.
//!
//! Each locator gets its own [`OnceCell`]; concurrent loads of the same
//! locator wait on that cell, so only one fetch is in flight per key. A failed
//! fetch leaves the cell empty and the next load tries again.

use crate::client::Client;
use crate::error::NetworkResult;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use url::Url;

/// A fetched asset
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub url: Url,
    pub bytes: Bytes,
}

impl Asset {
    pub fn new(url: Url, bytes: impl Into<Bytes>) -> Self {
        Self {
            url,
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Source of asset bytes behind the cache
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> NetworkResult<Asset>;
}

/// Fetches assets over HTTP
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> NetworkResult<Asset> {
        let bytes = self.client.get_bytes(url.as_str()).await?;
        Ok(Asset::new(url.clone(), bytes))
    }
}

/// Unbounded read-through cache keyed by locator
pub struct AssetCache<F: AssetFetcher> {
    fetcher: F,
    entries: Mutex<HashMap<Url, Arc<OnceCell<Asset>>>>,
}

impl<F: AssetFetcher> AssetCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached asset for `url`, fetching it on first use
    pub async fn load(&self, url: &Url) -> NetworkResult<Asset> {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries
                .entry(url.clone())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let asset = cell
            .get_or_try_init(|| async {
                log::debug!("Fetching asset {}", url);
                self.fetcher.fetch(url).await
            })
            .await
            .inspect_err(|e| log::warn!("Failed to load asset {}: {}", url, e))?;
        Ok(asset.clone())
    }

    /// Number of assets held
    pub async fn len(&self) -> usize {
        self.entries
            .lock()
            .await
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// True if `url` has been fetched successfully
    pub async fn contains(&self, url: &Url) -> bool {
        self.entries
            .lock()
            .await
            .get(url)
            .is_some_and(|cell| cell.initialized())
    }

    /// Drops every cached asset
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

impl AssetCache<HttpFetcher> {
    /// Cache backed by `client`
    pub fn http(client: Client) -> Self {
        Self::new(HttpFetcher::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Counts calls; fails the first `failures` of them
    struct CountingFetcher {
        calls: AtomicUsize,
        failures: usize,
    }

    impl CountingFetcher {
        fn new(failures: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failures,
            }
        }
    }

    #[async_trait]
    impl AssetFetcher for CountingFetcher {
        async fn fetch(&self, url: &Url) -> NetworkResult<Asset> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            if call < self.failures {
                return Err(NetworkError::Custom("offline".to_string()));
            }
            Ok(Asset::new(url.clone(), url.as_str().as_bytes().to_vec()))
        }
    }

    fn cover(name: &str) -> Url {
        Url::parse(&format!("https://example.com/{}.png", name)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_loads_coalesce() {
        let cache = AssetCache::new(CountingFetcher::new(0));
        let url = cover("a");

        let (a, b, c) = tokio::join!(cache.load(&url), cache.load(&url), cache.load(&url));
        assert_eq!(a.unwrap(), b.unwrap());
        assert!(c.is_ok());
        assert_eq!(cache.fetcher.calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains(&url).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_distinct_keys_fetch_separately() {
        let cache = AssetCache::new(CountingFetcher::new(0));
        cache.load(&cover("a")).await.unwrap();
        cache.load(&cover("b")).await.unwrap();
        cache.load(&cover("a")).await.unwrap();

        assert_eq!(cache.fetcher.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_not_cached() {
        let cache = AssetCache::new(CountingFetcher::new(1));
        let url = cover("a");

        assert!(cache.load(&url).await.is_err());
        assert!(!cache.contains(&url).await);
        assert!(cache.is_empty().await);

        let asset = cache.load(&url).await.unwrap();
        assert_eq!(asset.bytes, Bytes::from(url.as_str().as_bytes().to_vec()));
        assert_eq!(cache.fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_forces_refetch() {
        let cache = AssetCache::new(CountingFetcher::new(0));
        let url = cover("a");
        cache.load(&url).await.unwrap();
        cache.clear().await;
        assert!(cache.is_empty().await);

        cache.load(&url).await.unwrap();
        assert_eq!(cache.fetcher.calls.load(Ordering::SeqCst), 2);
    }
}
