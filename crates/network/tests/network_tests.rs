// crates/network/tests/network_tests.rs
//! Integration tests for network module

use readalong_network::{Asset, AssetCache, AssetFetcher, Client, ClientConfig, NetworkError, NetworkResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

#[tokio::test]
async fn test_client_basic_operations() {
    let client = Client::new().unwrap();
    let cloned = client.clone();
    assert_eq!(cloned.config().timeout, Duration::from_secs(30));
}

#[tokio::test]
async fn test_client_with_custom_config() {
    let config = ClientConfig {
        timeout: Duration::from_secs(10),
        user_agent: "TestClient/1.0".to_string(),
        max_redirects: 5,
    };

    let client = Client::with_config(config);
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_get_json_rejects_non_http_scheme() {
    let client = Client::new().unwrap();
    let result: NetworkResult<serde_json::Value> = client.get_json("file:///tmp/book.json").await;
    assert!(matches!(result, Err(NetworkError::InvalidUrl(_))));
}

struct SlowFetcher {
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl AssetFetcher for SlowFetcher {
    async fn fetch(&self, url: &Url) -> NetworkResult<Asset> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(Asset::new(url.clone(), vec![0u8; 16]))
    }
}

#[tokio::test(start_paused = true)]
async fn test_cache_shared_across_tasks() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = Arc::new(AssetCache::new(SlowFetcher { calls: calls.clone() }));
    let url = Url::parse("https://example.com/cover.png").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            let url = url.clone();
            tokio::spawn(async move { cache.load(&url).await.map(|asset| asset.len()) })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 16);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len().await, 1);
}
