// crates/network/src/lib.rs
//! Network utilities: HTTP requests and the asset cache

mod asset_cache;
mod client;
mod error;

pub use asset_cache::{Asset, AssetCache, AssetFetcher, HttpFetcher};
pub use client::{parse_http_url, Client, ClientConfig};
pub use error::{NetworkError, NetworkResult};
