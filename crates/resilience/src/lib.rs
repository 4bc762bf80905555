// crates/resilience/src/lib.rs
//! Resilience helpers for asynchronous playback work
//!
//! This module provides:
//! - Timeouts for futures that must not hang (engine readiness, fetches)
//! - A cooperative cancellation token for superseded work
//!
//! # Example
//!
//! ```rust
//! use readalong_resilience::{CancellationToken, Timeout};
//! use std::time::Duration;
//!
//! # async fn demo() {
//! let timeout = Timeout::new(Duration::from_secs(10));
//! let value = timeout.execute(async { 42 }).await;
//! assert_eq!(value.ok(), Some(42));
//!
//! let token = CancellationToken::new();
//! token.cancel();
//! token.cancelled().await;
//! # }
//! ```

mod cancellation;
mod error;
mod timeout;

pub use cancellation::CancellationToken;
pub use error::{ResilienceError, ResilienceResult};
pub use timeout::{with_timeout, Timeout};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_exports_accessible() {
        let _: Timeout = Timeout::new(std::time::Duration::from_secs(5));
        let _: CancellationToken = CancellationToken::new();
        let _: ResilienceError = ResilienceError::Cancelled;
    }
}
