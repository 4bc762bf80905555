// crates/resilience/tests/resilience_tests.rs
//! Integration tests for resilience helpers

use readalong_resilience::{with_timeout, CancellationToken, ResilienceError, Timeout};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_cancellation_interrupts_timed_work() {
    let token = CancellationToken::new();
    let timeout = Timeout::new(Duration::from_secs(10));

    let worker = {
        let token = token.clone();
        tokio::spawn(async move {
            timeout
                .execute(async {
                    tokio::select! {
                        _ = token.cancelled() => Err(ResilienceError::Cancelled),
                        _ = tokio::time::sleep(Duration::from_secs(5)) => Ok(()),
                    }
                })
                .await
        })
    };

    tokio::time::sleep(Duration::from_secs(1)).await;
    token.cancel();

    let result = worker.await.unwrap();
    assert_eq!(result, Ok(Err(ResilienceError::Cancelled)));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_fires_before_slow_work() {
    let result = with_timeout(Duration::from_secs(2), async {
        tokio::time::sleep(Duration::from_secs(30)).await;
    })
    .await;

    assert_eq!(result, Err(ResilienceError::Timeout(Duration::from_secs(2))));
}

#[tokio::test]
async fn test_many_waiters_released_by_one_cancel() {
    let token = CancellationToken::new();
    let waiters: Vec<_> = (0..8)
        .map(|_| {
            let token = token.clone();
            tokio::spawn(async move { token.cancelled().await })
        })
        .collect();

    token.cancel();

    for waiter in waiters {
        waiter.await.unwrap();
    }
}
