// Retry utilities

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry with exponential backoff from `base_delay` (doubling, capped at
/// 32 times the base).
///
/// `max_retries` counts attempts after the first one, so `0` runs the
/// operation exactly once. Errors for which `retryable` is false are
/// returned immediately.
pub async fn with_retry<F, Fut, T, E, R>(
    mut operation: F,
    max_retries: u32,
    base_delay: Duration,
    retryable: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    R: Fn(&E) -> bool,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) => {
                if attempt >= max_retries || !retryable(&error) {
                    return Err(error);
                }
                attempt += 1;

                let delay = base_delay * 2u32.pow((attempt - 1).min(5));
                warn!("Attempt {} failed: {}; retrying in {:?}", attempt, error, delay);
                sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_zero_retries_runs_once() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> = with_retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("boom".to_string()) }
            },
            0,
            Duration::from_millis(1),
            |_| true,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = with_retry(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(format!("attempt {}", n))
                    } else {
                        Ok(n)
                    }
                }
            },
            3,
            Duration::from_millis(1),
            |_| true,
        )
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), String> = with_retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("invalid key".to_string()) }
            },
            3,
            Duration::from_millis(1),
            |e: &String| !e.contains("invalid"),
        )
        .await;

        assert_eq!(result, Err("invalid key".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
