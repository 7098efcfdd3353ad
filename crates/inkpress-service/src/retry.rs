//! Re-running a unit of work after the store reports a write conflict.

use std::future::Future;

use tracing::warn;

use inkpress_core::result::AppResult;

/// Run `unit` until it succeeds, fails with a non-retriable error, or has
/// been retried `max_retries` times.
///
/// `unit` must open and commit its own transaction, so that every attempt
/// starts from freshly committed state.
pub async fn with_write_retries<T, F, Fut>(max_retries: u32, operation: &str, mut unit: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt = 0;
    loop {
        match unit().await {
            Err(e) if e.is_retriable() && attempt < max_retries => {
                attempt += 1;
                warn!(operation, attempt, error = %e, "Write conflict, retrying");
            }
            result => return result,
        }
    }
}
