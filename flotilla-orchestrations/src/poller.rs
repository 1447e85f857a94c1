//! Deletion confirmation polling
//!
//! A delete call only marks a resource for removal; finalizers and garbage
//! collection decide when it is actually gone. [`wait_until_absent`] polls an
//! existence check once a second until the resource disappears, and gives up
//! after thirty seconds.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::info;

use crate::resource_client::ApiError;

/// Gap between consecutive existence checks.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Total time one confirmation may take before giving up.
const POLL_BUDGET: Duration = Duration::from_secs(30);

/// Why a confirmation wait stopped without observing absence.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The existence check itself failed. Check errors are not retried.
    #[error("existence check failed: {0}")]
    Check(#[from] ApiError),

    /// The resource was still present when the budget ran out.
    #[error("still present after {0:?}")]
    TimedOut(Duration),
}

/// Poll `check` until it reports the resource absent.
///
/// The first check runs immediately, so an already-gone resource confirms
/// without waiting. A check error aborts the wait at once.
pub async fn wait_until_absent<F, Fut>(subject: &str, mut check: F) -> Result<(), WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ApiError>>,
{
    let start = Instant::now();
    loop {
        match check().await {
            Ok(false) => return Ok(()),
            Ok(true) => {
                let waited = start.elapsed();
                if waited >= POLL_BUDGET {
                    return Err(WaitError::TimedOut(waited));
                }
                info!("Waiting for {} to be deleted", subject);
                sleep(POLL_INTERVAL).await;
            }
            Err(err) => return Err(WaitError::Check(err)),
        }
    }
}
