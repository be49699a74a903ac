//! Periodic refresh job.
//!
//! Runs on a fixed interval and only logs. The listing is recomputed on every
//! request anyway, so there is nothing to refresh yet.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// Default refresh interval (one week).
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(604_800);

/// Start the refresh job on the current runtime.
///
/// Returns `None` when `period` is zero, which disables the job. The first
/// tick fires one full period after start.
pub fn spawn_refresh_job(period: Duration) -> Option<JoinHandle<()>> {
    if period.is_zero() {
        return None;
    }

    Some(tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // interval() completes its first tick immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            info!(period_secs = period.as_secs(), "Refreshing image listing");
        }
    }))
}
