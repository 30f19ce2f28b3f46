//! Periodic purge of long-expired posts

use board_common::ReaperConfig;
use board_service::ReaperService;
use chrono::Utc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::state::AppState;

/// `tokio::time::interval` rejects a zero period
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Spawn the reaper loop; the first purge runs immediately
pub fn spawn_reaper(state: AppState, config: ReaperConfig) -> JoinHandle<()> {
    info!(
        interval_secs = config.interval.as_secs(),
        grace_days = config.grace_days,
        "Starting expired-post reaper"
    );

    tokio::spawn(async move {
        let mut ticker = interval(config.interval.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let service = ReaperService::new(state.service_context());
            if let Err(e) = service.purge(Utc::now(), config.grace_days).await {
                error!(error = %e, "Expired-post purge failed");
            }
        }
    })
}
