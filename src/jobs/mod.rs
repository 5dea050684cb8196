//! Background jobs that run on a fixed interval for the lifetime of
//! the server

mod evict_idle_sessions;
pub use evict_idle_sessions::EvictIdleSessions;

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::api::AppState;

#[async_trait]
pub trait PeriodicJob: Debug + Send + Sync + 'static {
    fn interval(&self) -> Duration;
    async fn run_job(&self, state: &AppState);
}

/// Spawn `job` in its own tokio task. The first run happens one
/// interval after spawning.
pub fn spawn_periodic_job<J: PeriodicJob>(state: Arc<AppState>, job: J) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(job.interval());
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            tracing::debug!("Running job {:?}", job);
            job.run_job(&state).await;
        }
    })
}
