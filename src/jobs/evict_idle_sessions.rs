use std::time::Duration;

use async_trait::async_trait;

use crate::api::AppState;

/// Forgets conversations that have not been touched for `ttl`
#[derive(Debug)]
pub struct EvictIdleSessions {
    ttl: Duration,
    interval: Duration,
}

impl EvictIdleSessions {
    pub fn new(ttl: Duration, interval: Duration) -> Self {
        Self { ttl, interval }
    }
}

#[async_trait]
impl crate::jobs::PeriodicJob for EvictIdleSessions {
    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run_job(&self, state: &AppState) {
        let evicted = state.sessions().evict_idle(self.ttl);
        if evicted > 0 {
            tracing::info!(
                "Evicted {} idle chat sessions, {} remaining",
                evicted,
                state.sessions().len()
            );
        }
    }
}
