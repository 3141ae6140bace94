//! Tokio task that periodically drops expired sessions.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::core::{DashboardService, DashboardStore};

/// Handle to a running sweeper task.
pub struct SessionSweeper {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl SessionSweeper {
    /// Spawn a sweeper on `runtime` that prunes `service` every `interval`.
    pub fn spawn<S>(
        runtime: &tokio::runtime::Handle,
        service: DashboardService<S>,
        interval: Duration,
    ) -> Self
    where
        S: DashboardStore + 'static,
    {
        let (stop, mut stop_rx) = oneshot::channel::<()>();
        let interval = interval.max(Duration::from_millis(1));
        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        service.prune_expired_sessions();
                    }
                }
            }
            debug!("session sweeper stopped");
        });
        Self { stop, handle }
    }

    /// Stop the sweeper and wait for it to finish.
    pub async fn stop(self) {
        let _ = self.stop.send(());
        let _ = self.handle.await;
    }
}
