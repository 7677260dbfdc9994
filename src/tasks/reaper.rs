//! Reaper Task
//!
//! Background task that periodically sweeps an engine's state.

use std::sync::{Mutex, Weak};
use std::time::Duration;

use tokio::runtime;
use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::{ByteSize, LruState};

/// Handle to a running reaper.
///
/// Lifecycle is `Created -> Running -> Stopped`. The task stops when
/// [`stop`](Self::stop) is called, when this handle is dropped, or when the
/// state it sweeps has been dropped.
#[derive(Debug)]
pub struct Reaper {
    shutdown: Mutex<Option<oneshot::Sender<()>>>,
    task: JoinHandle<()>,
}

impl Reaper {
    /// Spawns a reaper on `runtime` that sweeps `state` every `interval`.
    ///
    /// The first sweep happens one full interval after the call.
    pub(crate) fn spawn<V>(
        runtime: &runtime::Handle,
        state: Weak<RwLock<LruState<V>>>,
        interval: Duration,
    ) -> Self
    where
        V: ByteSize + Clone + Send + Sync + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let start = Instant::now() + interval;

        let task = runtime.spawn(async move {
            info!(?interval, "Starting reaper");

            let mut ticker = time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        debug!("Reaper received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        let Some(shared) = state.upgrade() else {
                            debug!("Reaper state dropped");
                            break;
                        };

                        let report = shared.write().await.sweep(Instant::now());

                        if report.removed() > 0 {
                            info!(
                                expired = report.expired,
                                evicted = report.evicted,
                                "Reaper sweep removed entries"
                            );
                        } else {
                            debug!("Reaper sweep: nothing to remove");
                        }
                    }
                }
            }

            info!("Reaper stopped");
        });

        Self {
            shutdown: Mutex::new(Some(shutdown_tx)),
            task,
        }
    }

    /// Signals the task to stop. Only the first call has any effect.
    pub fn stop(&self) {
        let sender = self
            .shutdown
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(sender) = sender {
            let _ = sender.send(());
        }
    }

    /// Returns true once the task has finished.
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }
}
