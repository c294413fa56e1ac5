//! Background expiry sweeper.
//!
//! A periodic task that purges expired records from the store. Sweep
//! enforcement is best-effort: `find_by_key` already hides expired
//! records, so the sweep reclaims memory rather than gating visibility.
//! The sweep and a concurrent retrieval race for the same atomic
//! removal; either winning per record is acceptable.

use crate::SecretStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Debug)]
enum SweepCommand {
    Shutdown,
}

/// Handle for controlling a running sweeper task.
#[derive(Clone)]
pub struct SweeperHandle {
    command_tx: mpsc::Sender<SweepCommand>,
}

impl SweeperHandle {
    /// Asks the sweeper to stop after its current cycle.
    pub async fn shutdown(&self) {
        // A send error means the task already exited, which is fine.
        let _ = self.command_tx.send(SweepCommand::Shutdown).await;
    }
}

/// Periodic expiry sweep over a [`SecretStore`].
pub struct ExpirySweeper;

impl ExpirySweeper {
    /// Spawns the sweep loop on the current tokio runtime.
    pub fn spawn(store: Arc<dyn SecretStore>, interval: Duration) -> SweeperHandle {
        let (command_tx, mut command_rx) = mpsc::channel(8);

        tokio::spawn(async move {
            let mut tick = tokio::time::interval(interval);
            // interval's first tick completes immediately; consume it so
            // the first real sweep happens one interval from now.
            tick.tick().await;

            debug!("[SWEEP] started, interval {:?}", interval);
            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        match store.purge_expired(chrono::Utc::now()).await {
                            Ok(0) => {}
                            Ok(n) => debug!("[SWEEP] purged {} expired secret(s)", n),
                            Err(e) => warn!("[SWEEP] purge failed: {}", e),
                        }
                    }
                    cmd = command_rx.recv() => match cmd {
                        Some(SweepCommand::Shutdown) | None => {
                            debug!("[SWEEP] shutting down");
                            break;
                        }
                    },
                }
            }
        });

        SweeperHandle { command_tx }
    }
}
