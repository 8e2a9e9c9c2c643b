//! Collects CGI children after they exit.
//!
//! Spawned programs are handed over with [`Reaper::adopt`]. A single
//! background task owns every pending child and waits on each exactly once,
//! so terminated programs never linger as zombies and no status is collected
//! twice. Nothing here blocks the accept loop.

use std::io;
use std::process::ExitStatus;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

type Reaped = (Option<u32>, io::Result<ExitStatus>);

#[derive(Debug, Clone)]
pub struct Reaper {
    tx: mpsc::UnboundedSender<Child>,
    reaped: Arc<AtomicU64>,
}

impl Reaper {
    /// Spawns the reaping task on the current runtime.
    pub fn start() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let reaped = Arc::new(AtomicU64::new(0));

        tokio::spawn(reap_loop(rx, Arc::clone(&reaped)));

        Self { tx, reaped }
    }

    /// Takes ownership of a running child until it exits.
    pub fn adopt(&self, child: Child) {
        if let Err(mpsc::error::SendError(child)) = self.tx.send(child) {
            // The runtime's orphan queue still reaps a dropped child.
            warn!(pid = ?child.id(), "Reaper stopped, releasing child");
        }
    }

    /// How many children have been collected so far.
    pub fn reaped(&self) -> u64 {
        self.reaped.load(Ordering::Acquire)
    }
}

async fn reap_loop(mut rx: mpsc::UnboundedReceiver<Child>, reaped: Arc<AtomicU64>) {
    let mut waiting: JoinSet<Reaped> = JoinSet::new();

    loop {
        tokio::select! {
            adopted = rx.recv() => match adopted {
                Some(child) => {
                    waiting.spawn(wait_child(child));
                }
                None => break,
            },
            Some(joined) = waiting.join_next() => record(joined, &reaped),
        }
    }

    while let Some(joined) = waiting.join_next().await {
        record(joined, &reaped);
    }
}

async fn wait_child(mut child: Child) -> Reaped {
    let pid = child.id();
    (pid, child.wait().await)
}

fn record(joined: Result<Reaped, JoinError>, reaped: &AtomicU64) {
    match joined {
        Ok((pid, Ok(status))) => {
            reaped.fetch_add(1, Ordering::AcqRel);
            debug!(pid = ?pid, %status, "Reaped CGI child");
        }
        Ok((pid, Err(e))) => warn!(pid = ?pid, error = %e, "Failed to collect CGI child"),
        Err(e) => warn!(error = %e, "Reaper wait task failed"),
    }
}
