//! Runs a [`Sequencer`] against the tokio clock.
//!
//! The spawned task owns the sequencer. Callers hold a [`SequencerHandle`] to
//! raise signals and tear the sequence down; notifications arrive on the
//! receiver returned by [`spawn_sequencer`].

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::phase::{Phase, Signal};
use crate::sequencer::{Notification, Sequencer};

/// Owner-side handle of a running sequencer task.
///
/// Dropping the handle tears the sequencer down.
#[derive(Debug)]
pub struct SequencerHandle {
    signals: mpsc::UnboundedSender<Signal>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SequencerHandle {
    /// Forwards a signal to the sequencer. Returns `false` if the sequencer
    /// has already stopped.
    pub fn signal(&self, signal: Signal) -> bool {
        self.signals.send(signal).is_ok()
    }

    /// Stops the sequencer and waits for its task to exit. No notification is
    /// sent after this returns.
    pub async fn teardown(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already have finished on its own.
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "sequencer task ended abnormally");
            }
        }
    }
}

impl Drop for SequencerHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// Starts `sequencer` on the current tokio runtime.
pub fn spawn_sequencer<P, T>(
    sequencer: Sequencer<P, T>,
) -> (SequencerHandle, mpsc::UnboundedReceiver<Notification<P, T>>)
where
    P: Phase,
    T: Clone + Send + 'static,
{
    let (signal_tx, signal_rx) = mpsc::unbounded_channel();
    let (notify_tx, notify_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(run(sequencer, signal_rx, shutdown_rx, notify_tx));

    let handle = SequencerHandle {
        signals: signal_tx,
        shutdown: Some(shutdown_tx),
        task: Some(task),
    };
    (handle, notify_rx)
}

async fn run<P, T>(
    mut sequencer: Sequencer<P, T>,
    mut signals: mpsc::UnboundedReceiver<Signal>,
    mut shutdown: oneshot::Receiver<()>,
    notifications: mpsc::UnboundedSender<Notification<P, T>>,
) where
    P: Phase,
    T: Clone + Send + 'static,
{
    let origin = Instant::now();
    if !forward(&notifications, sequencer.start()) {
        sequencer.teardown();
        return;
    }

    while sequencer.is_running() {
        let deadline = sequencer.next_deadline().map(|due| origin + due);

        let batch = tokio::select! {
            biased;
            _ = &mut shutdown => {
                sequencer.teardown();
                return;
            }
            received = signals.recv() => match received {
                Some(signal) => {
                    let mut batch = sequencer.advance_to(origin.elapsed());
                    batch.extend(sequencer.signal(signal));
                    batch
                }
                None => {
                    sequencer.teardown();
                    return;
                }
            },
            () = sleep_until(deadline) => sequencer.advance_to(origin.elapsed()),
        };

        if !forward(&notifications, batch) {
            debug!("notification receiver dropped");
            sequencer.teardown();
            return;
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn forward<P, T>(
    notifications: &mpsc::UnboundedSender<Notification<P, T>>,
    batch: Vec<Notification<P, T>>,
) -> bool {
    batch.into_iter().all(|n| notifications.send(n).is_ok())
}
