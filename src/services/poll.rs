use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Cancellable repeating task. Local mode runs one of these to re-read the
/// JSON blobs on a fixed interval, standing in for the remote-mode change
/// subscription. Leaving a poller running past its consumer leaks a task,
/// so it also cancels itself on drop.
pub struct Poller {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn start<F>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => tick(),
                    res = shutdown_rx.changed() => {
                        if res.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}
