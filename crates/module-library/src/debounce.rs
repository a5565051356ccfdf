//! Burst coalescing for change notifications.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Quiet window before a burst of events collapses into one callback.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Callback invoked once per coalesced burst.
pub type ChangeCallback = Box<dyn Fn() + Send + Sync + 'static>;

/// Cheap handle for feeding events into a [`Debouncer`] from any thread.
#[derive(Debug, Clone)]
pub struct DebounceHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl DebounceHandle {
    pub fn feed(&self) {
        let _ = self.tx.send(());
    }
}

/// Coalesces bursts of events into exactly one callback per quiet period.
///
/// Owns its own timer state: the first event opens a burst, every further
/// event extends it, and the callback fires once when a full quiet window
/// passes with nothing new. Events may be real filesystem notifications
/// or synthetic `feed()` calls, which is what the unit tests use.
///
/// Must be created within a tokio runtime.
pub struct Debouncer {
    tx: mpsc::UnboundedSender<()>,
    cancel: CancellationToken,
}

impl Debouncer {
    pub fn new(window: Duration, on_change: ChangeCallback) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            loop {
                // Wait for the first event of a burst.
                tokio::select! {
                    _ = task_cancel.cancelled() => return,
                    event = rx.recv() => {
                        if event.is_none() {
                            return;
                        }
                    }
                }
                // Extend the burst until a full quiet window passes.
                loop {
                    tokio::select! {
                        _ = task_cancel.cancelled() => return,
                        event = rx.recv() => {
                            if event.is_none() {
                                return;
                            }
                        }
                        _ = tokio::time::sleep(window) => {
                            on_change();
                            break;
                        }
                    }
                }
            }
        });

        Self { tx, cancel }
    }

    /// Feeds one event into the current burst (opening one if idle).
    pub fn feed(&self) {
        let _ = self.tx.send(());
    }

    /// A cloneable feeder usable from non-async callers.
    pub fn handle(&self) -> DebounceHandle {
        DebounceHandle {
            tx: self.tx.clone(),
        }
    }

    /// Stops the background task; pending bursts are discarded.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
