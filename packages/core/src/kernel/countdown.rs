//! Per-second countdown driving the resend cooldown.
//!
//! The timer runs as a task on the current runtime and posts ticks into the
//! owner's event queue. Each timer carries the generation of the session
//! state it was started for, so a tick already queued when the owner resets
//! or discards the session can be recognised and ignored.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// One elapsed second of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTick {
    pub generation: u64,
}

/// Handle to a running countdown. Cancelled on drop.
#[derive(Debug)]
pub struct CountdownTimer {
    cancel: CancellationToken,
}

impl CountdownTimer {
    /// Start posting `ticks` ticks, one per `period`, the first one after a
    /// full period has elapsed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        generation: u64,
        ticks: u32,
        period: Duration,
        sink: UnboundedSender<CountdownTick>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            for _ in 0..ticks {
                tokio::select! {
                    _ = token.cancelled() => {
                        trace!(generation, "countdown cancelled");
                        return;
                    }
                    _ = interval.tick() => {
                        if sink.send(CountdownTick { generation }).is_err() {
                            // Receiver gone: the owning view was torn down
                            return;
                        }
                    }
                }
            }
            trace!(generation, "countdown finished");
        });

        Self { cancel }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
