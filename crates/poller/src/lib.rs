pub mod parse;
pub mod source;

pub use parse::parse_sample;
pub use source::{HttpSource, SampleSource, ScriptedSource};

use dash_core::Sample;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

/// One poll tick's outcome, forwarded to the UI loop.
///
/// Failures carry the reason so the display can flag staleness; the window
/// itself is never touched by a failure.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    Sample(Sample),
    Failed(String),
}

/// Handle to a running poll task.
///
/// Polling also stops when the outcome receiver is dropped, which is how
/// tearing down the dashboard cancels it implicitly.
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Cancel the poll task. Safe to call any number of times; once it
    /// returns, no further fetch is started. An in-flight fetch is not
    /// waited on — its result is discarded with the channel.
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn a background Tokio task that fetches a sample from `source` every
/// `interval_ms` milliseconds and forwards each tick's [`PollOutcome`]
/// through the returned channel.
///
/// The cadence is constant: a failed fetch just waits for the next tick
/// (no backoff, never halts), and a fetch slower than the interval skips
/// the ticks it missed instead of bursting to catch up.
pub fn spawn<S: SampleSource>(
    mut source: S,
    interval_ms: u64,
) -> (PollerHandle, mpsc::Receiver<PollOutcome>) {
    let (tx, rx) = mpsc::channel(4);
    let interval = Duration::from_millis(interval_ms.max(1));

    let task = tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let outcome = match source.fetch().await {
                Ok(sample) => {
                    debug!(rpm = sample.rpm, "sample received");
                    PollOutcome::Sample(sample)
                }
                Err(e) => {
                    warn!("poll failed: {e}");
                    PollOutcome::Failed(e.to_string())
                }
            };

            if tx.send(outcome).await.is_err() {
                break; // all receivers dropped
            }
        }
    });

    (PollerHandle { task }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use dash_core::{AppState, DashError};

    fn sample(rpm: f64) -> Sample {
        Sample {
            timestamp: Local.timestamp_opt(1, 0).unwrap(),
            rpm,
            temperature: 25.5,
            current: 1.2,
        }
    }

    #[tokio::test]
    async fn delivers_samples_in_script_order() {
        let script = ScriptedSource::new([Ok(sample(1.0)), Ok(sample(2.0)), Ok(sample(3.0))]);
        let (handle, mut rx) = spawn(script, 1);

        let mut rpms = Vec::new();
        for _ in 0..3 {
            match rx.recv().await.expect("poller alive") {
                PollOutcome::Sample(s) => rpms.push(s.rpm),
                PollOutcome::Failed(e) => panic!("unexpected failure: {e}"),
            }
        }

        assert_eq!(rpms, vec![1.0, 2.0, 3.0]);
        handle.stop();
    }

    #[tokio::test]
    async fn failures_do_not_halt_polling() {
        let script = ScriptedSource::new([
            Err(DashError::Poll("connection refused".into())),
            Err(DashError::Parse("malformed payload".into())),
            Ok(sample(50.0)),
        ]);
        let (handle, mut rx) = spawn(script, 1);

        let mut state = AppState::default();
        for _ in 0..3 {
            match rx.recv().await.expect("poller alive") {
                PollOutcome::Sample(s) => state.record_sample(s),
                PollOutcome::Failed(_) => state.record_failure(),
            }
        }

        // Two failed ticks were no-ops; the window grew by exactly one.
        assert_eq!(state.window.len(), 1);
        assert_eq!(state.window.latest().unwrap().rpm, 50.0);
        handle.stop();
    }

    #[tokio::test]
    async fn stop_is_idempotent_and_ends_the_task() {
        let script = ScriptedSource::new([Ok(sample(1.0))]);
        let (handle, mut rx) = spawn(script, 1);

        let _ = rx.recv().await;
        handle.stop();
        handle.stop();

        // Drain anything already buffered; the channel then closes because
        // the aborted task dropped its sender.
        while rx.recv().await.is_some() {}
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn dropping_the_receiver_stops_the_task() {
        let script = ScriptedSource::new([Ok(sample(1.0)), Ok(sample(2.0)), Ok(sample(3.0))]);
        let (handle, rx) = spawn(script, 1);
        drop(rx);

        // The task exits on its next send; poll until it notices.
        for _ in 0..50 {
            if handle.is_finished() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("poll task kept running after receiver drop");
    }
}
