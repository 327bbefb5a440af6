use crate::sample::Sample;
use crate::window::SeriesWindow;

/// Central application state — all widgets read from this snapshot.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Rolling window of recent samples (cards read the tail, charts the whole).
    pub window: SeriesWindow,
    /// Consecutive failed polls since the last good sample. Display stays
    /// stale while this climbs; it resets to zero on every success.
    pub failed_polls: u32,
}

impl AppState {
    /// Apply one successfully fetched sample.
    pub fn record_sample(&mut self, sample: Sample) {
        self.window.push(sample);
        self.failed_polls = 0;
    }

    /// Note a failed poll. The window is untouched — the previous display
    /// state is retained.
    pub fn record_failure(&mut self) {
        self.failed_polls = self.failed_polls.saturating_add(1);
    }

    /// `true` until the first sample arrives (presentation shows "loading").
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.window.is_empty()
    }

    /// `true` when the newest displayed data predates at least one failure.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.failed_polls > 0 && !self.window.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Local;

    fn sample(rpm: f64) -> Sample {
        Sample {
            timestamp: Local.timestamp_opt(0, 0).unwrap(),
            rpm,
            temperature: 0.0,
            current: 0.0,
        }
    }

    #[test]
    fn loading_until_first_sample() {
        let mut state = AppState::default();
        assert!(state.is_loading());

        state.record_sample(sample(100.0));
        assert!(!state.is_loading());
    }

    #[test]
    fn failures_then_success_grow_window_by_one() {
        let mut state = AppState::default();
        state.record_sample(sample(10.0));
        let before = state.window.len();

        state.record_failure();
        state.record_failure();
        assert_eq!(state.window.len(), before);
        assert!(state.is_stale());

        state.record_sample(sample(50.0));
        assert_eq!(state.window.len(), before + 1);
        assert_eq!(state.window.latest().unwrap().rpm, 50.0);
        assert!(!state.is_stale());
    }
}
