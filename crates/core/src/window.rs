use crate::sample::{Sample, SensorField};
use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Fixed-capacity, drop-oldest buffer of recent samples driving the charts.
///
/// Holding whole [`Sample`]s keeps the timestamp and the three value
/// sequences in lock-step: evicting the oldest entry drops index 0 of all
/// four logical series at once, so they can never desynchronize.
///
/// Single writer (the update loop), any number of readers (the views).
#[derive(Debug, Clone)]
pub struct SeriesWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl SeriesWindow {
    /// Create an empty window holding at most `capacity` samples (min 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest if at capacity.
    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// The most recently appended sample, or `None` before the first poll
    /// succeeds ("no data yet" — presentation shows a loading state).
    #[must_use]
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Samples in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// One channel's values in insertion order, oldest first.
    pub fn values(&self, field: SensorField) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(move |s| s.value(field))
    }

    /// Timestamps in insertion order, oldest first.
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Local>> + '_ {
        self.samples.iter().map(|s| s.timestamp)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Resize the window (config reload). Shrinking evicts the oldest
    /// samples so the most recent ones survive.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }
}

impl Default for SeriesWindow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl SeriesWindow {
    /// Default chart depth: 30 samples, i.e. 30 s at the 1 Hz poll cadence.
    pub const DEFAULT_CAPACITY: usize = 30;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(secs: i64, rpm: f64) -> Sample {
        Sample {
            timestamp: Local.timestamp_opt(secs, 0).unwrap(),
            rpm,
            temperature: 25.5,
            current: 1.2,
        }
    }

    #[test]
    fn empty_window_has_no_latest() {
        let w = SeriesWindow::new(30);
        assert!(w.latest().is_none());
        assert!(w.is_empty());
    }

    #[test]
    fn first_push_is_latest_and_window_of_one() {
        let mut w = SeriesWindow::new(30);
        w.push(sample(1, 100.0));

        assert_eq!(w.len(), 1);
        let latest = w.latest().expect("one sample");
        assert_eq!(latest.rpm, 100.0);
        assert_eq!(latest.temperature, 25.5);
        assert_eq!(latest.current, 1.2);
    }

    #[test]
    fn keeps_insertion_order_below_capacity() {
        let mut w = SeriesWindow::new(30);
        for i in 0..10 {
            w.push(sample(i, i as f64));
        }

        assert_eq!(w.len(), 10);
        let rpm: Vec<f64> = w.values(SensorField::Rpm).collect();
        assert_eq!(rpm, (0..10).map(f64::from).collect::<Vec<_>>());
        assert_eq!(w.latest().unwrap().rpm, 9.0);
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let mut w = SeriesWindow::new(30);
        for i in 0..45 {
            w.push(sample(i, i as f64));
            // All four logical series advance together on every push.
            assert_eq!(w.timestamps().count(), w.len());
            assert!(w.len() <= 30);
        }

        assert_eq!(w.len(), 30);
        let rpm: Vec<f64> = w.values(SensorField::Rpm).collect();
        assert_eq!(rpm, (15..45).map(f64::from).collect::<Vec<_>>());
    }

    #[test]
    fn capacity_three_drops_head() {
        let mut w = SeriesWindow::new(3);
        for rpm in [10.0, 20.0, 30.0, 40.0] {
            w.push(sample(rpm as i64, rpm));
        }

        let rpm: Vec<f64> = w.values(SensorField::Rpm).collect();
        assert_eq!(rpm, vec![20.0, 30.0, 40.0]);
    }

    #[test]
    fn shrinking_capacity_keeps_newest() {
        let mut w = SeriesWindow::new(10);
        for i in 0..10 {
            w.push(sample(i, i as f64));
        }

        w.set_capacity(4);
        assert_eq!(w.capacity(), 4);
        let rpm: Vec<f64> = w.values(SensorField::Rpm).collect();
        assert_eq!(rpm, vec![6.0, 7.0, 8.0, 9.0]);

        // Further pushes respect the new bound.
        w.push(sample(10, 10.0));
        assert_eq!(w.len(), 4);
        assert_eq!(w.latest().unwrap().rpm, 10.0);
    }

    #[test]
    fn zero_capacity_clamps_to_one() {
        let mut w = SeriesWindow::new(0);
        w.push(sample(1, 1.0));
        w.push(sample(2, 2.0));
        assert_eq!(w.len(), 1);
        assert_eq!(w.latest().unwrap().rpm, 2.0);
    }
}
