use std::collections::VecDeque;

/// Bounded FIFO of duration samples in milliseconds.
///
/// Newest at the tail; pushing past capacity evicts the oldest sample, so
/// the window always holds the most recent `capacity` durations.
#[derive(Clone, Debug)]
pub(crate) struct SampleWindow {
    capacity: usize,
    samples:  VecDeque<f64>,
}

impl SampleWindow {
    pub(crate) fn new(capacity: usize) -> Self {
        Self { capacity, samples: VecDeque::with_capacity(capacity) }
    }

    pub(crate) fn push(&mut self, sample_ms: f64) {
        if self.samples.len() >= self.capacity {
            let _evicted = self.samples.pop_front();
        }
        self.samples.push_back(sample_ms);
    }

    pub(crate) fn len(&self) -> usize {
        self.samples.len()
    }

    pub(crate) fn last(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Arithmetic mean over the window, `0.0` when empty.
    pub(crate) fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
        {
            self.samples.iter().sum::<f64>() / self.samples.len() as f64
        }
    }

    /// Number of samples strictly above `threshold_ms`.
    pub(crate) fn count_over(&self, threshold_ms: f64) -> usize {
        self.samples.iter().filter(|&&sample| sample > threshold_ms).count()
    }

    pub(crate) fn clear(&mut self) {
        self.samples.clear();
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_appends_at_the_tail() {
        let mut window = SampleWindow::new(4);
        window.push(1.0);
        window.push(2.0);
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![1.0, 2.0]);
        assert_eq!(window.last(), Some(2.0));
    }

    #[test]
    fn push_past_capacity_evicts_the_oldest() {
        let mut window = SampleWindow::new(2);
        window.push(1.0);
        window.push(2.0);
        window.push(3.0);
        assert_eq!(window.len(), 2);
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![2.0, 3.0]);
    }

    #[test]
    fn mean_of_empty_window_is_zero() {
        let window = SampleWindow::new(3);
        assert_eq!(window.mean(), 0.0);
        assert_eq!(window.last(), None);
    }

    #[test]
    fn mean_covers_only_retained_samples() {
        let mut window = SampleWindow::new(2);
        window.push(10.0);
        window.push(20.0);
        window.push(30.0);
        assert_eq!(window.mean(), 25.0);
    }

    #[test]
    fn count_over_is_strict() {
        let mut window = SampleWindow::new(4);
        window.push(15.0);
        window.push(16.0);
        window.push(16.5);
        window.push(30.0);
        assert_eq!(window.count_over(16.0), 2);
    }

    #[test]
    fn clear_empties_the_window() {
        let mut window = SampleWindow::new(3);
        window.push(5.0);
        window.clear();
        assert_eq!(window.len(), 0);
        assert_eq!(window.mean(), 0.0);
    }
}
