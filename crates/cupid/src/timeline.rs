use std::time::Duration;

#[derive(Debug, Clone)]
struct Scheduled<T> {
    at: Duration,
    event: T,
}

/// Deadline-ordered queue of pending events.
///
/// Deadlines are scene time. Events with equal deadlines fire in the order they
/// were scheduled.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    entries: Vec<Scheduled<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Timeline<T> {
    pub fn schedule(&mut self, at: Duration, event: T) {
        let idx = self.entries.partition_point(|e| e.at <= at);
        self.entries.insert(idx, Scheduled { at, event });
    }

    /// Removes and returns every event due at or before `now`, with its deadline.
    pub fn drain_due(&mut self, now: Duration) -> Vec<(Duration, T)> {
        let due = self.entries.partition_point(|e| e.at <= now);
        self.entries.drain(..due).map(|e| (e.at, e.event)).collect()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.entries.retain(|e| keep(&e.event));
    }

    pub fn count(&self, mut pred: impl FnMut(&T) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.event)).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_drains_in_deadline_order() {
        let mut timeline = Timeline::default();
        timeline.schedule(ms(1000), "c");
        timeline.schedule(ms(0), "a");
        timeline.schedule(ms(500), "b");
        timeline.schedule(ms(500), "b2");

        assert_eq!(timeline.drain_due(ms(499)), vec![(ms(0), "a")]);
        assert_eq!(
            timeline.drain_due(ms(500)),
            vec![(ms(500), "b"), (ms(500), "b2")]
        );
        assert_eq!(timeline.len(), 1);
        assert!(timeline.drain_due(ms(999)).is_empty());
        assert_eq!(timeline.drain_due(ms(5000)), vec![(ms(1000), "c")]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_retain_and_count() {
        let mut timeline = Timeline::default();
        for (i, at) in [0, 100, 200, 300].into_iter().enumerate() {
            timeline.schedule(ms(at), i);
        }
        assert_eq!(timeline.count(|&i| i % 2 == 0), 2);
        timeline.retain(|&i| i % 2 == 1);
        assert_eq!(timeline.drain_due(ms(1000)), vec![(ms(100), 1), (ms(300), 3)]);
    }
}
