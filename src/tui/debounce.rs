use std::time::{Duration, Instant};

/// Holds the latest input until it has been quiet for `window`.
///
/// Every `push` replaces the pending value and restarts the window, so
/// only the last input of a burst is ever released.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Releases the pending value once the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.window => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Releases the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn test_nothing_before_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.push("p", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(start + WINDOW), Some("p"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + WINDOW * 2), None);
    }

    #[test]
    fn test_only_last_input_in_burst_fires() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        let mut fired = Vec::new();

        for (i, text) in ["p", "pi", "pik"].into_iter().enumerate() {
            let at = start + Duration::from_millis(100 * i as u64);
            debouncer.push(text, at);
            fired.extend(debouncer.poll(at + Duration::from_millis(50)));
        }

        // 300ms after the first push, but only 100ms after the last one.
        fired.extend(debouncer.poll(start + Duration::from_millis(300)));
        assert!(fired.is_empty());

        fired.extend(debouncer.poll(start + Duration::from_millis(500)));
        assert_eq!(fired, vec!["pik"]);
    }

    #[test]
    fn test_flush_and_cancel() {
        let now = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);

        debouncer.push(1, now);
        assert_eq!(debouncer.flush(), Some(1));
        assert_eq!(debouncer.flush(), None);

        debouncer.push(2, now);
        debouncer.cancel();
        assert_eq!(debouncer.poll(now + WINDOW), None);
    }
}
