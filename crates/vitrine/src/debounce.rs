use std::time::{Duration, Instant};

/// Holds back a rapidly-changing value until it has been stable for a
/// fixed quiet period
///
/// Each update replaces the pending value and re-arms the deadline, so
/// only the latest value ever settles. The browse loop drives this from
/// `tokio::select!`; the debouncer itself only does deadline arithmetic on
/// the `Instant`s it is handed, which keeps it testable without a runtime.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record a new value observed at `now`, replacing any pending one.
    pub fn update(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// Deadline at which the pending value (if any) becomes stable.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the pending value if its quiet period has elapsed at `now`.
    pub fn take_settled(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    #[test]
    fn test_debouncer_starts_empty() {
        let mut debouncer: Debouncer<String> = Debouncer::new(QUIET);
        let now = Instant::now();

        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.take_settled(now), None);
    }

    #[test]
    fn test_debouncer_holds_value_during_quiet_period() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.update("nike", start);

        assert_eq!(debouncer.take_settled(start), None);
        assert_eq!(debouncer.take_settled(start + QUIET / 2), None);
        assert_eq!(debouncer.deadline(), Some(start + QUIET));
    }

    #[test]
    fn test_debouncer_releases_value_after_quiet_period() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.update("nike", start);

        assert_eq!(debouncer.take_settled(start + QUIET), Some("nike"));
        // Released exactly once.
        assert_eq!(debouncer.take_settled(start + QUIET * 2), None);
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn test_debouncer_update_rearms_deadline() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.update("ni", start);
        debouncer.update("nike", start + QUIET / 2);

        // The first deadline has passed, but the re-armed one has not.
        assert_eq!(debouncer.take_settled(start + QUIET), None);
        assert_eq!(
            debouncer.take_settled(start + QUIET / 2 + QUIET),
            Some("nike")
        );
    }

    #[test]
    fn test_debouncer_keeps_only_latest_value() {
        let mut debouncer = Debouncer::new(QUIET);
        let start = Instant::now();

        debouncer.update("n", start);
        debouncer.update("ni", start);
        debouncer.update("nik", start);

        assert_eq!(debouncer.take_settled(start + QUIET), Some("nik"));
    }

    #[test]
    fn test_debouncer_zero_quiet_period_settles_immediately() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        let start = Instant::now();

        debouncer.update("nike", start);

        assert_eq!(debouncer.take_settled(start), Some("nike"));
    }
}
