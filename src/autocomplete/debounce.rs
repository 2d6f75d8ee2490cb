use std::time::Duration;

/// Handle to one scheduled debounce timer.
///
/// The host sleeps for [`TimerHandle::delay`] and then hands the handle back
/// through [`Debouncer::fire`]. Handles are cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    id: u64,
    delay: Duration,
}

impl TimerHandle {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Single-slot cancelable timer: scheduling always replaces the pending timer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    next_id: u64,
    pending: Option<u64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_id: 0,
            pending: None,
        }
    }

    /// Schedule a new timer, canceling whichever one was pending
    pub fn schedule(&mut self) -> TimerHandle {
        self.next_id += 1;
        self.pending = Some(self.next_id);
        TimerHandle {
            id: self.next_id,
            delay: self.delay,
        }
    }

    /// Cancel `handle` if it is still pending. No-op for fired or replaced handles.
    pub fn cancel(&mut self, handle: TimerHandle) {
        if self.pending == Some(handle.id) {
            self.pending = None;
        }
    }

    /// Cancel whatever is pending. Idempotent.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Consume an elapsed timer. Returns true only for the live handle.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle.id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> Debouncer {
        Debouncer::new(Duration::from_millis(300))
    }

    #[test]
    fn only_latest_handle_fires() {
        let mut d = debouncer();
        let first = d.schedule();
        let second = d.schedule();
        let third = d.schedule();

        assert!(!d.fire(first));
        assert!(!d.fire(second));
        assert!(d.fire(third));
        assert!(!d.is_pending());
    }

    #[test]
    fn handle_fires_at_most_once() {
        let mut d = debouncer();
        let handle = d.schedule();
        assert!(d.fire(handle));
        assert!(!d.fire(handle));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut d = debouncer();
        let handle = d.schedule();
        d.cancel(handle);
        d.cancel(handle);
        d.cancel_pending();
        assert!(!d.fire(handle));
    }

    #[test]
    fn canceling_a_stale_handle_keeps_the_live_one() {
        let mut d = debouncer();
        let old = d.schedule();
        let live = d.schedule();
        d.cancel(old);
        assert!(d.is_pending());
        assert!(d.fire(live));
    }

    #[test]
    fn cancel_after_fire_is_safe() {
        let mut d = debouncer();
        let handle = d.schedule();
        assert!(d.fire(handle));
        d.cancel(handle);
        assert!(!d.is_pending());
    }

    #[test]
    fn handles_carry_configured_delay() {
        let mut d = debouncer();
        assert_eq!(d.schedule().delay(), Duration::from_millis(300));
    }
}
