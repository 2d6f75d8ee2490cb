/// Identity of one issued lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Monotonic lookup counter. A response may be applied only while its id is
/// still the latest one issued.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
    in_flight: bool,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new lookup, superseding every earlier one
    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        self.in_flight = true;
        RequestId(self.latest)
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        id.0 == self.latest
    }

    /// Mark `id` finished. Returns false (and changes nothing) for stale ids.
    pub fn complete(&mut self, id: RequestId) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Make every issued lookup stale without starting a new one
    pub fn invalidate(&mut self) {
        self.latest += 1;
        self.in_flight = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let mut seq = RequestSequence::new();
        let a = seq.issue();
        let b = seq.issue();

        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));
        assert!(!seq.complete(a));
        assert!(seq.in_flight());
        assert!(seq.complete(b));
        assert!(!seq.in_flight());
    }

    #[test]
    fn invalidate_drops_in_flight_request() {
        let mut seq = RequestSequence::new();
        let a = seq.issue();
        seq.invalidate();

        assert!(!seq.in_flight());
        assert!(!seq.complete(a));
    }
}
