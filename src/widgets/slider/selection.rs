//! Range selection endpoints.
//!
//! Endpoints are appended; a pair is complete when the count is even. A third
//! endpoint starts a new pair, so only the last two ever matter.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    endpoints: Vec<i64>,
}

/// Result of finishing a selection pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Both endpoints equal; the selection was cleared.
    Cleared,
    /// Two distinct endpoints, in the order they were given.
    Active(i64, i64),
}

impl Selection {
    pub fn clear(&mut self) {
        self.endpoints.clear();
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Even endpoint count: no pair is being built.
    pub fn is_even(&self) -> bool {
        self.endpoints.len() % 2 == 0
    }

    pub fn last(&self) -> Option<i64> {
        self.endpoints.last().copied()
    }

    pub fn start(&mut self, val: i64) {
        self.endpoints.push(val);
    }

    /// Append the closing endpoint.
    ///
    /// With `update_last` and a complete pair present, the pair's second
    /// endpoint is replaced instead (redefining the end while dragging).
    pub fn end(&mut self, val: i64, update_last: bool) -> SelectionOutcome {
        if update_last && self.is_even() {
            self.endpoints.pop();
        }
        self.endpoints.push(val);

        let n = self.endpoints.len();
        if n < 2 {
            // single endpoint: nothing to pair with
            return SelectionOutcome::Cleared;
        }
        let (a, b) = (self.endpoints[n - 2], self.endpoints[n - 1]);
        if a == b {
            self.clear();
            SelectionOutcome::Cleared
        } else {
            SelectionOutcome::Active(a, b)
        }
    }

    /// Normalized `(start, end)`; `(0, 0)` unless a complete pair exists.
    pub fn get(&self) -> (i64, i64) {
        let n = self.endpoints.len();
        let (a, b) = if n > 0 && n % 2 == 0 {
            (self.endpoints[n - 2], self.endpoints[n - 1])
        } else {
            (0, 0)
        };
        (a.min(b), a.max(b))
    }

    pub fn has_selection(&self) -> bool {
        let (a, b) = self.get();
        a < b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: set in either order normalizes to (low, high)
    #[test]
    fn test_order_independent() {
        let mut s = Selection::default();
        s.start(5);
        s.end(10, true);
        assert_eq!(s.get(), (5, 10));

        let mut s = Selection::default();
        s.start(10);
        s.end(5, true);
        assert_eq!(s.get(), (5, 10));
        assert!(s.has_selection());
    }

    /// Test: update_last replaces the second endpoint instead of appending
    #[test]
    fn test_update_last_replaces() {
        let mut s = Selection::default();
        s.start(3);
        assert_eq!(s.end(8, true), SelectionOutcome::Active(3, 8));
        assert_eq!(s.len(), 2);

        assert_eq!(s.end(12, true), SelectionOutcome::Active(3, 12));
        assert_eq!(s.len(), 2);
        assert_eq!(s.end(1, true), SelectionOutcome::Active(3, 1));
        assert_eq!(s.get(), (1, 3));
    }

    #[test]
    fn test_equal_endpoints_clear() {
        let mut s = Selection::default();
        s.start(4);
        assert_eq!(s.end(4, false), SelectionOutcome::Cleared);
        assert!(s.is_empty());
        assert_eq!(s.get(), (0, 0));
        assert!(!s.has_selection());
    }

    /// Test: pending single endpoint reads as empty
    #[test]
    fn test_pending_is_empty() {
        let mut s = Selection::default();
        s.start(4);
        assert!(!s.is_even());
        assert_eq!(s.get(), (0, 0));
    }

    /// Test: a third endpoint begins a new pair
    #[test]
    fn test_new_pair() {
        let mut s = Selection::default();
        s.start(1);
        s.end(5, false);
        s.start(20);
        assert_eq!(s.get(), (0, 0));
        s.end(30, false);
        assert_eq!(s.get(), (20, 30));
    }
}
