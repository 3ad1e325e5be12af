//! Extraction cursor: the last timestamp through which offers were
//! retrieved "on the record".
//!
//! A single process-wide value with a forward-only lifecycle: absent until
//! the first recorded fetch, then advanced to each recorded fetch's start
//! time. Off-record reads never move it, so the same incremental window can
//! be re-polled any number of times.

use std::sync::atomic::{AtomicI64, Ordering};

/// Sentinel for "no recorded extraction yet". The provider's timestamps are
/// UNIX epoch seconds, so 0 is safely out of band.
const UNSET: i64 = 0;

#[derive(Debug)]
pub struct ExtractionCursor(AtomicI64);

impl ExtractionCursor {
    pub fn new() -> Self {
        Self(AtomicI64::new(UNSET))
    }

    /// Effective "since" timestamp for a fetch: an explicit caller-supplied
    /// value wins, otherwise the stored cursor. `None` means "all active
    /// offers". Never mutates the stored value.
    pub fn resolve(&self, explicit: Option<i64>) -> Option<i64> {
        explicit.or_else(|| self.value())
    }

    /// Current stored cursor, if any recorded fetch has completed.
    pub fn value(&self) -> Option<i64> {
        let v = self.0.load(Ordering::SeqCst);
        (v != UNSET).then_some(v)
    }

    /// Record a successful fetch that started at `fetch_started_at`.
    ///
    /// No-op when `off_record` is set. The update is a compare-and-set loop
    /// so the cursor only ever moves forward, even if recorded fetches race.
    /// Using the fetch start time (not completion time) avoids missing
    /// offers updated mid-fetch.
    pub fn advance(&self, fetch_started_at: i64, off_record: bool) {
        if off_record {
            return;
        }
        let mut current = self.0.load(Ordering::SeqCst);
        while fetch_started_at > current {
            match self
                .0
                .compare_exchange(current, fetch_started_at, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }
}

impl Default for ExtractionCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_absent() {
        let cursor = ExtractionCursor::new();
        assert_eq!(cursor.value(), None);
        assert_eq!(cursor.resolve(None), None);
    }

    #[test]
    fn explicit_timestamp_wins_without_touching_state() {
        let cursor = ExtractionCursor::new();
        cursor.advance(100, false);
        assert_eq!(cursor.resolve(Some(50)), Some(50));
        assert_eq!(cursor.value(), Some(100));
    }

    #[test]
    fn advance_sets_fetch_start_time() {
        let cursor = ExtractionCursor::new();
        cursor.advance(1_700_000_000, false);
        assert_eq!(cursor.value(), Some(1_700_000_000));
        assert_eq!(cursor.resolve(None), Some(1_700_000_000));
    }

    #[test]
    fn off_record_is_idempotent() {
        let cursor = ExtractionCursor::new();
        cursor.advance(1_700_000_000, true);
        cursor.advance(1_700_000_500, true);
        assert_eq!(cursor.value(), None);

        cursor.advance(1_700_000_000, false);
        cursor.advance(1_700_000_500, true);
        assert_eq!(cursor.value(), Some(1_700_000_000));
    }

    #[test]
    fn never_moves_backward() {
        let cursor = ExtractionCursor::new();
        cursor.advance(200, false);
        cursor.advance(150, false);
        assert_eq!(cursor.value(), Some(200));
    }

    #[test]
    fn concurrent_advances_keep_maximum() {
        use std::sync::Arc;

        let cursor = Arc::new(ExtractionCursor::new());
        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let cursor = Arc::clone(&cursor);
                std::thread::spawn(move || cursor.advance(1_000 + i, false))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cursor.value(), Some(1_008));
    }
}
