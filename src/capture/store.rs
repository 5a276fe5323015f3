//! Bounded, newest-first log of captures.

use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Local};

use crate::capture::entry::{CaptureDraft, CaptureEntry};
use crate::observability::metrics;

/// Retention used when none is configured.
pub const DEFAULT_MAX_LOGS: usize = 50;

struct Inner {
    /// Newest entry at the front.
    entries: VecDeque<CaptureEntry>,
    /// Id handed out most recently; never reset by `clear`.
    last_id: i64,
}

/// A thread-safe, capacity-bounded log of capture entries.
///
/// Writers (`record`, `clear`) take the lock exclusively; snapshots
/// share it. Callers only ever receive copies of the entries.
pub struct LogStore {
    inner: RwLock<Inner>,
    max_logs: usize,
}

impl LogStore {
    /// Create an empty store keeping at most `max_logs` entries.
    ///
    /// A zero capacity is raised to one.
    pub fn new(max_logs: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: VecDeque::with_capacity(max_logs.max(1)),
                last_id: 0,
            }),
            max_logs: max_logs.max(1),
        }
    }

    /// Maximum number of retained entries.
    pub fn max_logs(&self) -> usize {
        self.max_logs
    }

    /// Prepend a pre-stamped `entry`, dropping the oldest entries beyond
    /// `max_logs`. Production code goes through `record`, which owns id order.
    #[cfg(test)]
    fn insert(&self, entry: CaptureEntry) {
        let mut inner = self.write();
        inner.last_id = inner.last_id.max(entry.id());
        self.push_front(&mut inner, entry);
    }

    /// Stamp `draft` with a fresh id and the current time, then insert it.
    ///
    /// The id is derived from the wall clock in nanoseconds and bumped past the
    /// previous one when the clock has not moved, so ids are unique and
    /// strictly increasing in insertion order.
    pub fn record(&self, draft: CaptureDraft) -> CaptureEntry {
        self.record_at(Local::now(), draft)
    }

    fn record_at(&self, now: DateTime<Local>, draft: CaptureDraft) -> CaptureEntry {
        let mut inner = self.write();
        let clock = now.timestamp_nanos_opt().unwrap_or(i64::MAX);
        let id = clock.max(inner.last_id.saturating_add(1));
        inner.last_id = id;

        let entry = CaptureEntry::new(id, now, draft);
        self.push_front(&mut inner, entry.clone());
        entry
    }

    /// Independent copy of the current entries, newest first.
    pub fn snapshot(&self) -> Vec<CaptureEntry> {
        self.read().entries.iter().cloned().collect()
    }

    /// Copy of the entry with the given id, if still retained.
    pub fn get(&self, id: i64) -> Option<CaptureEntry> {
        self.read().entries.iter().find(|e| e.id() == id).cloned()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut inner = self.write();
        let dropped = inner.entries.len();
        inner.entries.clear();
        metrics::record_clear();
        metrics::record_log_entries(0);
        tracing::debug!(dropped, "Log store cleared");
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    fn push_front(&self, inner: &mut Inner, entry: CaptureEntry) {
        inner.entries.push_front(entry);
        if inner.entries.len() > self.max_logs {
            let evicted = inner.entries.len() - self.max_logs;
            inner.entries.truncate(self.max_logs);
            metrics::record_evictions(evicted);
        }
        metrics::record_log_entries(inner.entries.len());
    }

    // Every mutation is a single push/truncate/clear, so a panic elsewhere
    // cannot leave the deque half-updated; recover from poisoning.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn draft(n: usize) -> CaptureDraft {
        CaptureDraft {
            source_ip: format!("10.0.0.{}", n),
            raw_request: format!("GET /log?n={} HTTP/1.1\r\n\r\n", n),
            raw_response: "HTTP/1.1 200 OK\r\n\r\nLogged".to_string(),
        }
    }

    #[test]
    fn keeps_most_recent_entries_newest_first() {
        let store = LogStore::new(3);
        for n in 0..7 {
            store.record(draft(n));
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 3);
        let ips: Vec<_> = snapshot.iter().map(|e| e.source_ip()).collect();
        assert_eq!(ips, vec!["10.0.0.6", "10.0.0.5", "10.0.0.4"]);
    }

    #[test]
    fn ids_strictly_increase_even_with_a_frozen_clock() {
        let store = LogStore::new(10);
        let now = Local::now();
        let first = store.record_at(now, draft(1));
        let second = store.record_at(now, draft(2));
        let third = store.record_at(now, draft(3));

        assert!(first.id() < second.id());
        assert!(second.id() < third.id());
    }

    #[test]
    fn ids_survive_clear() {
        let store = LogStore::new(10);
        let now = Local::now();
        let before = store.record_at(now, draft(1));
        store.clear();
        let after = store.record_at(now, draft(2));
        assert!(after.id() > before.id());
    }

    #[test]
    fn snapshot_is_detached_from_live_state() {
        let store = LogStore::new(5);
        store.record(draft(1));
        let before = store.snapshot();

        store.record(draft(2));
        assert_eq!(before.len(), 1);
        assert_eq!(store.snapshot().len(), 2);

        store.clear();
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].source_ip(), "10.0.0.1");
    }

    #[test]
    fn clear_then_snapshot_is_empty() {
        let store = LogStore::new(5);
        assert!(store.snapshot().is_empty());
        store.clear();
        assert!(store.snapshot().is_empty());

        for n in 0..5 {
            store.record(draft(n));
        }
        store.clear();
        assert!(store.snapshot().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn insert_truncates_from_the_tail() {
        let store = LogStore::new(2);
        let now = Local::now();
        for n in 1..=3 {
            store.insert(CaptureEntry::new(n as i64, now, draft(n)));
        }
        let ids: Vec<_> = store.snapshot().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn record_continues_past_inserted_ids() {
        let store = LogStore::new(5);
        store.insert(CaptureEntry::new(i64::MAX - 1, Local::now(), draft(1)));
        let next = store.record(draft(2));
        assert_eq!(next.id(), i64::MAX);
    }

    #[test]
    fn get_finds_retained_entries_only() {
        let store = LogStore::new(1);
        let old = store.record(draft(1));
        let new = store.record(draft(2));

        assert!(store.get(old.id()).is_none());
        assert_eq!(store.get(new.id()), Some(new));
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let store = LogStore::new(0);
        store.record(draft(1));
        store.record(draft(2));
        assert_eq!(store.max_logs(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn concurrent_writers_respect_bound_and_order() {
        let store = Arc::new(LogStore::new(50));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for n in 0..100 {
                        store.record(draft(t * 100 + n));
                        let _ = store.snapshot();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 50);
        assert!(snapshot.windows(2).all(|w| w[0].id() > w[1].id()));
    }
}
