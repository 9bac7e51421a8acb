//! Single-threaded timer queue.
//!
//! Timers fire in due-time order, ties in scheduling order. Every timer is
//! stamped with the generation it was scheduled in; [`Scheduler::invalidate`]
//! bumps the generation so anything still queued from before is dropped
//! instead of delivered.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    /// When the timer was due.
    pub due_ms: u64,
    /// Scheduled payload.
    pub event: T,
}

#[derive(Debug)]
struct Entry<T> {
    due_ms: u64,
    seq: u64,
    generation: u64,
    event: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

/// Timer queue keyed by game-clock milliseconds.
#[derive(Debug)]
pub struct Scheduler<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
    generation: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
            generation: 0,
        }
    }
}

impl<T> Scheduler<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Queue `event` to fire at `due_ms` in the current generation.
    pub fn schedule(&mut self, due_ms: u64, event: T) {
        let entry = Entry {
            due_ms,
            seq: self.next_seq,
            generation: self.generation,
            event,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(entry));
    }

    /// Drop every queued timer and start a new generation.
    pub fn invalidate(&mut self) {
        let stale = self.heap.len();
        self.heap.clear();
        self.generation += 1;
        if stale > 0 {
            tracing::trace!(stale, generation = self.generation, "dropped stale timers");
        }
    }

    /// Earliest due time still queued for the current generation.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.heap
            .iter()
            .filter(|Reverse(e)| e.generation == self.generation)
            .map(|Reverse(e)| e.due_ms)
            .min()
    }

    /// Pop the next timer due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired<T>> {
        while let Some(Reverse(head)) = self.heap.peek() {
            if head.due_ms > now_ms {
                return None;
            }
            let Reverse(entry) = self.heap.pop()?;
            if entry.generation == self.generation {
                return Some(Fired {
                    due_ms: entry.due_ms,
                    event: entry.event,
                });
            }
            tracing::trace!(due_ms = entry.due_ms, "skipped timer from old generation");
        }
        None
    }

    /// Number of queued timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut timers = Scheduler::new();
        timers.schedule(300, "c");
        timers.schedule(100, "a");
        timers.schedule(200, "b");

        assert_eq!(timers.next_due(), Some(100));
        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(1_000))
            .map(|f| f.event)
            .collect();
        assert_eq!(fired, vec!["a", "b", "c"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_ties_keep_schedule_order() {
        let mut timers = Scheduler::new();
        for name in ["first", "second", "third"] {
            timers.schedule(50, name);
        }
        assert_eq!(timers.pop_due(50).map(|f| f.event), Some("first"));
        assert_eq!(timers.pop_due(50).map(|f| f.event), Some("second"));
        assert_eq!(timers.pop_due(50).map(|f| f.event), Some("third"));
    }

    #[test]
    fn test_not_yet_due() {
        let mut timers = Scheduler::new();
        timers.schedule(500, ());
        assert_eq!(timers.pop_due(499), None);
        assert_eq!(timers.len(), 1);
        assert_eq!(
            timers.pop_due(500),
            Some(Fired {
                due_ms: 500,
                event: ()
            })
        );
    }

    #[test]
    fn test_invalidate_drops_pending() {
        let mut timers = Scheduler::new();
        timers.schedule(100, 1);
        timers.schedule(200, 2);
        timers.invalidate();
        assert_eq!(timers.generation(), 1);
        assert_eq!(timers.pop_due(u64::MAX), None);

        timers.schedule(150, 3);
        assert_eq!(timers.pop_due(u64::MAX).map(|f| f.event), Some(3));
    }
}
