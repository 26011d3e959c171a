//! Deferred callback queue.
//!
//! Every delayed transition (timer ticks, the watchdog, reveal and return to
//! standby) goes through one [`TimerQueue`]. The runtime pops due entries one
//! at a time on the same loop that handles host input, so callbacks never
//! interleave with each other or with host commands. Entries due at the same
//! instant fire in the order they were pushed.

use std::{cmp::Reverse, collections::BinaryHeap};

use hanoi_core::TimerToken;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Entry<I> {
    due: I,
    seq: u64,
    token: TimerToken,
}

/// Min-queue of timer tokens keyed by due instant.
#[derive(Debug, Clone)]
pub struct TimerQueue<I: Ord> {
    heap: BinaryHeap<Reverse<Entry<I>>>,
    seq: u64,
}

impl<I: Ord> Default for TimerQueue<I> {
    fn default() -> Self {
        Self { heap: BinaryHeap::new(), seq: 0 }
    }
}

impl<I: Copy + Ord> TimerQueue<I> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `token` to fire at `due`.
    pub fn push(&mut self, due: I, token: TimerToken) {
        self.heap.push(Reverse(Entry { due, seq: self.seq, token }));
        self.seq += 1;
    }

    /// Earliest due instant. `None` if empty.
    pub fn next_due(&self) -> Option<I> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    /// Remove and return the earliest token if it is due at `now`.
    pub fn pop_due(&mut self, now: I) -> Option<TimerToken> {
        if self.next_due()? > now {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| entry.token)
    }

    /// Keep only tokens matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&TimerToken) -> bool) {
        self.heap.retain(|Reverse(entry)| keep(&entry.token));
    }

    /// Pending tokens in no particular order.
    pub fn tokens(&self) -> impl Iterator<Item = TimerToken> + '_ {
        self.heap.iter().map(|Reverse(entry)| entry.token)
    }

    /// Number of pending callbacks.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use hanoi_core::{SessionTimers, TimerConfig, TimerKind};

    use super::*;

    fn token(kind: TimerKind) -> TimerToken {
        SessionTimers::new(TimerConfig::default()).schedule(kind, std::time::Duration::ZERO).token
    }

    #[test]
    fn pops_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.push(30u64, token(TimerKind::Watchdog));
        queue.push(10u64, token(TimerKind::GameTick));
        queue.push(20u64, token(TimerKind::RevealOutcome));

        assert_eq!(queue.next_due(), Some(10));
        assert_eq!(queue.pop_due(5), None);
        assert_eq!(queue.pop_due(25).map(|t| t.kind), Some(TimerKind::GameTick));
        assert_eq!(queue.pop_due(25).map(|t| t.kind), Some(TimerKind::RevealOutcome));
        assert_eq!(queue.pop_due(25), None);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn equal_instants_fire_in_push_order() {
        let mut queue = TimerQueue::new();
        queue.push(10u64, token(TimerKind::Watchdog));
        queue.push(10u64, token(TimerKind::GameTick));

        assert_eq!(queue.pop_due(10).map(|t| t.kind), Some(TimerKind::Watchdog));
        assert_eq!(queue.pop_due(10).map(|t| t.kind), Some(TimerKind::GameTick));
        assert!(queue.is_empty());
    }

    #[test]
    fn retain_drops_filtered_tokens() {
        let mut queue = TimerQueue::new();
        queue.push(1u64, token(TimerKind::GameTick));
        queue.push(2u64, token(TimerKind::Watchdog));

        queue.retain(|t| t.kind != TimerKind::GameTick);

        assert_eq!(queue.tokens().map(|t| t.kind).collect::<Vec<_>>(), vec![TimerKind::Watchdog]);
    }
}
