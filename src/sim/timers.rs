//! Single logical timer queue
//!
//! Stands in for `setTimeout`/`clearTimeout`: a virtual clock plus a heap of
//! pending callbacks. The session drains it in due order, one callback at a
//! time, which gives the run-to-completion model the game relies on.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Work a timer performs when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Run one spawn cycle (self-rescheduling)
    SpawnCycle,
    /// Hide every mole raised by the cycle of session `epoch`
    ClearMoles { epoch: u32 },
    /// End the post-hit debounce on `slot`
    HitCooldownEnd { slot: usize, epoch: u32 },
}

/// Handle to a pending timer, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

/// A timer that has come due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub due: Duration,
    pub event: TimerEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    due: Duration,
    seq: u64,
    event: TimerEvent,
}

// Heap order is (due, seq); seq is unique so the event never takes part
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Virtual clock and pending timers
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<Reverse<Entry>>,
    cancelled: HashSet<u64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm `event` to fire `delay` from now
    pub fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(Entry {
            due: self.now + delay,
            seq,
            event,
        }));
        TimerHandle(seq)
    }

    /// Cancel a pending timer. Unknown or already-fired handles are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) {
        if self.pending.iter().any(|Reverse(e)| e.seq == handle.0) {
            self.cancelled.insert(handle.0);
        }
    }

    /// Number of live (not cancelled) timers
    pub fn pending(&self) -> usize {
        self.pending.len() - self.cancelled.len()
    }

    /// True if `handle` is still waiting to fire
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        !self.cancelled.contains(&handle.0)
            && self.pending.iter().any(|Reverse(e)| e.seq == handle.0)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time. Returns `None` once nothing else is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        loop {
            let due = match self.pending.peek() {
                Some(Reverse(entry)) if entry.due <= until => entry.due,
                _ => return None,
            };
            let Reverse(entry) = self.pending.pop()?;
            if self.cancelled.remove(&entry.seq) {
                continue;
            }
            self.now = self.now.max(due);
            log::trace!("Timer {} fired at {:?}: {:?}", entry.seq, due, entry.event);
            return Some(Fired {
                handle: TimerHandle(entry.seq),
                due,
                event: entry.event,
            });
        }
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}
