//! Latest-wins bookkeeping for async renders.
//!
//! Each slot (say, "the day detail panel") has a generation counter. Starting
//! a request bumps the counter and hands out a [`Ticket`]; when the result
//! arrives it is applied only if no newer ticket was issued for that slot.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

/// Proof of a started request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket<S> {
    slot: S,
    generation: u64,
}

/// Shared per-slot generation counters. Clones share state.
#[derive(Debug)]
pub struct RequestTracker<S> {
    generations: Arc<Mutex<HashMap<S, u64>>>,
}

impl<S> Clone for RequestTracker<S> {
    fn clone(&self) -> Self {
        Self {
            generations: Arc::clone(&self.generations),
        }
    }
}

impl<S> Default for RequestTracker<S> {
    fn default() -> Self {
        Self {
            generations: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<S: Copy + Eq + Hash + std::fmt::Debug> RequestTracker<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `slot`, superseding any in flight.
    pub fn begin(&self, slot: S) -> Ticket<S> {
        let mut generations = self.generations.lock().unwrap_or_else(|e| e.into_inner());
        let generation = generations.entry(slot).or_insert(0);
        *generation += 1;
        Ticket {
            slot,
            generation: *generation,
        }
    }

    /// Whether `ticket` is still the newest for its slot.
    pub fn is_current(&self, ticket: &Ticket<S>) -> bool {
        let generations = self.generations.lock().unwrap_or_else(|e| e.into_inner());
        let current = generations.get(&ticket.slot).copied() == Some(ticket.generation);
        if !current {
            tracing::debug!(slot = ?ticket.slot, "dropping stale result");
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Slot {
        Detail,
        Weekly,
    }

    #[test]
    fn test_newest_ticket_wins() {
        let tracker = RequestTracker::new();
        let first = tracker.begin(Slot::Detail);
        let second = tracker.begin(Slot::Detail);
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
    }

    #[test]
    fn test_slots_are_independent() {
        let tracker = RequestTracker::new();
        let detail = tracker.begin(Slot::Detail);
        let weekly = tracker.begin(Slot::Weekly);
        tracker.begin(Slot::Weekly);
        assert!(tracker.is_current(&detail));
        assert!(!tracker.is_current(&weekly));
    }

    #[test]
    fn test_clones_share_generations() {
        let tracker = RequestTracker::new();
        let handle = tracker.clone();
        let ticket = tracker.begin(Slot::Detail);
        handle.begin(Slot::Detail);
        assert!(!tracker.is_current(&ticket));
    }
}
