//! Time-ordered incident queue.
//!
//! Incidents leave the queue in fire-tick order; incidents sharing a tick
//! leave in insertion order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::incident::QueuedIncident;

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    incident: QueuedIncident,
}

impl Entry {
    fn key(&self) -> (u64, u64) {
        (self.incident.fire_tick, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-heap of queued incidents keyed by fire tick.
#[derive(Debug, Clone, Default)]
pub struct TimedIncidentQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl TimedIncidentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, incident: QueuedIncident) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { seq, incident }));
    }

    /// The incident that fires next, if any.
    pub fn peek(&self) -> Option<&QueuedIncident> {
        self.heap.peek().map(|Reverse(e)| &e.incident)
    }

    /// Removes and returns every incident with `fire_tick <= now`, in order.
    pub fn pop_due(&mut self, now: u64) -> Vec<QueuedIncident> {
        let mut due = Vec::new();
        while let Some(Reverse(entry)) = self.heap.peek() {
            if entry.incident.fire_tick > now {
                break;
            }
            if let Some(Reverse(entry)) = self.heap.pop() {
                due.push(entry.incident);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Snapshot of the queue contents in firing order.
    pub fn to_vec(&self) -> Vec<QueuedIncident> {
        let mut entries: Vec<&Entry> = self.heap.iter().map(|Reverse(e)| e).collect();
        entries.sort();
        entries.into_iter().map(|e| e.incident.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incident::{IncidentCategory, IncidentKind, IncidentParms};

    fn incident(id: &str, tick: u64) -> QueuedIncident {
        QueuedIncident::new(
            id,
            IncidentKind::RaidEnemy,
            IncidentParms::new("camp", IncidentCategory::ThreatBig, 100.0),
            tick,
        )
    }

    #[test]
    fn test_pops_in_tick_order() {
        let mut queue = TimedIncidentQueue::new();
        queue.push(incident("late", 3000));
        queue.push(incident("early", 1200));
        queue.push(incident("middle", 2000));

        assert_eq!(queue.peek().unwrap().incident_id, "early");

        let due = queue.pop_due(2500);
        let ids: Vec<&str> = due.iter().map(|i| i.incident_id.as_str()).collect();
        assert_eq!(ids, vec!["early", "middle"]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_equal_ticks_keep_insertion_order() {
        let mut queue = TimedIncidentQueue::new();
        queue.push(incident("first", 500));
        queue.push(incident("second", 500));
        queue.push(incident("third", 500));

        let ids: Vec<String> = queue.pop_due(500).into_iter().map(|i| i.incident_id).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_nothing_due_before_fire_tick() {
        let mut queue = TimedIncidentQueue::new();
        queue.push(incident("raid", 1000));

        assert!(queue.pop_due(999).is_empty());
        assert!(!queue.is_empty());
    }

    #[test]
    fn test_to_vec_is_ordered_and_non_destructive() {
        let mut queue = TimedIncidentQueue::new();
        queue.push(incident("b", 20));
        queue.push(incident("a", 10));

        let ids: Vec<String> = queue.to_vec().into_iter().map(|i| i.incident_id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(queue.len(), 2);
    }
}
