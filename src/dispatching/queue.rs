//! Severity-ordered incident queue.
//!
//! Highest severity rank is served first. Among incidents of equal rank the
//! earlier arrival is served first: every push is stamped with a sequence
//! number that acts as the secondary key, so the order is reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::models::Incident;

#[derive(Debug, Clone)]
struct Queued {
    rank: u8,
    seq: u64,
    incident: Incident,
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // max-heap: higher rank first, then lower sequence number first
        self.rank
            .cmp(&other.rank)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

/// Priority queue of pending incidents.
///
/// # Example
/// ```
/// use u_dispatch::dispatching::IncidentQueue;
/// use u_dispatch::models::{Incident, Severity};
///
/// let mut q = IncidentQueue::new();
/// q.push(Incident::new("INC1", "A", Severity::Low));
/// q.push(Incident::new("INC2", "B", Severity::High));
/// assert_eq!(q.pop().unwrap().id, "INC2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IncidentQueue {
    heap: BinaryHeap<Queued>,
    next_seq: u64,
}

impl IncidentQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an incident behind earlier incidents of the same severity.
    pub fn push(&mut self, incident: Incident) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Queued {
            rank: incident.severity.rank(),
            seq,
            incident,
        });
    }

    /// The incident that would be served next.
    pub fn peek(&self) -> Option<&Incident> {
        self.heap.peek().map(|q| &q.incident)
    }

    /// Removes and returns the incident that would be served next.
    pub fn pop(&mut self) -> Option<Incident> {
        self.heap.pop().map(|q| q.incident)
    }

    /// Number of queued incidents.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether an incident with this id is queued.
    pub fn contains(&self, incident_id: &str) -> bool {
        self.heap.iter().any(|q| q.incident.id == incident_id)
    }

    /// Queued incidents in service order.
    pub fn ordered(&self) -> Vec<&Incident> {
        let mut entries: Vec<&Queued> = self.heap.iter().collect();
        entries.sort_by(|a, b| b.cmp(a));
        entries.into_iter().map(|q| &q.incident).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn inc(id: &str, severity: Severity) -> Incident {
        Incident::new(id, "A", severity)
    }

    #[test]
    fn test_severity_order() {
        let mut q = IncidentQueue::new();
        q.push(inc("low", Severity::Low));
        q.push(inc("unknown", Severity::Unknown));
        q.push(inc("high", Severity::High));
        q.push(inc("medium", Severity::Medium));

        let order: Vec<String> = std::iter::from_fn(|| q.pop()).map(|i| i.id).collect();
        assert_eq!(order, vec!["high", "medium", "low", "unknown"]);
    }

    #[test]
    fn test_fifo_within_severity() {
        let mut q = IncidentQueue::new();
        q.push(inc("m1", Severity::Medium));
        q.push(inc("h1", Severity::High));
        q.push(inc("m2", Severity::Medium));
        q.push(inc("h2", Severity::High));
        q.push(inc("m3", Severity::Medium));

        let ids: Vec<&str> = q.ordered().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["h1", "h2", "m1", "m2", "m3"]);

        assert_eq!(q.peek().unwrap().id, "h1");
        assert_eq!(q.pop().unwrap().id, "h1");
        assert_eq!(q.pop().unwrap().id, "h2");
        assert_eq!(q.pop().unwrap().id, "m1");
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_contains_and_empty() {
        let mut q = IncidentQueue::new();
        assert!(q.is_empty());
        assert!(q.peek().is_none());
        q.push(inc("INC1", Severity::Low));
        assert!(q.contains("INC1"));
        assert!(!q.contains("INC2"));
        q.pop();
        assert!(q.pop().is_none());
    }
}
