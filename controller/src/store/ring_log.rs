//! Bounded newest-first event log

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::models::LogEvent;

/// Maximum number of retained events
pub const RING_CAPACITY: usize = 30;

#[derive(Debug)]
pub struct RingLog {
    events: Mutex<VecDeque<LogEvent>>,
    capacity: usize,
}

impl Default for RingLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RingLog {
    pub fn new() -> Self {
        Self::with_capacity(RING_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity + 1)),
            capacity,
        }
    }

    /// Insert at the head, evicting the oldest entry past capacity
    pub fn append(&self, event: LogEvent) {
        let mut events = self.events.lock();
        events.push_front(event);
        events.truncate(self.capacity);
    }

    /// Newest first
    pub fn get_all(&self) -> Vec<LogEvent> {
        self.events.lock().iter().cloned().collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventKind;

    fn event(i: usize) -> LogEvent {
        LogEvent {
            time: "00:00:00".to_string(),
            msg: format!("e{}", i),
            kind: EventKind::Info,
        }
    }

    #[test]
    fn test_bound_and_order() {
        let ring = RingLog::new();
        for i in 1..=31 {
            ring.append(event(i));
        }

        let all = ring.get_all();
        assert_eq!(all.len(), RING_CAPACITY);
        assert_eq!(all[0].msg, "e31");
        assert_eq!(all[RING_CAPACITY - 1].msg, "e2");
        assert!(all.iter().all(|e| e.msg != "e1"));
    }

    #[test]
    fn test_head_is_latest() {
        let ring = RingLog::new();
        for i in 1..=5 {
            ring.append(event(i));
            assert_eq!(ring.get_all()[0].msg, format!("e{}", i));
        }
        assert_eq!(ring.len(), 5);
    }

    #[test]
    fn test_clear() {
        let ring = RingLog::new();
        ring.append(event(1));
        ring.clear();
        assert!(ring.is_empty());
        assert!(ring.get_all().is_empty());
    }
}
