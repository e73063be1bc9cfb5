//! Derived thread view: events sharing a `thread_id`, rebuilt on every call.

use crate::types::{EventType, InteractionEvent, ThreadType};
use std::collections::HashMap;
use time::OffsetDateTime;

/// Events of one conversation, ordered by timestamp (ties keep input order).
#[derive(Debug, Clone)]
pub struct Thread<'a> {
    pub id: &'a str,
    pub thread_type: ThreadType,
    pub events: Vec<&'a InteractionEvent>,
}

impl<'a> Thread<'a> {
    pub fn first_ts(&self) -> OffsetDateTime {
        self.events[0].timestamp
    }

    pub fn last_ts(&self) -> OffsetDateTime {
        self.events[self.events.len() - 1].timestamp
    }

    /// Distinct authors in order of first appearance.
    pub fn participants(&self) -> Vec<&'a str> {
        let mut seen: Vec<&'a str> = Vec::new();
        for ev in &self.events {
            if !seen.contains(&ev.from.as_str()) {
                seen.push(ev.from.as_str());
            }
        }
        seen
    }

    pub fn participant_count(&self) -> usize {
        self.participants().len()
    }

    pub fn involves(&self, actor: &str) -> bool {
        self.events.iter().any(|e| e.from == actor)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.events.iter().any(|e| e.has_label(label))
    }

    /// True if any event closed or merged the thread.
    pub fn is_closed(&self) -> bool {
        self.events.iter().any(|e| e.event_type.is_terminal())
    }

    pub fn count_of(&self, event_type: EventType) -> usize {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    /// Number of adjacent event pairs whose authors differ.
    pub fn actor_alternations(&self) -> usize {
        self.events
            .windows(2)
            .filter(|pair| pair[0].from != pair[1].from)
            .count()
    }

    pub fn touches(&self, start: OffsetDateTime, end: OffsetDateTime) -> bool {
        self.events
            .iter()
            .any(|e| e.timestamp >= start && e.timestamp <= end)
    }
}

/// Group events into threads, in order of each thread's first appearance.
pub fn group_threads(events: &[InteractionEvent]) -> Vec<Thread<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut threads: Vec<Thread<'_>> = Vec::new();

    for ev in events {
        match index.get(ev.thread_id.as_str()) {
            Some(&i) => threads[i].events.push(ev),
            None => {
                index.insert(ev.thread_id.as_str(), threads.len());
                threads.push(Thread {
                    id: ev.thread_id.as_str(),
                    thread_type: ev.thread_type,
                    events: vec![ev],
                });
            }
        }
    }

    // Stable sort: simultaneous events keep their input order.
    for t in &mut threads {
        t.events.sort_by_key(|e| e.timestamp);
    }
    threads
}

/// Distinct authors across the whole log, in order of first appearance.
pub fn distinct_actors(events: &[InteractionEvent]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for ev in events {
        if !seen.contains(&ev.from.as_str()) {
            seen.push(ev.from.as_str());
        }
    }
    seen
}
