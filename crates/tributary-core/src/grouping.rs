//! Aggregation by an arbitrary key extracted from events.
//!
//! Per-actor and per-label metrics share one code path: a [`KeyExtractor`]
//! names the entities an event belongs to, and [`group_threads_by`] collects
//! the threads each entity touches.

use crate::thread::Thread;
use crate::types::InteractionEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Maps an event to the entity keys it contributes to.
pub trait KeyExtractor {
    fn keys<'e>(&self, event: &'e InteractionEvent) -> Vec<&'e str>;
}

impl<F> KeyExtractor for F
where
    F: for<'e> Fn(&'e InteractionEvent) -> Vec<&'e str>,
{
    fn keys<'e>(&self, event: &'e InteractionEvent) -> Vec<&'e str> {
        self(event)
    }
}

/// Built-in grouping keys.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Actor,
    Label,
}

impl KeyExtractor for GroupBy {
    fn keys<'e>(&self, event: &'e InteractionEvent) -> Vec<&'e str> {
        match self {
            Self::Actor => vec![event.from.as_str()],
            Self::Label => event.labels.iter().map(|l| l.as_str()).collect(),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor => write!(f, "actor"),
            Self::Label => write!(f, "label"),
        }
    }
}

/// Threads belonging to one entity.
#[derive(Debug)]
pub struct EntityGroup<'t, 'a> {
    pub key: String,
    pub threads: Vec<&'t Thread<'a>>,
}

/// Collect, per entity key, the threads containing at least one event that
/// maps to that key. Entities appear in order of first discovery; each thread
/// is listed once per entity.
pub fn group_threads_by<'t, 'a, K>(
    threads: &'t [Thread<'a>],
    extractor: &K,
) -> Vec<EntityGroup<'t, 'a>>
where
    K: KeyExtractor + ?Sized,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<EntityGroup<'t, 'a>> = Vec::new();

    for thread in threads {
        let mut keys_in_thread: Vec<&str> = Vec::new();
        for ev in &thread.events {
            for key in extractor.keys(ev) {
                if !keys_in_thread.contains(&key) {
                    keys_in_thread.push(key);
                }
            }
        }
        for key in keys_in_thread {
            let slot = match index.get(key) {
                Some(&i) => i,
                None => {
                    index.insert(key.to_string(), groups.len());
                    groups.push(EntityGroup {
                        key: key.to_string(),
                        threads: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            groups[slot].threads.push(thread);
        }
    }
    groups
}
