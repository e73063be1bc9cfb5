//! Thread outcome classification.
//!
//! Each thread gets exactly one [`ThreadOutcome`], chosen by the first rule in
//! [`OUTCOME_RULES`] whose predicate holds. Rule order is significant: outcome
//! distributions feed entropy directly, so reordering changes every metric
//! downstream.

use crate::thread::{group_threads, Thread};
use crate::types::{EventType, InteractionEvent, ThreadType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use time::{Duration, OffsetDateTime};

/// Default inactivity threshold for the stall rule.
pub const DEFAULT_STALL_DAYS: i64 = 7;

/// Single classification per thread.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ThreadOutcome {
    Resolved,
    Escalated,
    Expanded,
    Stalled,
    Looped,
}

impl ThreadOutcome {
    /// The full outcome alphabet.
    pub const ALL: [ThreadOutcome; 5] = [
        Self::Resolved,
        Self::Escalated,
        Self::Expanded,
        Self::Stalled,
        Self::Looped,
    ];
}

impl fmt::Display for ThreadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved => write!(f, "resolved"),
            Self::Escalated => write!(f, "escalated"),
            Self::Expanded => write!(f, "expanded"),
            Self::Stalled => write!(f, "stalled"),
            Self::Looped => write!(f, "looped"),
        }
    }
}

impl std::str::FromStr for ThreadOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resolved" => Ok(Self::Resolved),
            "escalated" => Ok(Self::Escalated),
            "expanded" => Ok(Self::Expanded),
            "stalled" => Ok(Self::Stalled),
            "looped" => Ok(Self::Looped),
            other => Err(format!("unknown thread outcome: {other}")),
        }
    }
}

// ── Options ──

/// Knobs for the time-dependent stall rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutcomeOptions {
    /// Age and inactivity threshold, in days.
    pub stall_days: i64,
    /// "Now" for age computations. `None` means the wall clock.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_time: Option<OffsetDateTime>,
}

impl Default for OutcomeOptions {
    fn default() -> Self {
        Self {
            stall_days: DEFAULT_STALL_DAYS,
            reference_time: None,
        }
    }
}

impl OutcomeOptions {
    /// Fix the reference time so every thread in a run sees the same "now".
    pub fn pinned(self) -> Self {
        Self {
            reference_time: Some(self.reference_time.unwrap_or_else(OffsetDateTime::now_utc)),
            ..self
        }
    }

    fn context(&self) -> RuleContext {
        RuleContext {
            now: self.reference_time.unwrap_or_else(OffsetDateTime::now_utc),
            stall_threshold: Duration::seconds(self.stall_days.saturating_mul(86_400)),
        }
    }
}

// ── Rules ──

/// Inputs shared by every rule predicate.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext {
    pub now: OffsetDateTime,
    pub stall_threshold: Duration,
}

/// One `(predicate, label)` entry of the priority list.
pub struct OutcomeRule {
    pub name: &'static str,
    pub outcome: ThreadOutcome,
    pub applies: fn(&Thread<'_>, &RuleContext) -> bool,
}

fn any_close_or_merge(thread: &Thread<'_>, _ctx: &RuleContext) -> bool {
    thread.is_closed()
}

fn three_or_more_actors(thread: &Thread<'_>, _ctx: &RuleContext) -> bool {
    thread.participant_count() >= 3
}

fn two_actor_ping_pong(thread: &Thread<'_>, _ctx: &RuleContext) -> bool {
    thread.participant_count() == 2
        && thread.events.len() >= 4
        && thread.actor_alternations() >= 3
}

fn repeated_assignment(thread: &Thread<'_>, _ctx: &RuleContext) -> bool {
    thread.count_of(EventType::Assign) >= 2
}

fn old_and_quiet(thread: &Thread<'_>, ctx: &RuleContext) -> bool {
    ctx.now - thread.first_ts() > ctx.stall_threshold
        && ctx.now - thread.last_ts() > ctx.stall_threshold
}

/// Evaluated top to bottom; first match wins.
pub const OUTCOME_RULES: &[OutcomeRule] = &[
    OutcomeRule {
        name: "close_or_merge",
        outcome: ThreadOutcome::Resolved,
        applies: any_close_or_merge,
    },
    OutcomeRule {
        name: "three_plus_actors",
        outcome: ThreadOutcome::Expanded,
        applies: three_or_more_actors,
    },
    OutcomeRule {
        name: "two_actor_alternation",
        outcome: ThreadOutcome::Looped,
        applies: two_actor_ping_pong,
    },
    OutcomeRule {
        name: "repeated_assign",
        outcome: ThreadOutcome::Escalated,
        applies: repeated_assignment,
    },
    OutcomeRule {
        name: "old_and_inactive",
        outcome: ThreadOutcome::Stalled,
        applies: old_and_quiet,
    },
];

/// Young, unresolved thread: more than one voice means it is still growing.
fn fallback(thread: &Thread<'_>) -> ThreadOutcome {
    if thread.participant_count() > 1 {
        ThreadOutcome::Expanded
    } else {
        ThreadOutcome::Stalled
    }
}

/// Classify one thread.
///
/// # Panics
/// If the thread has no events.
pub fn classify_thread(thread: &Thread<'_>, opts: &OutcomeOptions) -> ThreadOutcome {
    assert!(
        !thread.events.is_empty(),
        "thread {} has no events",
        thread.id
    );
    let ctx = opts.context();
    OUTCOME_RULES
        .iter()
        .find(|rule| (rule.applies)(thread, &ctx))
        .map(|rule| rule.outcome)
        .unwrap_or_else(|| fallback(thread))
}

// ── Histogram ──

/// Outcome counts over the five-symbol alphabet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OutcomeHistogram(BTreeMap<ThreadOutcome, usize>);

impl OutcomeHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, outcome: ThreadOutcome) {
        *self.0.entry(outcome).or_insert(0) += 1;
    }

    pub fn get(&self, outcome: ThreadOutcome) -> usize {
        self.0.get(&outcome).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Number of outcomes observed at least once.
    pub fn distinct(&self) -> usize {
        self.0.values().filter(|&&n| n > 0).count()
    }

    /// Relative frequency of each observed outcome.
    pub fn probabilities(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.0
            .values()
            .filter(|&&n| n > 0)
            .map(|&n| n as f64 / total as f64)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ThreadOutcome, usize)> + '_ {
        self.0.iter().map(|(o, n)| (*o, *n))
    }
}

impl FromIterator<ThreadOutcome> for OutcomeHistogram {
    fn from_iter<I: IntoIterator<Item = ThreadOutcome>>(iter: I) -> Self {
        let mut hist = Self::new();
        for o in iter {
            hist.add(o);
        }
        hist
    }
}

// ── Per-thread listing ──

/// Outcome plus the facts that produced it, for one thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub thread_id: String,
    pub thread_type: ThreadType,
    pub event_count: usize,
    pub participants: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub first_event: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_event: OffsetDateTime,
    pub outcome: ThreadOutcome,
}

/// Classify every thread in the log, in order of first appearance.
pub fn classify_threads(events: &[InteractionEvent], opts: &OutcomeOptions) -> Vec<ThreadSummary> {
    let opts = opts.pinned();
    group_threads(events)
        .iter()
        .map(|t| ThreadSummary {
            thread_id: t.id.to_string(),
            thread_type: t.thread_type,
            event_count: t.events.len(),
            participants: t.participants().into_iter().map(String::from).collect(),
            first_event: t.first_ts(),
            last_event: t.last_ts(),
            outcome: classify_thread(t, &opts),
        })
        .collect()
}
