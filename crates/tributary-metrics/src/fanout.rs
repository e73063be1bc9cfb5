//! Fan-out trajectory: does an actor's circle of co-participants grow or
//! shrink across rolling windows?

use crate::options::FanoutOptions;
use crate::stats::{desc, ols_slope};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use time::Duration;
use tributary_core::{distinct_actors, InteractionEvent, TimeWindow};

/// Descriptive reading of the slope sign.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FanoutTrend {
    /// More people drawn in over time.
    Escalating,
    /// Circle consolidating.
    Maturing,
    Steady,
}

impl FanoutTrend {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Self::Escalating
        } else if slope < 0.0 {
            Self::Maturing
        } else {
            Self::Steady
        }
    }
}

impl fmt::Display for FanoutTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Escalating => write!(f, "escalating"),
            Self::Maturing => write!(f, "maturing"),
            Self::Steady => write!(f, "steady"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FanoutMetric {
    pub actor: String,
    pub slope: f64,
    pub trend: FanoutTrend,
    /// Distinct participants per window, in window order.
    pub participants_per_window: Vec<usize>,
}

/// Windows beginning at `range.start` and advancing by `step` while the start
/// is within the range.
///
/// Unlike the inclusive [`TimeWindow`] used elsewhere, each window here is
/// half-open: `[start, start + size)`. An end past the representable range
/// saturates.
///
/// # Panics
/// If `size` or `step` is not positive.
pub fn rolling_windows(range: TimeWindow, size: Duration, step: Duration) -> Vec<TimeWindow> {
    assert!(size.is_positive(), "rolling window size must be positive");
    assert!(step.is_positive(), "rolling window step must be positive");
    let mut windows = Vec::new();
    let mut start = range.start;
    while start <= range.end {
        windows.push(TimeWindow::new(start, start.saturating_add(size)));
        match start.checked_add(step) {
            Some(next) => start = next,
            None => break,
        }
    }
    windows
}

/// Distinct participants per actor, counting only events in the half-open
/// `[window.start, window.end)`.
/// An actor's circle is the union of authors across the threads it wrote in.
fn participants_in_window<'a>(
    events: &'a [InteractionEvent],
    window: &TimeWindow,
) -> HashMap<&'a str, HashSet<&'a str>> {
    let mut members: HashMap<&'a str, HashSet<&'a str>> = HashMap::new();
    for ev in events
        .iter()
        .filter(|e| e.timestamp >= window.start && e.timestamp < window.end)
    {
        members
            .entry(ev.thread_id.as_str())
            .or_default()
            .insert(ev.from.as_str());
    }

    let mut circles: HashMap<&'a str, HashSet<&'a str>> = HashMap::new();
    for thread_members in members.values() {
        for &actor in thread_members {
            circles
                .entry(actor)
                .or_default()
                .extend(thread_members.iter().copied());
        }
    }
    circles
}

/// Per-actor fan-out slope, sorted by absolute slope (descending, stable).
pub fn analyze_fanout(events: &[InteractionEvent], opts: &FanoutOptions) -> Vec<FanoutMetric> {
    let Some(range) = TimeWindow::spanning(events) else {
        return Vec::new();
    };
    let windows = rolling_windows(range, opts.window(), opts.step());
    let per_window: Vec<HashMap<&str, HashSet<&str>>> = windows
        .iter()
        .map(|w| participants_in_window(events, w))
        .collect();

    let mut metrics: Vec<FanoutMetric> = distinct_actors(events)
        .into_iter()
        .map(|actor| {
            let counts: Vec<usize> = per_window
                .iter()
                .map(|circles| circles.get(actor).map(HashSet::len).unwrap_or(0))
                .collect();
            let ys: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
            let slope = ols_slope(&ys);
            FanoutMetric {
                actor: actor.to_string(),
                slope,
                trend: FanoutTrend::from_slope(slope),
                participants_per_window: counts,
            }
        })
        .collect();
    metrics.sort_by(|a, b| desc(a.slope.abs(), b.slope.abs()));

    tracing::debug!(
        windows = windows.len(),
        actors = metrics.len(),
        "fan-out computed"
    );
    metrics
}
