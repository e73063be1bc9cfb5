//! Cadence alignment: Pearson correlation of actors' bucketed activity.
//!
//! Both filters (minimum events per actor, minimum shared threads per pair)
//! are required. Unfiltered pairwise correlation over incidental co-activity
//! is dominated by spurious high coefficients.

use crate::options::CadenceOptions;
use crate::stats::{desc, pearson};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use time::{Duration, OffsetDateTime};
use tributary_core::{distinct_actors, InteractionEvent, TimeWindow};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CadencePair {
    pub a: String,
    pub b: String,
    pub correlation: f64,
    pub shared_threads: usize,
}

/// Index of the bucket holding `ts`, counting from `origin`.
pub fn bucket_index(ts: OffsetDateTime, origin: OffsetDateTime, bin: Duration) -> usize {
    let bin_secs = bin.whole_seconds();
    assert!(bin_secs > 0, "bin width must be positive");
    let offset = (ts - origin).whole_seconds();
    assert!(offset >= 0, "timestamp precedes bucket origin");
    (offset / bin_secs) as usize
}

/// Event counts per bucket over `range`; the vector length is fixed by the
/// range so every actor's series lines up.
pub fn bucket_counts(timestamps: &[OffsetDateTime], range: TimeWindow, bin: Duration) -> Vec<f64> {
    let len = bucket_index(range.end, range.start, bin) + 1;
    let mut counts = vec![0.0; len];
    for &ts in timestamps {
        counts[bucket_index(ts, range.start, bin)] += 1.0;
    }
    counts
}

/// Correlated actor pairs, sorted by absolute correlation (descending, stable).
pub fn analyze_cadence(events: &[InteractionEvent], opts: &CadenceOptions) -> Vec<CadencePair> {
    let Some(range) = TimeWindow::spanning(events) else {
        return Vec::new();
    };
    let bin = opts.bin.duration();

    let mut timestamps: HashMap<&str, Vec<OffsetDateTime>> = HashMap::new();
    let mut threads_of: HashMap<&str, HashSet<&str>> = HashMap::new();
    for ev in events {
        timestamps.entry(ev.from.as_str()).or_default().push(ev.timestamp);
        threads_of
            .entry(ev.from.as_str())
            .or_default()
            .insert(ev.thread_id.as_str());
    }

    let eligible: Vec<&str> = distinct_actors(events)
        .into_iter()
        .filter(|a| timestamps[a].len() >= opts.min_events)
        .collect();
    let series: Vec<Vec<f64>> = eligible
        .iter()
        .map(|a| bucket_counts(&timestamps[a], range, bin))
        .collect();

    let mut pairs = Vec::new();
    for i in 0..eligible.len() {
        for j in (i + 1)..eligible.len() {
            let shared = threads_of[eligible[i]]
                .intersection(&threads_of[eligible[j]])
                .count();
            if shared < opts.min_shared_threads {
                continue;
            }
            pairs.push(CadencePair {
                a: eligible[i].to_string(),
                b: eligible[j].to_string(),
                correlation: pearson(&series[i], &series[j]),
                shared_threads: shared,
            });
        }
    }
    pairs.sort_by(|x, y| desc(x.correlation.abs(), y.correlation.abs()));

    tracing::debug!(
        eligible = eligible.len(),
        pairs = pairs.len(),
        buckets = series.first().map(Vec::len).unwrap_or(0),
        "cadence computed"
    );
    pairs
}
