//! Normalized Shannon entropy of thread outcomes per entity.

use crate::stats::{desc, normalized_entropy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tributary_core::{
    classify_thread, group_threads, group_threads_by, GroupBy, InteractionEvent, KeyExtractor,
    OutcomeHistogram, OutcomeOptions, Thread, ThreadOutcome,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntropyMetric {
    pub entity: String,
    /// In `[0, 1]`; 1 means all five outcomes equally likely.
    pub entropy: f64,
    pub thread_count: usize,
    pub outcomes: OutcomeHistogram,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntropyReport {
    pub by_actor: Vec<EntropyMetric>,
    pub by_label: Vec<EntropyMetric>,
}

/// Entropy of an outcome histogram over the five-symbol alphabet.
pub fn histogram_entropy(hist: &OutcomeHistogram) -> f64 {
    normalized_entropy(&hist.probabilities(), ThreadOutcome::ALL.len())
}

/// Outcome of every thread, keyed by thread id.
pub fn thread_outcomes<'a>(
    threads: &[Thread<'a>],
    opts: &OutcomeOptions,
) -> HashMap<&'a str, ThreadOutcome> {
    let opts = opts.pinned();
    threads
        .iter()
        .map(|t| (t.id, classify_thread(t, &opts)))
        .collect()
}

/// Per-entity entropy, sorted by entropy (descending, stable).
pub fn entropy_by<K>(
    threads: &[Thread<'_>],
    outcomes: &HashMap<&str, ThreadOutcome>,
    extractor: &K,
) -> Vec<EntropyMetric>
where
    K: KeyExtractor + ?Sized,
{
    let mut metrics: Vec<EntropyMetric> = group_threads_by(threads, extractor)
        .into_iter()
        .map(|g| {
            let hist: OutcomeHistogram = g
                .threads
                .iter()
                .map(|t| outcomes[t.id])
                .collect();
            EntropyMetric {
                entity: g.key,
                entropy: histogram_entropy(&hist),
                thread_count: hist.total(),
                outcomes: hist,
            }
        })
        .collect();
    metrics.sort_by(|a, b| desc(a.entropy, b.entropy));
    metrics
}

pub fn analyze_entropy(events: &[InteractionEvent], opts: &OutcomeOptions) -> EntropyReport {
    let threads = group_threads(events);
    let outcomes = thread_outcomes(&threads, opts);
    let report = EntropyReport {
        by_actor: entropy_by(&threads, &outcomes, &GroupBy::Actor),
        by_label: entropy_by(&threads, &outcomes, &GroupBy::Label),
    };
    tracing::debug!(
        threads = threads.len(),
        actors = report.by_actor.len(),
        labels = report.by_label.len(),
        "entropy computed"
    );
    report
}
