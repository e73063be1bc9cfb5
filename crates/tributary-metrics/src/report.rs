//! One-shot pipeline: every analyzer over the same log, gathered into a
//! single report.

use crate::cadence::{analyze_cadence, CadencePair};
use crate::downstream::{analyze_downstream, DownstreamPair};
use crate::entropy::{analyze_entropy, EntropyReport};
use crate::error::ConfigError;
use crate::fanout::{analyze_fanout, FanoutMetric};
use crate::flow::{analyze_flow, FlowReport};
use crate::options::AnalysisConfig;
use crate::quadrant::{classify_quadrants, QuadrantReport};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use time::OffsetDateTime;
use tributary_core::{distinct_actors, group_threads, InteractionEvent, TimeWindow};

/// Shape of the input the report was computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub event_count: usize,
    pub thread_count: usize,
    pub actor_count: usize,
    pub label_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<TimeWindow>,
    #[serde(with = "time::serde::rfc3339")]
    pub reference_time: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub meta: ReportMeta,
    pub flow: FlowReport,
    pub entropy: EntropyReport,
    pub cadence: Vec<CadencePair>,
    pub downstream: Vec<DownstreamPair>,
    pub fanout: Vec<FanoutMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadrants: Option<QuadrantReport>,
}

/// Run the whole pipeline. Quadrants are classified by actor from this run's
/// flow and entropy outputs when `config.quadrants` is set.
pub fn analyze(
    events: &[InteractionEvent],
    config: &AnalysisConfig,
) -> Result<AnalysisReport, ConfigError> {
    config.validate()?;
    let outcome = config.outcome.pinned();
    let reference_time = outcome
        .reference_time
        .unwrap_or_else(OffsetDateTime::now_utc);

    let labels: HashSet<&str> = events
        .iter()
        .flat_map(|e| e.labels.iter().map(String::as_str))
        .collect();
    let meta = ReportMeta {
        event_count: events.len(),
        thread_count: group_threads(events).len(),
        actor_count: distinct_actors(events).len(),
        label_count: labels.len(),
        range: TimeWindow::spanning(events),
        reference_time,
    };

    let flow = analyze_flow(events, &config.flow);
    let entropy = analyze_entropy(events, &outcome);
    let cadence = analyze_cadence(events, &config.cadence);
    let downstream = analyze_downstream(events, &config.downstream);
    let fanout = analyze_fanout(events, &config.fanout);
    let quadrants = config
        .quadrants
        .then(|| classify_quadrants(&flow.by_actor, &entropy.by_actor));

    tracing::info!(
        events = meta.event_count,
        threads = meta.thread_count,
        actors = meta.actor_count,
        cadence_pairs = cadence.len(),
        downstream_pairs = downstream.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        meta,
        flow,
        entropy,
        cadence,
        downstream,
        fanout,
        quadrants,
    })
}
