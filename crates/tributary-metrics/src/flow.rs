//! Little's-Law style flow: closed threads (throughput) against open ones
//! (inventory) inside a time window.

use crate::options::FlowOptions;
use serde::{Deserialize, Serialize};
use tributary_core::{
    group_threads, group_threads_by, GroupBy, InteractionEvent, KeyExtractor, Thread, TimeWindow,
};

/// Entity key used for the whole-log aggregate.
pub const OVERALL: &str = "*";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowMetric {
    pub entity: String,
    pub throughput: usize,
    pub inventory: usize,
    pub flow_rate: f64,
}

impl FlowMetric {
    fn empty(entity: &str) -> Self {
        Self {
            entity: entity.to_string(),
            throughput: 0,
            inventory: 0,
            flow_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowReport {
    /// Window actually used; `None` only for an empty log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
    pub overall: FlowMetric,
    pub by_actor: Vec<FlowMetric>,
    pub by_label: Vec<FlowMetric>,
}

/// Flow over a set of threads. A thread counts when it has at least one
/// event inside the window; it is throughput if it was ever closed or merged.
/// Zero inventory yields a flow rate of 0.
pub fn flow_of<'t, 'a: 't, I>(entity: &str, threads: I, window: TimeWindow) -> FlowMetric
where
    I: IntoIterator<Item = &'t Thread<'a>>,
{
    let mut throughput = 0;
    let mut inventory = 0;
    for t in threads {
        if !t.touches(window.start, window.end) {
            continue;
        }
        if t.is_closed() {
            throughput += 1;
        } else {
            inventory += 1;
        }
    }
    let flow_rate = if inventory == 0 {
        0.0
    } else {
        throughput as f64 / inventory as f64
    };
    FlowMetric {
        entity: entity.to_string(),
        throughput,
        inventory,
        flow_rate,
    }
}

/// Per-entity flow, sorted by throughput (descending, stable).
pub fn flow_by<K>(threads: &[Thread<'_>], extractor: &K, window: TimeWindow) -> Vec<FlowMetric>
where
    K: KeyExtractor + ?Sized,
{
    let mut metrics: Vec<FlowMetric> = group_threads_by(threads, extractor)
        .into_iter()
        .map(|g| flow_of(&g.key, g.threads.iter().copied(), window))
        .collect();
    metrics.sort_by(|a, b| b.throughput.cmp(&a.throughput));
    metrics
}

/// Overall, per-actor and per-label flow for one log.
pub fn analyze_flow(events: &[InteractionEvent], opts: &FlowOptions) -> FlowReport {
    let Some(window) = opts.window.or_else(|| TimeWindow::spanning(events)) else {
        return FlowReport {
            window: None,
            overall: FlowMetric::empty(OVERALL),
            by_actor: Vec::new(),
            by_label: Vec::new(),
        };
    };
    let threads = group_threads(events);
    let report = FlowReport {
        window: Some(window),
        overall: flow_of(OVERALL, threads.iter(), window),
        by_actor: flow_by(&threads, &GroupBy::Actor, window),
        by_label: flow_by(&threads, &GroupBy::Label, window),
    };
    tracing::debug!(
        threads = threads.len(),
        actors = report.by_actor.len(),
        labels = report.by_label.len(),
        "flow computed"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, ev};
    use tributary_core::EventType;

    #[test]
    fn single_closed_thread_has_zero_rate() {
        let events = vec![
            ev(0, "A", "t1", EventType::Open),
            ev(5, "A", "t1", EventType::Close),
        ];
        let report = analyze_flow(&events, &FlowOptions::default());
        assert_eq!(report.overall.throughput, 1);
        assert_eq!(report.overall.inventory, 0);
        assert_eq!(report.overall.flow_rate, 0.0);
        assert_eq!(report.by_actor.len(), 1);
        assert_eq!(report.by_actor[0].entity, "A");
        assert_eq!(report.window, Some(TimeWindow::new(at(0), at(5))));
    }

    #[test]
    fn rate_positive_with_both_closed_and_open() {
        let events = vec![
            ev(0, "A", "t1", EventType::Open),
            ev(1, "A", "t1", EventType::Merge),
            ev(2, "A", "t2", EventType::Open),
            ev(3, "A", "t3", EventType::Open),
        ];
        let report = analyze_flow(&events, &FlowOptions::default());
        assert_eq!(report.overall.throughput, 1);
        assert_eq!(report.overall.inventory, 2);
        assert_eq!(report.overall.flow_rate, 0.5);
    }

    #[test]
    fn window_excludes_threads_without_events_inside() {
        let events = vec![
            ev(0, "A", "early", EventType::Open),
            ev(1, "A", "early", EventType::Close),
            ev(100, "B", "late", EventType::Open),
        ];
        let opts = FlowOptions {
            window: Some(TimeWindow::new(at(50), at(150))),
        };
        let report = analyze_flow(&events, &opts);
        assert_eq!(report.overall.throughput, 0);
        assert_eq!(report.overall.inventory, 1);
        let a = report.by_actor.iter().find(|m| m.entity == "A").unwrap();
        assert_eq!(a.throughput + a.inventory, 0);
    }

    #[test]
    fn closure_outside_window_still_counts_as_throughput() {
        let events = vec![
            ev(10, "A", "t", EventType::Open),
            ev(200, "A", "t", EventType::Close),
        ];
        let opts = FlowOptions {
            window: Some(TimeWindow::new(at(0), at(50))),
        };
        let report = analyze_flow(&events, &opts);
        assert_eq!(report.overall.throughput, 1);
    }

    #[test]
    fn per_actor_sorted_by_throughput() {
        let events = vec![
            ev(0, "low", "t1", EventType::Open),
            ev(1, "high", "t2", EventType::Open),
            ev(2, "high", "t2", EventType::Close),
            ev(3, "high", "t3", EventType::Open),
            ev(4, "high", "t3", EventType::Merge),
        ];
        let report = analyze_flow(&events, &FlowOptions::default());
        let names: Vec<&str> = report.by_actor.iter().map(|m| m.entity.as_str()).collect();
        assert_eq!(names, vec!["high", "low"]);
        assert_eq!(report.by_actor[0].throughput, 2);
    }

    #[test]
    fn per_label_flow() {
        let events = vec![
            ev(0, "A", "t1", EventType::Open).with_labels(["bug"]),
            ev(1, "A", "t1", EventType::Close),
            ev(2, "B", "t2", EventType::Open).with_labels(["bug", "docs"]),
        ];
        let report = analyze_flow(&events, &FlowOptions::default());
        let bug = report.by_label.iter().find(|m| m.entity == "bug").unwrap();
        assert_eq!((bug.throughput, bug.inventory), (1, 1));
        assert_eq!(bug.flow_rate, 1.0);
        let docs = report.by_label.iter().find(|m| m.entity == "docs").unwrap();
        assert_eq!((docs.throughput, docs.inventory), (0, 1));
    }

    #[test]
    fn empty_log() {
        let report = analyze_flow(&[], &FlowOptions::default());
        assert!(report.window.is_none());
        assert_eq!(report.overall, FlowMetric::empty(OVERALL));
        assert!(report.by_actor.is_empty());
        assert!(report.by_label.is_empty());
    }
}
