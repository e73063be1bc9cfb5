//! Plain-text rendering for terminal output.

use std::fmt::Write;
use tributary_core::{OutcomeHistogram, ThreadSummary};
use tributary_metrics::{AnalysisReport, EntropyMetric, FlowMetric};

/// Rows shown per ranked section.
const TOP: usize = 10;

fn flow_rows(out: &mut String, title: &str, rows: &[FlowMetric]) {
    if rows.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {title}:");
    for m in rows.iter().take(TOP) {
        let _ = writeln!(
            out,
            "    {:<20} throughput={:<4} inventory={:<4} rate={:.2}",
            m.entity, m.throughput, m.inventory, m.flow_rate
        );
    }
}

fn entropy_rows(out: &mut String, title: &str, rows: &[EntropyMetric]) {
    if rows.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {title}:");
    for m in rows.iter().take(TOP) {
        let _ = writeln!(
            out,
            "    {:<20} entropy={:.3} threads={:<4} {}",
            m.entity,
            m.entropy,
            m.thread_count,
            histogram(&m.outcomes)
        );
    }
}

fn histogram(h: &OutcomeHistogram) -> String {
    h.iter()
        .map(|(outcome, n)| format!("{outcome}={n}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn report(r: &AnalysisReport) -> String {
    let mut out = String::new();
    let m = &r.meta;
    let _ = writeln!(
        out,
        "{} events, {} threads, {} actors, {} labels",
        m.event_count, m.thread_count, m.actor_count, m.label_count
    );
    if let Some(range) = m.range {
        let _ = writeln!(out, "Range: {} .. {}", range.start, range.end);
    }

    let _ = writeln!(out, "\nFlow");
    let o = &r.flow.overall;
    let _ = writeln!(
        out,
        "  overall: throughput={} inventory={} rate={:.2}",
        o.throughput, o.inventory, o.flow_rate
    );
    flow_rows(&mut out, "by actor", &r.flow.by_actor);
    flow_rows(&mut out, "by label", &r.flow.by_label);

    let _ = writeln!(out, "\nEntropy");
    entropy_rows(&mut out, "by actor", &r.entropy.by_actor);
    entropy_rows(&mut out, "by label", &r.entropy.by_label);

    let _ = writeln!(out, "\nCadence ({} pairs)", r.cadence.len());
    for p in r.cadence.iter().take(TOP) {
        let _ = writeln!(
            out,
            "  {} ~ {}: r={:+.3} shared={}",
            p.a, p.b, p.correlation, p.shared_threads
        );
    }

    let _ = writeln!(out, "\nDownstream ({} pairs)", r.downstream.len());
    for p in r.downstream.iter().take(TOP) {
        let _ = writeln!(
            out,
            "  {} + {}: {}/{} ratio={:.2}",
            p.a, p.b, p.downstream_interactions, p.total_interactions, p.downstream_ratio
        );
    }

    let _ = writeln!(out, "\nFan-out");
    for f in r.fanout.iter().take(TOP) {
        let _ = writeln!(
            out,
            "  {:<20} slope={:+.3} {} {:?}",
            f.actor, f.slope, f.trend, f.participants_per_window
        );
    }

    if let Some(q) = &r.quadrants {
        let s = &q.summary;
        let _ = writeln!(
            out,
            "\nQuadrants (median ln-flow={:.3}, median entropy={:.3})",
            s.flow_median, s.entropy_median
        );
        let _ = writeln!(
            out,
            "  river={} waterfall={} bottleneck={} swamp={}",
            s.river, s.waterfall, s.bottleneck, s.swamp
        );
        for c in &q.entities {
            let _ = writeln!(out, "  {:<20} {}", c.entity, c.quadrant);
        }
    }
    out
}

pub fn outcomes(summaries: &[ThreadSummary]) -> String {
    let mut out = String::new();
    for s in summaries {
        let _ = writeln!(
            out,
            "{:<24} {:<6} {:<10} events={:<4} [{}]",
            s.thread_id,
            s.thread_type.to_string(),
            s.outcome.to_string(),
            s.event_count,
            s.participants.join(", ")
        );
    }
    let totals: OutcomeHistogram = summaries.iter().map(|s| s.outcome).collect();
    let _ = writeln!(out, "{} threads: {}", totals.total(), histogram(&totals));
    out
}
