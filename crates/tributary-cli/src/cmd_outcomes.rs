use crate::{input, render};
use std::path::Path;
use tributary_core::{classify_threads, OutcomeOptions};
use tributary_metrics::AnalysisConfig;

/// Outcome options from flags, checked by the same rules as a full config.
pub fn resolve_options(
    now: Option<&str>,
    stall_days: Option<i64>,
) -> anyhow::Result<OutcomeOptions> {
    let mut config = AnalysisConfig::default();
    if let Some(now) = now {
        config.outcome.reference_time = Some(input::parse_time(now)?);
    }
    if let Some(days) = stall_days {
        config.outcome.stall_days = days;
    }
    config.validate()?;
    Ok(config.outcome)
}

pub fn execute(
    events: &Path,
    now: Option<&str>,
    stall_days: Option<i64>,
    json: bool,
) -> anyhow::Result<()> {
    let opts = resolve_options(now, stall_days)?;
    let events = input::load_events(events)?;
    let summaries = classify_threads(&events, &opts);
    tracing::info!(threads = summaries.len(), "threads classified");

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", render::outcomes(&summaries));
    }
    Ok(())
}
