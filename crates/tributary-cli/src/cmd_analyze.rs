use crate::{input, render};
use std::path::Path;
use tributary_metrics::{analyze, AnalysisConfig};

pub struct AnalyzeArgs<'a> {
    pub events: &'a Path,
    pub config: Option<&'a Path>,
    pub quadrants: bool,
    pub now: Option<&'a str>,
    pub json: bool,
}

/// Config from file (if any) with command-line flags applied on top.
pub fn resolve_config(args: &AnalyzeArgs<'_>) -> anyhow::Result<AnalysisConfig> {
    let mut config = match args.config {
        Some(path) => input::load_config(path)?,
        None => AnalysisConfig::default(),
    };
    if args.quadrants {
        config.quadrants = true;
    }
    if let Some(now) = args.now {
        config.outcome.reference_time = Some(input::parse_time(now)?);
    }
    Ok(config)
}

pub fn execute(args: &AnalyzeArgs<'_>) -> anyhow::Result<()> {
    let config = resolve_config(args)?;
    let events = input::load_events(args.events)?;
    let report = analyze(&events, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::report(&report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args<'a>(config: Option<&'a Path>, events: &'a Path) -> AnalyzeArgs<'a> {
        AnalyzeArgs {
            events,
            config,
            quadrants: false,
            now: None,
            json: false,
        }
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("cfg.yaml");
        std::fs::write(
            &cfg,
            "quadrants: false\noutcome:\n  stall_days: 3\n  reference_time: 2026-01-01T00:00:00Z\n",
        )
        .unwrap();
        let events = dir.path().join("events.jsonl");
        let mut a = args(Some(&cfg), &events);
        a.quadrants = true;
        a.now = Some("2026-02-01T00:00:00Z");

        let config = resolve_config(&a).unwrap();
        assert!(config.quadrants);
        assert_eq!(config.outcome.stall_days, 3);
        assert_eq!(
            config.outcome.reference_time,
            Some(input::parse_time("2026-02-01T00:00:00Z").unwrap())
        );
    }

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let events = dir.path().join("events.jsonl");
        let config = resolve_config(&args(None, &events)).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn invalid_config_surfaces_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("cfg.json");
        std::fs::write(&cfg, r#"{"fanout":{"window_days":0}}"#).unwrap();
        let events = dir.path().join("events.jsonl");
        std::fs::write(
            &events,
            r#"{"timestamp":"2026-03-01T00:00:00Z","from":"A","thread_id":"t1","type":"open"}"#,
        )
        .unwrap();
        let err = execute(&args(Some(&cfg), &events)).unwrap_err();
        assert!(err.to_string().contains("window_days"));
    }
}
