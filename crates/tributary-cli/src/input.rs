//! Event log and config loading.

use anyhow::{bail, Context};
use std::io::BufRead;
use std::path::Path;
use tributary_core::InteractionEvent;
use tributary_metrics::AnalysisConfig;

/// Read a JSONL event log (one `InteractionEvent` per line; blank lines skipped).
pub fn load_events(path: &Path) -> anyhow::Result<Vec<InteractionEvent>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("cannot open event log {}", path.display()))?;
    let reader = std::io::BufReader::new(file);
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: InteractionEvent = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed event", path.display(), idx + 1))?;
        events.push(event);
    }
    tracing::debug!(events = events.len(), path = %path.display(), "event log loaded");
    Ok(events)
}

/// Read an `AnalysisConfig` from YAML (`.yaml`/`.yml`) or JSON (`.json`).
pub fn load_config(path: &Path) -> anyhow::Result<AnalysisConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    let config: AnalysisConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML config {}", path.display()))?,
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON config {}", path.display()))?,
        _ => bail!(
            "unsupported config format: {} (expected .yaml, .yml or .json)",
            path.display()
        ),
    };
    Ok(config)
}

/// Parse an RFC 3339 timestamp from the command line.
pub fn parse_time(s: &str) -> anyhow::Result<time::OffsetDateTime> {
    time::OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339)
        .with_context(|| format!("invalid RFC 3339 timestamp: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tributary_core::EventType;
    use tributary_metrics::BinWidth;

    #[test]
    fn loads_jsonl_skipping_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"timestamp":"2026-03-01T00:00:00Z","from":"A","thread_id":"t1","type":"open"}"#,
                "\n\n",
                r#"{"timestamp":"2026-03-01T00:00:05Z","from":"A","thread_id":"t1","type":"close"}"#,
                "\n",
            ),
        )
        .unwrap();
        let events = load_events(&path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].event_type, EventType::Close);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"timestamp":"2026-03-01T00:00:00Z","from":"A","thread_id":"t1","type":"open"}"#,
                "\n",
                r#"{"from":"A","thread_id":"t1","type":"close"}"#,
                "\n",
            ),
        )
        .unwrap();
        let err = load_events(&path).unwrap_err();
        assert!(format!("{err:#}").contains(":2: malformed event"));
    }

    #[test]
    fn missing_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_events(&dir.path().join("nope.jsonl")).is_err());
    }

    #[test]
    fn yaml_and_json_configs() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("cfg.yaml");
        std::fs::write(&yaml, "cadence:\n  bin: weekly\nquadrants: true\n").unwrap();
        let cfg = load_config(&yaml).unwrap();
        assert_eq!(cfg.cadence.bin, BinWidth::Weekly);
        assert!(cfg.quadrants);

        let json = dir.path().join("cfg.json");
        std::fs::write(&json, r#"{"downstream":{"min_interactions":5}}"#).unwrap();
        let cfg = load_config(&json).unwrap();
        assert_eq!(cfg.downstream.min_interactions, 5);
    }

    #[test]
    fn unknown_config_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }

    #[test]
    fn parses_rfc3339() {
        assert!(parse_time("2026-03-01T00:00:00Z").is_ok());
        assert!(parse_time("yesterday").is_err());
    }
}
