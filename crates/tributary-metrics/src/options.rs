//! Per-analyzer option structs and the bundled [`AnalysisConfig`].
//!
//! Every field has a default, so an empty YAML/JSON document is a valid config.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use time::Duration;
use tributary_core::{OutcomeOptions, TimeWindow};

pub const DEFAULT_MIN_EVENTS: usize = 20;
pub const DEFAULT_MIN_SHARED_THREADS: usize = 3;
pub const DEFAULT_MIN_INTERACTIONS: usize = 3;
pub const DEFAULT_FANOUT_WINDOW_DAYS: i64 = 14;
pub const DEFAULT_FANOUT_STEP_DAYS: i64 = 7;
/// Upper bound for every day-valued option (about a century).
pub const MAX_DAYS: i64 = 36_525;

fn days(n: i64) -> Duration {
    Duration::seconds(n.saturating_mul(86_400))
}

// ── Flow ──

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlowOptions {
    /// Analysis window. `None` spans the whole log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
}

// ── Cadence ──

/// Width of one activity bucket.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BinWidth {
    #[default]
    Daily,
    Weekly,
}

impl BinWidth {
    pub fn duration(self) -> Duration {
        match self {
            Self::Daily => Duration::days(1),
            Self::Weekly => Duration::weeks(1),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CadenceOptions {
    pub bin: BinWidth,
    /// Actors with fewer events are not correlated at all.
    pub min_events: usize,
    /// Pairs sharing fewer threads are skipped.
    pub min_shared_threads: usize,
}

impl Default for CadenceOptions {
    fn default() -> Self {
        Self {
            bin: BinWidth::Daily,
            min_events: DEFAULT_MIN_EVENTS,
            min_shared_threads: DEFAULT_MIN_SHARED_THREADS,
        }
    }
}

// ── Downstream ──

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DownstreamOptions {
    pub min_interactions: usize,
}

impl Default for DownstreamOptions {
    fn default() -> Self {
        Self {
            min_interactions: DEFAULT_MIN_INTERACTIONS,
        }
    }
}

// ── Fan-out ──

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FanoutOptions {
    pub window_days: i64,
    pub step_days: i64,
}

impl Default for FanoutOptions {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_FANOUT_WINDOW_DAYS,
            step_days: DEFAULT_FANOUT_STEP_DAYS,
        }
    }
}

impl FanoutOptions {
    pub fn window(&self) -> Duration {
        days(self.window_days)
    }

    pub fn step(&self) -> Duration {
        days(self.step_days)
    }
}

// ── Bundle ──

/// Options for a full pipeline run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub outcome: OutcomeOptions,
    pub flow: FlowOptions,
    pub cadence: CadenceOptions,
    pub downstream: DownstreamOptions,
    pub fanout: FanoutOptions,
    /// Include the flow/entropy quadrant classification.
    pub quadrants: bool,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.outcome.stall_days < 0 {
            return Err(ConfigError::Negative {
                field: "outcome.stall_days",
                value: self.outcome.stall_days,
            });
        }
        if self.fanout.window_days <= 0 {
            return Err(ConfigError::NotPositive {
                field: "fanout.window_days",
                value: self.fanout.window_days,
            });
        }
        if self.fanout.step_days <= 0 {
            return Err(ConfigError::NotPositive {
                field: "fanout.step_days",
                value: self.fanout.step_days,
            });
        }
        for (field, value) in [
            ("outcome.stall_days", self.outcome.stall_days),
            ("fanout.window_days", self.fanout.window_days),
            ("fanout.step_days", self.fanout.step_days),
        ] {
            if value > MAX_DAYS {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    max: MAX_DAYS,
                });
            }
        }
        if let Some(w) = self.flow.window {
            if w.start > w.end {
                return Err(ConfigError::InvertedWindow {
                    start: w.start.to_string(),
                    end: w.end.to_string(),
                });
            }
        }
        Ok(())
    }
}
