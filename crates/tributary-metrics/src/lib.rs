//! Organizational interaction metrics over an in-memory event log.
//!
//! Every analyzer is a pure function of `(events, options)`; nothing is
//! cached between calls. [`analyze`] runs them all over one log.

pub mod cadence;
pub mod downstream;
pub mod entropy;
pub mod error;
pub mod fanout;
pub mod flow;
pub mod options;
pub mod quadrant;
pub mod report;
pub mod stats;

pub use cadence::{analyze_cadence, CadencePair};
pub use downstream::{analyze_downstream, DownstreamPair};
pub use entropy::{analyze_entropy, EntropyMetric, EntropyReport};
pub use error::ConfigError;
pub use fanout::{analyze_fanout, FanoutMetric, FanoutTrend};
pub use flow::{analyze_flow, FlowMetric, FlowReport};
pub use options::{
    AnalysisConfig, BinWidth, CadenceOptions, DownstreamOptions, FanoutOptions, FlowOptions,
};
pub use quadrant::{classify_quadrants, EntityClassification, Quadrant, QuadrantReport};
pub use report::{analyze, AnalysisReport, ReportMeta};
pub use tributary_core::OutcomeOptions;
