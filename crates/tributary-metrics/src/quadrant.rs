//! Flow/entropy quadrants relative to the population medians.
//!
//! Thresholds are the medians of the current population, so adding or
//! removing one entity can move others across a boundary. Results are only
//! comparable within a single run.

use crate::entropy::EntropyMetric;
use crate::flow::FlowMetric;
use crate::stats::median;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// High flow, predictable outcomes.
    River,
    /// High flow, scattered outcomes.
    Waterfall,
    /// Low flow, predictable outcomes.
    Bottleneck,
    /// Low flow, scattered outcomes.
    Swamp,
}

impl Quadrant {
    pub fn classify(flow: f64, entropy: f64, flow_median: f64, entropy_median: f64) -> Self {
        match (flow >= flow_median, entropy < entropy_median) {
            (true, true) => Self::River,
            (true, false) => Self::Waterfall,
            (false, true) => Self::Bottleneck,
            (false, false) => Self::Swamp,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::River => write!(f, "river"),
            Self::Waterfall => write!(f, "waterfall"),
            Self::Bottleneck => write!(f, "bottleneck"),
            Self::Swamp => write!(f, "swamp"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityClassification {
    pub entity: String,
    pub quadrant: Quadrant,
    pub flow_rate: f64,
    pub entropy: f64,
}

/// Thresholds used and how many entities landed in each quadrant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuadrantSummary {
    /// Median of `ln(1 + flow_rate)`.
    pub flow_median: f64,
    pub entropy_median: f64,
    pub river: usize,
    pub waterfall: usize,
    pub bottleneck: usize,
    pub swamp: usize,
}

impl QuadrantSummary {
    pub fn total(&self) -> usize {
        self.river + self.waterfall + self.bottleneck + self.swamp
    }

    fn count(&mut self, q: Quadrant) {
        match q {
            Quadrant::River => self.river += 1,
            Quadrant::Waterfall => self.waterfall += 1,
            Quadrant::Bottleneck => self.bottleneck += 1,
            Quadrant::Swamp => self.swamp += 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuadrantReport {
    pub entities: Vec<EntityClassification>,
    pub summary: QuadrantSummary,
}

/// Join flow and entropy by entity and split at the medians.
///
/// Entities missing from either input, or with zero flow rate and zero
/// entropy, are not classified. Flow is compared on a `ln_1p` scale. Output
/// follows the order of `flow`.
pub fn classify_quadrants(flow: &[FlowMetric], entropy: &[EntropyMetric]) -> QuadrantReport {
    let entropy_of: HashMap<&str, f64> = entropy
        .iter()
        .map(|m| (m.entity.as_str(), m.entropy))
        .collect();

    let eligible: Vec<(&str, f64, f64)> = flow
        .iter()
        .filter_map(|f| {
            let e = *entropy_of.get(f.entity.as_str())?;
            (f.flow_rate > 0.0 || e > 0.0).then_some((f.entity.as_str(), f.flow_rate, e))
        })
        .collect();

    let log_flows: Vec<f64> = eligible.iter().map(|&(_, f, _)| f.ln_1p()).collect();
    let entropies: Vec<f64> = eligible.iter().map(|&(_, _, e)| e).collect();
    let flow_median = median(&log_flows).unwrap_or(0.0);
    let entropy_median = median(&entropies).unwrap_or(0.0);

    let mut summary = QuadrantSummary {
        flow_median,
        entropy_median,
        ..Default::default()
    };
    let entities: Vec<EntityClassification> = eligible
        .iter()
        .zip(&log_flows)
        .map(|(&(entity, flow_rate, entropy), &log_flow)| {
            let quadrant = Quadrant::classify(log_flow, entropy, flow_median, entropy_median);
            summary.count(quadrant);
            EntityClassification {
                entity: entity.to_string(),
                quadrant,
                flow_rate,
                entropy,
            }
        })
        .collect();

    tracing::debug!(
        classified = entities.len(),
        flow_median,
        entropy_median,
        "quadrants computed"
    );
    QuadrantReport { entities, summary }
}
