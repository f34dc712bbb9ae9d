//! Proportional visual encodings for the lab panels.
//!
//! Turns a `LabSnapshot` into the numbers a renderer draws: bar widths,
//! opacities, badge scales and text labels. Nothing here recomputes attention;
//! every quantity is read from the snapshot.

use serde::Serialize;

use crate::snapshot::LabSnapshot;

/// Pixel height of an output bar per unit of output.
pub const OUTPUT_BAR_SCALE: f64 = 80.0;
/// Output bars never shrink below this height.
pub const OUTPUT_BAR_MIN_HEIGHT: f64 = 4.0;
/// Opacity floor of the weight badge.
pub const WEIGHT_BADGE_BASE_OPACITY: f64 = 0.2;
/// Scale of the weight badge at zero weight.
pub const WEIGHT_BADGE_BASE_SCALE: f64 = 0.8;
/// Opacity floor of a record's value panel.
pub const VALUE_PANEL_BASE_OPACITY: f64 = 0.3;

/// Drawing parameters for one memory record row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordEncoding {
    pub id: u32,
    pub label: String,
    /// One cell per key component, opacity equal to the component.
    pub key_opacity: Vec<f64>,
    /// Similarity bar width in percent, `score × 100` clamped to `[0, 100]`.
    pub similarity_percent: f64,
    pub score_label: String,
    /// Attention weight in percent, `weight × 100`.
    pub weight_percent: f64,
    pub weight_label: String,
    pub badge_opacity: f64,
    pub badge_scale: f64,
    pub value_panel_opacity: f64,
    pub value_opacity: Vec<f64>,
}

/// One bar of the context vector panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputBar {
    pub height: f64,
    pub label: String,
}

/// Everything the three lab panels draw for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualEncoding {
    pub query_labels: Vec<String>,
    pub records: Vec<RecordEncoding>,
    pub output_bars: Vec<OutputBar>,
}

impl VisualEncoding {
    pub fn from_snapshot(snapshot: &LabSnapshot) -> Self {
        let query_labels = snapshot.query.iter().map(|q| format!("{:.1}", q)).collect();

        let records = snapshot
            .memory
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let score = snapshot.scores.get(i).copied().unwrap_or(0.0);
                let weight = snapshot.weights.get(i).copied().unwrap_or(0.0);
                RecordEncoding {
                    id: record.id,
                    label: record.label.clone(),
                    key_opacity: record.key.iter().map(|&k| unit_opacity(k)).collect(),
                    similarity_percent: (score * 100.0).clamp(0.0, 100.0),
                    score_label: format!("{:.2}", score),
                    weight_percent: weight * 100.0,
                    weight_label: format!("{:.0}%", weight * 100.0),
                    badge_opacity: unit_opacity(WEIGHT_BADGE_BASE_OPACITY + weight),
                    badge_scale: WEIGHT_BADGE_BASE_SCALE + weight,
                    value_panel_opacity: unit_opacity(VALUE_PANEL_BASE_OPACITY + weight),
                    value_opacity: record.value.iter().map(|&v| unit_opacity(v)).collect(),
                }
            })
            .collect();

        let output_bars = snapshot
            .output
            .iter()
            .map(|&v| OutputBar {
                height: (v * OUTPUT_BAR_SCALE).max(OUTPUT_BAR_MIN_HEIGHT),
                label: format!("{:.2}", v),
            })
            .collect();

        Self {
            query_labels,
            records,
            output_bars,
        }
    }
}

// NaN maps to transparent.
fn unit_opacity(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}
