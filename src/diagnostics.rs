//! Serializable run report for the driver.
//!
//! Captures the grid statistics before and after filtering and the wall-clock
//! time of each stage so a run can be inspected or compared offline.
use crate::image::PixelGrid;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Timing entry describing a single stage of the run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for the run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.total_ms += elapsed_ms;
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSummary {
    pub width: usize,
    pub height: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl GridSummary {
    pub fn of(grid: &PixelGrid) -> Self {
        let (min, max) = grid.min_max();
        Self {
            width: grid.width(),
            height: grid.height(),
            min,
            max,
            mean: grid.mean(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlurReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub passes: usize,
    pub input_max_value: u16,
    pub output_max_value: u16,
    pub before: GridSummary,
    pub after: GridSummary,
    pub timings: TimingBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_total_accumulates() {
        let mut timings = TimingBreakdown::default();
        timings.push("decode", 1.5);
        timings.push("blur", 10.0);
        assert_eq!(timings.total_ms, 11.5);
        assert_eq!(timings.stage_ms("blur"), Some(10.0));
        assert_eq!(timings.stage_ms("encode"), None);
    }

    #[test]
    fn summary_serializes_camel_case() {
        let grid = PixelGrid::from_vec(2, 1, vec![0.0, 1.0]).unwrap();
        let report = BlurReport {
            input: "in.pgm".into(),
            output: "out.pgm".into(),
            passes: 3,
            input_max_value: 255,
            output_max_value: 65535,
            before: GridSummary::of(&grid),
            after: GridSummary::of(&grid),
            timings: TimingBreakdown::default(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["inputMaxValue"], 255);
        assert_eq!(json["before"]["mean"], 0.5);
        assert_eq!(json["timings"]["totalMs"], 0.0);
    }
}
