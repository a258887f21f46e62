// src/data_analysis/time_axis.rs

use crate::error::PipelineError;
use crate::types::PipelineResult;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Normalized time index shared by all channels of one dataset.
///
/// Built from the camera's raw millisecond counter column. Each raw tick is
/// converted to seconds-of-day, rendered as a `MM:SS.d` wall label (minute of
/// hour, seconds, truncated tenths), and the elapsed axis is reconstructed
/// from those truncated labels relative to the first sample. Keeping the
/// label truncation in the elapsed values preserves parity with datasets
/// exported through the same formatting.
///
/// The raw counter is expected to be monotonically non-decreasing; the result
/// for out-of-order or duplicate ticks is undefined and callers must
/// pre-validate.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    elapsed_s: Vec<f64>,
    labels: Vec<String>,
}

impl TimeAxis {
    /// Build the axis from a raw millisecond counter column.
    pub fn from_raw_millis(raw_ms: &[f64]) -> PipelineResult<TimeAxis> {
        if raw_ms.is_empty() {
            return Err(PipelineError::data("time column is empty"));
        }

        let mut labels = Vec::with_capacity(raw_ms.len());
        let mut label_seconds = Vec::with_capacity(raw_ms.len());
        for &ms in raw_ms {
            if !ms.is_finite() {
                return Err(PipelineError::data(format!(
                    "non-numeric value in time column: {ms}"
                )));
            }
            let second_of_day = (ms / 1000.0).rem_euclid(SECONDS_PER_DAY);
            let (label, truncated) = format_wall_label(second_of_day);
            labels.push(label);
            label_seconds.push(truncated);
        }

        let first = label_seconds[0];
        let elapsed_s = label_seconds.iter().map(|&s| s - first).collect();

        Ok(TimeAxis { elapsed_s, labels })
    }

    pub fn len(&self) -> usize {
        self.elapsed_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elapsed_s.is_empty()
    }

    /// Elapsed seconds from the first sample, monotonically non-decreasing
    /// for valid input.
    pub fn elapsed_s(&self) -> &[f64] {
        &self.elapsed_s
    }

    /// `MM:SS.d` wall labels, one per sample.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn duration_s(&self) -> f64 {
        *self.elapsed_s.last().unwrap_or(&0.0)
    }
}

/// Format a second-of-day value as `MM:SS.d` and return the value the label
/// round-trips to (whole tenths), which feeds the elapsed axis.
fn format_wall_label(second_of_day: f64) -> (String, f64) {
    // Truncate, not round; the label keeps tenths only.
    let tenths_total = ((second_of_day * 10.0) + 1e-6).floor();
    let truncated = tenths_total / 10.0;

    let minute = ((truncated / 60.0).floor() as u64) % 60;
    let second = (truncated % 60.0).floor() as u64;
    let tenth = (tenths_total as u64) % 10;
    (format!("{minute:02}:{second:02}.{tenth}"), truncated)
}


// src/data_analysis/time_axis.rs
