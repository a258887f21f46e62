// src/types.rs
// Shared small types and aliases used across the pipeline and plotting code.

use crate::error::PipelineError;

/// Result of one threshold-counting pass over a channel.
///
/// `between` is the number of excursions whose peak stayed between the lower
/// and upper thresholds; `above` is the number whose peak reached the upper
/// threshold. Both operate on the absolute value of the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventCounts {
    pub between: usize,
    pub above: usize,
}

/// Event counts for one channel, tagged with the channel name and the
/// threshold pair they were produced with, for reporting and annotation.
#[derive(Debug, Clone)]
pub struct ChannelEventReport {
    pub channel: String,
    pub threshold_low: f64,
    pub threshold_high: f64,
    pub counts: EventCounts,
}

pub type PipelineResult<T> = Result<T, PipelineError>;

// Plot data: (elapsed seconds, value) pairs per series.
pub type SeriesData = Vec<(f64, f64)>;

// src/types.rs
