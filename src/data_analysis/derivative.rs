// src/data_analysis/derivative.rs

use crate::data_analysis::lowpass::{butter_lowpass_filtfilt, FilterSpec};
use crate::types::PipelineResult;

/// Discrete derivative of a time series, scaled to per-second units.
///
/// Central differences in the interior, one-sided differences at the first
/// and last sample. The edge fallback is the accepted source of minor
/// boundary error when comparing against reference-instrument data.
pub fn gradient_scaled(data: &[f64], sample_rate_hz: f64) -> Vec<f64> {
    if data.len() < 2 {
        return Vec::new();
    }
    if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
        return Vec::new();
    }

    let fs = sample_rate_hz;
    let mut derivative = Vec::with_capacity(data.len());

    // Forward difference for the first point
    derivative.push((data[1] - data[0]) * fs);

    // Central difference for interior points
    for i in 1..data.len() - 1 {
        derivative.push((data[i + 1] - data[i - 1]) * (0.5 * fs));
    }

    // Backward difference for the last point
    let n = data.len() - 1;
    derivative.push((data[n] - data[n - 1]) * fs);

    derivative
}

/// Acceleration and jerk derived from an already-filtered speed channel.
///
/// Each differentiation amplifies residual noise, so every derived channel
/// is re-filtered with the same spec before the next stage consumes it.
pub fn derived_channels(
    speed_flt: &[f64],
    spec: &FilterSpec,
) -> PipelineResult<(Vec<f64>, Vec<f64>)> {
    let accel_raw = gradient_scaled(speed_flt, spec.sample_rate_hz);
    let accel = butter_lowpass_filtfilt(&accel_raw, spec)?;

    let jerk_raw = gradient_scaled(&accel, spec.sample_rate_hz);
    let jerk = butter_lowpass_filtfilt(&jerk_raw, spec)?;

    Ok((accel, jerk))
}


// src/data_analysis/derivative.rs
