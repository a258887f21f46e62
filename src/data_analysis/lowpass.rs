// src/data_analysis/lowpass.rs

use sci_rs::signal::filter::design::{butter_dyn, DigitalFilter, FilterBandType, FilterOutputType};
use sci_rs::signal::filter::sosfiltfilt_dyn;

use crate::error::PipelineError;
use crate::types::PipelineResult;

/// Low-pass filter configuration for one conditioning run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub cutoff_hz: f64,
    pub sample_rate_hz: f64,
    pub order: usize,
}

impl FilterSpec {
    pub fn new(cutoff_hz: f64, sample_rate_hz: f64, order: usize) -> Self {
        FilterSpec {
            cutoff_hz,
            sample_rate_hz,
            order,
        }
    }

    /// Reject unusable filter parameters before any data is touched.
    /// A cutoff at or above Nyquist is a usage error, never clamped.
    pub fn validate(&self) -> PipelineResult<()> {
        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz <= 0.0 {
            return Err(PipelineError::config(format!(
                "sample rate must be positive, got {} Hz",
                self.sample_rate_hz
            )));
        }
        if !self.cutoff_hz.is_finite() || self.cutoff_hz <= 0.0 {
            return Err(PipelineError::config(format!(
                "cutoff frequency must be positive, got {} Hz",
                self.cutoff_hz
            )));
        }
        let nyquist = 0.5 * self.sample_rate_hz;
        if self.cutoff_hz >= nyquist {
            return Err(PipelineError::config(format!(
                "cutoff frequency {} Hz must be below the Nyquist frequency {} Hz",
                self.cutoff_hz, nyquist
            )));
        }
        if self.order == 0 {
            return Err(PipelineError::config("filter order must be at least 1"));
        }
        Ok(())
    }

    /// Number of second-order sections the Butterworth design produces.
    fn sections(&self) -> usize {
        self.order.div_ceil(2)
    }

    /// Shortest input the forward-backward pass can pad reliably. Mirrors
    /// the 3 * (2 * sections + 1) edge extension of the underlying
    /// implementation.
    pub fn min_input_len(&self) -> usize {
        3 * (2 * self.sections() + 1) + 1
    }
}

/// Zero-phase Butterworth low-pass.
///
/// Designs a digital Butterworth low-pass in second-order sections and
/// applies it forward and backward so phase distortion cancels and the
/// output length equals the input length. Output is double precision and
/// bit-identical across calls with the same input and spec.
pub fn butter_lowpass_filtfilt(data: &[f64], spec: &FilterSpec) -> PipelineResult<Vec<f64>> {
    spec.validate()?;

    if data.is_empty() {
        return Err(PipelineError::data("cannot filter an empty channel"));
    }
    if data.len() < spec.min_input_len() {
        return Err(PipelineError::data(format!(
            "channel of {} samples is too short for an order-{} forward-backward filter (need at least {})",
            data.len(),
            spec.order,
            spec.min_input_len()
        )));
    }
    if let Some(bad) = data.iter().find(|v| !v.is_finite()) {
        return Err(PipelineError::data(format!(
            "non-finite sample {bad} in channel passed to the low-pass filter"
        )));
    }

    let filter = butter_dyn(
        spec.order,
        vec![spec.cutoff_hz],
        Some(FilterBandType::Lowpass),
        Some(false),
        Some(FilterOutputType::Sos),
        Some(spec.sample_rate_hz),
    );
    let DigitalFilter::Sos(design) = filter else {
        return Err(PipelineError::config(
            "Butterworth design did not yield second-order sections",
        ));
    };

    Ok(sosfiltfilt_dyn(data.iter(), &design.sos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn spec() -> FilterSpec {
        FilterSpec::new(0.5, 10.0, 4)
    }

    /// Deterministic Gaussian-ish noise via Box-Muller over seeded uniforms.
    fn gaussian_noise(n: usize, sigma: f64, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let u1: f64 = rng.random::<f64>().max(1e-12);
                let u2: f64 = rng.random();
                sigma * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
            })
            .collect()
    }

    #[test]
    fn output_length_matches_input() {
        let data: Vec<f64> = (0..200).map(|i| (i as f64 * 0.1).sin()).collect();
        let out = butter_lowpass_filtfilt(&data, &spec()).unwrap();
        assert_eq!(out.len(), data.len());
    }

    #[test]
    fn filtering_is_deterministic() {
        let data: Vec<f64> = (0..150).map(|i| (i as f64 * 0.3).sin() + 0.2).collect();
        let a = butter_lowpass_filtfilt(&data, &spec()).unwrap();
        let b = butter_lowpass_filtfilt(&data, &spec()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn constant_input_passes_through() {
        let data = vec![3.25; 120];
        let out = butter_lowpass_filtfilt(&data, &spec()).unwrap();
        for v in out {
            assert_abs_diff_eq!(v, 3.25, epsilon = 1e-8);
        }
    }

    #[test]
    fn cutoff_at_nyquist_is_rejected() {
        let data = vec![0.0; 100];
        let bad = FilterSpec::new(5.0, 10.0, 4);
        match butter_lowpass_filtfilt(&data, &bad) {
            Err(PipelineError::Config(_)) => {}
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn short_input_is_rejected() {
        let data = vec![1.0; 8];
        match butter_lowpass_filtfilt(&data, &spec()) {
            Err(PipelineError::Data(_)) => {}
            other => panic!("expected data error, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let mut data = vec![0.5; 100];
        data[40] = f64::NAN;
        assert!(butter_lowpass_filtfilt(&data, &spec()).is_err());
    }

    #[test]
    fn noisy_sinusoid_variance_drops_mean_survives() {
        // 10 Hz speed channel, 200 samples, slow sinusoid plus noise.
        let n = 200;
        let noise = gaussian_noise(n, 0.5, 42);
        let data: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / 10.0;
                10.0 + 2.0 * (2.0 * std::f64::consts::PI * 0.1 * t).sin() + noise[i]
            })
            .collect();
        let out = butter_lowpass_filtfilt(&data, &spec()).unwrap();

        let sample_variance = |xs: &[f64]| {
            xs.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum::<f64>() / (xs.len() - 1) as f64
        };
        assert!(
            sample_variance(&out) < 0.5 * sample_variance(&data),
            "high-frequency energy was not reduced"
        );

        let mean = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len() as f64;
        assert_abs_diff_eq!(mean(&out), mean(&data), epsilon = 0.2);
    }
}

// src/data_analysis/lowpass.rs
