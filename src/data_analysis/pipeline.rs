// src/data_analysis/pipeline.rs

use log::debug;

use crate::constants::*;
use crate::data_analysis::derivative::derived_channels;
use crate::data_analysis::lowpass::{butter_lowpass_filtfilt, FilterSpec};
use crate::data_analysis::signal_adjust::{adjust_offset, invert_signal};
use crate::data_analysis::threshold_events::{count_between_and_above, ThresholdSpec};
use crate::data_analysis::tick_filter::interval_filter;
use crate::data_analysis::time_axis::TimeAxis;
use crate::data_input::sensor_data::DataTable;
use crate::data_input::settings::Settings;
use crate::types::{ChannelEventReport, PipelineResult};

/// Full configuration surface of one conditioning run. Every stage reads
/// from this object; there is no process-wide state.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub sample_rate_hz: f64,
    pub cutoff_hz: f64,
    pub filter_order: usize,
    pub accel_long_offset: f64,
    pub accel_lat_offset: f64,
    pub invert_long: bool,
    pub invert_lat: bool,
    pub accel_long_thresholds: ThresholdSpec,
    pub accel_lat_thresholds: ThresholdSpec,
    pub tick_interval_s: f64,
    pub min_tick_spacing_samples: f64,
    pub speed_col: String,
    pub accel_long_col: String,
    pub accel_lat_col: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            filter_order: DEFAULT_FILTER_ORDER,
            accel_long_offset: DEFAULT_ACCEL_LONG_OFFSET,
            accel_lat_offset: DEFAULT_ACCEL_LAT_OFFSET,
            invert_long: DEFAULT_INVERT_LONG,
            invert_lat: DEFAULT_INVERT_LAT,
            accel_long_thresholds: ThresholdSpec::new(
                ACCEL_LONG_THRESHOLD_LOW,
                ACCEL_LONG_THRESHOLD_HIGH,
                DEFAULT_EVENT_COOLDOWN_SAMPLES,
            ),
            accel_lat_thresholds: ThresholdSpec::new(
                ACCEL_LAT_THRESHOLD_LOW,
                ACCEL_LAT_THRESHOLD_HIGH,
                DEFAULT_EVENT_COOLDOWN_SAMPLES,
            ),
            tick_interval_s: TICK_INTERVAL_S,
            min_tick_spacing_samples: MIN_TICK_SPACING_SAMPLES,
            speed_col: GPS_SPEED_COL.to_string(),
            accel_long_col: ACCL_LONG_COL.to_string(),
            accel_lat_col: ACCL_LAT_COL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by a loaded settings file.
    pub fn from_settings(settings: &Settings) -> Self {
        PipelineConfig {
            cutoff_hz: settings.cutoff_freq,
            filter_order: settings.atten_order,
            accel_long_offset: settings.accel_long_offset,
            accel_lat_offset: settings.accel_lat_offset,
            invert_long: settings.invert_flag_long,
            invert_lat: settings.invert_flag_lat,
            ..PipelineConfig::default()
        }
    }

    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec::new(self.cutoff_hz, self.sample_rate_hz, self.filter_order)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        self.filter_spec().validate()
    }
}

/// Run the conditioning pipeline over a merged camera table.
///
/// Appends the filtered, unit-converted, derived, and calibration-adjusted
/// columns to the table and returns the event-count report for both
/// acceleration channels. Configuration and column presence are validated
/// before anything is computed, and all output columns are computed before
/// any is appended, so a failed run leaves the table untouched.
pub fn condition_table(
    table: &mut DataTable,
    config: &PipelineConfig,
) -> PipelineResult<Vec<ChannelEventReport>> {
    config.validate()?;
    table.require_columns(&[
        config.speed_col.as_str(),
        config.accel_long_col.as_str(),
        config.accel_lat_col.as_str(),
    ])?;

    let spec = config.filter_spec();

    let speed_flt = butter_lowpass_filtfilt(table.column(&config.speed_col)?, &spec)?;
    let accel_long_flt = butter_lowpass_filtfilt(table.column(&config.accel_long_col)?, &spec)?;
    let accel_lat_flt = butter_lowpass_filtfilt(table.column(&config.accel_lat_col)?, &spec)?;

    // Unit conversion only, not a filtering step.
    let speed_flt_kph: Vec<f64> = speed_flt.iter().map(|v| v * MPS_TO_KPH).collect();

    let (accel_from_speed, jerk) = derived_channels(&speed_flt, &spec)?;

    let accel_long_adj = adjust_offset(&accel_long_flt, config.accel_long_offset);
    let accel_lat_adj = adjust_offset(&accel_lat_flt, config.accel_lat_offset);
    let accel_long_inv = invert_signal(&accel_long_adj, config.invert_long);
    let accel_lat_inv = invert_signal(&accel_lat_adj, config.invert_lat);

    let reports = vec![
        ChannelEventReport {
            channel: "Accel_Long".to_string(),
            threshold_low: config.accel_long_thresholds.lower,
            threshold_high: config.accel_long_thresholds.upper,
            counts: count_between_and_above(&accel_long_inv, &config.accel_long_thresholds),
        },
        ChannelEventReport {
            channel: "Accel_Lat".to_string(),
            threshold_low: config.accel_lat_thresholds.lower,
            threshold_high: config.accel_lat_thresholds.upper,
            counts: count_between_and_above(&accel_lat_inv, &config.accel_lat_thresholds),
        },
    ];

    debug!(
        "conditioned {} samples: long events {:?}, lat events {:?}",
        table.len(),
        reports[0].counts,
        reports[1].counts
    );

    table.add_column(VEH_SPEED_FLT_MPS, speed_flt)?;
    table.add_column(VEH_SPEED_FLT_KPH, speed_flt_kph)?;
    table.add_column(ACCEL_LONG_FLT, accel_long_flt)?;
    table.add_column(ACCEL_LAT_FLT, accel_lat_flt)?;
    table.add_column(ACCEL_LONG_ADJ, accel_long_adj)?;
    table.add_column(ACCEL_LAT_ADJ, accel_lat_adj)?;
    table.add_column(ACCEL_LONG_INV, accel_long_inv)?;
    table.add_column(ACCEL_LAT_INV, accel_lat_inv)?;
    table.add_column(ACCEL_FROM_SPEED_FLT, accel_from_speed)?;
    table.add_column(JERK_FLT, jerk)?;

    Ok(reports)
}

/// Condition one source (camera or reference) of an already-merged
/// comparison table: appends `<col>_flt` for the three given columns.
pub fn condition_source(
    table: &mut DataTable,
    speed_col: &str,
    accel_long_col: &str,
    accel_lat_col: &str,
    spec: &FilterSpec,
) -> PipelineResult<()> {
    spec.validate()?;
    table.require_columns(&[speed_col, accel_long_col, accel_lat_col])?;

    let speed_flt = butter_lowpass_filtfilt(table.column(speed_col)?, spec)?;
    let long_flt = butter_lowpass_filtfilt(table.column(accel_long_col)?, spec)?;
    let lat_flt = butter_lowpass_filtfilt(table.column(accel_lat_col)?, spec)?;

    table.add_column(&format!("{speed_col}_flt"), speed_flt)?;
    table.add_column(&format!("{accel_long_col}_flt"), long_flt)?;
    table.add_column(&format!("{accel_lat_col}_flt"), lat_flt)?;
    Ok(())
}

/// Apply mounting calibration to the camera side of a comparison table:
/// offset (`<col>_off`) then optional sign flip (`<col>_inv`), both derived
/// from the filtered camera acceleration columns. The reference instrument
/// is trusted as-is and gets no calibration.
pub fn calibrate_comparison_camera(
    table: &mut DataTable,
    config: &PipelineConfig,
) -> PipelineResult<()> {
    let channels = [
        (CAM_ACCEL_LONG_COL, config.accel_long_offset, config.invert_long),
        (CAM_ACCEL_LAT_COL, config.accel_lat_offset, config.invert_lat),
    ];

    for (col, offset, invert) in channels {
        let flt = table.column(&format!("{col}_flt"))?.to_vec();
        let adjusted = adjust_offset(&flt, offset);
        let inverted = invert_signal(&adjusted, invert);
        table.add_column(&format!("{col}_off"), adjusted)?;
        table.add_column(&format!("{col}_inv"), inverted)?;
    }
    Ok(())
}

/// One rendered x-axis tick: elapsed position plus its mm:ss label.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMark {
    pub elapsed_s: f64,
    pub label: String,
}

/// Sample indices whose elapsed time sits on a whole multiple of
/// `interval_s`. Indices, not seconds: the spacing filter below works in
/// sample units.
pub fn tick_candidate_indices(time: &TimeAxis, interval_s: f64) -> Vec<f64> {
    if interval_s <= 0.0 {
        return Vec::new();
    }
    let mut candidates = Vec::new();
    for (i, &t) in time.elapsed_s().iter().enumerate() {
        let remainder = t.rem_euclid(interval_s);
        if remainder < 1e-6 || (interval_s - remainder) < 1e-6 {
            candidates.push(i as f64);
        }
    }
    candidates
}

/// Tick positions for rendering: whole-minute candidates thinned so kept
/// ticks are at least `min_tick_spacing_samples` apart, each labeled mm:ss.
pub fn tick_marks(time: &TimeAxis, config: &PipelineConfig) -> Vec<TickMark> {
    let candidates = tick_candidate_indices(time, config.tick_interval_s);
    let kept = interval_filter(&candidates, config.min_tick_spacing_samples);

    let elapsed = time.elapsed_s();
    kept.iter()
        .filter_map(|&idx| elapsed.get(idx as usize))
        .map(|&t| TickMark {
            elapsed_s: t,
            label: format_minutes_seconds(t),
        })
        .collect()
}

/// Format elapsed seconds as `mm:ss` for axis labels.
pub fn format_minutes_seconds(elapsed_s: f64) -> String {
    let total = elapsed_s.max(0.0).round() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_hz_axis(n: usize) -> TimeAxis {
        let raw: Vec<f64> = (0..n).map(|i| i as f64 * 100.0).collect();
        TimeAxis::from_raw_millis(&raw).unwrap()
    }

    #[test]
    fn tick_candidates_land_on_whole_minutes() {
        // 0..=120 s at 10 Hz
        let time = ten_hz_axis(1201);
        let candidates = tick_candidate_indices(&time, 60.0);
        assert_eq!(candidates, vec![0.0, 600.0, 1200.0]);
    }

    #[test]
    fn tick_marks_are_thinned_and_labeled() {
        let time = ten_hz_axis(1201);
        let config = PipelineConfig::default();
        let marks = tick_marks(&time, &config);
        let labels: Vec<&str> = marks.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["00:00", "01:00", "02:00"]);
    }

    #[test]
    fn format_rolls_over_minutes() {
        assert_eq!(format_minutes_seconds(0.0), "00:00");
        assert_eq!(format_minutes_seconds(75.0), "01:15");
        assert_eq!(format_minutes_seconds(600.0), "10:00");
    }

    #[test]
    fn invalid_cutoff_fails_before_touching_the_table() {
        let mut table = DataTable::new(ten_hz_axis(100));
        table
            .add_column(GPS_SPEED_COL, vec![1.0; 100])
            .unwrap();
        let config = PipelineConfig {
            cutoff_hz: 9.0,
            ..PipelineConfig::default()
        };
        assert!(condition_table(&mut table, &config).is_err());
        assert_eq!(table.columns().len(), 1);
    }
}

// src/data_analysis/pipeline.rs
