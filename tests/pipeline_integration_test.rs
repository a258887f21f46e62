// tests/pipeline_integration_test.rs

use motioncam_csv_render::constants::{
    ACCEL_FROM_SPEED_FLT, ACCEL_LAT_INV, ACCEL_LONG_FLT, ACCEL_LONG_INV, ACCL_LAT_COL,
    ACCL_LONG_COL, GPS_SPEED_COL, JERK_FLT, VEH_SPEED_FLT_KPH, VEH_SPEED_FLT_MPS,
};
use motioncam_csv_render::data_analysis::pipeline::{condition_table, PipelineConfig};
use motioncam_csv_render::data_analysis::time_axis::TimeAxis;
use motioncam_csv_render::data_input::sensor_data::DataTable;

/// 10 Hz table with constant speed and a longitudinal channel holding two
/// sustained excursions: one mid-band (3 m/s²), one hard (5 m/s²).
fn synthetic_table(n: usize) -> DataTable {
    let raw_ms: Vec<f64> = (0..n).map(|i| i as f64 * 100.0).collect();
    let mut table = DataTable::new(TimeAxis::from_raw_millis(&raw_ms).unwrap());

    let speed = vec![10.0; n];

    let mut accel_long = vec![0.0; n];
    for v in accel_long.iter_mut().take(110).skip(50) {
        *v = 3.0;
    }
    for v in accel_long.iter_mut().take(280).skip(220) {
        *v = 5.0;
    }

    let accel_lat = vec![0.0; n];

    table.add_column(GPS_SPEED_COL, speed).unwrap();
    table.add_column(ACCL_LAT_COL, accel_lat).unwrap();
    table.add_column(ACCL_LONG_COL, accel_long).unwrap();
    table
}

/// A gentler cutoff than the road default so the short synthetic excursions
/// survive filtering with their plateaus intact.
fn test_config() -> PipelineConfig {
    PipelineConfig {
        cutoff_hz: 1.0,
        ..PipelineConfig::default()
    }
}

#[test]
fn conditioning_appends_all_output_columns() {
    let mut table = synthetic_table(400);
    let config = test_config();
    condition_table(&mut table, &config).unwrap();

    for column in [
        VEH_SPEED_FLT_MPS,
        VEH_SPEED_FLT_KPH,
        ACCEL_LONG_FLT,
        ACCEL_LONG_INV,
        ACCEL_LAT_INV,
        ACCEL_FROM_SPEED_FLT,
        JERK_FLT,
    ] {
        let values = table.column(column).unwrap();
        assert_eq!(values.len(), 400, "column '{column}' has the wrong length");
    }

    // Ingested channels stay untouched; conditioning only appends.
    assert_eq!(table.column(GPS_SPEED_COL).unwrap(), &vec![10.0; 400][..]);
}

#[test]
fn constant_speed_yields_flat_derived_channels() {
    let mut table = synthetic_table(400);
    condition_table(&mut table, &test_config()).unwrap();

    for &kph in table.column(VEH_SPEED_FLT_KPH).unwrap() {
        assert!((kph - 36.0).abs() < 1e-6, "expected 36 kph, got {kph}");
    }
    for &a in table.column(ACCEL_FROM_SPEED_FLT).unwrap() {
        assert!(a.abs() < 1e-6, "expected zero derived acceleration, got {a}");
    }
    for &j in table.column(JERK_FLT).unwrap() {
        assert!(j.abs() < 1e-6, "expected zero jerk, got {j}");
    }
}

#[test]
fn event_counts_classify_the_two_excursions() {
    let mut table = synthetic_table(400);
    let reports = condition_table(&mut table, &test_config()).unwrap();

    let long = reports.iter().find(|r| r.channel == "Accel_Long").unwrap();
    assert_eq!(long.counts.between, 1, "mid-band excursion miscounted");
    assert_eq!(long.counts.above, 1, "hard excursion miscounted");

    let lat = reports.iter().find(|r| r.channel == "Accel_Lat").unwrap();
    assert_eq!(lat.counts.between, 0);
    assert_eq!(lat.counts.above, 0);
}

#[test]
fn conditioning_is_deterministic() {
    let mut first = synthetic_table(400);
    let mut second = synthetic_table(400);
    let config = test_config();

    condition_table(&mut first, &config).unwrap();
    condition_table(&mut second, &config).unwrap();

    assert_eq!(
        first.column(ACCEL_LONG_FLT).unwrap(),
        second.column(ACCEL_LONG_FLT).unwrap()
    );
    assert_eq!(first.column(JERK_FLT).unwrap(), second.column(JERK_FLT).unwrap());
}

#[test]
fn missing_input_column_aborts_without_partial_output() {
    let raw_ms: Vec<f64> = (0..100).map(|i| i as f64 * 100.0).collect();
    let mut table = DataTable::new(TimeAxis::from_raw_millis(&raw_ms).unwrap());
    table.add_column(GPS_SPEED_COL, vec![10.0; 100]).unwrap();

    let before = table.columns().len();
    assert!(condition_table(&mut table, &test_config()).is_err());
    assert_eq!(table.columns().len(), before, "partial output was appended");
}

#[test]
fn too_short_recording_is_a_data_error() {
    let raw_ms: Vec<f64> = (0..8).map(|i| i as f64 * 100.0).collect();
    let mut table = DataTable::new(TimeAxis::from_raw_millis(&raw_ms).unwrap());
    table.add_column(GPS_SPEED_COL, vec![10.0; 8]).unwrap();
    table.add_column(ACCL_LAT_COL, vec![0.0; 8]).unwrap();
    table.add_column(ACCL_LONG_COL, vec![0.0; 8]).unwrap();

    assert!(condition_table(&mut table, &test_config()).is_err());
}

// tests/pipeline_integration_test.rs
