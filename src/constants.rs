// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLUE_600, GREY, ORANGE, RED};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;

// Font sizes used by the plot framework.
pub const FONT_SIZE_MAIN_TITLE: u32 = 24;
pub const FONT_SIZE_CHART_TITLE: u32 = 18;
pub const FONT_SIZE_AXIS_LABEL: u32 = 14;
pub const FONT_SIZE_LEGEND: u32 = 13;
pub const FONT_SIZE_ANNOTATION: u32 = 14;
pub const FONT_SIZE_MESSAGE: u32 = 20;

// Default acquisition / conditioning parameters. The camera exports at a
// fixed rate; the cutoff sits far below Nyquist to strip GPS and
// accelerometer noise while keeping vehicle-level dynamics.
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 10.0;
pub const DEFAULT_CUTOFF_HZ: f64 = 0.15;
pub const DEFAULT_FILTER_ORDER: usize = 4;

pub const MPS_TO_KPH: f64 = 3.6;

// Mounting calibration defaults (m/s^2 offsets, sign flips).
pub const DEFAULT_ACCEL_LONG_OFFSET: f64 = 0.0;
pub const DEFAULT_ACCEL_LAT_OFFSET: f64 = 0.0;
pub const DEFAULT_INVERT_LONG: bool = false;
pub const DEFAULT_INVERT_LAT: bool = false;

// Event-counting thresholds in m/s^2, applied to |signal|.
pub const ACCEL_LONG_THRESHOLD_LOW: f64 = 2.0;
pub const ACCEL_LONG_THRESHOLD_HIGH: f64 = 4.0;
pub const ACCEL_LAT_THRESHOLD_LOW: f64 = 2.0;
pub const ACCEL_LAT_THRESHOLD_HIGH: f64 = 3.0;
pub const DEFAULT_EVENT_COOLDOWN_SAMPLES: usize = 10;

// X-axis tick layout: candidate ticks sit on whole minutes; candidates
// closer than MIN_TICK_SPACING_SAMPLES samples to the next one are dropped.
pub const TICK_INTERVAL_S: f64 = 60.0;
pub const MIN_TICK_SPACING_SAMPLES: f64 = 580.0;

// Raw camera export column names.
pub const RAW_TIME_COL: &str = "cts";
pub const GPS_SPEED_COL: &str = "GPS (2D) [m/s]";
pub const ACCL_LAT_COL: &str = "1";
pub const ACCL_LONG_COL: &str = "2";

// Merged camera+reference export column names (compare mode input).
pub const RT_SPEED_COL: &str = "vehSpd_RT";
pub const RT_ACCEL_LONG_COL: &str = "accLong_RT";
pub const RT_ACCEL_LAT_COL: &str = "accLat_RT";
pub const CAM_SPEED_COL: &str = "vehSpd_GoPro";
pub const CAM_ACCEL_LONG_COL: &str = "accLong_GoPro";
pub const CAM_ACCEL_LAT_COL: &str = "accLat_GoPro";

// Conditioned column names appended by the pipeline.
pub const VEH_SPEED_FLT_MPS: &str = "veh_speed_flt_m/s";
pub const VEH_SPEED_FLT_KPH: &str = "veh_speed_flt_kph";
pub const ACCEL_LONG_FLT: &str = "accel_long_flt";
pub const ACCEL_LAT_FLT: &str = "accel_lat_flt";
pub const ACCEL_LONG_ADJ: &str = "accel_long_adj";
pub const ACCEL_LAT_ADJ: &str = "accel_lat_adj";
pub const ACCEL_LONG_INV: &str = "accel_long_inv";
pub const ACCEL_LAT_INV: &str = "accel_lat_inv";
pub const ACCEL_FROM_SPEED_FLT: &str = "accel_from_speed_flt";
pub const JERK_FLT: &str = "jerk_flt";

// --- Plot Color Assignments ---
pub const COLOR_SPEED: &RGBColor = &BLUE_600;
pub const COLOR_ACCEL_LONG: &RGBColor = &RED;
pub const COLOR_ACCEL_LAT: &RGBColor = &ORANGE;
pub const COLOR_REFERENCE: &RGBColor = &GREY;
pub const COLOR_THRESHOLD_GUIDE: &RGBColor = &RED;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// Fixed y-limits matching the acceleration threshold bands.
pub const ACCEL_LONG_Y_LIMIT: f64 = 4.1;
pub const ACCEL_LAT_Y_LIMIT: f64 = 3.1;

// src/constants.rs
