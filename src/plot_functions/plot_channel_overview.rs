// src/plot_functions/plot_channel_overview.rs

use std::error::Error;

use crate::constants::{
    ACCEL_LAT_INV, ACCEL_LAT_Y_LIMIT, ACCEL_LONG_INV, ACCEL_LONG_Y_LIMIT, COLOR_ACCEL_LAT,
    COLOR_ACCEL_LONG, COLOR_SPEED, LINE_WIDTH_PLOT, VEH_SPEED_FLT_KPH,
};
use crate::data_analysis::pipeline::{tick_marks, PipelineConfig};
use crate::data_input::sensor_data::DataTable;
use crate::plot_framework::{draw_stacked_panels, series_value_range, PanelConfig, PlotSeries};
use crate::types::ChannelEventReport;

fn series_from_column(
    table: &DataTable,
    column: &str,
    label: &str,
    color: plotters::style::RGBColor,
) -> Result<PlotSeries, Box<dyn Error>> {
    let values = table.column(column)?;
    let data = table
        .time()
        .elapsed_s()
        .iter()
        .copied()
        .zip(values.iter().copied())
        .collect();
    Ok(PlotSeries {
        data,
        label: label.to_string(),
        color,
        stroke_width: LINE_WIDTH_PLOT,
    })
}

fn annotation_for(report: &ChannelEventReport) -> String {
    format!(
        "{}:\n{} times between {}m/s² and {}m/s²\n{} times above {}m/s²",
        report.channel,
        report.counts.between,
        report.threshold_low,
        report.threshold_high,
        report.counts.above,
        report.threshold_high
    )
}

/// Render the conditioned recording overview: filtered speed in km/h on top,
/// then the calibrated longitudinal and lateral acceleration with their
/// threshold guides and event-count annotations.
pub fn plot_channel_overview(
    table: &DataTable,
    reports: &[ChannelEventReport],
    config: &PipelineConfig,
    root_name: &str,
    output_filename: &str,
) -> Result<(), Box<dyn Error>> {
    let speed_series = series_from_column(table, VEH_SPEED_FLT_KPH, VEH_SPEED_FLT_KPH, *COLOR_SPEED)?;
    let long_series = series_from_column(table, ACCEL_LONG_INV, ACCEL_LONG_INV, *COLOR_ACCEL_LONG)?;
    let lat_series = series_from_column(table, ACCEL_LAT_INV, ACCEL_LAT_INV, *COLOR_ACCEL_LAT)?;

    let long_report = reports.iter().find(|r| r.channel == "Accel_Long");
    let lat_report = reports.iter().find(|r| r.channel == "Accel_Lat");

    let (speed_min, speed_max) = series_value_range(std::slice::from_ref(&speed_series));

    let long_guides = long_report
        .map(|r| vec![r.threshold_low, -r.threshold_low, r.threshold_high, -r.threshold_high])
        .unwrap_or_default();
    let lat_guides = lat_report
        .map(|r| vec![r.threshold_low, -r.threshold_low, r.threshold_high, -r.threshold_high])
        .unwrap_or_default();

    let panels = vec![
        PanelConfig {
            title: format!("{VEH_SPEED_FLT_KPH} (kph)"),
            y_label: "kph".to_string(),
            y_range: speed_min..speed_max,
            series: vec![speed_series],
            guide_lines: Vec::new(),
            annotation: None,
        },
        PanelConfig {
            title: format!("{ACCEL_LONG_INV} (m/s²)"),
            y_label: "m/s²".to_string(),
            y_range: -ACCEL_LONG_Y_LIMIT..ACCEL_LONG_Y_LIMIT,
            series: vec![long_series],
            guide_lines: long_guides,
            annotation: long_report.map(annotation_for),
        },
        PanelConfig {
            title: format!("{ACCEL_LAT_INV} (m/s²)"),
            y_label: "m/s²".to_string(),
            y_range: -ACCEL_LAT_Y_LIMIT..ACCEL_LAT_Y_LIMIT,
            series: vec![lat_series],
            guide_lines: lat_guides,
            annotation: lat_report.map(annotation_for),
        },
    ];

    let marks = tick_marks(table.time(), config);
    let tick_positions: Vec<f64> = marks.iter().map(|m| m.elapsed_s).collect();
    let x_range = 0.0..table.time().duration_s().max(1e-3);

    draw_stacked_panels(output_filename, root_name, x_range, &tick_positions, &panels)
}

// src/plot_functions/plot_channel_overview.rs
