// src/plot_functions/plot_comparison.rs

use std::error::Error;

use crate::constants::{
    ACCEL_LAT_Y_LIMIT, ACCEL_LONG_Y_LIMIT, CAM_ACCEL_LAT_COL, CAM_ACCEL_LONG_COL, CAM_SPEED_COL,
    COLOR_ACCEL_LAT, COLOR_ACCEL_LONG, COLOR_REFERENCE, COLOR_SPEED, LINE_WIDTH_PLOT,
    RT_ACCEL_LAT_COL, RT_ACCEL_LONG_COL, RT_SPEED_COL,
};
use crate::data_analysis::pipeline::{tick_marks, PipelineConfig};
use crate::data_input::sensor_data::DataTable;
use crate::plot_framework::{draw_stacked_panels, series_value_range, PanelConfig, PlotSeries};

fn series(
    table: &DataTable,
    column: &str,
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
        label: column.to_string(),
        color,
        stroke_width: LINE_WIDTH_PLOT,
    })
}

/// Camera-vs-reference comparison figure.
///
/// Three pairs twice over: the conditioned camera channel against the raw
/// reference channel, then against the filtered reference channel, for
/// speed and both acceleration axes. Acceleration panels share the fixed
/// limits used everywhere else so excursions stay comparable by eye.
pub fn plot_comparison(
    table: &DataTable,
    config: &PipelineConfig,
    root_name: &str,
    output_filename: &str,
) -> Result<(), Box<dyn Error>> {
    let cam_speed_flt = format!("{CAM_SPEED_COL}_flt");
    let cam_long_inv = format!("{CAM_ACCEL_LONG_COL}_inv");
    let cam_lat_inv = format!("{CAM_ACCEL_LAT_COL}_inv");
    let rt_speed_flt = format!("{RT_SPEED_COL}_flt");
    let rt_long_flt = format!("{RT_ACCEL_LONG_COL}_flt");
    let rt_lat_flt = format!("{RT_ACCEL_LAT_COL}_flt");

    let speed_pairs = [
        (cam_speed_flt.clone(), RT_SPEED_COL.to_string()),
        (cam_speed_flt, rt_speed_flt),
    ];
    let long_pairs = [
        (cam_long_inv.clone(), RT_ACCEL_LONG_COL.to_string()),
        (cam_long_inv, rt_long_flt),
    ];
    let lat_pairs = [
        (cam_lat_inv.clone(), RT_ACCEL_LAT_COL.to_string()),
        (cam_lat_inv, rt_lat_flt),
    ];

    let mut panels = Vec::with_capacity(6);

    for (cam_col, rt_col) in &speed_pairs {
        let cam = series(table, cam_col, *COLOR_SPEED)?;
        let rt = series(table, rt_col, *COLOR_REFERENCE)?;
        let (min, max) = series_value_range(&[cam.clone(), rt.clone()]);
        panels.push(PanelConfig {
            title: format!("{cam_col} vs {rt_col}"),
            y_label: "m/s".to_string(),
            y_range: min..max,
            series: vec![rt, cam],
            guide_lines: Vec::new(),
            annotation: None,
        });
    }
    for (cam_col, rt_col) in &long_pairs {
        let cam = series(table, cam_col, *COLOR_ACCEL_LONG)?;
        let rt = series(table, rt_col, *COLOR_REFERENCE)?;
        panels.push(PanelConfig {
            title: format!("{cam_col} vs {rt_col}"),
            y_label: "m/s²".to_string(),
            y_range: -(ACCEL_LONG_Y_LIMIT + 0.4)..(ACCEL_LONG_Y_LIMIT + 0.4),
            series: vec![rt, cam],
            guide_lines: Vec::new(),
            annotation: None,
        });
    }
    for (cam_col, rt_col) in &lat_pairs {
        let cam = series(table, cam_col, *COLOR_ACCEL_LAT)?;
        let rt = series(table, rt_col, *COLOR_REFERENCE)?;
        panels.push(PanelConfig {
            title: format!("{cam_col} vs {rt_col}"),
            y_label: "m/s²".to_string(),
            y_range: -(ACCEL_LAT_Y_LIMIT + 0.4)..(ACCEL_LAT_Y_LIMIT + 0.4),
            series: vec![rt, cam],
            guide_lines: Vec::new(),
            annotation: None,
        });
    }

    let marks = tick_marks(table.time(), config);
    let tick_positions: Vec<f64> = marks.iter().map(|m| m.elapsed_s).collect();
    let x_range = 0.0..table.time().duration_s().max(1e-3);

    draw_stacked_panels(output_filename, root_name, x_range, &tick_positions, &panels)
}

// src/plot_functions/plot_comparison.rs
