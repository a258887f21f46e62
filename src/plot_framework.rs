// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::prelude::BindKeyPoints;
use plotters::coord::combinators::WithKeyPoints;
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use std::error::Error;
use std::ops::Range;

use crate::constants::{
    COLOR_THRESHOLD_GUIDE, FONT_SIZE_ANNOTATION, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE,
    FONT_SIZE_LEGEND, FONT_SIZE_MAIN_TITLE, FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, PLOT_HEIGHT,
    PLOT_WIDTH,
};
use crate::data_analysis::pipeline::format_minutes_seconds;
use crate::types::SeriesData;

/// One line series within a panel.
#[derive(Clone)]
pub struct PlotSeries {
    pub data: SeriesData,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// One stacked panel: a titled chart with its own y-range, optional
/// horizontal threshold guides, and an optional text annotation block
/// (used for the event-count report).
#[derive(Clone)]
pub struct PanelConfig {
    pub title: String,
    pub y_label: String,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub guide_lines: Vec<f64>,
    pub annotation: Option<String>,
}

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Min/max over a set of series, for panels without fixed limits.
pub fn series_value_range(series: &[PlotSeries]) -> (f64, f64) {
    let values: Vec<f64> = series
        .iter()
        .flat_map(|s| s.data.iter().map(|&(_, v)| v))
        .collect();
    let array = Array1::from(values);
    match (array.min(), array.max()) {
        (Ok(&min), Ok(&max)) => calculate_range(min, max),
        _ => calculate_range(0.0, 0.0),
    }
}

fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    panel_title: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    let (x_range, y_range) = area.get_pixel_range();
    let width = (x_range.end - x_range.start) as i32;
    let height = (y_range.end - y_range.start) as i32;
    let message = format!("{panel_title}: data unavailable ({reason})");
    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(message, (width / 4, height / 2), text_style))?;
    Ok(())
}

/// Render a column of panels sharing one mm:ss time axis into a PNG.
///
/// `tick_positions` are the elapsed-second x positions that get labeled;
/// they come from the tick-interval filter so long recordings do not smear
/// their minute labels together.
pub fn draw_stacked_panels(
    output_filename: &str,
    main_title: &str,
    x_range: Range<f64>,
    tick_positions: &[f64],
    panels: &[PanelConfig],
) -> Result<(), Box<dyn Error>> {
    if panels.is_empty() {
        return Err("no panels to draw".into());
    }
    let height = if panels.len() <= 3 {
        PLOT_HEIGHT
    } else {
        320 * panels.len() as u32
    };

    let root_area = BitMapBackend::new(output_filename, (PLOT_WIDTH, height)).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        main_title.to_string(),
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE).into_font().color(&BLACK),
    ))?;

    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((panels.len(), 1));

    let mut any_panel_plotted = false;
    for (panel, area) in panels.iter().zip(sub_plot_areas.iter()) {
        let has_data = panel.series.iter().any(|s| !s.data.is_empty());
        let valid_ranges =
            x_range.end > x_range.start && panel.y_range.end > panel.y_range.start;
        if !has_data || !valid_ranges {
            let reason = if !has_data { "no data points" } else { "invalid ranges" };
            draw_unavailable_message(area, &panel.title, reason)?;
            continue;
        }
        draw_single_panel(area, &x_range, tick_positions, panel)?;
        any_panel_plotted = true;
    }

    root_area.present()?;
    if any_panel_plotted {
        println!("  Stacked plot saved as '{output_filename}'.");
    } else {
        println!(
            "  '{output_filename}' contains only placeholder messages: no data available for any panel."
        );
    }
    Ok(())
}

/// Pairs custom key-point tick positions on an `f64` axis with the
/// `ValueFormatter<f64>` impl that `configure_mesh` requires. `WithKeyPoints`
/// forwards `RangedCoordf64`'s `NoDefaultFormatting` marker without carrying its
/// `ValueFormatter`, so this thin newtype re-supplies it. Axis label text is
/// produced by `x_label_formatter`, so `format` only mirrors the underlying
/// numeric formatting and the rendered output is unchanged.
struct KeyedF64Axis(WithKeyPoints<RangedCoordf64>);

impl Ranged for KeyedF64Axis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.0.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        self.0.key_points(hint)
    }

    fn range(&self) -> Range<f64> {
        self.0.range()
    }

    fn axis_pixel_range(&self, limit: (i32, i32)) -> Range<i32> {
        self.0.axis_pixel_range(limit)
    }
}

impl ValueFormatter<f64> for KeyedF64Axis {
    fn format(value: &f64) -> String {
        <RangedCoordf64 as ValueFormatter<f64>>::format(value)
    }
}

fn draw_single_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    x_range: &Range<f64>,
    tick_positions: &[f64],
    panel: &PanelConfig,
) -> Result<(), Box<dyn Error>> {
    let x_spec = KeyedF64Axis((x_range.start..x_range.end).with_key_points(tick_positions.to_vec()));

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .caption(&panel.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .build_cartesian_2d(x_spec, panel.y_range.clone())?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| format_minutes_seconds(*x))
        .y_desc(panel.y_label.clone())
        .axis_desc_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    for series in &panel.series {
        let color = series.color;
        let stroke = series.stroke_width;
        chart
            .draw_series(LineSeries::new(
                series.data.iter().copied(),
                color.stroke_width(stroke),
            ))?
            .label(series.label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
            });
    }

    for &guide in &panel.guide_lines {
        chart.draw_series(LineSeries::new(
            [(x_range.start, guide), (x_range.end, guide)],
            COLOR_THRESHOLD_GUIDE.mix(0.5).stroke_width(1),
        ))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", FONT_SIZE_LEGEND))
        .draw()?;

    if let Some(annotation) = &panel.annotation {
        let (px_range, py_range) = area.get_pixel_range();
        let width = (px_range.end - px_range.start) as i32;
        let height = (py_range.end - py_range.start) as i32;
        let line_height = FONT_SIZE_ANNOTATION as i32 + 4;
        let lines: Vec<&str> = annotation.lines().collect();
        let start_y = height - line_height * (lines.len() as i32 + 1);
        let style = ("sans-serif", FONT_SIZE_ANNOTATION).into_font().color(&BLACK);
        for (i, line) in lines.iter().enumerate() {
            area.draw(&Text::new(
                line.to_string(),
                (width / 2, start_y + i as i32 * line_height),
                style.clone(),
            ))?;
        }
    }

    Ok(())
}

// src/plot_framework.rs
