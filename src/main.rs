// src/main.rs

use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};

use log::warn;

use motioncam_csv_render::constants::{
    ACCL_LAT_COL, ACCL_LONG_COL, CAM_ACCEL_LAT_COL, CAM_ACCEL_LONG_COL, CAM_SPEED_COL,
    GPS_SPEED_COL, RAW_TIME_COL, RT_ACCEL_LAT_COL, RT_ACCEL_LONG_COL, RT_SPEED_COL,
};
use motioncam_csv_render::data_analysis::pipeline::{
    calibrate_comparison_camera, condition_source, condition_table, PipelineConfig,
};
use motioncam_csv_render::data_input::csv_export::write_table_csv;
use motioncam_csv_render::data_input::csv_import::{import_table, TimeColumnKind};
use motioncam_csv_render::data_input::merge::merge_on_timestamp;
use motioncam_csv_render::data_input::settings;
use motioncam_csv_render::plot_functions::plot_channel_overview::plot_channel_overview;
use motioncam_csv_render::plot_functions::plot_comparison::plot_comparison;

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <GPS_CSV> <ACCL_CSV> [output_dir]");
    eprintln!("       {program} --compare <MERGED_CSV> [output_dir]");
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    if args[1] == "--compare" {
        let input = Path::new(&args[2]);
        let output_dir = resolve_output_dir(args.get(3), input);
        run_compare(input, &output_dir)
    } else {
        let gps_path = Path::new(&args[1]);
        let accl_path = Path::new(&args[2]);
        let output_dir = resolve_output_dir(args.get(3), gps_path);
        run_render(gps_path, accl_path, &output_dir)
    }
}

fn resolve_output_dir(arg: Option<&String>, input: &Path) -> PathBuf {
    match arg {
        Some(dir) => PathBuf::from(dir),
        None => input.parent().unwrap_or(Path::new(".")).to_path_buf(),
    }
}

fn root_name_of(path: &Path) -> String {
    path.file_stem().unwrap_or_default().to_string_lossy().into_owned()
}

fn check_sample_rate(configured_hz: f64, estimated: Option<f64>, source: &Path) {
    if let Some(rate) = estimated {
        if (rate - configured_hz).abs() > 0.05 * configured_hz {
            warn!(
                "'{}' looks like {:.2} Hz but the pipeline is configured for {:.2} Hz",
                source.display(),
                rate,
                configured_hz
            );
        }
    }
}

/// Render mode: merge one recording's GPS and accelerometer exports,
/// condition the channels, report threshold events, and write the augmented
/// CSV plus the overview figure.
fn run_render(gps_path: &Path, accl_path: &Path, output_dir: &Path) -> Result<(), Box<dyn Error>> {
    let root_name = root_name_of(gps_path);

    let settings_path = output_dir.join(format!("{root_name}_settings.json"));
    let loaded = settings::load_or_create(&settings_path)?;
    println!("loaded_settings: {loaded:?}");
    let config = PipelineConfig::from_settings(&loaded);

    let gps = import_table(gps_path, RAW_TIME_COL, TimeColumnKind::Millis, &[GPS_SPEED_COL])?;
    let accl = import_table(
        accl_path,
        RAW_TIME_COL,
        TimeColumnKind::Millis,
        &[ACCL_LAT_COL, ACCL_LONG_COL],
    )?;
    check_sample_rate(config.sample_rate_hz, gps.estimated_sample_rate_hz, gps_path);
    check_sample_rate(config.sample_rate_hz, accl.estimated_sample_rate_hz, accl_path);

    let mut combined = merge_on_timestamp(&gps.table, &accl.table)?;
    let reports = condition_table(&mut combined, &config)?;

    for report in &reports {
        println!(
            "{}: {} times between {}m/s² and {}m/s², {} times above {}m/s²",
            report.channel,
            report.counts.between,
            report.threshold_low,
            report.threshold_high,
            report.counts.above,
            report.threshold_high
        );
    }

    let csv_out = output_dir.join(format!("{root_name}_Combined_filtered.csv"));
    write_table_csv(&combined, &csv_out)?;
    println!("Filtered table saved as '{}'.", csv_out.display());

    let figure_out = output_dir.join(format!("{root_name}_figure.png"));
    plot_channel_overview(
        &combined,
        &reports,
        &config,
        &root_name,
        &figure_out.to_string_lossy(),
    )?;

    Ok(())
}

/// Compare mode: load an already-merged camera+reference export, filter both
/// sources, calibrate the camera side, and render the comparison figure.
fn run_compare(input: &Path, output_dir: &Path) -> Result<(), Box<dyn Error>> {
    let root_name = root_name_of(input);

    let settings_path = output_dir.join(format!("{root_name}_settings.json"));
    let loaded = settings::load_or_create(&settings_path)?;
    println!("loaded_settings: {loaded:?}");
    let config = PipelineConfig::from_settings(&loaded);

    let imported = import_table(
        input,
        "Index",
        TimeColumnKind::SampleIndex {
            sample_rate_hz: config.sample_rate_hz,
        },
        &[
            RT_SPEED_COL,
            CAM_SPEED_COL,
            RT_ACCEL_LONG_COL,
            CAM_ACCEL_LONG_COL,
            RT_ACCEL_LAT_COL,
            CAM_ACCEL_LAT_COL,
        ],
    )?;
    let mut table = imported.table;

    let spec = config.filter_spec();
    condition_source(&mut table, RT_SPEED_COL, RT_ACCEL_LONG_COL, RT_ACCEL_LAT_COL, &spec)?;
    condition_source(&mut table, CAM_SPEED_COL, CAM_ACCEL_LONG_COL, CAM_ACCEL_LAT_COL, &spec)?;
    calibrate_comparison_camera(&mut table, &config)?;

    let figure_out = output_dir.join(format!("{root_name}_comparison.png"));
    plot_comparison(&table, &config, &root_name, &figure_out.to_string_lossy())?;

    Ok(())
}

// src/main.rs
