// src/data_input/csv_import.rs

use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::data_analysis::time_axis::TimeAxis;
use crate::data_input::sensor_data::DataTable;
use crate::error::PipelineError;

/// How the raw time column is encoded in a given export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeColumnKind {
    /// Camera clock ticks in milliseconds (the `cts` column).
    Millis,
    /// Plain sample counter; converted to milliseconds via the known rate.
    SampleIndex { sample_rate_hz: f64 },
}

/// An ingested table plus the sample rate estimated from its time column.
#[derive(Debug, Clone)]
pub struct ImportedTable {
    pub table: DataTable,
    pub estimated_sample_rate_hz: Option<f64>,
}

/// Parse one CSV export into a table of the requested channels.
///
/// Header names are mapped to indices up front and every requested column
/// must be present (fail fast, no deep-pipeline lookup errors). Rows whose
/// time or channel cells fail to parse are skipped with a warning, matching
/// how gappy camera exports are handled in practice.
pub fn import_table(
    path: &Path,
    time_col: &str,
    time_kind: TimeColumnKind,
    channel_cols: &[&str],
) -> Result<ImportedTable, Box<dyn Error>> {
    let file = File::open(path)
        .map_err(|e| format!("cannot open '{}': {e}", path.display()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let header_record = reader.headers()?.clone();

    let find_index = |name: &str| header_record.iter().position(|h| h.trim() == name);

    let time_idx = find_index(time_col).ok_or_else(|| {
        PipelineError::config(format!(
            "missing time column '{time_col}' in '{}'",
            path.display()
        ))
    })?;

    let mut channel_indices = Vec::with_capacity(channel_cols.len());
    let mut missing: Vec<&str> = Vec::new();
    for &name in channel_cols {
        match find_index(name) {
            Some(idx) => channel_indices.push(idx),
            None => missing.push(name),
        }
    }
    if !missing.is_empty() {
        return Err(Box::new(PipelineError::config(format!(
            "missing required columns in '{}': {}",
            path.display(),
            missing.join(", ")
        ))));
    }

    let mut raw_time: Vec<f64> = Vec::new();
    let mut channels: Vec<Vec<f64>> = vec![Vec::new(); channel_cols.len()];

    for (row_index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                eprintln!("Warning: Skipping row {} due to CSV read error: {e}", row_index + 1);
                continue;
            }
        };

        let parse_cell = |csv_idx: usize| -> Option<f64> {
            record.get(csv_idx).and_then(|s| s.parse::<f64>().ok())
        };

        let Some(t) = parse_cell(time_idx) else {
            eprintln!(
                "Warning: Skipping row {} due to missing or invalid '{time_col}'",
                row_index + 1
            );
            continue;
        };

        let mut values = Vec::with_capacity(channel_indices.len());
        let mut row_ok = true;
        for (&csv_idx, &name) in channel_indices.iter().zip(channel_cols.iter()) {
            match parse_cell(csv_idx) {
                Some(v) => values.push(v),
                None => {
                    eprintln!(
                        "Warning: Skipping row {} due to missing or invalid '{name}'",
                        row_index + 1
                    );
                    row_ok = false;
                    break;
                }
            }
        }
        if !row_ok {
            continue;
        }

        raw_time.push(t);
        for (channel, value) in channels.iter_mut().zip(values) {
            channel.push(value);
        }
    }

    println!(
        "Finished reading {} data rows from '{}'.",
        raw_time.len(),
        path.display()
    );

    let raw_ms: Vec<f64> = match time_kind {
        TimeColumnKind::Millis => raw_time,
        TimeColumnKind::SampleIndex { sample_rate_hz } => {
            if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
                return Err(Box::new(PipelineError::config(format!(
                    "sample rate must be positive to convert a sample-index time column, got {sample_rate_hz}"
                ))));
            }
            raw_time
                .iter()
                .map(|&i| i * 1000.0 / sample_rate_hz)
                .collect()
        }
    };

    let estimated_sample_rate_hz = estimate_sample_rate(&raw_ms);

    let time = TimeAxis::from_raw_millis(&raw_ms)?;
    let mut table = DataTable::new(time);
    for (name, values) in channel_cols.iter().zip(channels) {
        table.add_column(name, values)?;
    }

    Ok(ImportedTable {
        table,
        estimated_sample_rate_hz,
    })
}

/// Average sample rate from the raw millisecond deltas. Needs at least two
/// distinct timestamps; used to cross-check the configured rate.
fn estimate_sample_rate(raw_ms: &[f64]) -> Option<f64> {
    let mut total_delta = 0.0;
    let mut count = 0usize;
    for pair in raw_ms.windows(2) {
        let delta = (pair[1] - pair[0]) / 1000.0;
        if delta > 1e-9 {
            total_delta += delta;
            count += 1;
        }
    }
    if count > 0 {
        Some(count as f64 / total_delta)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;

    fn write_temp_csv(name: &str, content: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!("motioncam_import_test_{name}.csv"));
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn imports_requested_channels() {
        let path = write_temp_csv(
            "basic",
            "cts,GPS (2D) [m/s],extra\n0,1.5,9\n100,1.6,9\n200,1.7,9\n",
        );
        let imported =
            import_table(&path, "cts", TimeColumnKind::Millis, &["GPS (2D) [m/s]"]).unwrap();
        assert_eq!(imported.table.len(), 3);
        assert_eq!(
            imported.table.column("GPS (2D) [m/s]").unwrap(),
            &[1.5, 1.6, 1.7]
        );
        let rate = imported.estimated_sample_rate_hz.unwrap();
        assert!((rate - 10.0).abs() < 1e-6);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_column_fails_fast() {
        let path = write_temp_csv("missing", "cts,a\n0,1\n");
        assert!(import_table(&path, "cts", TimeColumnKind::Millis, &["b"]).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unparseable_rows_are_skipped() {
        let path = write_temp_csv(
            "skip",
            "cts,a\n0,1.0\nbogus,2.0\n200,not_a_number\n300,4.0\n",
        );
        let imported = import_table(&path, "cts", TimeColumnKind::Millis, &["a"]).unwrap();
        assert_eq!(imported.table.len(), 2);
        assert_eq!(imported.table.column("a").unwrap(), &[1.0, 4.0]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn sample_index_time_column_is_converted() {
        let path = write_temp_csv("index", "Index,a\n0,1.0\n1,2.0\n2,3.0\n");
        let imported = import_table(
            &path,
            "Index",
            TimeColumnKind::SampleIndex { sample_rate_hz: 10.0 },
            &["a"],
        )
        .unwrap();
        let elapsed = imported.table.time().elapsed_s();
        assert!((elapsed[1] - 0.1).abs() < 1e-9);
        let _ = std::fs::remove_file(&path);
    }
}

// src/data_input/csv_import.rs
