// src/data_input/merge.rs

use std::collections::HashMap;

use log::warn;

use crate::data_input::sensor_data::DataTable;
use crate::types::PipelineResult;

/// Merge the GPS-derived table into the accelerometer table on the shared
/// wall-time label.
///
/// The accelerometer table drives the result (its time axis and row set are
/// kept); GPS channels are joined by label and gaps are filled with 0.0,
/// since the GPS track starts later and drops out under cover. The result
/// owns copies of everything, not references into the sources.
pub fn merge_on_timestamp(gps: &DataTable, accl: &DataTable) -> PipelineResult<DataTable> {
    let mut gps_row_by_label: HashMap<&str, usize> = HashMap::with_capacity(gps.len());
    for (i, label) in gps.time().labels().iter().enumerate() {
        gps_row_by_label.entry(label.as_str()).or_insert(i);
    }

    let mut merged = DataTable::new(accl.time().clone());

    let mut unmatched = 0usize;
    for column in gps.columns() {
        let values: Vec<f64> = accl
            .time()
            .labels()
            .iter()
            .map(|label| match gps_row_by_label.get(label.as_str()) {
                Some(&row) => column.values()[row],
                None => {
                    unmatched += 1;
                    0.0
                }
            })
            .collect();
        merged.add_column(column.name(), values)?;
    }
    if unmatched > 0 {
        warn!("{unmatched} merged cells had no GPS match and were zero-filled");
    }

    for column in accl.columns() {
        merged.add_column(column.name(), column.values().to_vec())?;
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::time_axis::TimeAxis;

    fn table(start_ms: f64, n: usize, name: &str, base: f64) -> DataTable {
        let raw: Vec<f64> = (0..n).map(|i| start_ms + i as f64 * 100.0).collect();
        let mut t = DataTable::new(TimeAxis::from_raw_millis(&raw).unwrap());
        let values: Vec<f64> = (0..n).map(|i| base + i as f64).collect();
        t.add_column(name, values).unwrap();
        t
    }

    #[test]
    fn accelerometer_rows_drive_the_result() {
        let gps = table(0.0, 5, "speed", 10.0);
        let accl = table(0.0, 8, "accel", 0.0);
        let merged = merge_on_timestamp(&gps, &accl).unwrap();
        assert_eq!(merged.len(), 8);
        assert_eq!(merged.column("accel").unwrap().len(), 8);
    }

    #[test]
    fn missing_gps_rows_are_zero_filled() {
        let gps = table(0.0, 3, "speed", 10.0);
        let accl = table(0.0, 5, "accel", 0.0);
        let merged = merge_on_timestamp(&gps, &accl).unwrap();
        assert_eq!(merged.column("speed").unwrap(), &[10.0, 11.0, 12.0, 0.0, 0.0]);
    }

    #[test]
    fn merged_table_owns_its_data() {
        let gps = table(0.0, 3, "speed", 10.0);
        let accl = table(0.0, 3, "accel", 0.0);
        let merged = merge_on_timestamp(&gps, &accl).unwrap();
        drop(gps);
        drop(accl);
        assert_eq!(merged.column("speed").unwrap(), &[10.0, 11.0, 12.0]);
    }
}

// src/data_input/merge.rs
