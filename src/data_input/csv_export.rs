// src/data_input/csv_export.rs

use csv::Writer;
use std::error::Error;
use std::path::Path;

use crate::data_input::sensor_data::DataTable;

/// Write the (possibly augmented) table back out as CSV, timestamp label
/// first, columns in insertion order.
pub fn write_table_csv(table: &DataTable, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(path)?;

    let mut header = vec!["timestamp".to_string()];
    header.extend(table.columns().iter().map(|c| c.name().to_string()));
    writer.write_record(&header)?;

    for (row, label) in table.time().labels().iter().enumerate() {
        let mut record = vec![label.clone()];
        for column in table.columns() {
            record.push(format!("{}", column.values()[row]));
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}


// src/data_input/csv_export.rs
