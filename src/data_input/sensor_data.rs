// src/data_input/sensor_data.rs

use crate::data_analysis::time_axis::TimeAxis;
use crate::error::PipelineError;
use crate::types::PipelineResult;

/// One named channel: values aligned 1:1 with the owning table's time axis.
/// Channels are immutable once inserted; conditioning appends new columns
/// instead of mutating existing ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<f64>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// A set of equal-length channels sharing one time axis.
///
/// Column presence and length are validated on insertion so downstream
/// stages can fail fast on configuration mistakes instead of erroring deep
/// inside the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    time: TimeAxis,
    columns: Vec<Column>,
}

impl DataTable {
    pub fn new(time: TimeAxis) -> Self {
        DataTable {
            time,
            columns: Vec::new(),
        }
    }

    /// Number of samples (rows).
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    /// Append a channel. Fails on length mismatch or duplicate name.
    pub fn add_column(&mut self, name: &str, values: Vec<f64>) -> PipelineResult<()> {
        if values.len() != self.time.len() {
            return Err(PipelineError::data(format!(
                "column '{name}' has {} values but the time axis has {} samples",
                values.len(),
                self.time.len()
            )));
        }
        if self.has_column(name) {
            return Err(PipelineError::config(format!(
                "column '{name}' already exists"
            )));
        }
        self.columns.push(Column {
            name: name.to_string(),
            values,
        });
        Ok(())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Look up a channel by name.
    pub fn column(&self, name: &str) -> PipelineResult<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| PipelineError::config(format!("missing required column '{name}'")))
    }

    /// Validate that every named column is present, before any processing.
    pub fn require_columns(&self, names: &[&str]) -> PipelineResult<()> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| !self.has_column(n))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::config(format!(
                "missing required columns: {}",
                missing.join(", ")
            )))
        }
    }

    /// Columns in insertion order (ingested first, derived appended after).
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}


// src/data_input/sensor_data.rs
