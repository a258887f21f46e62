// src/error.rs

use std::error::Error;
use std::fmt;

/// Error raised by the conditioning pipeline.
///
/// `Config` covers invalid configuration (bad filter parameters, missing
/// columns) detected before any processing; `Data` covers inputs that cannot
/// be processed (empty channels, too few samples for the chosen filter).
/// Both abort the run with no partial output.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Config(String),
    Data(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config(msg) => write!(f, "configuration error: {msg}"),
            PipelineError::Data(msg) => write!(f, "data error: {msg}"),
        }
    }
}

impl Error for PipelineError {}

impl PipelineError {
    pub fn config(msg: impl Into<String>) -> Self {
        PipelineError::Config(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        PipelineError::Data(msg.into())
    }
}

// src/error.rs
