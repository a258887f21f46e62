// src/data_analysis/mod.rs

pub mod derivative;
pub mod lowpass;
pub mod pipeline;
pub mod signal_adjust;
pub mod threshold_events;
pub mod tick_filter;
pub mod time_axis;

// src/data_analysis/mod.rs
