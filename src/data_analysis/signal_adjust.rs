// src/data_analysis/signal_adjust.rs

/// Pointwise offset for mounting calibration. Pure, no filtering.
pub fn adjust_offset(channel: &[f64], offset: f64) -> Vec<f64> {
    channel.iter().map(|v| v + offset).collect()
}

/// Pointwise sign flip for sensors mounted backwards. Identity when
/// `invert` is false.
pub fn invert_signal(channel: &[f64], invert: bool) -> Vec<f64> {
    if invert {
        channel.iter().map(|v| -v).collect()
    } else {
        channel.to_vec()
    }
}


// src/data_analysis/signal_adjust.rs
