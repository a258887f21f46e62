// src/data_input/settings.rs

use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::constants::{
    DEFAULT_ACCEL_LAT_OFFSET, DEFAULT_ACCEL_LONG_OFFSET, DEFAULT_CUTOFF_HZ, DEFAULT_FILTER_ORDER,
    DEFAULT_INVERT_LAT, DEFAULT_INVERT_LONG,
};

/// Per-recording conditioning settings, persisted as JSON next to the raw
/// exports so repeated runs over the same recording keep their calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub cutoff_freq: f64,
    pub atten_order: usize,
    pub accel_long_offset: f64,
    pub accel_lat_offset: f64,
    pub invert_flag_long: bool,
    pub invert_flag_lat: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            cutoff_freq: DEFAULT_CUTOFF_HZ,
            atten_order: DEFAULT_FILTER_ORDER,
            accel_long_offset: DEFAULT_ACCEL_LONG_OFFSET,
            accel_lat_offset: DEFAULT_ACCEL_LAT_OFFSET,
            invert_flag_long: DEFAULT_INVERT_LONG,
            invert_flag_lat: DEFAULT_INVERT_LAT,
        }
    }
}

/// Load settings from `path`, or create the file with defaults on first run.
/// A present-but-unreadable file is an error rather than silently falling
/// back to defaults.
pub fn load_or_create(path: &Path) -> Result<Settings, Box<dyn Error>> {
    if path.is_file() {
        let reader = BufReader::new(File::open(path)?);
        let settings: Settings = serde_json::from_reader(reader)
            .map_err(|e| format!("settings file '{}' is invalid: {e}", path.display()))?;
        info!("loaded settings from {}", path.display());
        Ok(settings)
    } else {
        let settings = Settings::default();
        save(path, &settings)?;
        info!("created default settings at {}", path.display());
        Ok(settings)
    }
}

pub fn save(path: &Path, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, settings)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("motioncam_settings_test_{name}.json"))
    }

    #[test]
    fn first_run_creates_defaults() {
        let path = temp_path("create");
        let _ = std::fs::remove_file(&path);

        let settings = load_or_create(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.is_file());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn round_trips_through_json() {
        let path = temp_path("roundtrip");
        let settings = Settings {
            cutoff_freq: 0.2,
            atten_order: 3,
            accel_long_offset: 0.3,
            accel_lat_offset: -0.2,
            invert_flag_long: true,
            invert_flag_lat: false,
        };
        save(&path, &settings).unwrap();
        assert_eq!(load_or_create(&path).unwrap(), settings);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let path = temp_path("invalid");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_or_create(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}

// src/data_input/settings.rs
