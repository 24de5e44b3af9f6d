use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::source::AccuracyTier;

#[derive(Deserialize)]
pub struct Config {
    /// Where the location log lives.
    pub log_path: PathBuf,
    /// Recorded CSV track replayed as the position source.
    pub track_path: PathBuf,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_accuracy")]
    pub accuracy: AccuracyTier,
}

fn default_interval_ms() -> u64 {
    4000
}

fn default_accuracy() -> AccuracyTier {
    AccuracyTier::High
}

pub fn load(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path).context("Failed to read config")?;
    let config = toml::from_str(&data).context("Failed to parse config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_config_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_path = \"/tmp/location_log.txt\"").unwrap();
        writeln!(file, "track_path = \"/tmp/track.csv\"").unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.interval_ms, 4000);
        assert_eq!(config.accuracy, AccuracyTier::High);
    }

    #[test]
    fn explicit_interval_and_accuracy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_path = \"log.txt\"").unwrap();
        writeln!(file, "track_path = \"track.csv\"").unwrap();
        writeln!(file, "interval_ms = 1000").unwrap();
        writeln!(file, "accuracy = \"low_power\"").unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.interval_ms, 1000);
        assert_eq!(config.accuracy, AccuracyTier::LowPower);
    }

    #[test]
    fn missing_config_is_an_error() {
        assert!(load(Path::new("/nonexistent/config.toml")).is_err());
    }
}
