//! Configuration loading and validation.
//!
//! Settings live in a TOML file (default `./wxmon.toml`, overridable via
//! the `WXMON_CONFIG` environment variable or a `.env` file). Every table
//! is optional and falls back to built-in defaults:
//!
//! ```toml
//! [minima]
//! ceiling_ft = 1000
//! vis_miles = 3.0
//!
//! [status]
//! critical_vis_miles = 0.5
//!
//! [extraction]
//! pirep_max_age_hours = 12
//!
//! [logging]
//! level = "info"
//!
//! [[stations]]
//! icao = "KJFK"
//! name = "John F Kennedy Intl"
//! ```

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::alert::status::StatusThresholds;
use crate::ingest::fields::{ExtractionSettings, MAX_WINDOW_HOURS};
use crate::logging::{self, LogLevel, ReportSource};
use crate::model::{Minima, Result, WxError};
use crate::stations::{normalize_icao, Station};

pub const DEFAULT_CONFIG_PATH: &str = "./wxmon.toml";
pub const CONFIG_PATH_ENV: &str = "WXMON_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelName {
    Debug,
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl From<LevelName> for LogLevel {
    fn from(level: LevelName) -> Self {
        match level {
            LevelName::Debug => LogLevel::Debug,
            LevelName::Info => LogLevel::Info,
            LevelName::Warning => LogLevel::Warning,
            LevelName::Error => LogLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: LevelName,
    pub file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LevelName::Info,
            file: None,
            console_timestamps: false,
        }
    }
}

/// Complete core configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub minima: Minima,
    pub status: StatusThresholds,
    pub extraction: ExtractionSettings,
    pub logging: LoggingSettings,
    pub stations: Vec<Station>,
}

impl Config {
    /// Parses and validates configuration text. `origin` names the source in
    /// error messages.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).map_err(|source| WxError::ConfigParse {
            path: origin.to_string(),
            source,
        })?;
        config.validated()
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| WxError::ConfigIo {
            path: display.clone(),
            source,
        })?;

        let config = Self::from_toml_str(&text, &display)?;
        logging::debug(
            ReportSource::Config,
            None,
            &format!("loaded {} ({} stations)", display, config.stations.len()),
        );
        Ok(config)
    }

    /// Loads the file named by `WXMON_CONFIG` (after reading `.env`), or
    /// `./wxmon.toml` when unset.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// Installs the global logger described by `[logging]`.
    pub fn init_logging(&self) {
        logging::init_logger(
            self.logging.level.into(),
            self.logging.file.as_deref(),
            self.logging.console_timestamps,
        );
    }

    pub fn find_station(&self, icao: &str) -> Option<&Station> {
        crate::stations::find_station(&self.stations, icao)
    }

    fn validated(mut self) -> Result<Self> {
        let mut seen = HashSet::new();
        for station in &mut self.stations {
            station.icao = normalize_icao(&station.icao)?;
            if !seen.insert(station.icao.clone()) {
                return Err(invalid(format!("duplicate station '{}'", station.icao)));
            }
        }

        check_non_negative("minima.ceiling_ft", self.minima.ceiling_ft)?;
        check_non_negative("minima.vis_miles", self.minima.vis_miles)?;

        let s = &self.status;
        check_non_negative("status.critical_vis_miles", s.critical_vis_miles)?;
        check_non_negative("status.critical_ceiling_ft", s.critical_ceiling_ft)?;
        check_non_negative("status.caution_vis_miles", s.caution_vis_miles)?;
        check_non_negative("status.caution_ceiling_ft", s.caution_ceiling_ft)?;
        if s.caution_vis_miles < s.critical_vis_miles || s.caution_ceiling_ft < s.critical_ceiling_ft {
            return Err(invalid("caution thresholds must not be below critical thresholds"));
        }

        let e = &self.extraction;
        check_window("extraction.pirep_max_age_hours", e.pirep_max_age_hours)?;
        check_window("extraction.sigmet_default_validity_hours", e.sigmet_default_validity_hours)?;
        check_non_negative("extraction.sigmet_default_top_ft", e.sigmet_default_top_ft)?;

        Ok(self)
    }
}

fn invalid(message: impl Into<String>) -> WxError {
    WxError::InvalidConfig {
        message: message.into(),
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be a non-negative number, got {}", name, value)))
    }
}

fn check_window(name: &str, hours: i64) -> Result<()> {
    if (1..=MAX_WINDOW_HOURS).contains(&hours) {
        Ok(())
    } else {
        Err(invalid(format!(
            "{} must be between 1 and {} hours, got {}",
            name, MAX_WINDOW_HOURS, hours
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("", "inline").expect("empty config is valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.minima, Minima::new(1000.0, 3.0));
        assert_eq!(config.extraction.pirep_max_age_hours, 12);
    }

    #[test]
    fn test_partial_tables_fill_in_defaults() {
        let text = r#"
            [minima]
            vis_miles = 1.5

            [status]
            caution_ceiling_ft = 300
        "#;
        let config = Config::from_toml_str(text, "inline").expect("valid config");
        assert_eq!(config.minima.ceiling_ft, 1000.0);
        assert_eq!(config.minima.vis_miles, 1.5);
        assert_eq!(config.status.caution_ceiling_ft, 300.0);
        assert_eq!(config.status.critical_ceiling_ft, 100.0);
    }

    #[test]
    fn test_stations_are_normalized() {
        let text = r#"
            [[stations]]
            icao = " kjfk"
            name = "John F Kennedy Intl"
        "#;
        let config = Config::from_toml_str(text, "inline").expect("valid config");
        assert_eq!(config.stations[0].icao, "KJFK");
        assert!(config.find_station("KJFK").is_some());
    }

    #[test]
    fn test_bad_station_code_is_rejected() {
        let text = r#"
            [[stations]]
            icao = "JFK"
            name = "Kennedy"
        "#;
        let result = Config::from_toml_str(text, "inline");
        assert!(matches!(result, Err(WxError::InvalidStationId(_))));
    }

    #[test]
    fn test_duplicate_station_is_rejected() {
        let text = r#"
            [[stations]]
            icao = "KJFK"
            name = "A"

            [[stations]]
            icao = "kjfk"
            name = "B"
        "#;
        assert!(matches!(
            Config::from_toml_str(text, "inline"),
            Err(WxError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_negative_minima_is_rejected() {
        let text = "[minima]\nceiling_ft = -100\n";
        assert!(matches!(
            Config::from_toml_str(text, "inline"),
            Err(WxError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_inverted_thresholds_are_rejected() {
        let text = "[status]\ncritical_vis_miles = 2.0\ncaution_vis_miles = 1.0\n";
        assert!(matches!(
            Config::from_toml_str(text, "inline"),
            Err(WxError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_oversized_extraction_windows_are_rejected() {
        for text in [
            "[extraction]\npirep_max_age_hours = 100000000000\n",
            "[extraction]\nsigmet_default_validity_hours = 9223372036854775807\n",
            "[extraction]\npirep_max_age_hours = 8761\n",
            "[extraction]\nsigmet_default_validity_hours = 0\n",
        ] {
            assert!(
                matches!(Config::from_toml_str(text, "inline"), Err(WxError::InvalidConfig { .. })),
                "config {:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_one_year_window_is_accepted() {
        let config = Config::from_toml_str("[extraction]\npirep_max_age_hours = 8760\n", "inline")
            .expect("one year is within bounds");
        assert_eq!(config.extraction.pirep_max_age_hours, 8760);
    }

    #[test]
    fn test_malformed_toml_reports_origin() {
        let err = Config::from_toml_str("[minima", "broken.toml").unwrap_err();
        assert!(matches!(err, WxError::ConfigParse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/wxmon.toml").unwrap_err();
        assert!(matches!(err, WxError::ConfigIo { .. }));
    }

    #[test]
    fn test_warn_alias_for_log_level() {
        let config = Config::from_toml_str("[logging]\nlevel = \"warn\"\n", "inline")
            .expect("valid config");
        assert_eq!(config.logging.level, LevelName::Warning);
    }
}
