use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Named defaults
// ---------------------------------------------------------------------------

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "EV_DASHBOARD_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "ev-dashboard.toml";

pub const DEFAULT_DATA_PATH: &str = "csv/Electric_Vehicle_Population_Data.csv";
pub const DEFAULT_JURISDICTION: &str = "WA";
pub const DEFAULT_TOP_COUNTIES: usize = 10;
pub const DEFAULT_JITTER_STD_DEV: f64 = 0.05;
pub const DEFAULT_BAR_YEAR_PADDING: i32 = 2;
pub const DEFAULT_BAR_LOG_FLOOR: f64 = 2.0;
pub const DEFAULT_BAR_ANNOTATION_ANCHOR: [f64; 2] = [2001.0, 120.0];
pub const DEFAULT_SCATTER_RANGE_PADDING: f64 = 5.0;
pub const DEFAULT_VIOLIN_RANGE_WINDOW: [f64; 2] = [-25.0, 400.0];
pub const DEFAULT_HEATMAP_COLOR_TICKS: [f64; 4] = [1000.0, 5000.0, 25000.0, 70000.0];

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Runtime configuration. Every field falls back to its named default so a
/// partial TOML file (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Source table loaded at startup.
    pub data_path: PathBuf,
    /// State code the heatmap is restricted to.
    pub jurisdiction: String,
    pub top_counties: usize,
    pub jitter_std_dev: f64,
    pub bar_year_padding: i32,
    pub bar_log_floor: f64,
    /// `[model year, vehicle count]` in data coordinates.
    pub bar_annotation_anchor: [f64; 2],
    pub scatter_range_padding: f64,
    pub violin_range_window: [f64; 2],
    pub heatmap_color_ticks: Vec<f64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            jurisdiction: DEFAULT_JURISDICTION.to_string(),
            top_counties: DEFAULT_TOP_COUNTIES,
            jitter_std_dev: DEFAULT_JITTER_STD_DEV,
            bar_year_padding: DEFAULT_BAR_YEAR_PADDING,
            bar_log_floor: DEFAULT_BAR_LOG_FLOOR,
            bar_annotation_anchor: DEFAULT_BAR_ANNOTATION_ANCHOR,
            scatter_range_padding: DEFAULT_SCATTER_RANGE_PADDING,
            violin_range_window: DEFAULT_VIOLIN_RANGE_WINDOW,
            heatmap_color_ticks: DEFAULT_HEATMAP_COLOR_TICKS.to_vec(),
        }
    }
}

impl DashboardConfig {
    /// Resolve the config the way the binary does: `$EV_DASHBOARD_CONFIG`,
    /// then `./ev-dashboard.toml`, then built-in defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(local);
        }
        log::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.jitter_std_dev.is_finite() || self.jitter_std_dev < 0.0 {
            return Err(invalid("jitter_std_dev", "must be finite and >= 0"));
        }
        if !(self.bar_log_floor > 0.0) {
            return Err(invalid("bar_log_floor", "must be > 0 on a log axis"));
        }
        if self.top_counties == 0 {
            return Err(invalid("top_counties", "must be at least 1"));
        }
        let [lo, hi] = self.violin_range_window;
        if !(lo < hi) {
            return Err(invalid("violin_range_window", "lower bound must be below upper bound"));
        }
        if self.heatmap_color_ticks.iter().any(|t| !(*t > 0.0)) {
            return Err(invalid("heatmap_color_ticks", "ticks must be > 0 on a log scale"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("jurisdiction = \"OR\"\ntop_counties = 5\n");
        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.jurisdiction, "OR");
        assert_eq!(config.top_counties, 5);
        assert_eq!(config.jitter_std_dev, DEFAULT_JITTER_STD_DEV);
        assert_eq!(config.heatmap_color_ticks, DEFAULT_HEATMAP_COLOR_TICKS.to_vec());
    }

    #[test]
    fn rejects_negative_jitter() {
        let file = write_config("jitter_std_dev = -0.1\n");
        let err = DashboardConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "jitter_std_dev", .. }));
    }

    #[test]
    fn rejects_unknown_keys() {
        let file = write_config("colour = \"red\"\n");
        assert!(matches!(
            DashboardConfig::from_file(file.path()),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn rejects_inverted_violin_window() {
        let config = DashboardConfig {
            violin_range_window: [400.0, -25.0],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_are_valid() {
        assert!(DashboardConfig::default().validate().is_ok());
    }
}
