//! Panel configuration.
//!
//! Every field has a default, so an empty file (or no file at all) gives a
//! working setup for the stock hardware.
//!
//! # Example Config (YAML)
//!
//! ```yaml
//! serial_port: "COM5"
//! baud_rate: 9600
//! hwinfo_port: 27008
//!
//! # Rotate screens after this many frames
//! frames_per_screen: 4
//!
//! # name_only | match_index
//! index_policy: match_index
//!
//! sensors:
//!   pump_group: "MSI MAG B550 TOMAHAWK (Nuvoton NCT6687D)"
//!   pump_entry: "Pump Fan"
//!   network_group: "Network: Intel(R) Ethernet Controller I225-V"
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use hwpanel::Config;
//!
//! let config = Config::load("config/hwpanel.yaml")?;
//! println!("polling {}", config.hwinfo_url());
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Error;
use crate::screens::DEFAULT_IDLE_MESSAGE;
use crate::sensors::{IndexPolicy, SensorNames};
use crate::{DEFAULT_BAUD_RATE, DEFAULT_HWINFO_PORT, DEFAULT_TIMEOUT_SECS};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "HWPANEL_CONFIG";

/// Panel host configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial device of the display (e.g. "COM5", "/dev/ttyUSB0")
    pub serial_port: String,
    /// Serial baud rate
    pub baud_rate: u32,
    /// Serial read/write timeout in milliseconds
    pub serial_timeout_ms: u64,
    /// Port of the local RemoteHWInfo server
    pub hwinfo_port: u16,
    /// Full URL of the sensor document; overrides `hwinfo_port`
    pub hwinfo_url: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Frames sent before switching to the next screen
    pub frames_per_screen: u32,
    /// Pause after clearing the display (milliseconds)
    pub blank_delay_ms: u64,
    /// Pause after each frame (milliseconds)
    pub frame_delay_ms: u64,
    /// Ticker text when all sensors are available
    pub idle_message: String,
    /// How HWiNFO readings are tied to their group
    pub index_policy: IndexPolicy,
    /// HWiNFO names used by the screens
    pub sensors: SensorNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial_port: "/dev/ttyUSB0".to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            serial_timeout_ms: 5000,
            hwinfo_port: DEFAULT_HWINFO_PORT,
            hwinfo_url: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            frames_per_screen: 4,
            blank_delay_ms: 300,
            frame_delay_ms: 500,
            idle_message: DEFAULT_IDLE_MESSAGE.to_string(),
            index_policy: IndexPolicy::default(),
            sensors: SensorNames::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(format!("Invalid config YAML: {}", e)))
    }

    /// Load the file named by `HWPANEL_CONFIG`, or use defaults if unset.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => {
                let config = Self::load(&path)?;
                tracing::info!("Loaded config from {}", path);
                Ok(config)
            }
            Err(_) => {
                tracing::debug!("{} not set, using default config", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }

    /// URL of the sensor document.
    pub fn hwinfo_url(&self) -> String {
        self.hwinfo_url
            .clone()
            .unwrap_or_else(|| hwinfo_url_for_port(self.hwinfo_port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn serial_timeout(&self) -> Duration {
        Duration::from_millis(self.serial_timeout_ms)
    }

    pub fn blank_delay(&self) -> Duration {
        Duration::from_millis(self.blank_delay_ms)
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

/// RemoteHWInfo serves its document at `/json.json`.
pub fn hwinfo_url_for_port(port: u16) -> String {
    format!("http://localhost:{}/json.json", port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.frames_per_screen, 4);
        assert_eq!(config.idle_message, "Happy gaming!");
        assert_eq!(config.index_policy, IndexPolicy::NameOnly);
        assert_eq!(config.hwinfo_url(), "http://localhost:27008/json.json");
        assert_eq!(config.blank_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
serial_port: "COM5"
hwinfo_port: 28000
frames_per_screen: 6
index_policy: match_index
sensors:
  pump_entry: "Pump Fan"
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.serial_port, "COM5");
        assert_eq!(config.hwinfo_url(), "http://localhost:28000/json.json");
        assert_eq!(config.frames_per_screen, 6);
        assert_eq!(config.index_policy, IndexPolicy::MatchIndex);
        assert_eq!(config.sensors.pump_entry, "Pump Fan");
        assert_eq!(config.sensors.memory_group, "System");
        assert_eq!(config.baud_rate, 9600);
    }

    #[test]
    fn test_explicit_url_wins() {
        let config = Config::from_yaml("hwinfo_url: \"http://10.0.0.2:27007/json.json\"").unwrap();
        assert_eq!(config.hwinfo_url(), "http://10.0.0.2:27007/json.json");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("index_policy: sometimes").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_yaml("baud_rate: fast").unwrap_err();
        assert!(err.to_string().contains("Invalid config YAML"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/hwpanel.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/hwpanel.yaml"));
    }
}
