use serde::{
    de::{self, Deserializer},
    Deserialize, Serialize,
};
use std::{fmt, str::FromStr};

use crate::ConfigError;

/// Stores user-configurable dashboard preferences and feed runtime options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clock: ClockMode,
    /// Fixed seed for reproducible feeds. Entropy is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock: ClockMode::default(),
            seed: None,
            log_filter: Self::default_log_filter(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            plain_output: false,
        }
    }
}

impl Config {
    pub fn default_log_filter() -> String {
        "scan_feed=info".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }
}

/// How the feed's cadences are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    /// Background timers tick on wall-clock time.
    #[default]
    Realtime,
    /// Time only moves when the shell asks it to.
    Simulated,
}

impl FromStr for ClockMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "realtime" | "real" => Ok(ClockMode::Realtime),
            "simulated" | "sim" | "manual" => Ok(ClockMode::Simulated),
            _ => Err(ConfigError::UnknownClockMode(value.trim().to_string())),
        }
    }
}

impl fmt::Display for ClockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClockMode::Realtime => "realtime",
            ClockMode::Simulated => "simulated",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for ClockMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `null` means unset; anything else must name a known mode.
        match Option::<String>::deserialize(deserializer)? {
            Some(value) => value.parse().map_err(de::Error::custom),
            None => Ok(ClockMode::default()),
        }
    }
}
