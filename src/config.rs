use crate::coords::SignPolicy;
use crate::errors::ConfigError;
use crate::search::SearchPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchPolicy,
    pub parsing: ParsingConfig,
    pub airlines: AirlineConfig,
    pub location: LocationConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub username: Option<String>, // OpenSky account, anonymous if unset
    pub password: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://opensky-network.org/api/states/all".to_string(),
            timeout_seconds: 10,
            username: None,
            password: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ParsingConfig {
    pub sign_policy: SignPolicy, // "strict" rejects inputs like -40N
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AirlineConfig {
    pub csv_path: Option<String>, // name,icao,callsign table, built-in if unset
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LocationConfig {
    pub auto_locate: bool, // Prefill the input from IP geolocation at startup
}

impl Config {
    /// Loads config.toml from the working directory.
    /// If it doesn't exist, creates a default one.
    pub fn load() -> Self {
        Self::load_or_create(CONFIG_PATH)
    }

    pub fn load_or_create(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if path.exists() {
            match Self::load_from(path) {
                Ok(config) => return config,
                Err(e) => {
                    warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                    return Config::default();
                }
            }
        }

        let default_config = Config::default();

        // Save default config to disk for the user to edit later
        if let Err(e) = default_config.save(path) {
            warn!("Could not write default {} to disk: {}", path.display(), e);
        }

        info!("Loaded default configuration.");
        default_config
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.search = config.search.validated();
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }
}
