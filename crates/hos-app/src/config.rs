//! Configuration management for hos-logbook
//!
//! Config stored at: ~/.config/hos-logbook/config.toml

use hos_domain::model::TripMetadata;
use hos_domain::service::{CycleRule, HosRules, TimelineLayout};
use hos_infra::mapbox::DEFAULT_BASE_URL;
use hos_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted for the Mapbox token before the config file.
pub const TOKEN_ENV_VAR: &str = "HOS_MAPBOX_TOKEN";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Mapbox access token (optional; env var takes precedence)
    #[serde(default)]
    pub mapbox_token: Option<String>,

    /// Mapbox API base URL
    #[serde(default = "default_base_url")]
    pub mapbox_base_url: String,

    /// HTTP timeout for routing and geocoding calls
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Duty cycle the driver operates under (70/8 or 60/7)
    #[serde(default)]
    pub cycle_rule: CycleRule,

    /// Placement of the on-duty block on the hourly grid
    #[serde(default)]
    pub timeline_layout: TimelineLayout,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Carrier and truck details printed on every log
    #[serde(default)]
    pub metadata: TripMetadata,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mapbox_token: None,
            mapbox_base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
            cycle_rule: CycleRule::default(),
            timeline_layout: TimelineLayout::default(),
            output_format: OutputFormat::default(),
            metadata: TripMetadata::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("hos-logbook");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Token to use: explicit override, then environment, then config file.
    pub fn access_token(&self, override_token: Option<&str>) -> Option<String> {
        override_token
            .map(str::to_string)
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
            .or_else(|| self.mapbox_token.clone())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn rules(&self) -> HosRules {
        HosRules::default()
            .with_cycle_rule(self.cycle_rule)
            .with_layout(self.timeline_layout)
    }
}

fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(6).collect();
    format!("{}****", visible)
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "HOS Logbook Configuration")?;
        writeln!(f, "=========================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Mapbox token:   {}",
            self.mapbox_token
                .as_deref()
                .map(mask_token)
                .unwrap_or_else(|| "(not set)".to_string())
        )?;
        writeln!(f, "Mapbox URL:     {}", self.mapbox_base_url)?;
        writeln!(f, "Timeout:        {}s", self.request_timeout_secs)?;
        writeln!(f, "Cycle rule:     {}", self.cycle_rule.label())?;
        writeln!(f, "Layout:         {:?}", self.timeline_layout)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Truck:          {}", self.metadata.truck_info)?;
        writeln!(f, "Carrier:        {}", self.metadata.carrier_info)?;
        writeln!(f, "Main office:    {}", self.metadata.main_office_address())?;
        writeln!(f, "Home terminal:  {}", self.metadata.home_terminal_address())?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
