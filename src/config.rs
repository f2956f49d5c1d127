use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::DEFAULT_MAX_RESULTS;
use crate::models::{ScoringParams, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default = "default_online_location_factor")]
    pub online_location_factor: f64,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            max_distance_km: default_max_distance_km(),
            online_location_factor: default_online_location_factor(),
            max_pool_size: default_max_pool_size(),
        }
    }
}

fn default_max_results() -> usize { DEFAULT_MAX_RESULTS }
fn default_max_distance_km() -> f64 { 100.0 }
fn default_online_location_factor() -> f64 { 0.8 }
fn default_max_pool_size() -> usize { 1000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_counseling_weight")]
    pub counseling: f64,
    #[serde(default = "default_language_weight")]
    pub language: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_age_group_weight")]
    pub age_group: f64,
    #[serde(default = "default_wait_time_weight")]
    pub wait_time: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            counseling: default_counseling_weight(),
            language: default_language_weight(),
            location: default_location_weight(),
            age_group: default_age_group_weight(),
            wait_time: default_wait_time_weight(),
        }
    }
}

fn default_counseling_weight() -> f64 { 40.0 }
fn default_language_weight() -> f64 { 20.0 }
fn default_location_weight() -> f64 { 20.0 }
fn default_age_group_weight() -> f64 { 10.0 }
fn default_wait_time_weight() -> f64 { 10.0 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            counseling: config.counseling,
            language: config.language,
            location: config.location,
            age_group: config.age_group,
            wait_time: config.wait_time,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with COUNSEL)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., COUNSEL__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        Self::finish(settings)
    }

    fn finish(config: Config) -> Result<Self, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would break the score bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = &self.scoring.weights;
        let all_weights = [
            ("counseling", weights.counseling),
            ("language", weights.language),
            ("location", weights.location),
            ("age_group", weights.age_group),
            ("wait_time", weights.wait_time),
        ];
        for (name, value) in all_weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Message(format!(
                    "scoring.weights.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.matching.max_results == 0 {
            return Err(ConfigError::Message(
                "matching.max_results must be at least 1".to_string(),
            ));
        }

        if !self.matching.max_distance_km.is_finite() || self.matching.max_distance_km <= 0.0 {
            return Err(ConfigError::Message(format!(
                "matching.max_distance_km must be positive, got {}",
                self.matching.max_distance_km
            )));
        }

        if !(0.0..=1.0).contains(&self.matching.online_location_factor) {
            return Err(ConfigError::Message(format!(
                "matching.online_location_factor must be within [0, 1], got {}",
                self.matching.online_location_factor
            )));
        }

        Ok(())
    }

    /// Scoring parameters for the matcher
    pub fn scoring_params(&self) -> ScoringParams {
        ScoringParams {
            weights: ScoringWeights::from(&self.scoring.weights),
            max_distance_km: self.matching.max_distance_km,
            online_location_factor: self.matching.online_location_factor,
        }
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("COUNSEL")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
