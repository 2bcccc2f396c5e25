use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::ScoringRules;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub llm: LlmSettings,
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
fn default_port() -> u16 { 5000 }

/// Which `MealStore` backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    /// Write the demo catalog into an empty database on startup
    #[serde(default)]
    pub seed_demo_data: bool,
}

/// Redis is optional; without `redis_url` the service runs uncached
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Scoring overrides; anything left out keeps its built-in value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    pub within_budget_points: Option<i32>,
    pub budget_friendly_points: Option<i32>,
    pub budget_friendly_ratio: Option<f64>,
    pub over_budget_penalty: Option<i32>,
    pub meals_per_day: Option<f64>,
    pub perfect_portion_points: Option<i32>,
    pub perfect_portion_tolerance: Option<f64>,
    pub close_portion_points: Option<i32>,
    pub close_portion_tolerance: Option<f64>,
    pub protein_points: Option<i32>,
    pub protein_min_ratio: Option<f64>,
    pub high_protein_ratio: Option<f64>,
    pub restriction_points: Option<i32>,
    pub local_business_points: Option<i32>,
    pub min_match_score: Option<i32>,
}

impl From<&RulesConfig> for ScoringRules {
    fn from(config: &RulesConfig) -> Self {
        let d = ScoringRules::default();
        Self {
            within_budget_points: config.within_budget_points.unwrap_or(d.within_budget_points),
            budget_friendly_points: config.budget_friendly_points.unwrap_or(d.budget_friendly_points),
            budget_friendly_ratio: config.budget_friendly_ratio.unwrap_or(d.budget_friendly_ratio),
            over_budget_penalty: config.over_budget_penalty.unwrap_or(d.over_budget_penalty),
            meals_per_day: config.meals_per_day.unwrap_or(d.meals_per_day),
            perfect_portion_points: config.perfect_portion_points.unwrap_or(d.perfect_portion_points),
            perfect_portion_tolerance: config.perfect_portion_tolerance.unwrap_or(d.perfect_portion_tolerance),
            close_portion_points: config.close_portion_points.unwrap_or(d.close_portion_points),
            close_portion_tolerance: config.close_portion_tolerance.unwrap_or(d.close_portion_tolerance),
            protein_points: config.protein_points.unwrap_or(d.protein_points),
            protein_min_ratio: config.protein_min_ratio.unwrap_or(d.protein_min_ratio),
            high_protein_ratio: config.high_protein_ratio.unwrap_or(d.high_protein_ratio),
            restriction_points: config.restriction_points.unwrap_or(d.restriction_points),
            local_business_points: config.local_business_points.unwrap_or(d.local_business_points),
            min_match_score: config.min_match_score.unwrap_or(d.min_match_score),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    pub api_key: Option<String>,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key: None,
            timeout_secs: default_llm_timeout(),
        }
    }
}

fn default_llm_endpoint() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }
fn default_llm_model() -> String { "gemini-2.5-pro".to_string() }
fn default_llm_timeout() -> u64 { 60 }

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
    /// Later sources override earlier ones:
    /// 1. Defaults on the structs
    /// 2. config/default.toml, then config/local.toml
    /// 3. Environment variables prefixed with MEALMATCH,
    ///    e.g. MEALMATCH__SERVER__PORT -> server.port
    /// 4. DATABASE_URL and GEMINI_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    pub fn scoring_rules(&self) -> ScoringRules {
        ScoringRules::from(&self.scoring.rules)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("MEALMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply the conventional unprefixed variables on top of the layered config
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(api_key) = env::var("GEMINI_API_KEY") {
        builder = builder.set_override("llm.api_key", api_key)?;
    }

    builder.build()
}
