use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::RankingPolicy;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_items_table")]
    pub items_table: String,
    pub timeout_secs: Option<u64>,
}

fn default_items_table() -> String { "items".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Redis L2 cache; the listing is only cached in-process when unset
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_boost_radius_km")]
    pub boost_radius_km: f64,
    #[serde(default = "default_fake_report_limit")]
    pub fake_report_limit: u32,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            boost_radius_km: default_boost_radius_km(),
            fake_report_limit: default_fake_report_limit(),
        }
    }
}

impl From<&RankingSettings> for RankingPolicy {
    fn from(settings: &RankingSettings) -> Self {
        Self {
            boost_radius_km: settings.boost_radius_km,
            fake_report_limit: settings.fake_report_limit,
        }
    }
}

fn default_boost_radius_km() -> f64 { 2.0 }
fn default_fake_report_limit() -> u32 { 10 }

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
    /// 4. Environment variables (prefixed with LNF)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LNF__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("LNF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_supabase_env(settings)?;

        settings.try_deserialize()
    }

    pub fn ranking_policy(&self) -> RankingPolicy {
        RankingPolicy::from(&self.ranking)
    }
}

/// Apply the conventional SUPABASE_URL / SUPABASE_KEY variables on top of
/// the loaded configuration
fn apply_supabase_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("SUPABASE_URL") {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Ok(key) = env::var("SUPABASE_KEY") {
        builder = builder.set_override("supabase.api_key", key)?;
    }
    if let Ok(redis_url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }

    builder.build()
}
