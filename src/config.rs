/// Configuration management using figment
///
/// Loads configuration with this precedence (highest wins):
/// 1. Defaults (hardcoded)
/// 2. TOML file: simpleranker.toml (in working directory)
/// 3. Environment variables: prefixed SIMPLERANKER_, `__` separates nested keys
///    (e.g., SIMPLERANKER_LOG_LEVEL=debug, SIMPLERANKER_RANKER__RANKING=max)

use figment::{
    Figment,
    providers::{Env, Format, Toml, Serialized},
};
use serde::{Deserialize, Serialize};
use crate::errors::RankerError;
use crate::logging::LogFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log line format on stderr: auto, text, json
    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub ranker: RankerConfig,
}

/// Settings the ranker is constructed with.
///
/// `ranking` stays a plain string here so that a bad value survives loading
/// and is rejected by `Ranker::new` with a configuration error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Name of the score used for comparison and aggregation
    #[serde(default = "default_metric")]
    pub metric: String,

    /// One of: min, max, mean_min, mean_max
    #[serde(default = "default_ranking")]
    pub ranking: String,

    /// Which documents get ranked, e.g. "@r" or "@c"
    #[serde(default = "default_access_paths")]
    pub access_paths: String,

    /// Deprecated alias of access_paths; wins over it when set
    #[serde(default)]
    pub traversal_paths: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_metric() -> String {
    "cosine".to_string()
}

fn default_ranking() -> String {
    "min".to_string()
}

fn default_access_paths() -> String {
    "@r".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            ranker: RankerConfig::default(),
        }
    }
}

impl Default for RankerConfig {
    fn default() -> Self {
        RankerConfig {
            metric: default_metric(),
            ranking: default_ranking(),
            access_paths: default_access_paths(),
            traversal_paths: None,
        }
    }
}

impl RankerConfig {
    /// The access paths the ranker uses when a call does not override them.
    ///
    /// Returns the path and whether it came from the deprecated alias.
    pub fn resolved_access_paths(&self) -> (&str, bool) {
        match self.traversal_paths.as_deref() {
            Some(legacy) => (legacy, true),
            None => (self.access_paths.as_str(), false),
        }
    }
}

impl Config {
    /// Load configuration from defaults, TOML file, and environment variables
    ///
    /// Environment variables override TOML file values.
    /// Example: SIMPLERANKER_RANKER__METRIC=euclidean overrides ranker.metric in simpleranker.toml
    pub fn load() -> Result<Config, RankerError> {
        Self::extract(
            Self::figment()
                .merge(Toml::file("simpleranker.toml"))
                .merge(Env::prefixed("SIMPLERANKER_").split("__")),
        )
    }

    /// Base figment holding the hardcoded defaults.
    pub fn figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    pub fn extract(figment: Figment) -> Result<Config, RankerError> {
        figment
            .extract()
            .map_err(|e| RankerError::configuration("config", &format!("Failed to load config: {}", e)))
    }
}
