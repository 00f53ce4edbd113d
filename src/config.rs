use ::config::{Config as ConfigBuilder, ConfigError, Environment, File};
use nutrition::AnalysisPolicy;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Scoring and classification tables for the analysis engine; tuned per
    /// deployment without touching the aggregation code.
    #[serde(default)]
    pub analysis: AnalysisPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PAE_MENUS__OBSERVABILITY__LOG_LEVEL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional; defaults cover everything.
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PAE_MENUS")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_stand_without_any_config_file() {
        let config = Config::load(Some("does/not/exist.toml".to_string())).unwrap();

        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.analysis.compliance.cap, 2.0);
        assert_eq!(config.analysis.adequacy.food_group_points, 10.0);
        assert_eq!(config.analysis.recommendation.min_calories, 1500.0);
    }
}
