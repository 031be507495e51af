use serde::Deserialize;
use std::env;
use pressroom_catalog::{CostConfig, ItemOption, OptionCatalog, OptionError};
use pressroom_order::PackagingConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    /// Absent means variants and templates live in process memory
    #[serde(default)]
    pub redis: Option<RedisConfig>,
    #[serde(default)]
    pub pricing: CostConfig,
    #[serde(default)]
    pub packaging: PackagingConfig,
    #[serde(default)]
    pub options: OptionsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OptionsConfig {
    #[serde(default)]
    pub materials: Vec<ItemOption>,
    #[serde(default)]
    pub finishes: Vec<ItemOption>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // untracked local overrides
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `PRESSROOM__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("PRESSROOM").separator("__"))
            .build()?;

        s.try_deserialize::<Self>()?.validated()
    }

    /// Build from a single TOML document, without files or environment.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        s.try_deserialize::<Self>()?.validated()
    }

    fn validated(self) -> Result<Self, config::ConfigError> {
        if self.packaging.units_per_padding == 0 {
            return Err(config::ConfigError::Message(
                "packaging.units_per_padding must be at least 1".to_string(),
            ));
        }
        for (field, value) in [
            ("base_box_cost", self.packaging.base_box_cost),
            ("extra_padding_cost", self.packaging.extra_padding_cost),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(config::ConfigError::Message(format!(
                    "packaging.{} must be a non-negative amount, got {}",
                    field, value
                )));
            }
        }
        self.option_catalog()
            .map_err(|e| config::ConfigError::Message(format!("options: {}", e)))?;
        Ok(self)
    }

    pub fn option_catalog(&self) -> Result<OptionCatalog, OptionError> {
        OptionCatalog::new(self.options.materials.clone(), self.options.finishes.clone())
    }
}
