use bruteguard_core::settings::{
    address_list::AddressListSettings, rate_limiter::RateLimiterSettings,
};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[readonly::make]
pub struct ListenerSettings {
    pub bind_address: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub auth: ListenerSettings,
    pub admin: ListenerSettings,
    pub rate_limiter: RateLimiterSettings,
    #[serde(default)]
    pub address_list: AddressListSettings,
}

impl Settings {
    pub fn get_environment() -> Environment {
        Environment::default()
            .prefix("BRUTEGUARD")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    /// Config builder preloaded with the built-in defaults.
    pub fn builder_with_defaults(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("logging.level", "info")?
            .set_default("auth.bind_address", "0.0.0.0:21350")?
            .set_default("admin.bind_address", "127.0.0.1:21351")?
            .set_default("rate_limiter.login.capacity", 10u32)?
            .set_default("rate_limiter.login.window", "1m")?
            .set_default("rate_limiter.login.idle_expiry", "10m")?
            .set_default("rate_limiter.password.capacity", 100u32)?
            .set_default("rate_limiter.password.window", "1m")?
            .set_default("rate_limiter.password.idle_expiry", "10m")?
            .set_default("rate_limiter.address.capacity", 1000u32)?
            .set_default("rate_limiter.address.window", "1m")?
            .set_default("rate_limiter.address.idle_expiry", "10m")?
            .set_default("rate_limiter.sweep_interval", "1m")?
            .set_default("address_list.backend", "memory")
    }

    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("BRUTEGUARD_RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::builder_with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Self::get_environment())
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rate_limiter
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        self.address_list
            .validate()
            .map_err(ConfigError::Message)
    }
}
