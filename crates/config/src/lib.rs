#![forbid(unsafe_code)]

mod error;
mod polling;
mod proxy;
mod upstream;

pub use error::Error;
pub use polling::Polling;
pub use proxy::Proxy;
pub use upstream::Upstream;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables that override file settings.
///
/// Nested keys are separated by a double underscore, e.g.
/// `RBX_TRACKER_POLLING__INTERVAL=10`.
pub const ENV_PREFIX: &str = "RBX_TRACKER_";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub upstream: Upstream,
    pub polling: Polling,
    pub proxy: Proxy,
}

impl Config {
    /// Defaults overridden by the environment.
    pub fn new() -> Result<Self, Error> {
        Self::extract(Self::figment())
    }

    /// Defaults, then the TOML file at `path`, then the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(figment)
    }

    /// Render the effective configuration as a TOML document.
    pub fn to_toml(&self) -> Result<String, Error> {
        Ok(toml_edit::ser::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.upstream.validate()?;
        self.polling.validate()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn extract(figment: Figment) -> Result<Self, Error> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}
