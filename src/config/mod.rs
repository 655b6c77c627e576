mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, io::ErrorKind, path::Path};
use tracing::{debug, warn};

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(config_path).await
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    match tokio::fs::read_to_string(path).await {
        Ok(config_str) => Config::from_yaml_str(&config_str),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "Configuration file {} not found, using defaults",
                path.display()
            );
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

impl Config {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let base_url = self.backend.base_url.trim();
        if base_url.is_empty() {
            return Err(Error::config("backend.base_url must not be empty"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::config(format!(
                "backend.base_url must be an http(s) URL, got '{}'",
                base_url
            )));
        }
        if let Some(id) = &self.session.id {
            if id.trim().is_empty() {
                return Err(Error::config("session.id must not be blank when set"));
            }
        }
        Ok(())
    }
}
