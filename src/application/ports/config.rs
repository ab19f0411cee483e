//! Settings file port
//!
//! The tracker reads its settings (`history_limit`, `expiration_days`,
//! watcher choice, clipboard backend, database override) from one file.
//! Commands only ever see the merged [`AppConfig`].

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the persisted settings file
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the settings file.
    ///
    /// # Returns
    /// An all-`None` config when the file does not exist yet
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the settings file with `config`.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the settings file.
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write the defaults. Fails with `AlreadyExists` if the file is there.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Load for a capture or history command.
    ///
    /// A broken settings file must not stop clipboard capture, so read and
    /// parse errors are logged and the file layer is treated as empty.
    async fn load_or_empty(&self) -> AppConfig {
        match self.load().await {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, path = %self.path().display(), "ignoring unreadable config file");
                AppConfig::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedStore(Result<AppConfig, ConfigError>);

    #[async_trait]
    impl ConfigStore for FixedStore {
        async fn load(&self) -> Result<AppConfig, ConfigError> {
            self.0.clone()
        }

        async fn save(&self, _config: &AppConfig) -> Result<(), ConfigError> {
            Ok(())
        }

        fn path(&self) -> PathBuf {
            PathBuf::from("/fixed/config.toml")
        }

        fn exists(&self) -> bool {
            true
        }

        async fn init(&self) -> Result<(), ConfigError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_or_empty_passes_through_loaded_file() {
        let loaded = AppConfig {
            expiration_days: Some(3),
            ..AppConfig::empty()
        };
        let store = FixedStore(Ok(loaded.clone()));

        assert_eq!(store.load_or_empty().await, loaded);
    }

    #[tokio::test]
    async fn load_or_empty_ignores_parse_errors() {
        let store = FixedStore(Err(ConfigError::ParseError("bad toml".to_string())));

        assert_eq!(store.load_or_empty().await, AppConfig::empty());
    }
}
