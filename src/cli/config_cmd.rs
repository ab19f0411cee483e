//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, ClipboardBackend, WatcherKind};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(value_of(&config, key).as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, value_of(&config, key).as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(invalid(
            key,
            format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        ))
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "history_limit" => {
            config.history_limit = Some(
                value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| invalid(key, "Value must be a positive integer"))?,
            )
        }
        "expiration_days" => {
            config.expiration_days = Some(value.parse::<u32>().map_err(|_| {
                invalid(key, "Value must be a whole number of days (0 disables expiry)")
            })?)
        }
        "watcher" => {
            let kind = value
                .parse::<WatcherKind>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.watcher = Some(kind.to_string());
        }
        "poll_interval_ms" => {
            config.poll_interval_ms = Some(
                value
                    .parse::<u64>()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or_else(|| invalid(key, "Value must be a positive number of milliseconds"))?,
            )
        }
        "clipboard_backend" => {
            let backend = value
                .parse::<ClipboardBackend>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.clipboard_backend = Some(backend.to_string());
        }
        "notify" => {
            config.notify = Some(
                parse_bool(value).map_err(|_| invalid(key, "Value must be 'true' or 'false'"))?,
            )
        }
        "database_path" => {
            if value.trim().is_empty() {
                return Err(invalid(key, "Path must not be empty"));
            }
            config.database_path = Some(value.to_string());
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

/// Stored value of `key` as text
fn value_of(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "history_limit" => config.history_limit.map(|n| n.to_string()),
        "expiration_days" => config.expiration_days.map(|n| n.to_string()),
        "watcher" => config.watcher.clone(),
        "poll_interval_ms" => config.poll_interval_ms.map(|n| n.to_string()),
        "clipboard_backend" => config.clipboard_backend.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "database_path" => config.database_path.clone(),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct MemoryConfigStore(Mutex<AppConfig>);

    #[async_trait]
    impl ConfigStore for MemoryConfigStore {
        async fn load(&self) -> Result<AppConfig, ConfigError> {
            Ok(self.0.lock().unwrap().clone())
        }

        async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
            *self.0.lock().unwrap() = config.clone();
            Ok(())
        }

        fn path(&self) -> PathBuf {
            PathBuf::from("/memory/config.toml")
        }

        fn exists(&self) -> bool {
            true
        }

        async fn init(&self) -> Result<(), ConfigError> {
            Err(ConfigError::AlreadyExists(self.path().display().to_string()))
        }
    }

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn apply_numeric_values() {
        let mut config = AppConfig::empty();

        apply_value(&mut config, "history_limit", "30").unwrap();
        apply_value(&mut config, "expiration_days", "0").unwrap();
        apply_value(&mut config, "poll_interval_ms", "250").unwrap();

        assert_eq!(config.history_limit, Some(30));
        assert_eq!(config.expiration_days, Some(0));
        assert_eq!(config.poll_interval_ms, Some(250));
    }

    #[test]
    fn reject_bad_numbers() {
        let mut config = AppConfig::empty();

        assert!(apply_value(&mut config, "history_limit", "0").is_err());
        assert!(apply_value(&mut config, "history_limit", "-3").is_err());
        assert!(apply_value(&mut config, "expiration_days", "week").is_err());
        assert!(apply_value(&mut config, "poll_interval_ms", "0").is_err());
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn watcher_and_backend_are_normalized() {
        let mut config = AppConfig::empty();

        apply_value(&mut config, "watcher", "polling").unwrap();
        apply_value(&mut config, "clipboard_backend", "Wayland").unwrap();

        assert_eq!(config.watcher.as_deref(), Some("poll"));
        assert_eq!(config.clipboard_backend.as_deref(), Some("wayland"));
        assert!(apply_value(&mut config, "watcher", "inotify").is_err());
    }

    #[test]
    fn database_path_must_not_be_blank() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "database_path", "  ").is_err());
        apply_value(&mut config, "database_path", "/tmp/h.db").unwrap();
        assert_eq!(value_of(&config, "database_path").as_deref(), Some("/tmp/h.db"));
    }

    #[tokio::test]
    async fn set_then_get_through_store() {
        let store = MemoryConfigStore(Mutex::new(AppConfig::empty()));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "expiration_days".to_string(),
                value: "14".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        assert_eq!(store.load().await.unwrap().expiration_days, Some(14));
    }

    #[tokio::test]
    async fn unknown_key_is_validation_error() {
        let store = MemoryConfigStore(Mutex::new(AppConfig::empty()));
        let presenter = Presenter::new();

        let err = handle_config_command(
            ConfigAction::Get {
                key: "api_key".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }
}
