//! Startup configuration: JSON alert settings plus Telegram credentials from the environment.

use pricealert_core::{AlertConfig, ConfigError, Credentials};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Fatal startup errors. Any of these aborts the process with a nonzero exit.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} not found. Please create it with the required settings.", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigError),

    #[error("TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID environment variables must be set (missing {0})")]
    MissingEnv(&'static str),
}

/// Parse and validate alert settings from a JSON document.
pub fn parse_config(path: &Path, contents: &str) -> Result<AlertConfig, LoadError> {
    let config: AlertConfig =
        serde_json::from_str(contents).map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

/// Load alert settings from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<AlertConfig, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_config(path, &contents)
}

/// Build credentials from a variable lookup. Empty values count as missing.
pub fn credentials_from<F>(lookup: F) -> Result<Credentials, LoadError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &'static str| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(LoadError::MissingEnv(name))
    };
    Ok(Credentials::new(get(BOT_TOKEN_ENV)?, get(CHAT_ID_ENV)?))
}

/// Read credentials from the process environment.
pub fn load_credentials() -> Result<Credentials, LoadError> {
    credentials_from(|name| std::env::var(name).ok())
}
