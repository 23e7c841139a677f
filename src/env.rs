use std::{
    collections::HashMap,
    ffi::OsString,
    fmt,
    io::ErrorKind,
    path::Path,
};

use serde::{
    de::{Deserializer, Error},
    Deserialize,
};
use tracing::debug;

use crate::error::ConfigError;

const DEFAULT_ENV_FILE: &str = ".env";

/// Variables the loader reads. Matching is case-sensitive.
const KEYS: [&str; 5] = [
    "API_PREFIX",
    "DEBUG",
    "DATABASE_URL",
    "ALLOWED_ORIGINS",
    "OPENAI_API_KEY",
];

#[derive(Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default, deserialize_with = "deserialize_bool")]
    pub debug: bool,
    pub database_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_origins")]
    pub allowed_origins: Vec<String>,
    pub openai_api_key: Option<String>,
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_prefix", &self.api_prefix)
            .field("debug", &self.debug)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("allowed_origins", &self.allowed_origins)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Settings {
    /// Reads `.env` from the working directory, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(Some(Path::new(DEFAULT_ENV_FILE)), std::env::vars_os())
    }

    /// Values in `vars` take precedence over values from `env_file`. A missing
    /// file is treated as empty.
    pub fn from_sources<I>(env_file: Option<&Path>, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut merged = HashMap::new();

        if let Some(path) = env_file {
            merged.extend(read_env_file(path)?);
        }

        merged.retain(|key, _| KEYS.contains(&key.as_str()));

        for (key, value) in vars {
            // A non-unicode key can't be one of ours.
            let Ok(key) = key.into_string() else {
                continue;
            };
            if !KEYS.contains(&key.as_str()) {
                continue;
            }
            let value = value.into_string().map_err(|_| {
                ConfigError::Parse(envy::Error::Custom(format!("{key} is not valid unicode")))
            })?;
            merged.insert(key, value);
        }

        debug!(keys = ?merged.keys().collect::<Vec<_>>(), "resolved settings sources");

        envy::from_iter(merged).map_err(ConfigError::Parse)
    }
}

fn read_env_file(path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(err)) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no env file, skipping");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ConfigError::EnvFile {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    iter.collect::<Result<Vec<_>, _>>()
        .map_err(|source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Splits a comma separated origins string. Empty input yields no origins,
/// otherwise every piece is kept as-is, untrimmed.
pub fn parse_allowed_origins(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(parse_allowed_origins(&s))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn deserialize_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    parse_bool(&s).ok_or_else(|| Error::custom(format!("invalid boolean: {s:?}")))
}
