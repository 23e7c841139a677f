use std::{ffi::OsString, path::Path};

use anyhow::{Context, Result};

use crate::{cors, Settings};

/// Loads settings from `.env` and the process environment and validates
/// everything derived from them at startup.
pub fn load_checked() -> Result<Settings> {
    let settings = Settings::load().context("failed to load settings")?;
    validate(&settings)?;
    Ok(settings)
}

pub fn check_sources<I>(env_file: Option<&Path>, vars: I) -> Result<Settings>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let settings = Settings::from_sources(env_file, vars).context("failed to load settings")?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<()> {
    cors::cors_layer(settings).context("invalid cors policy")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
        pairs
            .iter()
            .map(|(k, v)| (OsString::from(k), OsString::from(v)))
            .collect()
    }

    #[test]
    fn valid_config_passes() {
        let settings = check_sources(
            None,
            vars(&[("DEBUG", "1"), ("ALLOWED_ORIGINS", "https://app.example.com")]),
        )
        .unwrap();

        assert!(settings.debug);
        assert_eq!(settings.allowed_origins, vec!["https://app.example.com"]);
    }

    #[test]
    fn unparseable_value_fails() {
        let err = check_sources(None, vars(&[("DEBUG", "sometimes")])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn invalid_origin_fails() {
        let err = check_sources(None, vars(&[("ALLOWED_ORIGINS", "https://ok.com,bad\norigin")]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidOrigin { .. })
        ));
    }
}
