use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_TUTOR_TIMEOUT_SECS: u64 = 15;

/// Settings read from the environment (and `.env`, if there is one).
/// The bot token itself is picked up by `Bot::from_env` as `TELOXIDE_TOKEN`.
#[derive(Debug, Clone)]
pub struct Config {
    pub chatgpt_api_key: String,
    pub tutor_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        if let Err(err) = dotenv::dotenv() {
            log::info!("No .env file loaded ({err}); using the process environment");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let chatgpt_api_key = lookup("CHATGPT_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::MissingEnv("CHATGPT_API_KEY"))?;

        let tutor_timeout = match lookup("TUTOR_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_TUTOR_TIMEOUT_SECS),
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::InvalidEnv {
                        name: "TUTOR_TIMEOUT_SECS",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            chatgpt_api_key,
            tutor_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn api_key_is_required() {
        assert!(matches!(
            config_from(&[]),
            Err(Error::MissingEnv("CHATGPT_API_KEY"))
        ));
        assert!(matches!(
            config_from(&[("CHATGPT_API_KEY", "  ")]),
            Err(Error::MissingEnv("CHATGPT_API_KEY"))
        ));
    }

    #[test]
    fn timeout_defaults_to_fifteen_seconds() {
        let config = config_from(&[("CHATGPT_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.chatgpt_api_key, "sk-test");
        assert_eq!(config.tutor_timeout, Duration::from_secs(15));
    }

    #[test]
    fn timeout_can_be_overridden() {
        let config =
            config_from(&[("CHATGPT_API_KEY", "sk-test"), ("TUTOR_TIMEOUT_SECS", "30")]).unwrap();
        assert_eq!(config.tutor_timeout, Duration::from_secs(30));

        for bad in ["soon", "0", "-3"] {
            let result = config_from(&[("CHATGPT_API_KEY", "sk-test"), ("TUTOR_TIMEOUT_SECS", bad)]);
            assert!(
                matches!(result, Err(Error::InvalidEnv { name: "TUTOR_TIMEOUT_SECS", .. })),
                "accepted {bad:?}"
            );
        }
    }
}
