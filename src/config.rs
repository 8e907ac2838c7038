// src/config.rs
use std::{net::SocketAddr, path::PathBuf, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Runtime settings, read from the process environment once at startup.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub answer_timeout: Duration,
    pub chat_ttl: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            answer_timeout: Duration::from_secs(30),
            chat_ttl: Duration::from_secs(3600),
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("PORTAL_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::Invalid { key: "PORTAL_BIND_ADDR", value: bind_raw.clone() })?;

        // A blank key is the same as no key.
        let api_key = lookup("API_KEY")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .filter(|k| !k.trim().is_empty());

        let answer_timeout = secs(&lookup, "ANSWER_TIMEOUT_SECS", 30)?;
        let chat_ttl = secs(&lookup, "CHAT_TTL_SECS", 3600)?;
        // An idle chat must outlive the slowest answer it can be waiting on.
        if chat_ttl <= answer_timeout {
            return Err(ConfigError::ChatTtlTooShort { chat_ttl, answer_timeout });
        }

        Ok(Self {
            bind_addr,
            data_dir: lookup("PORTAL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            api_key,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            answer_timeout,
            chat_ttl,
        })
    }
}

fn secs<F>(lookup: &F, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let cfg = PortalConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.bind_addr.port(), 3000);
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.answer_timeout, Duration::from_secs(30));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = PortalConfig::from_lookup(lookup_from(&[("API_KEY", "  ")])).unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn gemini_key_is_a_fallback() {
        let cfg = PortalConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "abc")])).unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("abc"));
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = PortalConfig::from_lookup(lookup_from(&[("CHAT_TTL_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CHAT_TTL_SECS", .. }));
    }

    #[test]
    fn chat_ttl_must_exceed_answer_timeout() {
        for ttl in ["10", "30"] {
            let err = PortalConfig::from_lookup(lookup_from(&[
                ("ANSWER_TIMEOUT_SECS", "30"),
                ("CHAT_TTL_SECS", ttl),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::ChatTtlTooShort { .. }), "ttl {ttl}");
        }

        let cfg = PortalConfig::from_lookup(lookup_from(&[
            ("ANSWER_TIMEOUT_SECS", "30"),
            ("CHAT_TTL_SECS", "31"),
        ]))
        .unwrap();
        assert_eq!(cfg.chat_ttl, Duration::from_secs(31));
    }
}
