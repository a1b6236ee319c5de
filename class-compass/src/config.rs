//! Server configuration from the environment.
//!
//! The distance-matrix API key is the only required setting. A missing key
//! stops the server at startup rather than letting it send unauthenticated
//! provider requests.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::maps::{DEFAULT_BASE_URL, MapsConfig};

/// Environment variable holding the provider API key.
pub const API_KEY_VAR: &str = "MAPS_API_KEY";

/// Default static asset root.
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} is not set; export your distance-matrix API key before starting the server")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the whole server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Directory served for `/*` static requests
    pub public_dir: PathBuf,
    /// Distance-matrix provider settings
    pub maps: MapsConfig,
    /// Resolve travel times through this remote proxy instead of in-process
    pub proxy_url: Option<String>,
    /// Maximum overlapping travel-time queries per render
    pub max_in_flight: usize,
}

impl AppConfig {
    /// Build the configuration with the given API key and defaults for
    /// everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            maps: MapsConfig::new(api_key),
            proxy_url: None,
            max_in_flight: 1,
        }
    }

    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// | Variable                      | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `MAPS_API_KEY`                | required                |
    /// | `MAPS_BASE_URL`               | provider endpoint       |
    /// | `MAPS_TIMEOUT_SECS`           | none                    |
    /// | `CLASS_COMPASS_ADDR`          | `127.0.0.1:5000`        |
    /// | `CLASS_COMPASS_PUBLIC_DIR`    | `public`                |
    /// | `CLASS_COMPASS_PROXY_URL`     | none (in-process)       |
    /// | `CLASS_COMPASS_MAX_IN_FLIGHT` | `1`                     |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Treat empty values as unset.
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let mut config = Self::new(api_key);

        if let Some(url) = get("MAPS_BASE_URL") {
            config.maps = config.maps.with_base_url(url);
        }

        if let Some(raw) = get("MAPS_TIMEOUT_SECS") {
            let secs = parse_var("MAPS_TIMEOUT_SECS", &raw)?;
            config.maps = config.maps.with_timeout(secs);
        }

        if let Some(raw) = get("CLASS_COMPASS_ADDR") {
            config.addr = parse_var("CLASS_COMPASS_ADDR", &raw)?;
        }

        if let Some(dir) = get("CLASS_COMPASS_PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }

        config.proxy_url = get("CLASS_COMPASS_PROXY_URL");

        if let Some(raw) = get("CLASS_COMPASS_MAX_IN_FLIGHT") {
            let n: usize = parse_var("CLASS_COMPASS_MAX_IN_FLIGHT", &raw)?;
            if n == 0 {
                return Err(ConfigError::Invalid {
                    var: "CLASS_COMPASS_MAX_IN_FLIGHT",
                    value: raw,
                    reason: "must be at least 1".to_string(),
                });
            }
            config.max_in_flight = n;
        }

        Ok(config)
    }

    /// Whether the provider endpoint has been overridden.
    pub fn uses_custom_provider(&self) -> bool {
        self.maps.base_url != DEFAULT_BASE_URL
    }
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("MAPS_API_KEY"));
        assert!(err.to_string().starts_with("MAPS_API_KEY is not set"));
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup(&[("MAPS_API_KEY", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("MAPS_API_KEY"));
    }

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(lookup(&[("MAPS_API_KEY", "secret")])).unwrap();

        assert_eq!(config.maps.api_key, "secret");
        assert_eq!(config.maps.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.maps.timeout_secs, None);
        assert_eq!(config.addr, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.proxy_url, None);
        assert_eq!(config.max_in_flight, 1);
        assert!(!config.uses_custom_provider());
    }

    #[test]
    fn overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("MAPS_API_KEY", "secret"),
            ("MAPS_BASE_URL", "http://localhost:9999/json"),
            ("MAPS_TIMEOUT_SECS", "15"),
            ("CLASS_COMPASS_ADDR", "0.0.0.0:8080"),
            ("CLASS_COMPASS_PUBLIC_DIR", "/srv/compass"),
            ("CLASS_COMPASS_PROXY_URL", "http://proxy.internal:5000"),
            ("CLASS_COMPASS_MAX_IN_FLIGHT", "4"),
        ]))
        .unwrap();

        assert_eq!(config.maps.base_url, "http://localhost:9999/json");
        assert_eq!(config.maps.timeout_secs, Some(15));
        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.public_dir, PathBuf::from("/srv/compass"));
        assert_eq!(
            config.proxy_url.as_deref(),
            Some("http://proxy.internal:5000")
        );
        assert_eq!(config.max_in_flight, 4);
        assert!(config.uses_custom_provider());
    }

    #[test]
    fn invalid_values_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("MAPS_API_KEY", "secret"),
            ("CLASS_COMPASS_ADDR", "localhost"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "CLASS_COMPASS_ADDR",
                ..
            }
        ));

        let err = AppConfig::from_lookup(lookup(&[
            ("MAPS_API_KEY", "secret"),
            ("MAPS_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().starts_with("MAPS_TIMEOUT_SECS has an invalid value"));

        let err = AppConfig::from_lookup(lookup(&[
            ("MAPS_API_KEY", "secret"),
            ("CLASS_COMPASS_MAX_IN_FLIGHT", "0"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("must be at least 1"));
    }
}
