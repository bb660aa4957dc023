//! Process settings read from the environment (`.env` is loaded by the binary via dotenvy).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/beanpedia";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Apply DDL and seed the country table on startup.
    pub run_migrations: bool,
    pub max_body_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => match v.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DATABASE_MAX_CONNECTIONS",
                        value: v,
                    })
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                key: "RUN_MIGRATIONS",
                value: v,
            })?,
            None => true,
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "MAX_BODY_BYTES",
                value: v,
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Settings {
            database_url,
            bind_addr,
            max_connections,
            run_migrations,
            max_body_bytes,
        })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let s = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(s.max_connections, 5);
        assert!(s.run_migrations);
        assert_eq!(s.max_body_bytes, 65536);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let s = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/catalog"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("RUN_MIGRATIONS", "0"),
            ("MAX_BODY_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(s.database_url, "postgres://db/catalog");
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.max_connections, 12);
        assert!(!s.run_migrations);
        assert_eq!(s.max_body_bytes, 1024);
    }

    #[test]
    fn zero_connections_is_rejected() {
        let err = Settings::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. }));
    }

    #[test]
    fn unparsable_flag_is_rejected() {
        let err = Settings::from_lookup(lookup_from(&[("RUN_MIGRATIONS", "maybe")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for RUN_MIGRATIONS: 'maybe'");
    }
}
