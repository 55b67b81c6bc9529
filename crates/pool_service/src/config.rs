//! Server configuration from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3001;

/// Default JSON body limit: 10 MiB.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

impl ServerConfig {
    /// Read `PORT`, `POOL_BIND_ADDR` and `POOL_BODY_LIMIT_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let body_limit = defaults.body_limit_bytes;
        Ok(Self {
            bind_addr: parse_var(&lookup, "POOL_BIND_ADDR", defaults.bind_addr)?,
            port: parse_var(&lookup, "PORT", defaults.port)?,
            body_limit_bytes: parse_var(&lookup, "POOL_BODY_LIMIT_BYTES", body_limit)?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3001");
    }

    #[test]
    fn reads_overrides() {
        let vars = lookup(&[
            ("PORT", "8080"),
            ("POOL_BIND_ADDR", "127.0.0.1"),
            ("POOL_BODY_LIMIT_BYTES", "1024"),
        ]);
        let config = ServerConfig::from_lookup(vars).expect("config");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.body_limit_bytes, 1024);
    }

    #[test]
    fn rejects_invalid_port() {
        let vars = lookup(&[("PORT", "eighty")]);
        let error = ServerConfig::from_lookup(vars).expect_err("should fail");
        let expected = ConfigError::InvalidValue {
            key: "PORT",
            value: "eighty".into(),
        };
        assert_eq!(error, expected);
    }
}
