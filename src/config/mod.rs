// Configuration module entry point
// Loads the listening port from the environment

mod types;

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

pub use types::Config;

/// Port used when `PORT` is unset or empty
pub const DEFAULT_PORT: u16 = 8080;

impl Config {
    /// Load configuration from the process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(Some(utf8_env()))
    }

    /// Load configuration from an explicit environment map instead of the
    /// process environment when `env` is `Some`
    pub fn load_with(
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::default().ignore_empty(true).source(env))
            .set_default("port", DEFAULT_PORT)?
            .build()?;

        settings.try_deserialize()
    }

    /// Dual-stack wildcard address `[::]:<port>`
    pub fn get_socket_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv6Addr::UNSPECIFIED, self.port))
    }

    /// IPv4 wildcard address, for hosts without IPv6 support
    pub fn get_ipv4_socket_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Snapshot of the process environment, keeping only UTF-8 pairs
fn utf8_env() -> config::Map<String, String> {
    let mut map = config::Map::new();
    for (key, value) in std::env::vars_os() {
        if let (Ok(key), Ok(value)) = (key.into_string(), value.into_string()) {
            map.insert(key, value);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        let mut map = config::Map::new();
        for (key, value) in pairs {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Some(map)
    }

    #[test]
    fn test_default_port_when_unset() {
        let cfg = Config::load_with(env(&[])).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn test_default_port_when_empty() {
        let cfg = Config::load_with(env(&[("PORT", "")])).unwrap();
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn test_port_from_env() {
        let cfg = Config::load_with(env(&[("PORT", "9090")])).unwrap();
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.get_socket_addr().to_string(), "[::]:9090");
        assert_eq!(cfg.get_ipv4_socket_addr().to_string(), "0.0.0.0:9090");
    }

    #[test]
    fn test_unrelated_vars_ignored() {
        let cfg = Config::load_with(env(&[("HOST", "example.com"), ("HOME", "/root")])).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Config::load_with(env(&[("PORT", "not-a-port")])).is_err());
        assert!(Config::load_with(env(&[("PORT", "70000")])).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_env_var_is_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::env::set_var("SERVERLESS_RS_RAW_BYTES", OsStr::from_bytes(b"f\xffo"));
        let loaded = Config::load();
        std::env::remove_var("SERVERLESS_RS_RAW_BYTES");

        let expected = std::env::var("PORT")
            .ok()
            .filter(|p| !p.is_empty())
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        assert_eq!(loaded.unwrap().port, expected);
    }
}
