use std::{env, net::SocketAddr, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = "data/notes.json";
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Read and write the JSON document in-process.
    File,
    /// Forward every operation to the notes REST routes.
    Rest,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub bind_addr: String,
    pub bind_port: u16,
    pub backend: BackendKind,
    pub api_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("NOTES_BACKEND must be one of: file, rest")]
    InvalidBackend,
    #[error("NOTES_API_URL must be an http(s) url")]
    InvalidApiUrl,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = non_empty("NOTES_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        let bind_addr = non_empty("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string());
        let bind_port = non_empty("BIND_PORT")
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(3000);
        let backend = match non_empty("NOTES_BACKEND")
            .map(|value| value.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("file") => BackendKind::File,
            Some("rest") => BackendKind::Rest,
            Some(_) => return Err(ConfigError::InvalidBackend),
        };
        let api_url = non_empty("NOTES_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl);
        }

        let config = Self {
            db_path,
            bind_addr,
            bind_port,
            backend,
            api_url,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn parse_defaults() {
        let config = parse(&[]).expect("config should parse");
        assert_eq!(config.db_path, PathBuf::from("data/notes.json"));
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.bind_port, 3000);
        assert_eq!(config.backend, BackendKind::File);
        assert_eq!(config.api_url, "http://localhost:3000");
    }

    #[test]
    fn invalid_port_fails() {
        let err = parse(&[("BIND_PORT", "70000")]).expect_err("expected invalid port");
        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn rest_backend_parses_case_insensitively() {
        let config = parse(&[
            ("NOTES_BACKEND", " REST "),
            ("NOTES_API_URL", "http://10.0.0.2:3000"),
        ])
        .expect("config should parse");
        assert_eq!(config.backend, BackendKind::Rest);
        assert_eq!(config.api_url, "http://10.0.0.2:3000");
    }

    #[test]
    fn unknown_backend_fails() {
        let err = parse(&[("NOTES_BACKEND", "sqlite")]).expect_err("expected invalid backend");
        assert!(matches!(err, ConfigError::InvalidBackend));
    }

    #[test]
    fn non_http_api_url_fails() {
        let err = parse(&[("NOTES_API_URL", "localhost:3000")]).expect_err("expected invalid url");
        assert!(matches!(err, ConfigError::InvalidApiUrl));
    }

    #[test]
    fn invalid_bind_addr_fails() {
        let err = parse(&[("BIND_ADDR", "not an address")]).expect_err("expected invalid socket");
        assert!(matches!(err, ConfigError::InvalidSocket));
    }
}
