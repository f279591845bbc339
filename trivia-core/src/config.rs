use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default bind address for the HTTP server
const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 5000);

/// Default maximum pool connections.
/// Kept low, each request issues at most a couple of queries.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration for the trivia backend, read from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriviaConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(DEFAULT_BIND),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// PostgreSQL connection string; `DATABASE_URL` takes precedence when set
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl TriviaConfig {
    /// Load config from `$TRIVIA_CONFIG` or ~/.trivia/config.toml.
    ///
    /// A missing file is not an error: defaults apply.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Config file path: `$TRIVIA_CONFIG`, else ~/.trivia/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("TRIVIA_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".trivia/config.toml")
    }

    /// Database URL with `DATABASE_URL` overriding the file
    pub fn database_url(&self) -> Option<String> {
        env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| self.database.url.clone())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "database.max_connections",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TriviaConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, TriviaConfig::default());
        assert_eq!(config.server.bind.port(), 5000);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\nurl = \"postgres://localhost/trivia\"").unwrap();

        let config = TriviaConfig::load_from(file.path()).unwrap();
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost/trivia")
        );
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server, ServerSection::default());
    }

    #[test]
    fn bind_address_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind = \"0.0.0.0:8080\"").unwrap();

        let config = TriviaConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nbind = ").unwrap();

        let err = TriviaConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn zero_connections_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\nmax_connections = 0").unwrap();

        let err = TriviaConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
