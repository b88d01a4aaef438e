//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ClientConfig;

/// Why a proxy URL was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProxyError {
    #[error("{0}")]
    Parse(#[from] url::ParseError),

    #[error("unsupported proxy scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
}

/// Local configuration errors. None of these involve the network.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed proxy URL '{proxy}': {source}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: ProxyError,
    },

    #[error("'username' and 'password' are required to appear together")]
    IncompleteCredentials,

    #[error("failed to construct HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_config(content: &str) -> Result<ClientConfig, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(config.connection.system_proxy);
    }

    #[test]
    fn test_full_file() {
        let config = parse_config(
            r#"
            endpoint = "https://svc.example/services/"

            [connection]
            proxy = "http://proxy.example:3128"
            username = "u"
            password = "p"
            system_proxy = false

            [output]
            xml = true
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("https://svc.example/services/"));
        assert_eq!(config.connection.proxy.as_deref(), Some("http://proxy.example:3128"));
        assert_eq!(config.connection.username.as_deref(), Some("u"));
        assert!(!config.connection.system_proxy);
        assert!(config.output.xml);
        assert!(!config.output.verbose);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/taxii-client.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        assert!(parse_config("endpoint = [").is_err());
    }
}
