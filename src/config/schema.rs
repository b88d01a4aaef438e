//! Configuration schema definitions.
//!
//! Every field is optional in the file; command-line flags take precedence
//! over anything loaded here.

use serde::{Deserialize, Serialize};

/// Root of the client configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Service endpoint. Falls back to the selected variant's default.
    pub endpoint: Option<String>,

    /// Proxy and authentication settings.
    pub connection: ConnectionConfig,

    /// Report formatting.
    pub output: OutputConfig,
}

/// Connection settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Proxy URL (e.g., "http://proxy:3128").
    pub proxy: Option<String>,

    /// Basic-auth user name. Requires `password`.
    pub username: Option<String>,

    /// Basic-auth password. Requires `username`.
    pub password: Option<String>,

    /// Honour proxy environment variables.
    pub system_proxy: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            username: None,
            password: None,
            system_proxy: true,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Print messages as XML instead of text.
    pub xml: bool,

    /// Enable debug logging.
    pub verbose: bool,
}
