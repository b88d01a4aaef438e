//! Transport construction from connection options.
//!
//! # Responsibilities
//! - Validate proxy URL and credential pairing before any I/O
//! - Build a reqwest client on top of the platform defaults
//! - Keep proxy and credentials inspectable for callers and tests

use std::fmt;

use url::Url;

use crate::config::{ConfigError, ProxyError};

/// Proxy schemes the client can route through.
const PROXY_SCHEMES: [&str; 2] = ["http", "https"];

/// Connection options as supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Proxy URL (scheme, host and port).
    pub proxy: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Honour proxy settings from the environment (`HTTP_PROXY` and friends).
    pub system_proxy: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            proxy: None,
            username: None,
            password: None,
            system_proxy: true,
        }
    }
}

/// Proxy every request is routed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
}

/// Basic-auth credentials, applied to any host and realm.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configured HTTP execution context. Immutable once built.
pub struct Transport {
    client: reqwest::Client,
    proxy: Option<ProxyTarget>,
    credentials: Option<Credentials>,
}

impl Transport {
    pub fn proxy(&self) -> Option<&ProxyTarget> {
        self.proxy.as_ref()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Start a POST to `endpoint`, with credentials attached when configured.
    pub(crate) fn post(&self, endpoint: &Url) -> reqwest::RequestBuilder {
        let request = self.client.post(endpoint.clone());
        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        }
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("proxy", &self.proxy)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Build a transport from connection options.
///
/// All failures are local validation failures; no connection is attempted.
pub fn build(options: &ConnectionOptions) -> Result<Transport, ConfigError> {
    let proxy = options.proxy.as_deref().map(parse_proxy).transpose()?;

    let credentials = match (&options.username, &options.password) {
        (Some(username), Some(password)) => Some(Credentials {
            username: username.clone(),
            password: password.clone(),
        }),
        (None, None) => None,
        _ => return Err(ConfigError::IncompleteCredentials),
    };

    let mut builder = reqwest::Client::builder();
    if !options.system_proxy {
        builder = builder.no_proxy();
    }
    if let Some((url, _)) = &proxy {
        builder = builder.proxy(reqwest::Proxy::all(url.clone()).map_err(ConfigError::Client)?);
    }
    let client = builder.build().map_err(ConfigError::Client)?;

    let proxy = proxy.map(|(_, target)| target);
    tracing::debug!(
        proxy = ?proxy,
        authenticated = credentials.is_some(),
        system_proxy = options.system_proxy,
        "Transport built"
    );

    Ok(Transport {
        client,
        proxy,
        credentials,
    })
}

fn parse_proxy(raw: &str) -> Result<(Url, ProxyTarget), ConfigError> {
    let invalid = |source: ProxyError| ConfigError::InvalidProxy {
        proxy: raw.to_string(),
        source,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.into()))?;
    if !PROXY_SCHEMES.contains(&url.scheme()) {
        return Err(invalid(ProxyError::UnsupportedScheme(url.scheme().to_string())));
    }
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| invalid(url::ParseError::EmptyHost.into()))?
        .to_string();
    let target = ProxyTarget {
        scheme: url.scheme().to_string(),
        host,
        port: url.port_or_known_default(),
    };
    Ok((url, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ConnectionOptions {
        ConnectionOptions {
            system_proxy: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_have_no_proxy_or_credentials() {
        let transport = build(&options()).unwrap();
        assert!(transport.proxy().is_none());
        assert!(transport.credentials().is_none());
    }

    #[test]
    fn test_lone_username_or_password_rejected() {
        let mut opts = options();
        opts.username = Some("u".into());
        assert!(matches!(build(&opts), Err(ConfigError::IncompleteCredentials)));

        let mut opts = options();
        opts.password = Some("p".into());
        assert!(matches!(build(&opts), Err(ConfigError::IncompleteCredentials)));
    }

    #[test]
    fn test_malformed_proxy_keeps_parse_reason() {
        for raw in ["not a url", "http://", "://missing-scheme", "http://[::1"] {
            let mut opts = options();
            opts.proxy = Some(raw.into());
            match build(&opts) {
                Err(ConfigError::InvalidProxy { proxy, source }) => {
                    assert_eq!(proxy, raw);
                    assert!(!source.to_string().is_empty());
                }
                other => panic!("expected InvalidProxy for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_not_a_url_reports_relative_url_error() {
        let mut opts = options();
        opts.proxy = Some("not a url".into());
        let err = build(&opts).unwrap_err();
        match err {
            ConfigError::InvalidProxy { source, .. } => {
                assert_eq!(source, ProxyError::Parse(url::ParseError::RelativeUrlWithoutBase))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_proxy_scheme_rejected() {
        for (raw, scheme) in [
            ("ftp://127.0.0.1:1", "ftp"),
            ("socks5://127.0.0.1:1080", "socks5"),
            ("socks5h://proxy.example:1080", "socks5h"),
        ] {
            let mut opts = options();
            opts.proxy = Some(raw.into());
            match build(&opts) {
                Err(ConfigError::InvalidProxy { proxy, source }) => {
                    assert_eq!(proxy, raw);
                    assert_eq!(source, ProxyError::UnsupportedScheme(scheme.into()));
                }
                other => panic!("expected InvalidProxy for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_proxy_and_credentials_are_inspectable() {
        let mut opts = options();
        opts.proxy = Some("http://proxy.example:3128".into());
        opts.username = Some("u".into());
        opts.password = Some("p".into());

        let transport = build(&opts).unwrap();
        assert_eq!(
            transport.proxy(),
            Some(&ProxyTarget {
                scheme: "http".into(),
                host: "proxy.example".into(),
                port: Some(3128),
            })
        );
        let creds = transport.credentials().unwrap();
        assert_eq!(creds.username, "u");
        assert_eq!(creds.password, "p");
    }

    #[test]
    fn test_proxy_port_defaults_from_scheme() {
        let mut opts = options();
        opts.proxy = Some("https://proxy.example".into());
        let transport = build(&opts).unwrap();
        assert_eq!(transport.proxy().unwrap().port, Some(443));
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut opts = options();
        opts.username = Some("alice".into());
        opts.password = Some("hunter2".into());
        let rendered = format!("{:?}", build(&opts).unwrap());
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
