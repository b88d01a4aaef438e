//! Command-line interface.
//!
//! Flags are merged with the optional config file into [`Settings`]; the
//! command line always wins.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use url::Url;

use crate::config::{load_config, ClientConfig};
use crate::error::ClientError;
use crate::exchange::ExchangeClient;
use crate::messages::Message;
use crate::observability::{DisplayMode, Reporter};
use crate::transport::{self, ConnectionOptions};
use crate::variant::{generate_message_id, ClientVariant, DEFAULT_BASE_URL};

#[derive(Debug, Parser)]
#[command(name = "taxii-client")]
#[command(about = "Send a TAXII message to a service and print the reply", long_about = None)]
pub struct Cli {
    /// Service endpoint. Defaults to the variant's path on the test server.
    #[arg(short = 'u', long = "url", global = true)]
    pub url: Option<String>,

    /// Proxy URL, e.g. http://proxy:3128
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// Basic-auth user name (requires --password)
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Basic-auth password (requires --username)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Print messages as XML instead of text
    #[arg(long = "xml-output", global = true)]
    pub xml_output: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ignore proxy environment variables
    #[arg(long, global = true)]
    pub no_system_proxy: bool,

    /// Message id to send instead of a random one
    #[arg(long, global = true)]
    pub message_id: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// TAXII 1.1 discovery request
    Discovery,
    /// TAXII 1.0 discovery request
    Discovery10,
    /// TAXII 1.1 collection information request
    CollectionInformation,
    /// TAXII 1.0 feed information request
    FeedInformation,
}

impl From<Commands> for ClientVariant {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Discovery => ClientVariant::Discovery11,
            Commands::Discovery10 => ClientVariant::Discovery10,
            Commands::CollectionInformation => ClientVariant::CollectionInformation11,
            Commands::FeedInformation => ClientVariant::FeedInformation10,
        }
    }
}

/// Everything a run needs, after merging flags with the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub variant: ClientVariant,
    pub endpoint: Url,
    pub connection: ConnectionOptions,
    pub display: DisplayMode,
    pub verbose: bool,
    pub message_id: String,
}

impl Cli {
    /// Load the config file named by `--config`, or defaults.
    pub fn load_file(&self) -> Result<ClientConfig, ClientError> {
        match &self.config {
            Some(path) => Ok(load_config(path)?),
            None => Ok(ClientConfig::default()),
        }
    }

    pub fn settings(&self, file: &ClientConfig) -> Result<Settings, ClientError> {
        let variant = ClientVariant::from(self.command);

        let endpoint = match self.url.as_ref().or(file.endpoint.as_ref()) {
            Some(raw) => parse_endpoint(raw)?,
            None => variant
                .default_endpoint(&parse_endpoint(DEFAULT_BASE_URL)?)
                .map_err(|source| ClientError::InvalidEndpoint {
                    url: DEFAULT_BASE_URL.to_string(),
                    source,
                })?,
        };

        let connection = ConnectionOptions {
            proxy: self.proxy.clone().or_else(|| file.connection.proxy.clone()),
            username: self.username.clone().or_else(|| file.connection.username.clone()),
            password: self.password.clone().or_else(|| file.connection.password.clone()),
            system_proxy: file.connection.system_proxy && !self.no_system_proxy,
        };

        let display = if self.xml_output || file.output.xml {
            DisplayMode::Xml
        } else {
            DisplayMode::Text
        };

        Ok(Settings {
            variant,
            endpoint,
            connection,
            display,
            verbose: self.verbose || file.output.verbose,
            message_id: self.message_id.clone().unwrap_or_else(generate_message_id),
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw).map_err(|source| ClientError::InvalidEndpoint {
        url: raw.to_string(),
        source,
    })
}

/// Perform one exchange as described by `settings`, printing both messages.
pub async fn run(settings: &Settings) -> Result<Message, ClientError> {
    let transport = transport::build(&settings.connection)?;
    let client = ExchangeClient::new(transport, Arc::new(Reporter::new(settings.display)));

    let request = settings.variant.request(settings.message_id.as_str());
    tracing::info!(
        variant = ?settings.variant,
        endpoint = %settings.endpoint,
        message_id = %settings.message_id,
        "Starting exchange"
    );

    let reply = client.exchange(&settings.endpoint, &request).await?;
    if reply.is_fault() {
        tracing::warn!(reply = reply.element_name(), "Service replied with a failure status");
    }
    Ok(reply)
}
