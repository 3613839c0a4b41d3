//! YAML configuration for the emulator.
//!
//! The config file carries the database credentials and the destination
//! definitions; runtime knobs (seed, iteration cap, concurrency) come from
//! the CLI and override it.

use anyhow::Context;
use emulator_core::TableKind;
use serde::Deserialize;
use std::path::Path;

/// Top-level emulator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// MySQL credentials for the record source.
    pub database: DatabaseConfig,

    /// Streaming destinations; every sampled record is dispatched to each.
    pub destinations: Vec<DestinationConfig>,

    /// Seed for the offset/sleep sequence. The `--seed` flag overrides it.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Config {
    /// Load and validate a configuration from a YAML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path:?}"))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {path:?}"))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.destinations.is_empty() {
            anyhow::bail!("at least one destination must be configured");
        }
        Ok(())
    }
}

/// MySQL connection parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database host name.
    pub host: String,

    /// Database port.
    #[serde(default = "default_mysql_port")]
    pub port: u16,

    /// Database user.
    pub user: String,

    /// Database password.
    pub password: String,

    /// Database name.
    pub database: String,
}

impl DatabaseConfig {
    /// Connection options for `mysql_async::Pool::new`.
    pub fn mysql_opts(&self) -> mysql_async::Opts {
        mysql_async::OptsBuilder::default()
            .ip_or_hostname(self.host.clone())
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass(Some(self.password.clone()))
            .db_name(Some(self.database.clone()))
            .into()
    }
}

fn default_mysql_port() -> u16 {
    3306
}

/// Per-kind stream or topic names at one destination.
#[derive(Debug, Clone, Deserialize)]
pub struct DestinationNames {
    /// Name receiving pin records.
    pub pin: String,
    /// Name receiving geolocation records.
    pub geo: String,
    /// Name receiving user records.
    pub user: String,
}

impl DestinationNames {
    /// The stream or topic name receiving records of `kind`.
    pub fn for_kind(&self, kind: TableKind) -> &str {
        match kind {
            TableKind::Pin => &self.pin,
            TableKind::Geo => &self.geo,
            TableKind::User => &self.user,
        }
    }
}

/// One streaming destination, selected by transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "transport", rename_all = "snake_case")]
pub enum DestinationConfig {
    /// Kafka REST proxy (`POST /topics/<topic>`).
    RestProxy {
        /// Proxy base URL, e.g. `http://host:8082`.
        endpoint: String,
        /// Topic per record kind.
        names: DestinationNames,
    },

    /// Managed-stream gateway (`PUT /streams/<stream>/record`).
    ApiGateway {
        /// Gateway stage base URL, e.g. `https://host/dev`.
        endpoint: String,
        /// Stream per record kind.
        names: DestinationNames,
        /// Partition key sent with every record.
        #[serde(default = "default_partition_key")]
        partition_key: String,
    },
}

fn default_partition_key() -> String {
    emulator_sink::DEFAULT_PARTITION_KEY.to_string()
}
