//! Command-line interface for pinboard-emulator
//!
//! # Usage Examples
//!
//! ```bash
//! # Run with both destinations from the config file until interrupted
//! RUST_LOG=info pinboard-emulator --config emulator.yaml
//!
//! # Deterministic short run for smoke testing a pipeline
//! pinboard-emulator --config emulator.yaml --seed 100 --max-iterations 25
//! ```
//!
//! # Configuration
//!
//! ```yaml
//! database:
//!   host: my-rds-host
//!   user: admin
//!   password: secret
//!   database: pinboard
//! destinations:
//!   - transport: rest_proxy
//!     endpoint: http://broker-host:8082
//!     names: { pin: demo.pin, geo: demo.geo, user: demo.user }
//!   - transport: api_gateway
//!     endpoint: https://gateway-host/dev
//!     names:
//!       pin: streaming-demo-pin
//!       geo: streaming-demo-geo
//!       user: streaming-demo-user
//! ```

use anyhow::Context;
use clap::Parser;
use emulator_mysql_source::MySqlRecordSource;
use emulator_sink::{ApiGatewaySink, RestProxySink};
use pinboard_emulator::{
    setup_shutdown_handler, Config, Destination, DestinationConfig, Emulator,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pinboard-emulator")]
#[command(about = "Emulates a stream of pinboard user activity by sampling MySQL rows and posting them to streaming endpoints")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "emulator.yaml", env = "EMULATOR_CONFIG")]
    config: PathBuf,

    /// Seed for the offset/sleep sequence (overrides the config file)
    #[arg(long, env = "EMULATOR_SEED")]
    seed: Option<u64>,

    /// Dispatch the three table kinds concurrently within an iteration
    #[arg(long)]
    concurrent_dispatch: bool,

    /// Stop after this many iterations (default: run until interrupted)
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Upper bound (inclusive) for the random sampling offset
    #[arg(long, default_value_t = pinboard_emulator::emulator::DEFAULT_MAX_OFFSET)]
    max_offset: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_file(&cli.config)?;
    let seed = cli.seed.or(config.seed).unwrap_or_else(rand::random);

    let pool = mysql_async::Pool::new(config.database.mysql_opts());
    let source = MySqlRecordSource::new(pool.clone());

    let mut destinations = Vec::with_capacity(config.destinations.len());
    for destination in &config.destinations {
        destinations.push(match destination {
            DestinationConfig::RestProxy { endpoint, names } => Destination {
                sink: Box::new(
                    RestProxySink::new(endpoint.clone())
                        .with_context(|| format!("Failed to create REST proxy client for {endpoint}"))?,
                ),
                names: names.clone(),
            },
            DestinationConfig::ApiGateway {
                endpoint,
                names,
                partition_key,
            } => Destination {
                sink: Box::new(
                    ApiGatewaySink::new(endpoint.clone(), partition_key.clone())
                        .with_context(|| format!("Failed to create gateway client for {endpoint}"))?,
                ),
                names: names.clone(),
            },
        });
    }

    tracing::info!(
        seed,
        destinations = destinations.len(),
        max_offset = cli.max_offset,
        "starting emulation loop"
    );

    let shutdown = setup_shutdown_handler();

    let mut emulator = Emulator::new(Arc::new(source), destinations, seed)
        .with_max_offset(cli.max_offset)
        .with_concurrent_dispatch(cli.concurrent_dispatch);
    if let Some(max) = cli.max_iterations {
        emulator = emulator.with_max_iterations(max);
    }

    emulator.run(shutdown).await?;

    pool.disconnect()
        .await
        .context("Failed to tear down the MySQL connection pool")?;

    Ok(())
}
