//! Pinboard activity emulator
//!
//! Produces a steady, randomized synthetic workload for a downstream
//! streaming pipeline by repeatedly sampling rows from a MySQL store and
//! forwarding each sample to one or more HTTP streaming destinations.
//!
//! Each iteration sleeps a random interval, draws one shared random offset,
//! fetches one row from each of the pin, geo, and user tables, serializes
//! them to transport JSON, and dispatches every record to every configured
//! destination. Delivery failures are logged and never stop the loop; the
//! only way it ends is an external signal (or an explicit iteration cap).
//!
//! # CLI Usage
//!
//! ```bash
//! # Run against the destinations in emulator.yaml until interrupted
//! pinboard-emulator --config emulator.yaml
//!
//! # Reproducible ten-iteration run with concurrent dispatch
//! pinboard-emulator --config emulator.yaml --seed 100 \
//!   --max-iterations 10 --concurrent-dispatch
//! ```

pub mod config;
pub mod emulator;

pub use config::{Config, DatabaseConfig, DestinationConfig, DestinationNames};
pub use emulator::{setup_shutdown_handler, Destination, Emulator};
