//! Core types for the pinboard activity emulator.
//!
//! This crate defines the intermediate record model shared by the record
//! sources and the streaming sinks:
//!
//! - [`TableKind`] - the three logical tables the emulator samples from
//! - [`RecordValue`] / [`Record`] - an ordered, source-agnostic row representation
//! - [`serialize_record`] - conversion to transport-safe JSON with ISO-8601
//!   timestamp rendering
//! - [`RecordSource`] - the single-row-fetch contract the emulation loop
//!   depends on

pub mod kinds;
pub mod record;
pub mod serialize;
pub mod source;

pub use kinds::TableKind;
pub use record::{Record, RecordValue};
pub use serialize::{serialize_record, serialize_value, SerializeError};
pub use source::RecordSource;
