//! The single-row-fetch contract the emulation loop depends on.

use crate::{Record, TableKind};
use async_trait::async_trait;

/// A store that can supply one row of a given kind at a given offset.
///
/// `Ok(None)` means the offset lies beyond the table's current row count
/// (a sampling gap); the loop skips that kind for the iteration rather than
/// reusing stale data.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the single row at `offset` from the table backing `table`.
    async fn fetch_one(&self, table: TableKind, offset: u64) -> anyhow::Result<Option<Record>>;
}
