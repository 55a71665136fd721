//! redb table definitions for the default store.
//!
//! Keys are zero-padded decimal strings so that iteration order equals id
//! order. Composite record keys follow `{container_id}:{record_id}`.

use redb::TableDefinition;

/// Container metadata keyed by `{container_id:010}` (JSON `MetaMap`).
pub const CONTAINERS: TableDefinition<&str, &[u8]> = TableDefinition::new("containers");

/// Record rows keyed by `{container_id:010}:{record_id:010}` (JSON `RecordRow`).
pub const RECORDS: TableDefinition<&str, &[u8]> = TableDefinition::new("records");

/// Raw payload bytes keyed like `RECORDS`.
pub const PAYLOADS: TableDefinition<&str, &[u8]> = TableDefinition::new("payloads");

/// Sequence counters: `containers` plus one `records:{container_id:010}`
/// entry per container.
pub const COUNTERS: TableDefinition<&str, u64> = TableDefinition::new("counters");

pub fn container_key(container_id: u64) -> String {
    format!("{container_id:010}")
}

pub fn record_key(container_id: u64, record_id: u64) -> String {
    format!("{container_id:010}:{record_id:010}")
}

pub fn record_prefix(container_id: u64) -> String {
    format!("{container_id:010}:")
}

pub fn record_counter_key(container_id: u64) -> String {
    format!("records:{container_id:010}")
}
