//! Derived views assembled by the ledger.
//!
//! None of these are persisted. A `FoxView` is recomputed from the record
//! set on every call and is stale the instant another record lands.

use serde::{Deserialize, Serialize};

use foxden_core::{ContainerMeta, RecordMeta, Season};
use foxden_store::{ContainerId, PutReceipt, RecordId};

/// Reference to one written record. Writes return this.
pub type RecordRef = PutReceipt;

/// One scanned record with its metadata already parsed into the typed union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub record_id: RecordId,
    pub content_hash: String,
    pub meta: RecordMeta,
}

/// One feed event in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEvent {
    pub occurred_at: String,
    pub credits_delta: i64,
    pub content_hash: String,
}

/// Aggregates over a fox's feed events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoxStats {
    pub event_count: u64,
    /// Timestamp of the last event in sorted order, if any.
    pub last_event_at: Option<String>,
    /// Plain i64 sum of all deltas, wrapping on overflow. Writes accept
    /// any delta, so no total is out of range and none can panic the fold.
    pub total_credits_delta: i64,
}

/// The derived current state of one fox in one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoxView {
    pub fox_id: String,
    pub name: String,
    pub owner: String,
    pub created_at: String,
    pub season: Season,
    pub container_id: ContainerId,
    pub profile_record: RecordRef,
    pub stats: FoxStats,
    /// Events sorted ascending by `occurred_at` (lexicographic).
    pub events: Vec<FeedEvent>,
}

/// A profile-only projection, used when listing a whole season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoxSummary {
    pub fox_id: String,
    pub name: String,
    pub owner: String,
    pub created_at: String,
    pub season: Season,
    pub container_id: ContainerId,
    pub content_hash: String,
}

/// Raw view of a season's active container, for debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonInspection {
    pub container_id: ContainerId,
    pub container_meta: ContainerMeta,
    pub records: Vec<Record>,
}
