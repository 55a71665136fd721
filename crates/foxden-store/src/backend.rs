//! The storage backend trait.
//!
//! Everything above this boundary sees containers and records through five
//! operations plus payload retrieval. Metadata is always a flat
//! `BTreeMap<String, String>`; typed views are marshaled on the caller's
//! side. Record ids are assigned by the backend, monotonically per
//! container, and never reused.

use std::future::Future;

use serde::{Deserialize, Serialize};

use foxden_core::metadata::MetaMap;

use crate::error::StoreResult;

/// Backend-assigned container identifier.
pub type ContainerId = u64;

/// Backend-assigned record sequence id, monotonic within a container.
pub type RecordId = u64;

/// One container as seen in an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerEntry {
    pub container_id: ContainerId,
    pub metadata: MetaMap,
}

/// One record as seen in an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub record_id: RecordId,
    /// sha256 hex digest of the record's payload bytes — its address.
    pub content_hash: String,
}

/// Receipt for a successful append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutReceipt {
    pub container_id: ContainerId,
    pub record_id: RecordId,
    pub content_hash: String,
}

/// The narrow interface to content-addressed storage.
///
/// Implementations must enumerate containers in creation order and records
/// in ascending record id. No call here is retried by the core; errors
/// propagate to the caller verbatim.
pub trait StorageBackend: Send + Sync {
    /// Create a new container stamped with `metadata`.
    fn create_container(
        &self,
        metadata: &MetaMap,
    ) -> impl Future<Output = StoreResult<ContainerId>> + Send;

    /// List containers whose metadata contains every `filter` entry.
    /// An empty filter matches everything.
    fn list_containers(
        &self,
        filter: &MetaMap,
    ) -> impl Future<Output = StoreResult<Vec<ContainerEntry>>> + Send;

    /// Append a record to a container.
    fn put(
        &self,
        container_id: ContainerId,
        payload: &[u8],
        metadata: &MetaMap,
    ) -> impl Future<Output = StoreResult<PutReceipt>> + Send;

    /// Enumerate every record of a container, ascending by record id.
    /// An unknown container enumerates as empty.
    fn enumerate_records(
        &self,
        container_id: ContainerId,
    ) -> impl Future<Output = StoreResult<Vec<RecordEntry>>> + Send;

    /// Fetch the metadata map attached to one record.
    fn get_record_metadata(
        &self,
        container_id: ContainerId,
        record_id: RecordId,
    ) -> impl Future<Output = StoreResult<MetaMap>> + Send;

    /// Fetch a record's raw payload bytes.
    fn get_payload(
        &self,
        container_id: ContainerId,
        record_id: RecordId,
    ) -> impl Future<Output = StoreResult<Vec<u8>>> + Send;
}
