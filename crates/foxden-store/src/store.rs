//! RedbStore — the embedded default backend.
//!
//! Containers, record rows, and payloads live in separate redb tables with
//! JSON values. Content hashes are sha256 hex digests of the payload bytes,
//! computed at append time. Record ids count up from 1 per container and
//! are never reused; enumeration order is id order.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use foxden_core::metadata::MetaMap;

use crate::backend::*;
use crate::error::{StoreError, StoreResult};
use crate::tables::*;

/// Convert any `Display` error into a `StoreError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StoreError::$variant(e.to_string())
    };
}

/// One persisted record row (payload bytes live in their own table).
#[derive(Debug, Serialize, Deserialize)]
struct RecordRow {
    record_id: RecordId,
    content_hash: String,
    metadata: MetaMap,
}

/// Thread-safe content-addressed store backed by redb.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "record store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory record store opened");
        Ok(store)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(CONTAINERS).map_err(map_err!(Table))?;
        txn.open_table(RECORDS).map_err(map_err!(Table))?;
        txn.open_table(PAYLOADS).map_err(map_err!(Table))?;
        txn.open_table(COUNTERS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    fn next_counter(
        txn: &redb::WriteTransaction,
        counter_key: &str,
    ) -> StoreResult<u64> {
        let mut counters = txn.open_table(COUNTERS).map_err(map_err!(Table))?;
        let next = counters
            .get(counter_key)
            .map_err(map_err!(Read))?
            .map(|guard| guard.value())
            .unwrap_or(0)
            + 1;
        counters
            .insert(counter_key, next)
            .map_err(map_err!(Write))?;
        Ok(next)
    }
}

impl StorageBackend for RedbStore {
    async fn create_container(&self, metadata: &MetaMap) -> StoreResult<ContainerId> {
        let value = serde_json::to_vec(metadata).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let container_id = Self::next_counter(&txn, "containers")?;
        {
            let mut table = txn.open_table(CONTAINERS).map_err(map_err!(Table))?;
            table
                .insert(container_key(container_id).as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(container_id, "container created");
        Ok(container_id)
    }

    async fn list_containers(&self, filter: &MetaMap) -> StoreResult<Vec<ContainerEntry>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(CONTAINERS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (key, value) = entry.map_err(map_err!(Read))?;
            let metadata: MetaMap =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            if filter.iter().all(|(k, v)| metadata.get(k) == Some(v)) {
                let container_id = key
                    .value()
                    .parse::<ContainerId>()
                    .map_err(map_err!(Deserialize))?;
                results.push(ContainerEntry {
                    container_id,
                    metadata,
                });
            }
        }
        Ok(results)
    }

    async fn put(
        &self,
        container_id: ContainerId,
        payload: &[u8],
        metadata: &MetaMap,
    ) -> StoreResult<PutReceipt> {
        let content_hash = hex::encode(Sha256::digest(payload));

        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let containers = txn.open_table(CONTAINERS).map_err(map_err!(Table))?;
            if containers
                .get(container_key(container_id).as_str())
                .map_err(map_err!(Read))?
                .is_none()
            {
                return Err(StoreError::NotFound(format!("container {container_id}")));
            }
        }
        let record_id = Self::next_counter(&txn, &record_counter_key(container_id))?;
        let key = record_key(container_id, record_id);
        let row = RecordRow {
            record_id,
            content_hash: content_hash.clone(),
            metadata: metadata.clone(),
        };
        let value = serde_json::to_vec(&row).map_err(map_err!(Serialize))?;
        {
            let mut records = txn.open_table(RECORDS).map_err(map_err!(Table))?;
            records
                .insert(key.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
            let mut payloads = txn.open_table(PAYLOADS).map_err(map_err!(Table))?;
            payloads
                .insert(key.as_str(), payload)
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(container_id, record_id, %content_hash, "record appended");
        Ok(PutReceipt {
            container_id,
            record_id,
            content_hash,
        })
    }

    async fn enumerate_records(&self, container_id: ContainerId) -> StoreResult<Vec<RecordEntry>> {
        let prefix = record_prefix(container_id);
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(RECORDS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (key, value) = entry.map_err(map_err!(Read))?;
            if key.value().starts_with(&prefix) {
                let row: RecordRow =
                    serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
                results.push(RecordEntry {
                    record_id: row.record_id,
                    content_hash: row.content_hash,
                });
            }
        }
        Ok(results)
    }

    async fn get_record_metadata(
        &self,
        container_id: ContainerId,
        record_id: RecordId,
    ) -> StoreResult<MetaMap> {
        let key = record_key(container_id, record_id);
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(RECORDS).map_err(map_err!(Table))?;
        match table.get(key.as_str()).map_err(map_err!(Read))? {
            Some(guard) => {
                let row: RecordRow =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(row.metadata)
            }
            None => Err(StoreError::NotFound(format!("record {key}"))),
        }
    }

    async fn get_payload(
        &self,
        container_id: ContainerId,
        record_id: RecordId,
    ) -> StoreResult<Vec<u8>> {
        let key = record_key(container_id, record_id);
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(PAYLOADS).map_err(map_err!(Table))?;
        match table.get(key.as_str()).map_err(map_err!(Read))? {
            Some(guard) => Ok(guard.value().to_vec()),
            None => Err(StoreError::NotFound(format!("payload {key}"))),
        }
    }
}
