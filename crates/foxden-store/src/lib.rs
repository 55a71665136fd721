//! foxden-store — the content-addressed storage boundary.
//!
//! [`StorageBackend`] is the narrow interface the rest of the system talks
//! to: flat string-map metadata in, container/record ids and content hashes
//! out. [`RedbStore`] is the default implementation, an embedded redb
//! database with sha256 content addressing. Containers and records are
//! append-only; nothing here updates or deletes a record once written.

pub mod backend;
pub mod error;
pub mod store;
mod tables;

pub use backend::{
    ContainerEntry, ContainerId, PutReceipt, RecordEntry, RecordId, StorageBackend,
};
pub use error::{StoreError, StoreResult};
pub use store::RedbStore;
