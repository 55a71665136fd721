//! foxden-ledger — append-only season ledger over content-addressed storage.
//!
//! Per season, fox profiles and feed events are appended as immutable
//! records to that season's container; a fox's current state is never
//! stored but recomputed on demand by replaying its records.
//!
//! # Architecture
//!
//! ```text
//! Ledger<B: StorageBackend>
//!   ├── Container directory  resolve/find the season container
//!   ├── Record writer        write_profile / write_event (append only)
//!   ├── Record scanner       list_records / records_for_fox (linear scan)
//!   └── State reducer        reduce → FoxView (pure fold over the scan)
//! ```
//!
//! The write/read path is strictly sequential: one backend call awaited at
//! a time, no locks. The only concurrency hazard is the container-creation
//! race documented on [`Ledger::resolve_container`].

pub mod error;
pub mod ledger;
pub mod reduce;
pub mod types;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{generate_fox_id, Ledger, MIN_PROFILE_PAYLOAD};
pub use types::{FeedEvent, FoxStats, FoxSummary, FoxView, Record, RecordRef, SeasonInspection};
