//! foxden-core — shared domain types for the Foxden record ledger.
//!
//! A *season* (`YYYY-MM`) partitions the ledger; each season maps to one
//! (usually — see the container race note in foxden-ledger) storage
//! container holding immutable content-addressed records. Records carry
//! typed metadata marshaled to/from the flat string maps the storage
//! boundary speaks.

pub mod config;
pub mod metadata;
pub mod season;

pub use config::FoxdenConfig;
pub use metadata::{ContainerMeta, EventMeta, MetadataError, ProfileMeta, RecordMeta};
pub use season::Season;
