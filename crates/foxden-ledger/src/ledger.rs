//! The `Ledger` — container directory, record writer, and record scanner
//! over one storage backend.
//!
//! The backend and config are injected once at process start and shared
//! (the backend is `Clone` over an `Arc` internally); there is no global
//! lazily-initialized handle and therefore no stale failure to get stuck
//! on.

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

use foxden_core::{FoxdenConfig, ProfileMeta, EventMeta, ContainerMeta, RecordMeta, Season};
use foxden_store::{ContainerEntry, ContainerId, StorageBackend};

use crate::error::{LedgerError, LedgerResult};
use crate::reduce::fold_fox;
use crate::types::{FoxSummary, FoxView, Record, RecordRef, SeasonInspection};

/// Minimum profile payload size the backend accepts, in bytes.
pub const MIN_PROFILE_PAYLOAD: usize = 127;

/// Placeholder payload for event records; the event itself is carried
/// entirely in metadata.
const EVENT_PAYLOAD: &[u8] = &[1];

/// Derive a fox id from its owner: `fox-<owner fragment>-<hex millis>`.
pub fn generate_fox_id(owner: &str) -> String {
    let fragment: String = owner
        .trim_start_matches("0x")
        .chars()
        .take(6)
        .collect();
    let millis = Utc::now().timestamp_millis();
    format!("fox-{fragment}-{millis:x}")
}

fn now_rfc3339() -> String {
    // Fixed precision and UTC offset so that timestamps sort
    // lexicographically (the reducer relies on this).
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Append-only season ledger over a storage backend.
pub struct Ledger<B> {
    backend: B,
    config: FoxdenConfig,
}

impl<B: StorageBackend> Ledger<B> {
    pub fn new(backend: B, config: FoxdenConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &FoxdenConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ── Container directory ────────────────────────────────────────

    /// Find the season's active container without creating one.
    ///
    /// When several containers match (see `resolve_container`), the last
    /// one in backend enumeration order is the active one; records in the
    /// earlier containers are invisible and effectively orphaned.
    async fn find_container(&self, season: &Season) -> LedgerResult<Option<ContainerEntry>> {
        let filter = self.config.season_filter(season);
        let mut found = self.backend.list_containers(&filter).await?;
        Ok(found.pop())
    }

    /// Resolve the season's container, creating it on first use.
    ///
    /// Not internally serialized: two concurrent callers that both observe
    /// "no container yet" for the same season will each create one. The
    /// duplicate is harmless — every later call picks the last enumerated
    /// container — but it is a real race, kept deliberately; see DESIGN.md.
    pub async fn resolve_container(&self, season: &Season) -> LedgerResult<ContainerId> {
        if let Some(entry) = self.find_container(season).await? {
            return Ok(entry.container_id);
        }

        let meta = self.config.container_meta(season);
        let container_id = self.backend.create_container(&meta.to_map()).await?;
        info!(%season, container_id, "season container created");
        Ok(container_id)
    }

    // ── Record writer ──────────────────────────────────────────────

    /// Append a fox's profile record, with its image as the payload.
    pub async fn write_profile(
        &self,
        fox_id: &str,
        name: &str,
        owner: &str,
        season: &Season,
        image_bytes: &[u8],
    ) -> LedgerResult<RecordRef> {
        if image_bytes.len() < MIN_PROFILE_PAYLOAD {
            return Err(LedgerError::Validation(format!(
                "image is too small ({} bytes); minimum size is {MIN_PROFILE_PAYLOAD} bytes",
                image_bytes.len()
            )));
        }

        let container_id = self.resolve_container(season).await?;
        let meta = RecordMeta::FoxProfile(ProfileMeta {
            fox_id: fox_id.to_string(),
            name: name.to_string(),
            owner: owner.to_string(),
            created_at: now_rfc3339(),
            season: season.clone(),
        });

        let receipt = self
            .backend
            .put(container_id, image_bytes, &meta.to_map())
            .await?;
        debug!(fox_id, container_id, record_id = receipt.record_id, "profile written");
        Ok(receipt)
    }

    /// Append a feed event. Any delta is accepted — negative, zero, or
    /// large; bounds are a presentation-layer concern.
    pub async fn write_event(
        &self,
        fox_id: &str,
        owner: &str,
        season: &Season,
        credits_delta: i64,
    ) -> LedgerResult<RecordRef> {
        let container_id = self.resolve_container(season).await?;
        let meta = RecordMeta::FeedEvent(EventMeta {
            fox_id: fox_id.to_string(),
            owner: owner.to_string(),
            season: season.clone(),
            occurred_at: now_rfc3339(),
            credits_delta,
        });

        let receipt = self
            .backend
            .put(container_id, EVENT_PAYLOAD, &meta.to_map())
            .await?;
        debug!(fox_id, container_id, record_id = receipt.record_id, credits_delta, "event written");
        Ok(receipt)
    }

    // ── Record scanner ─────────────────────────────────────────────

    /// Every record in the season's active container, in scan order.
    /// Linear in the container size; there is no index.
    pub async fn list_records(&self, season: &Season) -> LedgerResult<Vec<Record>> {
        match self.find_container(season).await? {
            Some(entry) => self.scan_container(entry.container_id).await,
            None => Ok(Vec::new()),
        }
    }

    /// The season's records filtered to one fox. Re-scans the whole
    /// container on every call.
    pub async fn records_for_fox(
        &self,
        fox_id: &str,
        season: &Season,
    ) -> LedgerResult<Vec<Record>> {
        let mut records = self.list_records(season).await?;
        records.retain(|r| r.meta.fox_id() == fox_id);
        Ok(records)
    }

    async fn scan_container(&self, container_id: ContainerId) -> LedgerResult<Vec<Record>> {
        let entries = self.backend.enumerate_records(container_id).await?;
        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            let map = self
                .backend
                .get_record_metadata(container_id, entry.record_id)
                .await?;
            records.push(Record {
                record_id: entry.record_id,
                content_hash: entry.content_hash,
                meta: RecordMeta::from_map(&map)?,
            });
        }
        Ok(records)
    }

    // ── State reducer ──────────────────────────────────────────────

    /// Replay a fox's records into its current view. `Ok(None)` when the
    /// fox has no profile record in this season.
    pub async fn reduce(&self, fox_id: &str, season: &Season) -> LedgerResult<Option<FoxView>> {
        let Some(entry) = self.find_container(season).await? else {
            return Ok(None);
        };
        let mut records = self.scan_container(entry.container_id).await?;
        records.retain(|r| r.meta.fox_id() == fox_id);
        Ok(fold_fox(entry.container_id, &records))
    }

    // ── Season projections ─────────────────────────────────────────

    /// All foxes with a profile record in the season.
    pub async fn list_foxes(&self, season: &Season) -> LedgerResult<Vec<FoxSummary>> {
        let Some(entry) = self.find_container(season).await? else {
            return Ok(Vec::new());
        };
        let records = self.scan_container(entry.container_id).await?;
        Ok(records
            .into_iter()
            .filter_map(|r| match r.meta {
                RecordMeta::FoxProfile(p) => Some(FoxSummary {
                    fox_id: p.fox_id,
                    name: p.name,
                    owner: p.owner,
                    created_at: p.created_at,
                    season: p.season,
                    container_id: entry.container_id,
                    content_hash: r.content_hash,
                }),
                RecordMeta::FeedEvent(_) => None,
            })
            .collect())
    }

    /// Raw records plus container metadata, for debugging a season.
    pub async fn inspect_season(
        &self,
        season: &Season,
    ) -> LedgerResult<Option<SeasonInspection>> {
        let Some(entry) = self.find_container(season).await? else {
            return Ok(None);
        };
        let container_meta = ContainerMeta::from_map(&entry.metadata)?;
        let records = self.scan_container(entry.container_id).await?;
        Ok(Some(SeasonInspection {
            container_id: entry.container_id,
            container_meta,
            records,
        }))
    }

    /// The payload bytes of a fox's profile record (its image).
    pub async fn profile_image(
        &self,
        fox_id: &str,
        season: &Season,
    ) -> LedgerResult<Option<Vec<u8>>> {
        let Some(view) = self.reduce(fox_id, season).await? else {
            return Ok(None);
        };
        let bytes = self
            .backend
            .get_payload(view.container_id, view.profile_record.record_id)
            .await?;
        Ok(Some(bytes))
    }
}
