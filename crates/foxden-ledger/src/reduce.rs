//! The state reducer — a pure fold from a record set to a `FoxView`.
//!
//! Given the same records in any order, the fold is deterministic and has
//! no side effects. Event order is imposed here, not by storage: events are
//! sorted ascending by their `occurred_at` string. RFC 3339 timestamps sort
//! correctly under lexicographic comparison only while every writer emits
//! the same textual format; the writer in this workspace does.

use foxden_core::RecordMeta;
use foxden_store::ContainerId;

use crate::types::{FeedEvent, FoxStats, FoxView, Record, RecordRef};

/// Fold one fox's records into its derived view.
///
/// `records` must already be filtered to a single fox, in scan order.
/// Returns `None` when no profile record is present: the fox does not
/// exist in this container. When several profile records exist (possible
/// since writes are append-only and never deduplicated), the last one in
/// scan order wins.
pub fn fold_fox(container_id: ContainerId, records: &[Record]) -> Option<FoxView> {
    let mut profile = None;
    let mut events = Vec::new();

    for record in records {
        match &record.meta {
            RecordMeta::FoxProfile(meta) => profile = Some((record, meta)),
            RecordMeta::FeedEvent(meta) => events.push(FeedEvent {
                occurred_at: meta.occurred_at.clone(),
                credits_delta: meta.credits_delta,
                content_hash: record.content_hash.clone(),
            }),
        }
    }

    let (record, meta) = profile?;

    events.sort_by(|a, b| a.occurred_at.cmp(&b.occurred_at));

    let stats = FoxStats {
        event_count: events.len() as u64,
        last_event_at: events.last().map(|e| e.occurred_at.clone()),
        // Wrapping sum: deltas are unbounded on write, so the total must
        // not have a panic path. See `FoxStats::total_credits_delta`.
        total_credits_delta: events
            .iter()
            .fold(0i64, |acc, e| acc.wrapping_add(e.credits_delta)),
    };

    Some(FoxView {
        fox_id: meta.fox_id.clone(),
        name: meta.name.clone(),
        owner: meta.owner.clone(),
        created_at: meta.created_at.clone(),
        season: meta.season.clone(),
        container_id,
        profile_record: RecordRef {
            container_id,
            record_id: record.record_id,
            content_hash: record.content_hash.clone(),
        },
        stats,
        events,
    })
}
