//! Typed metadata and its flat-map marshaling.
//!
//! The storage boundary only speaks `BTreeMap<String, String>`. Container
//! and record metadata are typed on our side and marshaled through an
//! explicit `type` discriminant. Parsing is strict: a missing field, an
//! unparseable value, or an unknown discriminant is an error, never a
//! silently defaulted struct.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::season::Season;

/// Flat string map as exchanged with the storage backend.
pub type MetaMap = BTreeMap<String, String>;

/// Discriminant value for profile records.
pub const PROFILE_TYPE: &str = "fox_profile";
/// Discriminant value for feed-event records.
pub const EVENT_TYPE: &str = "feed_event";

/// Errors raised at the marshal boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("missing metadata field `{0}`")]
    MissingField(&'static str),

    #[error("invalid value for `{field}`: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("unknown record type {0:?}")]
    UnknownType(String),
}

fn take(map: &MetaMap, field: &'static str) -> Result<String, MetadataError> {
    map.get(field)
        .cloned()
        .ok_or(MetadataError::MissingField(field))
}

// ── Container metadata ─────────────────────────────────────────────

/// Metadata stamped onto a season's container at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerMeta {
    pub app_id: String,
    pub app_url: String,
    pub environment: String,
    pub network: String,
    pub season: Season,
    pub version: String,
}

impl ContainerMeta {
    pub fn to_map(&self) -> MetaMap {
        MetaMap::from([
            ("app_id".into(), self.app_id.clone()),
            ("app_url".into(), self.app_url.clone()),
            ("environment".into(), self.environment.clone()),
            ("network".into(), self.network.clone()),
            ("season".into(), self.season.to_string()),
            ("version".into(), self.version.clone()),
        ])
    }

    pub fn from_map(map: &MetaMap) -> Result<Self, MetadataError> {
        Ok(Self {
            app_id: take(map, "app_id")?,
            app_url: take(map, "app_url")?,
            environment: take(map, "environment")?,
            network: take(map, "network")?,
            season: take(map, "season")?.parse()?,
            version: take(map, "version")?,
        })
    }

    /// Lookup filter matching every container of one app and season.
    pub fn season_filter(app_id: &str, season: &Season) -> MetaMap {
        MetaMap::from([
            ("app_id".into(), app_id.to_string()),
            ("season".into(), season.to_string()),
        ])
    }
}

// ── Record metadata ────────────────────────────────────────────────

/// Profile record: a fox's identity, written once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMeta {
    pub fox_id: String,
    pub name: String,
    pub owner: String,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
    pub season: Season,
}

/// Feed event record: one credits adjustment applied to a fox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    pub fox_id: String,
    pub owner: String,
    pub season: Season,
    /// RFC 3339 UTC timestamp. Event ordering is imposed at read time by
    /// lexicographic comparison of this field, which is only correct while
    /// all writers emit the same textual format.
    pub occurred_at: String,
    pub credits_delta: i64,
}

/// The typed record metadata union, keyed by the `type` field on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordMeta {
    FoxProfile(ProfileMeta),
    FeedEvent(EventMeta),
}

impl RecordMeta {
    /// The fox this record belongs to.
    pub fn fox_id(&self) -> &str {
        match self {
            RecordMeta::FoxProfile(p) => &p.fox_id,
            RecordMeta::FeedEvent(e) => &e.fox_id,
        }
    }

    /// The wire discriminant.
    pub fn type_tag(&self) -> &'static str {
        match self {
            RecordMeta::FoxProfile(_) => PROFILE_TYPE,
            RecordMeta::FeedEvent(_) => EVENT_TYPE,
        }
    }

    pub fn to_map(&self) -> MetaMap {
        match self {
            RecordMeta::FoxProfile(p) => MetaMap::from([
                ("type".into(), PROFILE_TYPE.into()),
                ("fox_id".into(), p.fox_id.clone()),
                ("name".into(), p.name.clone()),
                ("owner".into(), p.owner.clone()),
                ("created_at".into(), p.created_at.clone()),
                ("season".into(), p.season.to_string()),
            ]),
            RecordMeta::FeedEvent(e) => MetaMap::from([
                ("type".into(), EVENT_TYPE.into()),
                ("fox_id".into(), e.fox_id.clone()),
                ("owner".into(), e.owner.clone()),
                ("season".into(), e.season.to_string()),
                ("occurred_at".into(), e.occurred_at.clone()),
                ("credits_delta".into(), e.credits_delta.to_string()),
            ]),
        }
    }

    pub fn from_map(map: &MetaMap) -> Result<Self, MetadataError> {
        match take(map, "type")?.as_str() {
            PROFILE_TYPE => Ok(RecordMeta::FoxProfile(ProfileMeta {
                fox_id: take(map, "fox_id")?,
                name: take(map, "name")?,
                owner: take(map, "owner")?,
                created_at: take(map, "created_at")?,
                season: take(map, "season")?.parse()?,
            })),
            EVENT_TYPE => {
                let raw_delta = take(map, "credits_delta")?;
                let credits_delta =
                    raw_delta
                        .parse()
                        .map_err(|_| MetadataError::InvalidField {
                            field: "credits_delta",
                            value: raw_delta,
                        })?;
                Ok(RecordMeta::FeedEvent(EventMeta {
                    fox_id: take(map, "fox_id")?,
                    owner: take(map, "owner")?,
                    season: take(map, "season")?.parse()?,
                    occurred_at: take(map, "occurred_at")?,
                    credits_delta,
                }))
            }
            other => Err(MetadataError::UnknownType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season() -> Season {
        "2025-11".parse().unwrap()
    }

    fn profile() -> RecordMeta {
        RecordMeta::FoxProfile(ProfileMeta {
            fox_id: "fox-abc123".into(),
            name: "Nibbles".into(),
            owner: "0xfeedface".into(),
            created_at: "2025-11-02T10:00:00Z".into(),
            season: season(),
        })
    }

    fn event(delta: i64) -> RecordMeta {
        RecordMeta::FeedEvent(EventMeta {
            fox_id: "fox-abc123".into(),
            owner: "0xfeedface".into(),
            season: season(),
            occurred_at: "2025-11-03T09:30:00Z".into(),
            credits_delta: delta,
        })
    }

    #[test]
    fn profile_map_round_trip() {
        let meta = profile();
        let map = meta.to_map();
        assert_eq!(map["type"], PROFILE_TYPE);
        assert_eq!(RecordMeta::from_map(&map).unwrap(), meta);
    }

    #[test]
    fn event_map_round_trip() {
        for delta in [-1, 0, 42, i64::MIN, i64::MAX] {
            let meta = event(delta);
            let map = meta.to_map();
            assert_eq!(map["type"], EVENT_TYPE);
            assert_eq!(RecordMeta::from_map(&map).unwrap(), meta);
        }
    }

    #[test]
    fn missing_field_is_rejected() {
        let mut map = profile().to_map();
        map.remove("owner");
        assert_eq!(
            RecordMeta::from_map(&map),
            Err(MetadataError::MissingField("owner"))
        );
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut map = profile().to_map();
        map.insert("type".into(), "fox_burial".into());
        assert!(matches!(
            RecordMeta::from_map(&map),
            Err(MetadataError::UnknownType(_))
        ));
    }

    #[test]
    fn unparseable_delta_is_rejected() {
        let mut map = event(-1).to_map();
        map.insert("credits_delta".into(), "lots".into());
        assert!(matches!(
            RecordMeta::from_map(&map),
            Err(MetadataError::InvalidField { field: "credits_delta", .. })
        ));
    }

    #[test]
    fn malformed_season_is_rejected() {
        let mut map = event(-1).to_map();
        map.insert("season".into(), "november".into());
        assert!(matches!(
            RecordMeta::from_map(&map),
            Err(MetadataError::InvalidField { field: "season", .. })
        ));
    }

    #[test]
    fn container_meta_round_trip() {
        let meta = ContainerMeta {
            app_id: "foxden".into(),
            app_url: "https://foxden.example".into(),
            environment: "dev".into(),
            network: "local".into(),
            season: season(),
            version: "1.0.0".into(),
        };
        assert_eq!(ContainerMeta::from_map(&meta.to_map()).unwrap(), meta);
    }

    #[test]
    fn season_filter_contains_only_lookup_keys() {
        let filter = ContainerMeta::season_filter("foxden", &season());
        assert_eq!(filter.len(), 2);
        assert_eq!(filter["app_id"], "foxden");
        assert_eq!(filter["season"], "2025-11");
    }
}
