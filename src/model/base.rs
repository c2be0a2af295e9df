//! Fields every stored entity carries: identity and timestamps.

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire and snapshot format for `created_at` / `updated_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Identity and timestamps shared by all six entity types.
///
/// Flattened into each entity so the wire form reads
/// `{"id": ..., "created_at": ..., "updated_at": ..., <own fields>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub id: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl Base {
    /// Fresh identity: a v4 UUID and both timestamps set to the same instant.
    pub fn new() -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Advances `updated_at`. Called by the storage engine on every save.
    pub fn touch(&mut self) {
        let now = now();
        // Never move backwards, even if the clock does.
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

impl Default for Base {
    fn default() -> Self {
        Self::new()
    }
}

/// Current UTC time truncated to the precision the wire format keeps,
/// so a value read back from a snapshot compares equal to the one written.
fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

pub mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_base_has_uuid_and_equal_timestamps() {
        let base = Base::new();
        assert!(Uuid::parse_str(&base.id).is_ok());
        assert_eq!(base.created_at, base.updated_at);
        assert_ne!(Base::new().id, base.id);
    }

    #[test]
    fn test_timestamps_serialize_with_microseconds() {
        let created_at =
            NaiveDateTime::parse_from_str("2017-03-25T02:17:06.000003", TIMESTAMP_FORMAT).unwrap();
        let base = Base {
            id: "abc".to_string(),
            created_at,
            updated_at: created_at,
        };

        let value = serde_json::to_value(&base).unwrap();
        assert_eq!(value["created_at"], "2017-03-25T02:17:06.000003");

        let back: Base = serde_json::from_value(value).unwrap();
        assert_eq!(back, base);
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        let mut base = Base::new();
        let before = base.updated_at;
        base.touch();
        assert!(base.updated_at >= before);
        assert_eq!(base.created_at, before);
    }
}
