//! User identifiers
//!
//! Records are addressed by uuid. Older records only carry a numeric `id`,
//! so both forms are accepted wherever an identifier is parsed:
//!
//! ```rust
//! use useradmin::ids::UserId;
//!
//! let id: UserId = "6f1c1d4e-8a58-4e2f-9d0a-4b6a3c1e2f10".parse().unwrap();
//! assert!(id.is_uuid());
//!
//! let legacy: UserId = "42".parse().unwrap();
//! assert_eq!(legacy.to_string(), "42");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

/// Identifier of a user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserId {
    /// Opaque uuid assigned by the server
    Uuid(Uuid),
    /// Legacy numeric identifier
    Legacy(i64),
}

impl UserId {
    /// Whether this is a uuid identifier
    pub fn is_uuid(&self) -> bool {
        matches!(self, UserId::Uuid(_))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Uuid(uuid) => write!(f, "{}", uuid.hyphenated()),
            UserId::Legacy(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for UserId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(uuid) = Uuid::parse_str(s) {
            return Ok(UserId::Uuid(uuid));
        }
        s.parse::<i64>()
            .map(UserId::Legacy)
            .map_err(|_| Error::InvalidUserId(s.to_string()))
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        UserId::Uuid(uuid)
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UserId::Uuid(uuid) => uuid.serialize(serializer),
            UserId::Legacy(id) => serializer.serialize_i64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(id) => Ok(UserId::Legacy(id)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid_and_legacy() {
        let uuid = Uuid::new_v4();
        let parsed: UserId = uuid.to_string().parse().unwrap();
        assert_eq!(parsed, UserId::Uuid(uuid));

        let parsed: UserId = " 17 ".parse().unwrap();
        assert_eq!(parsed, UserId::Legacy(17));

        assert!("bob".parse::<UserId>().is_err());
    }

    #[test]
    fn test_deserialize_from_number_or_string() {
        let id: UserId = serde_json::from_str("7").unwrap();
        assert_eq!(id, UserId::Legacy(7));

        let id: UserId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(id, UserId::Legacy(7));

        let id: UserId =
            serde_json::from_str("\"6f1c1d4e-8a58-4e2f-9d0a-4b6a3c1e2f10\"").unwrap();
        assert!(id.is_uuid());

        assert!(serde_json::from_str::<UserId>("\"nope\"").is_err());
    }

    #[test]
    fn test_serialize_round_trips_through_display() {
        let id = UserId::Legacy(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");

        let uuid = Uuid::new_v4();
        let id = UserId::Uuid(uuid);
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{uuid}\""));
    }
}
