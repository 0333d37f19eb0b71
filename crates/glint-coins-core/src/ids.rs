//! Identifier types for the coins service.
//!
//! Two identifier families are used:
//!
//! - **UUID** ids for externally-assigned entities (users, catalog entries,
//!   tiers). User ids come from the platform's identity service.
//! - **ULID** ids for event records (ledger transactions, gifts,
//!   subscriptions). ULIDs are time-ordered, which the per-user indexes rely
//!   on for chronological listing without a separate timestamp key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Define a UUID-based identifier type with standard trait implementations.
///
/// Generates a newtype wrapper around `uuid::Uuid` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `Serialize`, `Deserialize` (as string)
/// - `FromStr`, `Display`, `Debug`
/// - `TryFrom<String>`, `Into<String>`
/// - `AsRef<[u8]>`
macro_rules! uuid_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Create a new identifier from a UUID.
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Return the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            /// Return the bytes of the UUID (16 bytes).
            #[must_use]
            pub fn as_bytes(&self) -> &[u8; 16] {
                self.0.as_bytes()
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = uuid::Uuid::parse_str(s).map_err(|_| IdError::InvalidUuid)?;
                Ok(Self(uuid))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }
    };
}

/// Define a ULID-based identifier type with standard trait implementations.
///
/// Same surface as `uuid_id_type!`, plus `to_bytes`/`from_bytes` for index
/// key encoding. ULIDs are time-ordered, so these ids sort chronologically.
macro_rules! ulid_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Ulid);

        impl $name {
            /// Create a new identifier from a ULID.
            #[must_use]
            pub const fn from_ulid(ulid: Ulid) -> Self {
                Self(ulid)
            }

            /// Generate a new identifier with the current timestamp.
            #[must_use]
            pub fn generate() -> Self {
                Self(Ulid::new())
            }

            /// Return the underlying ULID.
            #[must_use]
            pub const fn as_ulid(&self) -> &Ulid {
                &self.0
            }

            /// Return the bytes of the ULID (16 bytes).
            #[must_use]
            pub fn to_bytes(&self) -> [u8; 16] {
                self.0.to_bytes()
            }

            /// Create an identifier from bytes.
            ///
            /// # Errors
            ///
            /// Returns an error if the bytes are invalid.
            pub fn from_bytes(bytes: [u8; 16]) -> Result<Self, IdError> {
                Ok(Self(Ulid::from_bytes(bytes)))
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let ulid = Ulid::from_string(s).map_err(|_| IdError::InvalidUlid)?;
                Ok(Self(ulid))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }
    };
}

uuid_id_type!(UserId, "A user identifier (UUID format from the platform identity service).");
uuid_id_type!(GiftTypeId, "A gift catalog entry identifier (UUID format).");
uuid_id_type!(TierId, "A subscription tier identifier (UUID format).");

ulid_id_type!(
    TransactionId,
    "A ledger transaction identifier (ULID, time-ordered).\n\nTime-ordering allows the per-wallet transaction index to list history\nchronologically by key order alone."
);
ulid_id_type!(GiftId, "A gift-send event identifier (ULID, time-ordered).");
ulid_id_type!(SubscriptionId, "A subscription identifier (ULID, time-ordered).");

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a valid UUID.
    #[error("invalid UUID format")]
    InvalidUuid,

    /// The input is not a valid ULID.
    #[error("invalid ULID format")]
    InvalidUlid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_roundtrip() {
        let id = UserId::generate();
        let str_repr = id.to_string();
        let parsed = UserId::from_str(&str_repr).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn user_id_serde_json() {
        let id = UserId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn user_id_rejects_garbage() {
        assert_eq!("not-a-uuid".parse::<UserId>(), Err(IdError::InvalidUuid));
    }

    #[test]
    fn transaction_id_roundtrip() {
        let id = TransactionId::generate();
        let str_repr = id.to_string();
        let parsed = TransactionId::from_str(&str_repr).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn transaction_id_bytes_roundtrip() {
        let id = TransactionId::generate();
        let bytes = id.to_bytes();
        let parsed = TransactionId::from_bytes(bytes).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn gift_id_serde_json() {
        let id = GiftId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: GiftId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn ulid_ids_are_time_ordered() {
        let first = TransactionId::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = TransactionId::generate();
        assert!(second.to_bytes() > first.to_bytes());
    }
}
