//! Strongly-typed ID wrappers
//!
//! Transaction ids are UUID v7, so they sort by creation time. They are
//! shown as a prefix plus the last eight hex digits, which come from the
//! random part of the UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal, $generate:path) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new ID
            pub fn new() -> Self {
                Self($generate())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// The eight hex digits shown after the prefix
            pub fn short(&self) -> String {
                let simple = self.0.simple().to_string();
                simple[simple.len() - 8..].to_string()
            }

            /// Parse a full ID, with or without the display prefix
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                s.parse()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-", Uuid::now_v7);
define_id!(PaymentId, "pay-", Uuid::new_v4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_id_is_v7() {
        let id = TransactionId::new();
        assert_eq!(id.as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_id_display() {
        let id = TransactionId::new();
        let display = id.to_string();
        assert!(display.starts_with("txn-"));
        assert_eq!(display.len(), 12);
        assert!(id.as_uuid().simple().to_string().ends_with(&id.short()));
    }

    #[test]
    fn test_ids_created_back_to_back_differ() {
        let a = TransactionId::new();
        let b = TransactionId::new();
        assert_ne!(a, b);
        assert_ne!(a.short(), b.short());
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = TransactionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with('"'));
        let deserialized: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "0190f6a2-7c4e-7b3a-9d2e-446655440000";
        let id = TransactionId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: TransactionId = format!("txn-{}", uuid_str).parse().unwrap();
        assert_eq!(prefixed, id);
        assert!(TransactionId::parse("txn-1234").is_err());
    }

    #[test]
    fn test_payment_id_prefix() {
        assert!(PaymentId::new().to_string().starts_with("pay-"));
    }
}
