//! Typed ID system for rota records
//!
//! ID Format: `{prefix}-{7-char-hash}`
//! - Houses: `h-…`, staff: `u-…`, shifts: `s-…`, assignments: `g-…`,
//!   templates: `p-…`
//!
//! Hash is derived from a label + creation timestamp, ensuring uniqueness.
//! Same label at different times produces different IDs (by design).

use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid {kind} ID: expected '{prefix}-{{7-char-hash}}', got '{value}'")]
    InvalidFormat {
        kind: &'static str,
        prefix: &'static str,
        value: String,
    },
}

/// Generates a 7-character hash from a label and timestamp
fn generate_hash(label: &str, timestamp: DateTime<Utc>) -> String {
    let input = format!("{}{}", label, timestamp.timestamp_nanos_opt().unwrap_or(0));
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident, $kind:literal, $prefix:literal) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name {
            hash: String,
        }

        impl $name {
            /// Creates a new ID from a label and timestamp
            pub fn new(label: &str, timestamp: DateTime<Utc>) -> Self {
                Self {
                    hash: generate_hash(label, timestamp),
                }
            }

            /// Returns the hash portion of the ID
            pub fn hash(&self) -> &str {
                &self.hash
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.hash)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let hash = s
                    .strip_prefix(concat!($prefix, "-"))
                    .ok_or_else(|| IdError::InvalidFormat {
                        kind: $kind,
                        prefix: $prefix,
                        value: s.to_string(),
                    })?;

                if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(IdError::InvalidFormat {
                        kind: $kind,
                        prefix: $prefix,
                        value: s.to_string(),
                    });
                }

                Ok(Self {
                    hash: hash.to_string(),
                })
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
                id.to_string()
            }
        }
    };
}

id_type!(
    /// House ID in the format `h-{7-char-hash}`
    HouseId, "house", "h"
);
id_type!(
    /// Staff user ID in the format `u-{7-char-hash}`
    StaffId, "staff", "u"
);
id_type!(
    /// Shift ID in the format `s-{7-char-hash}`
    ShiftId, "shift", "s"
);
id_type!(
    /// Assignment ID in the format `g-{7-char-hash}`
    AssignmentId, "assignment", "g"
);
id_type!(
    /// Template ID in the format `p-{7-char-hash}`
    TemplateId, "template", "p"
);
id_type!(
    /// Shift application ID in the format `a-{7-char-hash}`
    ApplicationId, "application", "a"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_through_string() {
        let id = ShiftId::new("Night shift", Utc::now());
        let s = id.to_string();
        assert!(s.starts_with("s-"));

        let parsed: ShiftId = s.parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn same_label_different_time_differs() {
        let a = StaffId::new("Ada", Utc::now());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = StaffId::new("Ada", Utc::now());
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_prefix_rejected() {
        let err = "s-1234abc".parse::<AssignmentId>().unwrap_err();
        assert!(matches!(
            err,
            IdError::InvalidFormat {
                kind: "assignment",
                ..
            }
        ));
    }

    #[test]
    fn bad_hash_rejected() {
        assert!("h-12345".parse::<HouseId>().is_err());
        assert!("h-zzzzzzz".parse::<HouseId>().is_err());
        assert!("h-1234567".parse::<HouseId>().is_ok());
    }

    #[test]
    fn serde_uses_string_form() {
        let id = HouseId::new("Main house", Utc::now());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));

        let back: HouseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
