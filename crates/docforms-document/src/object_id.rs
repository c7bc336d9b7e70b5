//! Document identifiers.
//!
//! An [`ObjectId`] is the 12-byte primary key used by document stores. Its
//! canonical text form is 24 lowercase hexadecimal characters, which is what
//! reference selects submit and what reference fields parse back.

use std::fmt;
use std::str::FromStr;

use docforms_core::FormsError;

/// A 12-byte document identifier.
///
/// # Examples
///
/// ```
/// use docforms_document::ObjectId;
///
/// let id: ObjectId = "507f1f77bcf86cd799439011".parse().unwrap();
/// assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
/// assert!("not-an-id".parse::<ObjectId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Creates an id from its raw bytes.
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes of this id.
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Parses a 24-character hexadecimal string.
    pub fn parse_str(s: &str) -> Result<Self, FormsError> {
        let invalid = || FormsError::InvalidId(format!("'{s}' is not a valid ObjectId"));

        let decoded = hex::decode(s).map_err(|_| invalid())?;
        let bytes: [u8; 12] = decoded.try_into().map_err(|_| invalid())?;
        Ok(Self(bytes))
    }
}

impl FromStr for ObjectId {
    type Err = FormsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl serde::Serialize for ObjectId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ObjectId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_str(&s).map_err(serde::de::Error::custom)
    }
}
