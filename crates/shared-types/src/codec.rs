//! Hex codec for hashes.
//!
//! Hashes travel as `0x`-prefixed lowercase hex in JSON and in search text.

use crate::entities::{Hash, HASH_LENGTH};
use crate::errors::HexError;

/// Encode a hash as `0x`-prefixed lowercase hex.
pub fn to_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Decode a `0x`-prefixed hex string into a 32-byte hash.
pub fn hash_from_hex(value: &str) -> Result<Hash, HexError> {
    let digits = value.strip_prefix("0x").ok_or(HexError::MissingPrefix)?;
    let bytes = hex::decode(digits).map_err(|e| HexError::InvalidHex(e.to_string()))?;

    if bytes.len() != HASH_LENGTH {
        return Err(HexError::InvalidLength {
            expected: HASH_LENGTH,
            got: bytes.len(),
        });
    }

    let mut hash = [0u8; HASH_LENGTH];
    hash.copy_from_slice(&bytes);
    Ok(hash)
}

/// `#[serde(with = "...")]` adapter for [`Hash`] fields.
pub mod hex_hash {
    use super::{hash_from_hex, to_hex};
    use crate::entities::Hash;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Hash, D::Error> {
        let text = String::deserialize(deserializer)?;
        hash_from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "...")]` adapter for `Option<Hash>` fields.
pub mod hex_hash_opt {
    use super::{hash_from_hex, to_hex};
    use crate::entities::Hash;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hash: &Option<Hash>, serializer: S) -> Result<S::Ok, S::Error> {
        match hash {
            Some(h) => serializer.serialize_some(&to_hex(h)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Hash>, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?;
        text.map(|t| hash_from_hex(&t).map_err(serde::de::Error::custom))
            .transpose()
    }
}
