//! Twenty-byte account addresses used by request metadata, the wallet, and
//! vouchers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of bytes in an address.
pub const ADDRESS_LEN: usize = 20;

/// Account address, displayed as lowercase `0x`-prefixed hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Wraps raw address bytes.
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Builds an address from a slice of exactly [`ADDRESS_LEN`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AddressParseError::Length`] for any other slice length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressParseError> {
        <[u8; ADDRESS_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| AddressParseError::Length {
                actual: bytes.len(),
            })
    }
}

/// Error returned when text or bytes do not form an address.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddressParseError {
    /// The value did not decode as hexadecimal.
    #[error("address is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// The value decoded to the wrong number of bytes.
    #[error("address must be {ADDRESS_LEN} bytes, got {actual}")]
    Length { actual: usize },
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = hex::decode(digits)?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
