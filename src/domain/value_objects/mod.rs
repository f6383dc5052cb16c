//! Value Objects for seller identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CrmError, Result};

/// Upper bound on a derived seller identifier.
pub const MAX_SELLER_IDENTIFIER_LEN: usize = 15;

/// Column width used by the older sale records.
pub const LEGACY_STORAGE_WIDTH: usize = 9;

/// Checks the identifier shape: 1 to 15 characters, all `[A-Z0-9]`.
///
/// Says nothing about which name, if any, the identifier came from.
pub fn is_valid_seller_identifier(candidate: &str) -> bool {
    (1..=MAX_SELLER_IDENTIFIER_LEN).contains(&candidate.len())
        && candidate.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Seller identifier value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SellerIdentifier(String);

impl SellerIdentifier {
    pub const UNKNOWN: &'static str = "UNKNOWN";

    /// Accepts an identifier from outside the deriver (imports, hand edits).
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !is_valid_seller_identifier(&value) {
            return Err(CrmError::InvalidSellerIdentifier(value));
        }
        Ok(Self(value))
    }

    pub fn unknown() -> Self { Self(Self::UNKNOWN.to_string()) }

    /// Wraps deriver output, which is valid by construction.
    pub(crate) fn from_derived(value: String) -> Self {
        debug_assert!(is_valid_seller_identifier(&value), "derived {value:?}");
        Self(value)
    }

    pub fn as_str(&self) -> &str { &self.0 }
    pub fn is_unknown(&self) -> bool { self.0 == Self::UNKNOWN }

    /// Cuts the identifier down to a storage column of `width` characters.
    pub fn truncated(&self, width: usize) -> Result<Self> {
        if !(1..=MAX_SELLER_IDENTIFIER_LEN).contains(&width) {
            return Err(CrmError::InvalidStorageWidth(width));
        }
        let cut = self.0.get(..width).unwrap_or(&self.0);
        Ok(Self(cut.to_string()))
    }
}

impl fmt::Display for SellerIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl TryFrom<String> for SellerIdentifier {
    type Error = CrmError;
    fn try_from(value: String) -> Result<Self> { Self::parse(value) }
}

impl From<SellerIdentifier> for String {
    fn from(id: SellerIdentifier) -> Self { id.0 }
}
