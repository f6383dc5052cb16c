//! Retail CRM Seller Identifiers
//!
//! Derives the short seller code stored on every seller and sale record.
//!
//! ## Features
//! - Name normalization (accents, punctuation, whitespace)
//! - Seller identifier derivation with ordered fallback strategies
//! - Identifier shape validation
//! - Storage-width truncation for narrow legacy columns
//! - Seller aggregate with register, rename and repair events
//! - HTTP API for the rest of the CRM

use thiserror::Error;

pub mod api;
pub mod config;
pub mod domain;

pub use domain::deriver::{derive_from_option, derive_seller_identifier, Strategy};
pub use domain::normalizer::{normalize_name, NormalizedName};
pub use domain::value_objects::{
    is_valid_seller_identifier, SellerIdentifier, LEGACY_STORAGE_WIDTH, MAX_SELLER_IDENTIFIER_LEN,
};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrmError {
    #[error("Invalid seller identifier: {0:?}")]
    InvalidSellerIdentifier(String),

    #[error("Invalid storage width {0}: must be between 1 and 15")]
    InvalidStorageWidth(usize),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CrmError>;
