//! Aggregates module
pub mod seller;

pub use seller::Seller;
