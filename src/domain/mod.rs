//! Seller identifier domain
pub mod aggregates;
pub mod deriver;
pub mod events;
pub mod normalizer;
pub mod value_objects;
