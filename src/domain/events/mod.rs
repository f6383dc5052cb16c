//! Domain events
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::SellerIdentifier;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SellerEvent {
    Registered { seller_id: String, seller_identifier: SellerIdentifier, at: DateTime<Utc> },
    Renamed { seller_id: String, previous: SellerIdentifier, seller_identifier: SellerIdentifier, at: DateTime<Utc> },
    /// `previous` is the raw stored value, which may not be a valid identifier.
    IdentifierRepaired { seller_id: String, previous: Option<String>, seller_identifier: SellerIdentifier, at: DateTime<Utc> },
}

impl SellerEvent {
    pub fn seller_id(&self) -> &str {
        match self {
            Self::Registered { seller_id, .. }
            | Self::Renamed { seller_id, .. }
            | Self::IdentifierRepaired { seller_id, .. } => seller_id,
        }
    }
}
