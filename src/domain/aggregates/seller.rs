//! Seller Aggregate

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::deriver::derive_seller_identifier;
use crate::domain::events::SellerEvent;
use crate::domain::value_objects::SellerIdentifier;
use crate::Result;

#[derive(Clone, Debug)]
pub struct Seller {
    id: String,
    full_name: String,
    seller_identifier: SellerIdentifier,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<SellerEvent>,
}

impl Seller {
    pub fn register(full_name: impl Into<String>) -> Self {
        let id = Uuid::now_v7().to_string();
        let full_name = full_name.into();
        let seller_identifier = derive_seller_identifier(&full_name);
        let now = Utc::now();
        let mut seller = Self {
            id: id.clone(), full_name, seller_identifier: seller_identifier.clone(),
            created_at: now, updated_at: now, events: vec![],
        };
        seller.raise_event(SellerEvent::Registered { seller_id: id, seller_identifier, at: now });
        seller
    }

    /// Loads a stored seller. A missing or malformed stored identifier is
    /// re-derived from the name and reported as a repair, as is a stored
    /// `UNKNOWN` whose name now yields a real identifier.
    pub fn restore(
        id: impl Into<String>,
        full_name: impl Into<String>,
        stored_identifier: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let id = id.into();
        let full_name = full_name.into();
        let derived = derive_seller_identifier(&full_name);
        let kept = stored_identifier
            .and_then(|raw| SellerIdentifier::parse(raw).ok())
            .filter(|stored| !stored.is_unknown() || derived.is_unknown());
        let repaired = kept.is_none();
        let mut seller = Self {
            id, seller_identifier: kept.unwrap_or(derived),
            full_name, created_at, updated_at: created_at, events: vec![],
        };
        if repaired {
            debug!(seller_id = %seller.id, previous = ?stored_identifier, repaired = %seller.seller_identifier, "repaired seller identifier");
            seller.touch();
            seller.raise_event(SellerEvent::IdentifierRepaired {
                seller_id: seller.id.clone(),
                previous: stored_identifier.map(str::to_string),
                seller_identifier: seller.seller_identifier.clone(),
                at: seller.updated_at,
            });
        }
        seller
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn full_name(&self) -> &str { &self.full_name }
    pub fn seller_identifier(&self) -> &SellerIdentifier { &self.seller_identifier }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    /// `UNKNOWN` sellers need someone to pick an identifier by hand.
    pub fn needs_manual_assignment(&self) -> bool { self.seller_identifier.is_unknown() }

    pub fn rename(&mut self, full_name: impl Into<String>) {
        self.full_name = full_name.into();
        let next = derive_seller_identifier(&self.full_name);
        self.touch();
        if next != self.seller_identifier {
            let previous = std::mem::replace(&mut self.seller_identifier, next);
            self.raise_event(SellerEvent::Renamed {
                seller_id: self.id.clone(), previous,
                seller_identifier: self.seller_identifier.clone(), at: self.updated_at,
            });
        }
    }

    /// Identifier as written to a column `width` characters wide.
    pub fn storage_identifier(&self, width: usize) -> Result<SellerIdentifier> {
        self.seller_identifier.truncated(width)
    }

    pub fn take_events(&mut self) -> Vec<SellerEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: SellerEvent) { self.events.push(e); }
    fn touch(&mut self) { self.updated_at = Utc::now(); }
}
