//! Pure domain models (no serde/schemars); REST DTOs live in `api::rest::dto`.

use std::fmt;

use crate::domain::amount::Amount;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random id.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VenueId(String);

impl VenueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user with a spendable balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub balance: Amount,
}

/// A purchasable venue. `owner` is `None` until somebody buys it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub price: Amount,
    pub owner: Option<UserId>,
}

/// Whether an idempotent write created a new entity or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Replaced,
}

/// Business result of a purchase attempt. Both variants are ordinary
/// outcomes, not errors; failures like unknown ids are `DomainError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Bought {
        venue_name: String,
        buyer: UserId,
        price: Amount,
        previous_owner: Option<UserId>,
    },
    InsufficientFunds {
        buyer: UserId,
        venue_name: String,
    },
}

impl fmt::Display for PurchaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseOutcome::Bought {
                venue_name,
                buyer,
                price,
                ..
            } => {
                write!(f, "{venue_name} was bought by {buyer} for {price}")
            }
            PurchaseOutcome::InsufficientFunds { buyer, venue_name } => {
                write!(f, "{buyer} can't afford {venue_name}")
            }
        }
    }
}
