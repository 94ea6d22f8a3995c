use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::model::{PurchaseOutcome, UserAccount, Venue};

/// REST DTO for user representation
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UserDto {
    pub id: String,
    pub balance: u64,
}

/// REST DTO for creating or replacing a user.
/// Balance arrives as a signed integer so negative input can be rejected
/// with a proper validation problem instead of a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PutUserReq {
    pub balance: i64,
}

/// REST DTO for user list response
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UserListDto {
    pub users: Vec<UserDto>,
    pub total: usize,
}

/// REST DTO for venue representation
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VenueDto {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub owner: Option<String>,
}

/// REST DTO for creating or replacing a venue
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PutVenueReq {
    pub name: String,
    pub price: i64,
}

/// REST DTO for venue list response
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VenueListDto {
    pub venues: Vec<VenueDto>,
    pub total: usize,
}

/// REST DTO for a purchase request
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BuyVenueReq {
    pub user_id: String,
}

/// REST DTO for a completed purchase
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PurchaseReceiptDto {
    /// Human-readable confirmation, e.g. "Ritz was bought by u1 for 500".
    pub message: String,
    pub venue_id: String,
    pub buyer_id: String,
    pub price: u64,
    pub previous_owner: Option<String>,
}

// Conversion implementations between REST DTOs and domain models

impl From<UserAccount> for UserDto {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id.to_string(),
            balance: account.balance.value(),
        }
    }
}

impl From<Venue> for VenueDto {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue.id.to_string(),
            name: venue.name,
            price: venue.price.value(),
            owner: venue.owner.map(|o| o.to_string()),
        }
    }
}

impl PurchaseReceiptDto {
    pub fn from_outcome(venue_id: &str, outcome: &PurchaseOutcome) -> Option<Self> {
        match outcome {
            PurchaseOutcome::Bought {
                buyer,
                price,
                previous_owner,
                ..
            } => Some(Self {
                message: outcome.to_string(),
                venue_id: venue_id.to_string(),
                buyer_id: buyer.to_string(),
                price: price.value(),
                previous_owner: previous_owner.as_ref().map(|o| o.to_string()),
            }),
            PurchaseOutcome::InsufficientFunds { .. } => None,
        }
    }
}
