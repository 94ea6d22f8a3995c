use thiserror::Error;

use crate::domain::model::{UserId, VenueId};

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Venue not found: {id}")]
    VenueNotFound { id: VenueId },

    #[error("User not found: {id}")]
    UserNotFound { id: UserId },

    #[error("Amount cannot be negative: {value}")]
    NegativeAmount { value: i64 },

    #[error("Venue name cannot be empty")]
    EmptyVenueName,

    #[error("Venue name too long: {len} characters (max: {max})")]
    VenueNameTooLong { len: usize, max: usize },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn venue_not_found(id: VenueId) -> Self {
        Self::VenueNotFound { id }
    }

    pub fn user_not_found(id: UserId) -> Self {
        Self::UserNotFound { id }
    }

    pub fn negative_amount(value: i64) -> Self {
        Self::NegativeAmount { value }
    }

    pub fn empty_venue_name() -> Self {
        Self::EmptyVenueName
    }

    pub fn venue_name_too_long(len: usize, max: usize) -> Self {
        Self::VenueNameTooLong { len, max }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
