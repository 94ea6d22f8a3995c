pub mod amount;
pub mod error;
pub mod model;
pub mod repo;
pub mod service;

pub use amount::Amount;
pub use error::DomainError;
pub use model::{PurchaseOutcome, Upsert, UserAccount, UserId, Venue, VenueId};
