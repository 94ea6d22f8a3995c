use async_trait::async_trait;

use crate::domain::model::{UserAccount, UserId, Venue, VenueId};

/// Ports for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All accounts ordered by id.
    async fn find_all(&self) -> anyhow::Result<Vec<UserAccount>>;
    /// Load an account by id.
    async fn find_by_id(&self, id: &UserId) -> anyhow::Result<Option<UserAccount>>;
    /// Insert or replace an account (keyed by `account.id`).
    async fn save(&self, account: UserAccount) -> anyhow::Result<()>;
    /// Delete by id. Returns true if an account was removed.
    async fn delete_by_id(&self, id: &UserId) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// All venues ordered by id.
    async fn find_all(&self) -> anyhow::Result<Vec<Venue>>;
    /// Load a venue by id.
    async fn find_by_id(&self, id: &VenueId) -> anyhow::Result<Option<Venue>>;
    /// Insert or replace a venue (keyed by `venue.id`).
    async fn save(&self, venue: Venue) -> anyhow::Result<()>;
    /// Delete by id. Returns true if a venue was removed.
    async fn delete_by_id(&self, id: &VenueId) -> anyhow::Result<bool>;
}
