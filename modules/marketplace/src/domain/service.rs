use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::amount::Amount;
use crate::domain::error::DomainError;
use crate::domain::model::{PurchaseOutcome, Upsert, UserAccount, UserId, Venue, VenueId};
use crate::domain::repo::{UserRepository, VenueRepository};
use crate::infra::locks::EntityLocks;

const USER_NS: &str = "user";
const VENUE_NS: &str = "venue";

/// Domain service with the marketplace business rules.
/// Depends only on the repository ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    users: Arc<dyn UserRepository>,
    venues: Arc<dyn VenueRepository>,
    locks: EntityLocks,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_venue_name_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_venue_name_length: 100,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        users: Arc<dyn UserRepository>,
        venues: Arc<dyn VenueRepository>,
        locks: EntityLocks,
        config: ServiceConfig,
    ) -> Self {
        Self {
            users,
            venues,
            locks,
            config,
        }
    }

    // --- users ---

    #[instrument(name = "marketplace.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: &UserId) -> Result<UserAccount, DomainError> {
        debug!("Getting user by id");
        self.users
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id.clone()))
    }

    #[instrument(name = "marketplace.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserAccount>, DomainError> {
        debug!("Listing users");
        self.users
            .find_all()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    /// Create or replace a user account with the given balance.
    #[instrument(
        name = "marketplace.service.put_user",
        skip(self),
        fields(user_id = %id, balance = %balance)
    )]
    pub async fn put_user(
        &self,
        id: &UserId,
        balance: Amount,
    ) -> Result<(UserAccount, Upsert), DomainError> {
        info!("Storing user");

        let _guard = self.locks.lock(USER_NS, id.as_str()).await;

        let existed = self
            .users
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .is_some();

        let account = UserAccount {
            id: id.clone(),
            balance,
        };
        self.users
            .save(account.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let upsert = if existed {
            Upsert::Replaced
        } else {
            Upsert::Created
        };
        info!("Successfully stored user ({upsert:?})");
        Ok((account, upsert))
    }

    #[instrument(name = "marketplace.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> Result<(), DomainError> {
        info!("Deleting user");

        let _guard = self.locks.lock(USER_NS, id.as_str()).await;

        let deleted = self
            .users
            .delete_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        if !deleted {
            return Err(DomainError::user_not_found(id.clone()));
        }

        info!("Successfully deleted user");
        Ok(())
    }

    // --- venues ---

    #[instrument(name = "marketplace.service.get_venue", skip(self), fields(venue_id = %id))]
    pub async fn get_venue(&self, id: &VenueId) -> Result<Venue, DomainError> {
        debug!("Getting venue by id");
        self.venues
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::venue_not_found(id.clone()))
    }

    #[instrument(name = "marketplace.service.list_venues", skip(self))]
    pub async fn list_venues(&self) -> Result<Vec<Venue>, DomainError> {
        debug!("Listing venues");
        self.venues
            .find_all()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    /// Create or replace a venue. Replacing updates name and price only;
    /// an existing owner is preserved.
    #[instrument(
        name = "marketplace.service.put_venue",
        skip(self, name),
        fields(venue_id = %id, price = %price)
    )]
    pub async fn put_venue(
        &self,
        id: &VenueId,
        name: String,
        price: Amount,
    ) -> Result<(Venue, Upsert), DomainError> {
        info!("Storing venue");

        self.validate_venue_name(&name)?;

        let _guard = self.locks.lock(VENUE_NS, id.as_str()).await;

        let existing = self
            .venues
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let upsert = if existing.is_some() {
            Upsert::Replaced
        } else {
            Upsert::Created
        };
        let venue = Venue {
            id: id.clone(),
            name,
            price,
            owner: existing.and_then(|v| v.owner),
        };
        self.venues
            .save(venue.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!("Successfully stored venue ({upsert:?})");
        Ok((venue, upsert))
    }

    #[instrument(name = "marketplace.service.delete_venue", skip(self), fields(venue_id = %id))]
    pub async fn delete_venue(&self, id: &VenueId) -> Result<(), DomainError> {
        info!("Deleting venue");

        let _guard = self.locks.lock(VENUE_NS, id.as_str()).await;

        let deleted = self
            .venues
            .delete_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        if !deleted {
            return Err(DomainError::venue_not_found(id.clone()));
        }

        info!("Successfully deleted venue");
        Ok(())
    }

    // --- purchase ---

    /// Attempt to buy a venue on behalf of `buyer_id`.
    ///
    /// Runs under per-entity guards: first the venue, then every involved
    /// user in sorted key order, so two concurrent purchases can never
    /// deadlock or double-spend. An unaffordable purchase is a normal
    /// outcome and leaves all balances and ownership untouched.
    #[instrument(
        name = "marketplace.service.buy",
        skip(self),
        fields(venue_id = %venue_id, buyer_id = %buyer_id)
    )]
    pub async fn buy(
        &self,
        venue_id: &VenueId,
        buyer_id: &UserId,
    ) -> Result<PurchaseOutcome, DomainError> {
        info!("Processing purchase");

        let _venue_guard = self.locks.lock(VENUE_NS, venue_id.as_str()).await;

        let mut venue = self
            .venues
            .find_by_id(venue_id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::venue_not_found(venue_id.clone()))?;

        let previous_owner = venue.owner.clone();

        // Lock buyer and previous owner together; lock_many sorts and
        // dedups, which keeps the acquisition order globally consistent.
        let mut user_keys = vec![buyer_id.as_str()];
        if let Some(prev) = previous_owner.as_ref() {
            user_keys.push(prev.as_str());
        }
        let _user_guards = self.locks.lock_many(USER_NS, &user_keys).await;

        let mut buyer = self
            .users
            .find_by_id(buyer_id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(buyer_id.clone()))?;

        let price = venue.price;
        let Some(mut remaining) = buyer.balance.checked_sub(price) else {
            info!("Buyer cannot afford venue");
            return Ok(PurchaseOutcome::InsufficientFunds {
                buyer: buyer_id.clone(),
                venue_name: venue.name,
            });
        };

        match previous_owner.as_ref() {
            // Buying from yourself nets out to zero, but only if affordable.
            Some(prev) if prev == buyer_id => {
                remaining = remaining.add(price);
            }
            Some(prev) => {
                match self
                    .users
                    .find_by_id(prev)
                    .await
                    .map_err(|e| DomainError::storage(e.to_string()))?
                {
                    Some(mut seller) => {
                        seller.balance = seller.balance.add(price);
                        self.users
                            .save(seller)
                            .await
                            .map_err(|e| DomainError::storage(e.to_string()))?;
                    }
                    None => {
                        debug!(previous_owner = %prev, "Previous owner account missing; sale proceeds without credit");
                    }
                }
            }
            None => {}
        }

        buyer.balance = remaining;
        self.users
            .save(buyer)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        venue.owner = Some(buyer_id.clone());
        self.venues
            .save(venue.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let outcome = PurchaseOutcome::Bought {
            venue_name: venue.name,
            buyer: buyer_id.clone(),
            price,
            previous_owner,
        };
        info!("Successfully completed purchase: {outcome}");
        Ok(outcome)
    }

    // --- validation helpers ---

    fn validate_venue_name(&self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::empty_venue_name());
        }
        if name.len() > self.config.max_venue_name_length {
            return Err(DomainError::venue_name_too_long(
                name.len(),
                self.config.max_venue_name_length,
            ));
        }
        Ok(())
    }
}
