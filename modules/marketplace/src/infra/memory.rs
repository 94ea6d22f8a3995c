//! In-memory repositories backed by `DashMap`.
//!
//! Single operations are atomic on their own; cross-entity invariants are
//! the service's job and rely on [`crate::infra::locks::EntityLocks`].

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::model::{UserAccount, UserId, Venue, VenueId};
use crate::domain::repo::{UserRepository, VenueRepository};

#[derive(Clone, Default)]
pub struct InMemoryUsers {
    map: Arc<DashMap<UserId, UserAccount>>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_all(&self) -> anyhow::Result<Vec<UserAccount>> {
        let mut all: Vec<UserAccount> = self.map.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn find_by_id(&self, id: &UserId) -> anyhow::Result<Option<UserAccount>> {
        Ok(self.map.get(id).map(|e| e.value().clone()))
    }

    async fn save(&self, account: UserAccount) -> anyhow::Result<()> {
        self.map.insert(account.id.clone(), account);
        Ok(())
    }

    async fn delete_by_id(&self, id: &UserId) -> anyhow::Result<bool> {
        Ok(self.map.remove(id).is_some())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryVenues {
    map: Arc<DashMap<VenueId, Venue>>,
}

impl InMemoryVenues {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VenueRepository for InMemoryVenues {
    async fn find_all(&self) -> anyhow::Result<Vec<Venue>> {
        let mut all: Vec<Venue> = self.map.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn find_by_id(&self, id: &VenueId) -> anyhow::Result<Option<Venue>> {
        Ok(self.map.get(id).map(|e| e.value().clone()))
    }

    async fn save(&self, venue: Venue) -> anyhow::Result<()> {
        self.map.insert(venue.id.clone(), venue);
        Ok(())
    }

    async fn delete_by_id(&self, id: &VenueId) -> anyhow::Result<bool> {
        Ok(self.map.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amount::Amount;

    #[tokio::test]
    async fn user_store_roundtrip() {
        let repo = InMemoryUsers::new();
        let id = UserId::new("u1");

        assert!(repo.find_by_id(&id).await.unwrap().is_none());

        repo.save(UserAccount {
            id: id.clone(),
            balance: Amount::from_units(1000),
        })
        .await
        .unwrap();

        let loaded = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(loaded.balance, Amount::from_units(1000));

        assert!(repo.delete_by_id(&id).await.unwrap());
        assert!(!repo.delete_by_id(&id).await.unwrap());
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_is_sorted_by_id() {
        let repo = InMemoryVenues::new();
        for id in ["v3", "v1", "v2"] {
            repo.save(Venue {
                id: VenueId::new(id),
                name: format!("Venue {id}"),
                price: Amount::from_units(100),
                owner: None,
            })
            .await
            .unwrap();
        }

        let all = repo.find_all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v2", "v3"]);
    }

    #[tokio::test]
    async fn save_replaces_existing_entry() {
        let repo = InMemoryVenues::new();
        let id = VenueId::new("v1");

        repo.save(Venue {
            id: id.clone(),
            name: "Old".to_string(),
            price: Amount::from_units(100),
            owner: Some(UserId::new("u1")),
        })
        .await
        .unwrap();

        repo.save(Venue {
            id: id.clone(),
            name: "New".to_string(),
            price: Amount::from_units(200),
            owner: None,
        })
        .await
        .unwrap();

        let loaded = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "New");
        assert_eq!(loaded.owner, None);
    }
}
