use std::sync::Arc;

use anyhow::Result;

use marketplace::domain::amount::Amount;
use marketplace::domain::error::DomainError;
use marketplace::domain::model::{PurchaseOutcome, Upsert, UserId, VenueId};
use marketplace::domain::service::{Service, ServiceConfig};
use marketplace::infra::locks::EntityLocks;
use marketplace::infra::memory::{InMemoryUsers, InMemoryVenues};

/// Create a test domain service over fresh in-memory stores
fn create_test_service() -> Arc<Service> {
    create_test_service_with_config(ServiceConfig::default())
}

fn create_test_service_with_config(config: ServiceConfig) -> Arc<Service> {
    Arc::new(Service::new(
        Arc::new(InMemoryUsers::new()),
        Arc::new(InMemoryVenues::new()),
        EntityLocks::new(),
        config,
    ))
}

#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let service = create_test_service();
    let id = UserId::new("u1");

    // Create
    let (account, upsert) = service.put_user(&id, Amount::from_units(1000)).await?;
    assert_eq!(upsert, Upsert::Created);
    assert_eq!(account.balance, Amount::from_units(1000));

    // Get
    let loaded = service.get_user(&id).await?;
    assert_eq!(loaded, account);

    // Replace overwrites the balance
    let (account, upsert) = service.put_user(&id, Amount::from_units(250)).await?;
    assert_eq!(upsert, Upsert::Replaced);
    assert_eq!(account.balance, Amount::from_units(250));

    // List
    service.put_user(&UserId::new("a0"), Amount::ZERO).await?;
    let users = service.list_users().await?;
    let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["a0", "u1"]);

    // Delete
    service.delete_user(&id).await?;
    assert!(matches!(
        service.get_user(&id).await,
        Err(DomainError::UserNotFound { .. })
    ));
    assert!(matches!(
        service.delete_user(&id).await,
        Err(DomainError::UserNotFound { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_venue_crud_preserves_owner_on_replace() -> Result<()> {
    let service = create_test_service();
    let venue_id = VenueId::new("v1");
    let buyer = UserId::new("u1");

    service
        .put_venue(&venue_id, "Ritz".to_string(), Amount::from_units(500))
        .await?;
    service.put_user(&buyer, Amount::from_units(500)).await?;
    service.buy(&venue_id, &buyer).await?;

    // Replacing the venue updates name and price but keeps the owner
    let (venue, upsert) = service
        .put_venue(&venue_id, "Ritz Deluxe".to_string(), Amount::from_units(900))
        .await?;
    assert_eq!(upsert, Upsert::Replaced);
    assert_eq!(venue.name, "Ritz Deluxe");
    assert_eq!(venue.price, Amount::from_units(900));
    assert_eq!(venue.owner, Some(buyer));

    Ok(())
}

#[tokio::test]
async fn test_buy_unknown_venue_mutates_nothing() -> Result<()> {
    let service = create_test_service();
    let buyer = UserId::new("u1");
    service.put_user(&buyer, Amount::from_units(1000)).await?;

    let result = service.buy(&VenueId::new("missing"), &buyer).await;
    assert!(matches!(result, Err(DomainError::VenueNotFound { .. })));

    // buyer balance untouched
    assert_eq!(
        service.get_user(&buyer).await?.balance,
        Amount::from_units(1000)
    );

    Ok(())
}

#[tokio::test]
async fn test_buy_unknown_user_mutates_nothing() -> Result<()> {
    let service = create_test_service();
    let venue_id = VenueId::new("v1");
    service
        .put_venue(&venue_id, "Ritz".to_string(), Amount::from_units(500))
        .await?;

    let result = service.buy(&venue_id, &UserId::new("missing")).await;
    assert!(matches!(result, Err(DomainError::UserNotFound { .. })));

    // venue still unowned
    assert_eq!(service.get_venue(&venue_id).await?.owner, None);

    Ok(())
}

#[tokio::test]
async fn test_cannot_afford_leaves_state_untouched() -> Result<()> {
    let service = create_test_service();
    let venue_id = VenueId::new("v1");
    let buyer = UserId::new("u1");

    service
        .put_venue(&venue_id, "Trump Tower".to_string(), Amount::from_units(1000))
        .await?;
    service.put_user(&buyer, Amount::from_units(500)).await?;

    let outcome = service.buy(&venue_id, &buyer).await?;
    assert_eq!(outcome.to_string(), "u1 can't afford Trump Tower");
    assert!(matches!(outcome, PurchaseOutcome::InsufficientFunds { .. }));

    // no debit, no ownership change
    assert_eq!(
        service.get_user(&buyer).await?.balance,
        Amount::from_units(500)
    );
    assert_eq!(service.get_venue(&venue_id).await?.owner, None);

    Ok(())
}

#[tokio::test]
async fn test_buy_unowned_venue_debits_buyer() -> Result<()> {
    let service = create_test_service();
    let venue_id = VenueId::new("v1");
    let buyer = UserId::new("u1");

    service
        .put_venue(&venue_id, "Trump Tower".to_string(), Amount::from_units(1000))
        .await?;
    service.put_user(&buyer, Amount::from_units(1500)).await?;

    let outcome = service.buy(&venue_id, &buyer).await?;
    assert_eq!(outcome.to_string(), "Trump Tower was bought by u1 for 1000");
    assert!(matches!(
        outcome,
        PurchaseOutcome::Bought {
            previous_owner: None,
            ..
        }
    ));

    assert_eq!(
        service.get_user(&buyer).await?.balance,
        Amount::from_units(500)
    );
    assert_eq!(service.get_venue(&venue_id).await?.owner, Some(buyer));

    Ok(())
}

#[tokio::test]
async fn test_exact_balance_is_sufficient() -> Result<()> {
    let service = create_test_service();
    let venue_id = VenueId::new("v1");
    let buyer = UserId::new("u1");

    service
        .put_venue(&venue_id, "Ritz".to_string(), Amount::from_units(1000))
        .await?;
    service.put_user(&buyer, Amount::from_units(1000)).await?;

    let outcome = service.buy(&venue_id, &buyer).await?;
    assert!(matches!(outcome, PurchaseOutcome::Bought { .. }));
    assert_eq!(service.get_user(&buyer).await?.balance, Amount::ZERO);

    Ok(())
}

#[tokio::test]
async fn test_resale_credits_previous_owner() -> Result<()> {
    let service = create_test_service();
    let venue_id = VenueId::new("v1");
    let first = UserId::new("u1");
    let second = UserId::new("u2");

    service
        .put_venue(&venue_id, "Ritz".to_string(), Amount::from_units(1000))
        .await?;
    service.put_user(&first, Amount::from_units(1000)).await?;
    service.put_user(&second, Amount::from_units(1500)).await?;

    service.buy(&venue_id, &first).await?;
    let outcome = service.buy(&venue_id, &second).await?;

    assert!(matches!(
        outcome,
        PurchaseOutcome::Bought {
            previous_owner: Some(ref prev),
            ..
        } if *prev == first
    ));

    // seller got the full price back
    assert_eq!(
        service.get_user(&first).await?.balance,
        Amount::from_units(1000)
    );
    assert_eq!(
        service.get_user(&second).await?.balance,
        Amount::from_units(500)
    );
    assert_eq!(service.get_venue(&venue_id).await?.owner, Some(second));

    Ok(())
}

#[tokio::test]
async fn test_self_repurchase_nets_zero() -> Result<()> {
    let service = create_test_service();
    let venue_id = VenueId::new("v1");
    let owner = UserId::new("u1");

    service
        .put_venue(&venue_id, "Ritz".to_string(), Amount::from_units(400))
        .await?;
    service.put_user(&owner, Amount::from_units(1000)).await?;

    service.buy(&venue_id, &owner).await?;
    let balance_after_first = service.get_user(&owner).await?.balance;
    assert_eq!(balance_after_first, Amount::from_units(600));

    // buying your own venue moves no money but still requires affordability
    let outcome = service.buy(&venue_id, &owner).await?;
    assert!(matches!(outcome, PurchaseOutcome::Bought { .. }));
    assert_eq!(service.get_user(&owner).await?.balance, balance_after_first);
    assert_eq!(service.get_venue(&venue_id).await?.owner, Some(owner.clone()));

    // drain the balance below the price: self-repurchase is declined too
    service.put_user(&owner, Amount::from_units(100)).await?;
    let outcome = service.buy(&venue_id, &owner).await?;
    assert!(matches!(outcome, PurchaseOutcome::InsufficientFunds { .. }));
    assert_eq!(
        service.get_user(&owner).await?.balance,
        Amount::from_units(100)
    );

    Ok(())
}

#[tokio::test]
async fn test_missing_previous_owner_skips_credit() -> Result<()> {
    let service = create_test_service();
    let venue_id = VenueId::new("v1");
    let first = UserId::new("u1");
    let second = UserId::new("u2");

    service
        .put_venue(&venue_id, "Ritz".to_string(), Amount::from_units(300))
        .await?;
    service.put_user(&first, Amount::from_units(300)).await?;
    service.put_user(&second, Amount::from_units(1000)).await?;

    service.buy(&venue_id, &first).await?;
    service.delete_user(&first).await?;

    // sale still settles; the credit has nowhere to go
    let outcome = service.buy(&venue_id, &second).await?;
    assert!(matches!(outcome, PurchaseOutcome::Bought { .. }));
    assert_eq!(
        service.get_user(&second).await?.balance,
        Amount::from_units(700)
    );
    assert_eq!(service.get_venue(&venue_id).await?.owner, Some(second));
    assert!(matches!(
        service.get_user(&first).await,
        Err(DomainError::UserNotFound { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_venue_name_validation() -> Result<()> {
    let service = create_test_service();

    let err = service
        .put_venue(&VenueId::new("v1"), "   ".to_string(), Amount::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyVenueName));

    let err = service
        .put_venue(&VenueId::new("v1"), "x".repeat(101), Amount::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::VenueNameTooLong { len: 101, max: 100 }
    ));

    // rejected venues are not stored
    assert!(matches!(
        service.get_venue(&VenueId::new("v1")).await,
        Err(DomainError::VenueNotFound { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_configured_name_limit() -> Result<()> {
    let service = create_test_service_with_config(ServiceConfig {
        max_venue_name_length: 10,
    });

    let err = service
        .put_venue(&VenueId::new("v1"), "a very long name".to_string(), Amount::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::VenueNameTooLong { max: 10, .. }));

    service
        .put_venue(&VenueId::new("v1"), "short".to_string(), Amount::ZERO)
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_free_venue_purchase() -> Result<()> {
    let service = create_test_service();
    let venue_id = VenueId::new("v1");
    let buyer = UserId::new("broke");

    service
        .put_venue(&venue_id, "Freebie".to_string(), Amount::ZERO)
        .await?;
    service.put_user(&buyer, Amount::ZERO).await?;

    let outcome = service.buy(&venue_id, &buyer).await?;
    assert_eq!(outcome.to_string(), "Freebie was bought by broke for 0");
    assert_eq!(service.get_venue(&venue_id).await?.owner, Some(buyer));

    Ok(())
}
