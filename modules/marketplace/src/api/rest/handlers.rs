use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use httpkit::problem::ProblemResponse;
use tracing::{error, info};

use crate::api::rest::dto::{
    BuyVenueReq, PurchaseReceiptDto, PutUserReq, PutVenueReq, UserDto, UserListDto, VenueDto,
    VenueListDto,
};
use crate::api::rest::error::{cannot_afford, map_domain_error};
use crate::domain::amount::Amount;
use crate::domain::model::{Upsert, UserId, VenueId};
use crate::domain::service::Service;

/// List all users
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<UserListDto>, ProblemResponse> {
    info!("Listing users");

    match svc.list_users().await {
        Ok(users) => {
            let dto_users: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
            Ok(Json(UserListDto {
                total: dto_users.len(),
                users: dto_users,
            }))
        }
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e, "/users"))
        }
    }
}

/// Get a specific user by ID
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!("Getting user with id: {}", id);

    let instance = format!("/users/{id}");
    match svc.get_user(&UserId::new(id)).await {
        Ok(account) => Ok(Json(UserDto::from(account))),
        Err(e) => {
            error!("Failed to get user: {}", e);
            Err(map_domain_error(&e, &instance))
        }
    }
}

/// Create or replace a user; 201 on create, 200 on replace
pub async fn put_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    Json(req): Json<PutUserReq>,
) -> Result<(StatusCode, Json<UserDto>), ProblemResponse> {
    info!("Storing user {} with balance {}", id, req.balance);

    let instance = format!("/users/{id}");
    let balance = Amount::new(req.balance).map_err(|e| map_domain_error(&e, &instance))?;

    match svc.put_user(&UserId::new(id), balance).await {
        Ok((account, upsert)) => {
            let status = match upsert {
                Upsert::Created => StatusCode::CREATED,
                Upsert::Replaced => StatusCode::OK,
            };
            Ok((status, Json(UserDto::from(account))))
        }
        Err(e) => {
            error!("Failed to store user: {}", e);
            Err(map_domain_error(&e, &instance))
        }
    }
}

/// Delete a user by ID
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting user: {}", id);

    let instance = format!("/users/{id}");
    match svc.delete_user(&UserId::new(id)).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete user: {}", e);
            Err(map_domain_error(&e, &instance))
        }
    }
}

/// List all venues
pub async fn list_venues(
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<VenueListDto>, ProblemResponse> {
    info!("Listing venues");

    match svc.list_venues().await {
        Ok(venues) => {
            let dto_venues: Vec<VenueDto> = venues.into_iter().map(VenueDto::from).collect();
            Ok(Json(VenueListDto {
                total: dto_venues.len(),
                venues: dto_venues,
            }))
        }
        Err(e) => {
            error!("Failed to list venues: {}", e);
            Err(map_domain_error(&e, "/venues"))
        }
    }
}

/// Get a specific venue by ID
pub async fn get_venue(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<VenueDto>, ProblemResponse> {
    info!("Getting venue with id: {}", id);

    let instance = format!("/venues/{id}");
    match svc.get_venue(&VenueId::new(id)).await {
        Ok(venue) => Ok(Json(VenueDto::from(venue))),
        Err(e) => {
            error!("Failed to get venue: {}", e);
            Err(map_domain_error(&e, &instance))
        }
    }
}

/// Create or replace a venue; 201 on create, 200 on replace
pub async fn put_venue(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    Json(req): Json<PutVenueReq>,
) -> Result<(StatusCode, Json<VenueDto>), ProblemResponse> {
    info!("Storing venue {} with price {}", id, req.price);

    let instance = format!("/venues/{id}");
    let price = Amount::new(req.price).map_err(|e| map_domain_error(&e, &instance))?;

    match svc.put_venue(&VenueId::new(id), req.name, price).await {
        Ok((venue, upsert)) => {
            let status = match upsert {
                Upsert::Created => StatusCode::CREATED,
                Upsert::Replaced => StatusCode::OK,
            };
            Ok((status, Json(VenueDto::from(venue))))
        }
        Err(e) => {
            error!("Failed to store venue: {}", e);
            Err(map_domain_error(&e, &instance))
        }
    }
}

/// Delete a venue by ID
pub async fn delete_venue(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting venue: {}", id);

    let instance = format!("/venues/{id}");
    match svc.delete_venue(&VenueId::new(id)).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete venue: {}", e);
            Err(map_domain_error(&e, &instance))
        }
    }
}

/// Buy a venue on behalf of a user. A declined purchase (insufficient
/// funds) maps to a 400 problem whose detail is the business message.
pub async fn buy_venue(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    Json(req): Json<BuyVenueReq>,
) -> Result<Json<PurchaseReceiptDto>, ProblemResponse> {
    info!("Purchase of venue {} requested by user {}", id, req.user_id);

    let instance = format!("/venues/{id}/buy");
    let venue_id = VenueId::new(id);
    let buyer_id = UserId::new(req.user_id);

    match svc.buy(&venue_id, &buyer_id).await {
        Ok(outcome) => match PurchaseReceiptDto::from_outcome(venue_id.as_str(), &outcome) {
            Some(receipt) => Ok(Json(receipt)),
            None => Err(cannot_afford(&outcome, &instance)),
        },
        Err(e) => {
            error!("Failed to process purchase: {}", e);
            Err(map_domain_error(&e, &instance))
        }
    }
}
