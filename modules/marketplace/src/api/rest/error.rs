use axum::http::StatusCode;
use httpkit::problem::{Problem, ProblemResponse};

use crate::domain::error::DomainError;
use crate::domain::model::PurchaseOutcome;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.bazaar.dev/{}", code))
        .with_code(code)
        .with_instance(instance);

    // Add request ID from current tracing span if available
    let problem = if let Some(id) = tracing::Span::current().id() {
        problem.with_request_id(id.into_u64().to_string())
    } else {
        problem
    };

    ProblemResponse(problem)
}

/// Map domain error to RFC 9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::VenueNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "VENUE_NOT_FOUND",
            "Venue not found",
            format!("Venue with id {} was not found", id),
            instance,
        ),
        DomainError::UserNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "USER_NOT_FOUND",
            "User not found",
            format!("User with id {} was not found", id),
            instance,
        ),
        DomainError::NegativeAmount { .. }
        | DomainError::EmptyVenueName
        | DomainError::VenueNameTooLong { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "VALIDATION",
            "Validation error",
            format!("{}", e),
            instance,
        ),
        DomainError::Storage { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Storage error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "Internal error",
                "An internal storage error occurred",
                instance,
            )
        }
    }
}

/// 400 problem for a declined purchase. The detail carries the exact
/// business message, e.g. "u1 can't afford Trump Tower".
pub fn cannot_afford(outcome: &PurchaseOutcome, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "CANNOT_AFFORD",
        "Insufficient funds",
        outcome.to_string(),
        instance,
    )
}
