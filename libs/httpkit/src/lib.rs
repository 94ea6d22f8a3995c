//! HTTP building blocks shared by the gateway and API modules:
//! RFC 9457 problem responses and request-id plumbing.

pub mod problem;
pub mod request_id;

pub use problem::{Problem, ProblemResponse, ValidationError};
pub use request_id::XRequestId;
