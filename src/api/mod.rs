//! HTTP adapter
//!
//! JSON routes over a `Sportsbook`, with request tracking, CORS, timeouts
//! and structured error responses.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use errors::{ApiError, ApiErrorKind, ErrorResponse};
pub use handlers::AppState;
pub use routes::create_router;
pub use server::{build_app, ApiServer};
