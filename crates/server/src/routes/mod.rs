//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: liveness probe and store diagnostics
//! - `shoes`: product listing, search and creation

pub mod health;
pub mod shoes;

use crate::error::ServerError;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Body of the plain message endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Service banner (GET /)
pub async fn api_info() -> impl IntoResponse {
    Json(MessageResponse {
        message: "Shoe Store API is running".to_string(),
    })
}

/// Greeting used by the frontend to check connectivity (GET /api/hello)
pub async fn hello() -> impl IntoResponse {
    Json(MessageResponse {
        message: "Hello from the backend API!".to_string(),
    })
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
