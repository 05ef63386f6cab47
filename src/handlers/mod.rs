//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the booking directory.
//! Handlers only translate between HTTP and [`BookingService`] use cases.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::booking::{BookingService, RecentListings};
use crate::db;
use crate::error::{ApiError, ErrorType};
use crate::models::ServiceInfo;
use crate::server::AppState;

pub mod artists;
pub mod shows;
pub mod venues;

/// Landing page payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    #[serde(flatten)]
    pub info: ServiceInfo,
    /// Newest artists and venues
    pub recent: RecentListings,
}

/// Body of the search endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Case-insensitive substring matched against name, city and state
    #[serde(default)]
    #[schema(example = "Music")]
    pub search_term: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Root handler that returns basic service information and the newest listings
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = HomeResponse),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "root"
)]
pub async fn root(State(state): State<AppState>) -> Result<Json<HomeResponse>, ApiError> {
    let recent = BookingService::new(&state.db).recent_listings().await?;
    Ok(Json(HomeResponse {
        info: ServiceInfo::default(),
        recent,
    }))
}

/// Reports whether the database answers
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unavailable", body = ApiError)
    ),
    tag = "root"
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    db::health_check(&state.db).await.map_err(|err| {
        tracing::warn!(error = %err, "Health check failed");
        ApiError::from(ErrorType::ServiceUnavailable)
    })?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

#[cfg(test)]
mod tests;
