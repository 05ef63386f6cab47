//! # Venue API Handlers

use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};

use super::SearchRequest;
use crate::booking::{BookingService, Deleted, Saved, SearchResults, VenueArea, VenueDetail};
use crate::error::ApiError;
use crate::models::venue::VenueDraft;
use crate::server::AppState;

/// List venues grouped by city and state
#[utoipa::path(
    get,
    path = "/venues",
    responses(
        (status = 200, description = "Venues grouped by area", body = [VenueArea]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn list_venues(State(state): State<AppState>) -> Result<Json<Vec<VenueArea>>, ApiError> {
    let areas = BookingService::new(&state.db).list_venues_grouped().await?;
    Ok(Json(areas))
}

/// Create a venue
#[utoipa::path(
    post,
    path = "/venues",
    request_body = VenueDraft,
    responses(
        (status = 201, description = "Venue created", body = Saved, headers(
            ("Location", description = "URL of the created venue")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn create_venue(
    State(state): State<AppState>,
    payload: Result<Json<VenueDraft>, JsonRejection>,
) -> Result<(StatusCode, [(&'static str, String); 1], Json<Saved>), ApiError> {
    let Json(draft) = payload?;
    let saved = BookingService::new(&state.db).create_venue(draft).await?;
    let location = format!("/venues/{}", saved.id);
    Ok((StatusCode::CREATED, [("Location", location)], Json(saved)))
}

/// Search venues by name, city or state
#[utoipa::path(
    post,
    path = "/venues/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching venues with upcoming show counts", body = SearchResults),
        (status = 400, description = "Malformed body", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn search_venues(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResults>, ApiError> {
    let Json(request) = payload?;
    let results = BookingService::new(&state.db)
        .search_venues(&request.search_term)
        .await?;
    Ok(Json(results))
}

/// Get a venue with its past and upcoming shows
#[utoipa::path(
    get,
    path = "/venues/{id}",
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Venue detail", body = VenueDetail),
        (status = 404, description = "Venue not found", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>, ApiError> {
    let detail = BookingService::new(&state.db).get_venue_detail(id).await?;
    Ok(Json(detail))
}

/// Replace a venue's fields
#[utoipa::path(
    put,
    path = "/venues/{id}",
    params(("id" = i32, Path, description = "Venue id")),
    request_body = VenueDraft,
    responses(
        (status = 200, description = "Venue updated", body = Saved),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Venue not found", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<VenueDraft>, JsonRejection>,
) -> Result<Json<Saved>, ApiError> {
    let Json(draft) = payload?;
    let saved = BookingService::new(&state.db).update_venue(id, draft).await?;
    Ok(Json(saved))
}

/// Delete a venue; its shows are kept
#[utoipa::path(
    delete,
    path = "/venues/{id}",
    params(("id" = i32, Path, description = "Venue id")),
    responses(
        (status = 200, description = "Venue deleted", body = Deleted),
        (status = 404, description = "Venue not found", body = ApiError)
    ),
    tag = "venues"
)]
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted>, ApiError> {
    let deleted = BookingService::new(&state.db).delete_venue(id).await?;
    Ok(Json(deleted))
}
