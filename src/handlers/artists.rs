//! # Artist API Handlers

use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};

use super::SearchRequest;
use crate::booking::{ArtistDetail, BookingService, Deleted, DirectoryEntry, Saved, SearchResults};
use crate::error::ApiError;
use crate::models::artist::ArtistDraft;
use crate::server::AppState;

/// List every artist
#[utoipa::path(
    get,
    path = "/artists",
    responses(
        (status = 200, description = "All artists in id order", body = [DirectoryEntry]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn list_artists(
    State(state): State<AppState>,
) -> Result<Json<Vec<DirectoryEntry>>, ApiError> {
    let artists = BookingService::new(&state.db).list_artists().await?;
    Ok(Json(artists))
}

/// Create an artist
#[utoipa::path(
    post,
    path = "/artists",
    request_body = ArtistDraft,
    responses(
        (status = 201, description = "Artist created", body = Saved, headers(
            ("Location", description = "URL of the created artist")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn create_artist(
    State(state): State<AppState>,
    payload: Result<Json<ArtistDraft>, JsonRejection>,
) -> Result<(StatusCode, [(&'static str, String); 1], Json<Saved>), ApiError> {
    let Json(draft) = payload?;
    let saved = BookingService::new(&state.db).create_artist(draft).await?;
    let location = format!("/artists/{}", saved.id);
    Ok((StatusCode::CREATED, [("Location", location)], Json(saved)))
}

/// Search artists by name, city or state
#[utoipa::path(
    post,
    path = "/artists/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching artists with upcoming show counts", body = SearchResults),
        (status = 400, description = "Malformed body", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn search_artists(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResults>, ApiError> {
    let Json(request) = payload?;
    let results = BookingService::new(&state.db)
        .search_artists(&request.search_term)
        .await?;
    Ok(Json(results))
}

/// Get an artist with their past and upcoming shows
#[utoipa::path(
    get,
    path = "/artists/{id}",
    params(("id" = i32, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Artist detail", body = ArtistDetail),
        (status = 404, description = "Artist not found", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let detail = BookingService::new(&state.db).get_artist_detail(id).await?;
    Ok(Json(detail))
}

/// Replace an artist's fields
#[utoipa::path(
    put,
    path = "/artists/{id}",
    params(("id" = i32, Path, description = "Artist id")),
    request_body = ArtistDraft,
    responses(
        (status = 200, description = "Artist updated", body = Saved),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Artist not found", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<ArtistDraft>, JsonRejection>,
) -> Result<Json<Saved>, ApiError> {
    let Json(draft) = payload?;
    let saved = BookingService::new(&state.db).update_artist(id, draft).await?;
    Ok(Json(saved))
}

/// Delete an artist; their shows are kept
#[utoipa::path(
    delete,
    path = "/artists/{id}",
    params(("id" = i32, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Artist deleted", body = Deleted),
        (status = 404, description = "Artist not found", body = ApiError)
    ),
    tag = "artists"
)]
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted>, ApiError> {
    let deleted = BookingService::new(&state.db).delete_artist(id).await?;
    Ok(Json(deleted))
}
