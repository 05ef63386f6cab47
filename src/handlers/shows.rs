//! # Show API Handlers

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};

use crate::booking::{BookingService, ShowBooked, ShowSummary};
use crate::error::ApiError;
use crate::models::show::ShowDraft;
use crate::server::AppState;

/// List every show with artist and venue names
#[utoipa::path(
    get,
    path = "/shows",
    responses(
        (status = 200, description = "All shows in id order; names are null for deleted rows", body = [ShowSummary]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "shows"
)]
pub async fn list_shows(State(state): State<AppState>) -> Result<Json<Vec<ShowSummary>>, ApiError> {
    let shows = BookingService::new(&state.db).list_shows().await?;
    Ok(Json(shows))
}

/// Book an artist into a venue
#[utoipa::path(
    post,
    path = "/shows",
    request_body = ShowDraft,
    responses(
        (status = 201, description = "Show booked", body = ShowBooked, headers(
            ("Location", description = "URL of the show listing")
        )),
        (status = 400, description = "Validation failed or show outside the artist's availability", body = ApiError),
        (status = 404, description = "Artist or venue not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "shows"
)]
pub async fn create_show(
    State(state): State<AppState>,
    payload: Result<Json<ShowDraft>, JsonRejection>,
) -> Result<(StatusCode, [(&'static str, String); 1], Json<ShowBooked>), ApiError> {
    let Json(draft) = payload?;
    let booked = BookingService::new(&state.db).create_show(draft).await?;
    Ok((
        StatusCode::CREATED,
        [("Location", "/shows".to_string())],
        Json(booked),
    ))
}
