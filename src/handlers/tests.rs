//! # Tests for Handlers
//!
//! This module contains unit tests for API handlers, calling them directly
//! against an in-memory database.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::handlers::{SearchRequest, health, root, shows, venues};
use crate::models::ServiceInfo;
use crate::models::show::ShowDraft;
use crate::models::venue::VenueDraft;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use serde_json::Value;

async fn test_state() -> AppState {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    Migrator::up(&db, None).await.expect("migrations apply");
    AppState {
        config: Arc::new(AppConfig::default()),
        db,
    }
}

fn venue_draft(name: &str) -> VenueDraft {
    VenueDraft {
        name: Some(name.to_string()),
        city: Some("San Francisco".to_string()),
        state: Some("CA".to_string()),
        address: Some("1015 Folsom Street".to_string()),
        genres: Some(vec!["Jazz".to_string()]),
        seeking_description: Some("Open mic on Tuesdays".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_root_handler_returns_expected_service_info() {
    let state = test_state().await;

    let Json(home) = root(State(state)).await.unwrap();

    assert_eq!(home.info.service, "booking-directory");
    assert_eq!(home.info.version, env!("CARGO_PKG_VERSION"));
    assert!(home.recent.artists.is_empty());
    assert!(home.recent.venues.is_empty());
}

#[tokio::test]
async fn test_root_handler_flattens_service_info() {
    let state = test_state().await;

    let Json(home) = root(State(state)).await.unwrap();
    let json_value: Value = serde_json::to_value(&home).expect("Failed to serialize home page");

    assert_eq!(json_value["service"], "booking-directory");
    assert!(json_value["recent"]["venues"].is_array());
}

#[tokio::test]
async fn test_service_info_default() {
    let service_info = ServiceInfo::default();

    assert_eq!(service_info.service, "booking-directory");
    assert_eq!(service_info.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_handler_reports_ok() {
    let state = test_state().await;

    let Json(body) = health(State(state)).await.unwrap();
    assert_eq!(body.status, "ok");
}

#[tokio::test]
async fn create_venue_returns_created_with_location() {
    let state = test_state().await;

    let (status, [(header, location)], Json(saved)) =
        venues::create_venue(State(state.clone()), Ok(Json(venue_draft("The Musical Hop"))))
            .await
            .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(header, "Location");
    assert_eq!(location, format!("/venues/{}", saved.id));
    assert_eq!(saved.name, "The Musical Hop");
}

#[tokio::test]
async fn create_venue_without_address_is_bad_request() {
    let state = test_state().await;
    let mut draft = venue_draft("The Musical Hop");
    draft.address = None;

    let err = venues::create_venue(State(state), Ok(Json(draft)))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.details.unwrap()["reason"], "MISSING_FIELD");
}

#[tokio::test]
async fn missing_venue_detail_is_not_found() {
    let state = test_state().await;

    let err = venues::get_venue(State(state), Path(404)).await.unwrap_err();

    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.code, Box::from("NOT_FOUND"));
}

#[tokio::test]
async fn search_handler_reports_count() {
    let state = test_state().await;
    venues::create_venue(State(state.clone()), Ok(Json(venue_draft("The Musical Hop"))))
        .await
        .unwrap();

    let Json(results) = venues::search_venues(
        State(state),
        Ok(Json(SearchRequest {
            search_term: "hop".to_string(),
        })),
    )
    .await
    .unwrap();

    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].name, "The Musical Hop");
}

#[tokio::test]
async fn booking_show_for_unknown_artist_is_not_found() {
    let state = test_state().await;
    let (_, _, Json(venue)) =
        venues::create_venue(State(state.clone()), Ok(Json(venue_draft("The Musical Hop"))))
            .await
            .unwrap();

    let draft = ShowDraft {
        artist_id: Some(99),
        venue_id: Some(venue.id),
        start_time: Some(chrono::Utc::now()),
    };
    let err = shows::create_show(State(state), Ok(Json(draft)))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::NOT_FOUND);
}
