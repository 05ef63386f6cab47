//! Test utilities for database testing.
//!
//! Sets up migrated in-memory SQLite databases and builds the drafts most
//! tests start from.

use anyhow::Result;
use booking::models::artist::ArtistDraft;
use booking::models::venue::VenueDraft;
use chrono::{DateTime, TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Runs a raw statement, for tests that need to break the schema.
#[allow(dead_code)]
pub async fn execute_raw(db: &DatabaseConnection, sql: &str) -> Result<()> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        sql.to_string(),
    ))
    .await?;
    Ok(())
}

/// A UTC instant at minute precision.
#[allow(dead_code)]
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid test timestamp")
}

/// A venue draft with every required field filled in.
#[allow(dead_code)]
pub fn venue_draft(name: &str, city: &str, state: &str) -> VenueDraft {
    VenueDraft {
        name: Some(name.to_string()),
        city: Some(city.to_string()),
        state: Some(state.to_string()),
        address: Some("1015 Folsom Street".to_string()),
        phone: Some("123-123-1234".to_string()),
        genres: Some(vec!["Jazz".to_string(), "Folk".to_string()]),
        facebook_link: Some("https://www.facebook.com/venue".to_string()),
        image_link: Some("https://example.com/venue.png".to_string()),
        website_link: Some("https://www.example.com/venue".to_string()),
        seeking_talent: Some(true),
        seeking_description: Some("Looking for local acts".to_string()),
    }
}

/// An artist draft without an availability window.
#[allow(dead_code)]
pub fn artist_draft(name: &str) -> ArtistDraft {
    ArtistDraft {
        name: Some(name.to_string()),
        city: Some("San Francisco".to_string()),
        state: Some("CA".to_string()),
        phone: Some("326-123-5000".to_string()),
        genres: Some(vec!["Rock n Roll".to_string()]),
        image_link: Some("https://example.com/artist.png".to_string()),
        seeking_venue: Some(false),
        seeking_description: Some("Touring".to_string()),
        ..Default::default()
    }
}
