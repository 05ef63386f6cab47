//! # Booking Use Cases
//!
//! [`BookingService`] is the application layer of the directory. It validates
//! raw drafts, runs repository calls inside a transaction it owns, and turns
//! every result into an [`Outcome`]. Handlers and the seeder call nothing
//! below this layer.
//!
//! Each use case is recorded once: a `tracing` event whose level follows the
//! outcome kind, and a `booking_use_case_total` counter labelled with the
//! operation and outcome.

use metrics::counter;
use sea_orm::{ConnectionTrait, DatabaseTransaction, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::error::{BookingError, Outcome, OutcomeKind, PersistenceFailure, RepositoryError};
use crate::repositories::{ArtistRepository, VenueRepository};

mod artists;
mod shows;
mod venues;

pub use artists::{ArtistDetail, ArtistShow};
pub use shows::{ShowBooked, ShowSummary};
pub use venues::{VenueArea, VenueDetail, VenueShow, VenueSummary};

/// Number of entries per kind on the landing page.
pub const RECENT_LISTING_LIMIT: u64 = 10;

/// Use-case entry point over an explicitly provided connection.
///
/// `C` is normally a [`DatabaseConnection`](sea_orm::DatabaseConnection);
/// every mutating use case opens its own transaction on it.
#[derive(Debug, Clone, Copy)]
pub struct BookingService<'a, C> {
    db: &'a C,
}

/// Identity of a venue or artist that was just written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Saved {
    pub id: i32,
    pub name: String,
}

/// Identity of a venue or artist that was just removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Deleted {
    pub id: i32,
    pub name: String,
}

/// Minimal `{id, name}` reference used by index pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DirectoryEntry {
    pub id: i32,
    pub name: String,
}

/// One search match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchResultItem {
    pub id: i32,
    pub name: String,
    /// Shows starting now or later
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchResultItem>,
}

/// Newest artists and venues, for the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecentListings {
    pub artists: Vec<DirectoryEntry>,
    pub venues: Vec<DirectoryEntry>,
}

impl<'a, C> BookingService<'a, C>
where
    C: ConnectionTrait + TransactionTrait,
{
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// The most recently created artists and venues.
    pub async fn recent_listings(&self) -> Outcome<RecentListings> {
        let outcome = self.load_recent_listings().await;
        record("recent_listings", &outcome);
        outcome
    }

    async fn load_recent_listings(&self) -> Outcome<RecentListings> {
        let artists = ArtistRepository::new(self.db)
            .list_recent(RECENT_LISTING_LIMIT)
            .await?;
        let venues = VenueRepository::new(self.db)
            .list_recent(RECENT_LISTING_LIMIT)
            .await?;

        Ok(RecentListings {
            artists: artists
                .into_iter()
                .map(|artist| DirectoryEntry {
                    id: artist.id,
                    name: artist.name,
                })
                .collect(),
            venues: venues
                .into_iter()
                .map(|venue| DirectoryEntry {
                    id: venue.id,
                    name: venue.name,
                })
                .collect(),
        })
    }
}

/// Commits `txn` when `result` is a success and rolls it back otherwise.
async fn finish<T>(txn: DatabaseTransaction, result: Outcome<T>) -> Outcome<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "Failed to roll back booking transaction");
            }
            Err(err)
        }
    }
}

/// Maps a repository failure, turning a missing row into a typed not-found.
fn refine_not_found(entity: &'static str, id: i32) -> impl FnOnce(RepositoryError) -> BookingError {
    move |err| match err {
        RepositoryError::NotFound(_) => PersistenceFailure::not_found(entity, id).into(),
        other => other.into(),
    }
}

fn record<T>(operation: &'static str, outcome: &Outcome<T>) {
    let kind = OutcomeKind::of(outcome);
    counter!(
        "booking_use_case_total",
        "operation" => operation,
        "outcome" => kind.as_str()
    )
    .increment(1);

    match outcome {
        Ok(_) => info!(operation, "Booking use case succeeded"),
        Err(err @ BookingError::Validation(_)) => {
            warn!(operation, reason = %err, "Booking use case rejected input")
        }
        Err(err) => error!(operation, reason = %err, "Booking use case failed"),
    }
}
