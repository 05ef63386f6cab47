//! Show use cases.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseTransaction, TransactionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BookingService, finish, record};
use crate::availability::is_show_time_within_availability;
use crate::error::{Outcome, PersistenceFailure, ValidationFailure};
use crate::models::show::{ShowDraft, ShowFields};
use crate::repositories::{ArtistRepository, ShowListing, ShowRepository, VenueRepository};

/// Confirmation of a booked show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShowBooked {
    pub id: i32,
    #[schema(example = "Show for artist Guns N Petals at venue The Musical Hop on 2035-04-01 20:00:00")]
    pub description: String,
}

/// One row of the show listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShowSummary {
    pub id: i32,
    pub venue_id: i32,
    /// `None` when the venue has been deleted
    pub venue_name: Option<String>,
    pub artist_id: i32,
    /// `None` when the artist has been deleted
    pub artist_name: Option<String>,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowListing> for ShowSummary {
    fn from(listing: ShowListing) -> Self {
        Self {
            id: listing.id,
            venue_id: listing.venue_id,
            venue_name: listing.venue_name,
            artist_id: listing.artist_id,
            artist_name: listing.artist_name,
            artist_image_link: listing.artist_image_link,
            start_time: listing.start_time.with_timezone(&Utc),
        }
    }
}

impl<'a, C> BookingService<'a, C>
where
    C: ConnectionTrait + TransactionTrait,
{
    /// Books an artist into a venue.
    ///
    /// Both rows must exist and the start time must fall inside the artist's
    /// availability window; otherwise nothing is written.
    pub async fn create_show(&self, draft: ShowDraft) -> Outcome<ShowBooked> {
        let outcome = self.try_create_show(draft).await;
        record("create_show", &outcome);
        outcome
    }

    async fn try_create_show(&self, draft: ShowDraft) -> Outcome<ShowBooked> {
        let fields = draft.into_fields()?;

        let txn = self.db.begin().await?;
        let result = book_show(&txn, fields).await;
        finish(txn, result).await
    }

    /// Every show with artist and venue display fields, dangling ones included.
    pub async fn list_shows(&self) -> Outcome<Vec<ShowSummary>> {
        let outcome: Outcome<Vec<ShowSummary>> = ShowRepository::new(self.db)
            .list_with_joined_names()
            .await
            .map(|listings| listings.into_iter().map(ShowSummary::from).collect())
            .map_err(Into::into);
        record("list_shows", &outcome);
        outcome
    }
}

async fn book_show(txn: &DatabaseTransaction, fields: ShowFields) -> Outcome<ShowBooked> {
    let artist = ArtistRepository::new(txn)
        .get_by_id(fields.artist_id)
        .await?
        .ok_or_else(|| PersistenceFailure::not_found("artist", fields.artist_id))?;
    let venue = VenueRepository::new(txn)
        .get_by_id(fields.venue_id)
        .await?
        .ok_or_else(|| PersistenceFailure::not_found("venue", fields.venue_id))?;

    if !is_show_time_within_availability(
        fields.start_time,
        artist.available_start_utc(),
        artist.available_end_utc(),
    ) {
        return Err(ValidationFailure::ShowOutsideAvailability.into());
    }

    let show = ShowRepository::new(txn).create(fields).await?;

    Ok(ShowBooked {
        id: show.id,
        description: format!(
            "Show for artist {} at venue {} on {}",
            artist.name,
            venue.name,
            fields.start_time.format("%Y-%m-%d %H:%M:%S")
        ),
    })
}
