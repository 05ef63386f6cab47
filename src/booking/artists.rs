//! Artist use cases.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    BookingService, Deleted, DirectoryEntry, Saved, SearchResultItem, SearchResults, finish,
    record, refine_not_found,
};
use crate::error::{Outcome, PersistenceFailure, RepositoryError};
use crate::models::artist::ArtistDraft;
use crate::repositories::{
    ArtistRepository, ArtistShowEntry, ShowRepository, split_past_and_upcoming,
};

/// A show on an artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArtistShow {
    pub venue_id: i32,
    /// `None` once the venue has been deleted
    pub venue_name: Option<String>,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ArtistShowEntry> for ArtistShow {
    fn from(entry: ArtistShowEntry) -> Self {
        Self {
            venue_id: entry.venue_id,
            venue_name: entry.venue_name,
            venue_image_link: entry.venue_image_link,
            start_time: entry.start_time.with_timezone(&Utc),
        }
    }
}

/// Everything stored about an artist plus their shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub image_link: Option<String>,
    pub available_start_time: Option<DateTime<Utc>>,
    pub available_end_time: Option<DateTime<Utc>>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<'a, C> BookingService<'a, C>
where
    C: ConnectionTrait + TransactionTrait,
{
    /// Validates and stores a new artist, availability window included.
    pub async fn create_artist(&self, draft: ArtistDraft) -> Outcome<Saved> {
        let outcome = self.try_create_artist(draft).await;
        record("create_artist", &outcome);
        outcome
    }

    async fn try_create_artist(&self, draft: ArtistDraft) -> Outcome<Saved> {
        let fields = draft.into_fields()?;

        let txn = self.db.begin().await?;
        let result = ArtistRepository::new(&txn)
            .create(fields)
            .await
            .map(|artist| Saved {
                id: artist.id,
                name: artist.name,
            })
            .map_err(Into::into);
        finish(txn, result).await
    }

    pub async fn update_artist(&self, id: i32, draft: ArtistDraft) -> Outcome<Saved> {
        let outcome = self.try_update_artist(id, draft).await;
        record("update_artist", &outcome);
        outcome
    }

    async fn try_update_artist(&self, id: i32, draft: ArtistDraft) -> Outcome<Saved> {
        let fields = draft.into_fields()?;

        let txn = self.db.begin().await?;
        let result = ArtistRepository::new(&txn)
            .update(id, fields)
            .await
            .map(|artist| Saved {
                id: artist.id,
                name: artist.name,
            })
            .map_err(refine_not_found("artist", id));
        finish(txn, result).await
    }

    /// Removes an artist without touching their shows.
    pub async fn delete_artist(&self, id: i32) -> Outcome<Deleted> {
        let outcome = self.try_delete_artist(id).await;
        record("delete_artist", &outcome);
        outcome
    }

    async fn try_delete_artist(&self, id: i32) -> Outcome<Deleted> {
        let txn = self.db.begin().await?;
        let result = ArtistRepository::new(&txn)
            .delete(id)
            .await
            .map(|artist| Deleted {
                id: artist.id,
                name: artist.name,
            })
            .map_err(refine_not_found("artist", id));
        finish(txn, result).await
    }

    pub async fn get_artist_detail(&self, id: i32) -> Outcome<ArtistDetail> {
        let outcome = self.load_artist_detail(id, Utc::now()).await;
        record("get_artist_detail", &outcome);
        outcome
    }

    async fn load_artist_detail(&self, id: i32, now: DateTime<Utc>) -> Outcome<ArtistDetail> {
        let artist = ArtistRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| PersistenceFailure::not_found("artist", id))?;
        let genres = artist.genre_list().map_err(RepositoryError::from)?;
        let available_start_time = artist.available_start_utc();
        let available_end_time = artist.available_end_utc();

        let shows = ShowRepository::new(self.db).list_for_artist(id).await?;
        let split = split_past_and_upcoming(shows, now);
        let past_shows_count = split.past_count();
        let upcoming_shows_count = split.upcoming_count();

        Ok(ArtistDetail {
            id: artist.id,
            name: artist.name,
            genres: genres.into_vec(),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website_link: artist.website_link,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            available_start_time,
            available_end_time,
            past_shows: split.past.into_iter().map(ArtistShow::from).collect(),
            upcoming_shows: split.upcoming.into_iter().map(ArtistShow::from).collect(),
            past_shows_count,
            upcoming_shows_count,
        })
    }

    /// `{id, name}` of every artist in id order.
    pub async fn list_artists(&self) -> Outcome<Vec<DirectoryEntry>> {
        let outcome: Outcome<Vec<DirectoryEntry>> = ArtistRepository::new(self.db)
            .list_all()
            .await
            .map(|artists| {
                artists
                    .into_iter()
                    .map(|artist| DirectoryEntry {
                        id: artist.id,
                        name: artist.name,
                    })
                    .collect()
            })
            .map_err(Into::into);
        record("list_artists", &outcome);
        outcome
    }

    /// Case-insensitive search over artist name, city and state.
    pub async fn search_artists(&self, term: &str) -> Outcome<SearchResults> {
        let outcome = self.run_artist_search(term, Utc::now()).await;
        record("search_artists", &outcome);
        outcome
    }

    async fn run_artist_search(&self, term: &str, now: DateTime<Utc>) -> Outcome<SearchResults> {
        let hits = ArtistRepository::new(self.db).search(term, now).await?;
        let data: Vec<SearchResultItem> = hits
            .into_iter()
            .map(|hit| SearchResultItem {
                id: hit.row.id,
                name: hit.row.name,
                num_upcoming_shows: hit.num_upcoming_shows,
            })
            .collect();

        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }
}
