//! Venue use cases.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    BookingService, Deleted, Saved, SearchResultItem, SearchResults, finish, record,
    refine_not_found,
};
use crate::error::{Outcome, PersistenceFailure, RepositoryError};
use crate::models::venue::{self, VenueDraft};
use crate::repositories::{ShowRepository, VenueRepository, VenueShowEntry, split_past_and_upcoming};

/// A venue inside a listing area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    /// Every show booked at the venue, including past ones
    pub num_upcoming_shows: u64,
}

/// Venues sharing a city and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// A show on a venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VenueShow {
    pub artist_id: i32,
    /// `None` once the artist has been deleted
    pub artist_name: Option<String>,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<VenueShowEntry> for VenueShow {
    fn from(entry: VenueShowEntry) -> Self {
        Self {
            artist_id: entry.artist_id,
            artist_name: entry.artist_name,
            artist_image_link: entry.artist_image_link,
            start_time: entry.start_time.with_timezone(&Utc),
        }
    }
}

/// Everything stored about a venue plus its shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<'a, C> BookingService<'a, C>
where
    C: ConnectionTrait + TransactionTrait,
{
    /// Validates and stores a new venue.
    pub async fn create_venue(&self, draft: VenueDraft) -> Outcome<Saved> {
        let outcome = self.try_create_venue(draft).await;
        record("create_venue", &outcome);
        outcome
    }

    async fn try_create_venue(&self, draft: VenueDraft) -> Outcome<Saved> {
        let fields = draft.into_fields()?;

        let txn = self.db.begin().await?;
        let result = VenueRepository::new(&txn)
            .create(fields)
            .await
            .map(|venue| Saved {
                id: venue.id,
                name: venue.name,
            })
            .map_err(Into::into);
        finish(txn, result).await
    }

    /// Replaces every field of an existing venue.
    pub async fn update_venue(&self, id: i32, draft: VenueDraft) -> Outcome<Saved> {
        let outcome = self.try_update_venue(id, draft).await;
        record("update_venue", &outcome);
        outcome
    }

    async fn try_update_venue(&self, id: i32, draft: VenueDraft) -> Outcome<Saved> {
        let fields = draft.into_fields()?;

        let txn = self.db.begin().await?;
        let result = VenueRepository::new(&txn)
            .update(id, fields)
            .await
            .map(|venue| Saved {
                id: venue.id,
                name: venue.name,
            })
            .map_err(refine_not_found("venue", id));
        finish(txn, result).await
    }

    /// Removes a venue. Its shows stay in place and keep pointing at `id`.
    pub async fn delete_venue(&self, id: i32) -> Outcome<Deleted> {
        let outcome = self.try_delete_venue(id).await;
        record("delete_venue", &outcome);
        outcome
    }

    async fn try_delete_venue(&self, id: i32) -> Outcome<Deleted> {
        let txn = self.db.begin().await?;
        let result = VenueRepository::new(&txn)
            .delete(id)
            .await
            .map(|venue| Deleted {
                id: venue.id,
                name: venue.name,
            })
            .map_err(refine_not_found("venue", id));
        finish(txn, result).await
    }

    /// All stored fields of a venue with its shows split around the current time.
    pub async fn get_venue_detail(&self, id: i32) -> Outcome<VenueDetail> {
        let outcome = self.load_venue_detail(id, Utc::now()).await;
        record("get_venue_detail", &outcome);
        outcome
    }

    async fn load_venue_detail(&self, id: i32, now: DateTime<Utc>) -> Outcome<VenueDetail> {
        let venue = VenueRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| PersistenceFailure::not_found("venue", id))?;
        let genres = venue.genre_list().map_err(RepositoryError::from)?;

        let shows = ShowRepository::new(self.db).list_for_venue(id).await?;
        let split = split_past_and_upcoming(shows, now);
        let past_shows_count = split.past_count();
        let upcoming_shows_count = split.upcoming_count();

        Ok(VenueDetail {
            id: venue.id,
            name: venue.name,
            genres: genres.into_vec(),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website_link: venue.website_link,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows: split.past.into_iter().map(VenueShow::from).collect(),
            upcoming_shows: split.upcoming.into_iter().map(VenueShow::from).collect(),
            past_shows_count,
            upcoming_shows_count,
        })
    }

    /// Venues grouped by `(city, state)` in the order each area is first seen.
    ///
    /// `num_upcoming_shows` here counts every show of the venue, past ones
    /// included; search results use a time-filtered count instead.
    pub async fn list_venues_grouped(&self) -> Outcome<Vec<VenueArea>> {
        let outcome = self.load_venue_areas().await;
        record("list_venues_grouped", &outcome);
        outcome
    }

    async fn load_venue_areas(&self) -> Outcome<Vec<VenueArea>> {
        let venues = VenueRepository::new(self.db).list_all().await?;
        let shows = ShowRepository::new(self.db);

        let mut areas: Vec<VenueArea> = Vec::new();
        for venue in venues {
            let summary = VenueSummary {
                id: venue.id,
                name: venue.name.clone(),
                num_upcoming_shows: shows.count_for_venue(venue.id).await?,
            };
            place_in_area(&mut areas, venue, summary);
        }

        Ok(areas)
    }

    /// Case-insensitive search over venue name, city and state.
    pub async fn search_venues(&self, term: &str) -> Outcome<SearchResults> {
        let outcome = self.run_venue_search(term, Utc::now()).await;
        record("search_venues", &outcome);
        outcome
    }

    async fn run_venue_search(&self, term: &str, now: DateTime<Utc>) -> Outcome<SearchResults> {
        let hits = VenueRepository::new(self.db).search(term, now).await?;
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

fn place_in_area(areas: &mut Vec<VenueArea>, venue: venue::Model, summary: VenueSummary) {
    match areas
        .iter_mut()
        .find(|area| area.state == venue.state && area.city == venue.city)
    {
        Some(area) => area.venues.push(summary),
        None => areas.push(VenueArea {
            city: venue.city,
            state: venue.state,
            venues: vec![summary],
        }),
    }
}
