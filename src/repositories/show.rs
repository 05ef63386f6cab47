//! Show repository for database operations
//!
//! Shows are created and read only. Listings join the artist and venue
//! tables with LEFT JOINs so that a show whose venue or artist has been
//! deleted is still returned, with the joined columns empty.

use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use super::{RepositoryResult, Scheduled};
use crate::models::show::{self, Entity as Show, ShowFields};
use crate::models::{artist, venue};

/// A show joined with the display names of both sides.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ShowListing {
    pub id: i32,
    pub venue_id: i32,
    /// `None` when the venue no longer exists
    pub venue_name: Option<String>,
    pub artist_id: i32,
    /// `None` when the artist no longer exists
    pub artist_name: Option<String>,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

/// A show as seen from its venue's page.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct VenueShowEntry {
    pub artist_id: i32,
    pub artist_name: Option<String>,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

/// A show as seen from its artist's page.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ArtistShowEntry {
    pub venue_id: i32,
    pub venue_name: Option<String>,
    pub venue_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

impl Scheduled for ShowListing {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time.with_timezone(&Utc)
    }
}

impl Scheduled for VenueShowEntry {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time.with_timezone(&Utc)
    }
}

impl Scheduled for ArtistShowEntry {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time.with_timezone(&Utc)
    }
}

/// Repository for show database operations
#[derive(Debug, Clone, Copy)]
pub struct ShowRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ShowRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a show. The caller is responsible for checking that both
    /// referenced rows exist.
    pub async fn create(&self, fields: ShowFields) -> RepositoryResult<show::Model> {
        let model = show::ActiveModel {
            artist_id: Set(fields.artist_id),
            venue_id: Set(fields.venue_id),
            start_time: Set(fields.start_time.into()),
            ..Default::default()
        };
        Ok(model.insert(self.db).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<show::Model>> {
        Ok(Show::find_by_id(id).one(self.db).await?)
    }

    pub async fn list_all(&self) -> RepositoryResult<Vec<show::Model>> {
        Ok(Show::find().order_by_asc(show::Column::Id).all(self.db).await?)
    }

    /// Total number of shows booked at a venue, past and future alike
    pub async fn count_for_venue(&self, venue_id: i32) -> RepositoryResult<u64> {
        Ok(Show::find()
            .filter(show::Column::VenueId.eq(venue_id))
            .count(self.db)
            .await?)
    }

    /// Total number of shows booked for an artist, past and future alike
    pub async fn count_for_artist(&self, artist_id: i32) -> RepositoryResult<u64> {
        Ok(Show::find()
            .filter(show::Column::ArtistId.eq(artist_id))
            .count(self.db)
            .await?)
    }

    /// Number of shows at a venue starting at or after `now`
    pub async fn count_upcoming_for_venue(
        &self,
        venue_id: i32,
        now: DateTime<Utc>,
    ) -> RepositoryResult<u64> {
        let now: DateTimeWithTimeZone = now.into();
        Ok(Show::find()
            .filter(show::Column::VenueId.eq(venue_id))
            .filter(show::Column::StartTime.gte(now))
            .count(self.db)
            .await?)
    }

    /// Number of shows for an artist starting at or after `now`
    pub async fn count_upcoming_for_artist(
        &self,
        artist_id: i32,
        now: DateTime<Utc>,
    ) -> RepositoryResult<u64> {
        let now: DateTimeWithTimeZone = now.into();
        Ok(Show::find()
            .filter(show::Column::ArtistId.eq(artist_id))
            .filter(show::Column::StartTime.gte(now))
            .count(self.db)
            .await?)
    }

    /// Every show in id order with the artist and venue display fields.
    pub async fn list_with_joined_names(&self) -> RepositoryResult<Vec<ShowListing>> {
        Ok(Self::joined_listing()
            .order_by_asc(show::Column::Id)
            .into_model::<ShowListing>()
            .all(self.db)
            .await?)
    }

    /// Shows booked at one venue, in start time order.
    pub async fn list_for_venue(&self, venue_id: i32) -> RepositoryResult<Vec<VenueShowEntry>> {
        Ok(Show::find()
            .select_only()
            .column(show::Column::ArtistId)
            .column_as(artist::Column::Name, "artist_name")
            .column_as(artist::Column::ImageLink, "artist_image_link")
            .column(show::Column::StartTime)
            .join(JoinType::LeftJoin, show::Relation::Artist.def())
            .filter(show::Column::VenueId.eq(venue_id))
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .into_model::<VenueShowEntry>()
            .all(self.db)
            .await?)
    }

    /// Shows booked for one artist, in start time order.
    pub async fn list_for_artist(&self, artist_id: i32) -> RepositoryResult<Vec<ArtistShowEntry>> {
        Ok(Show::find()
            .select_only()
            .column(show::Column::VenueId)
            .column_as(venue::Column::Name, "venue_name")
            .column_as(venue::Column::ImageLink, "venue_image_link")
            .column(show::Column::StartTime)
            .join(JoinType::LeftJoin, show::Relation::Venue.def())
            .filter(show::Column::ArtistId.eq(artist_id))
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .into_model::<ArtistShowEntry>()
            .all(self.db)
            .await?)
    }

    fn joined_listing() -> Select<Show> {
        Show::find()
            .select_only()
            .column(show::Column::Id)
            .column(show::Column::VenueId)
            .column_as(venue::Column::Name, "venue_name")
            .column(show::Column::ArtistId)
            .column_as(artist::Column::Name, "artist_name")
            .column_as(artist::Column::ImageLink, "artist_image_link")
            .column(show::Column::StartTime)
            .join(JoinType::LeftJoin, show::Relation::Venue.def())
            .join(JoinType::LeftJoin, show::Relation::Artist.def())
    }
}
