//! Venue repository for database operations
//!
//! This module provides the VenueRepository struct which encapsulates SeaORM
//! operations for the venues table. It works on any connection, so use cases
//! can run it inside a transaction.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use super::{RepositoryResult, SearchHit, ShowRepository, matches_folded, substring_match};
use crate::error::RepositoryError;
use crate::models::venue::{self, Entity as Venue, VenueFields};

/// Repository for venue database operations
#[derive(Debug, Clone, Copy)]
pub struct VenueRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VenueRepository<'a, C> {
    /// Creates a new VenueRepository over a pool or an open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a venue and returns the stored row with its generated id
    pub async fn create(&self, fields: VenueFields) -> RepositoryResult<venue::Model> {
        let mut model = venue::ActiveModel {
            ..Default::default()
        };
        fields.write_to(&mut model);
        Ok(model.insert(self.db).await?)
    }

    /// Finds a venue by id; `None` when there is no such row
    pub async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<venue::Model>> {
        Ok(Venue::find_by_id(id).one(self.db).await?)
    }

    /// Replaces every field of an existing venue
    ///
    /// # Returns
    ///
    /// The updated row, or [`RepositoryError::NotFound`] if the venue is gone
    pub async fn update(&self, id: i32, fields: VenueFields) -> RepositoryResult<venue::Model> {
        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("venue {id}")))?;

        let mut model: venue::ActiveModel = existing.into();
        fields.write_to(&mut model);
        Ok(model.update(self.db).await?)
    }

    /// Deletes a venue and returns the row as it was before deletion.
    ///
    /// Shows pointing at the venue are left untouched.
    pub async fn delete(&self, id: i32) -> RepositoryResult<venue::Model> {
        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("venue {id}")))?;

        let result = Venue::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(format!("venue {id}")));
        }

        Ok(existing)
    }

    /// Every venue, ordered by id
    pub async fn list_all(&self) -> RepositoryResult<Vec<venue::Model>> {
        Ok(Venue::find()
            .order_by_asc(venue::Column::Id)
            .all(self.db)
            .await?)
    }

    /// The `limit` most recently created venues, newest first
    pub async fn list_recent(&self, limit: u64) -> RepositoryResult<Vec<venue::Model>> {
        Ok(Venue::find()
            .order_by_desc(venue::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?)
    }

    /// Case-insensitive substring search over name, city and state.
    ///
    /// Each hit carries the number of its shows starting at or after `now`.
    pub async fn search(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Vec<SearchHit<venue::Model>>> {
        let venues = Venue::find()
            .filter(substring_match(
                self.db.get_database_backend(),
                term,
                [
                    venue::Column::Name,
                    venue::Column::City,
                    venue::Column::State,
                ],
            ))
            .order_by_asc(venue::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .filter(|venue| {
                matches_folded(term, &[venue.name.as_str(), venue.city.as_str(), venue.state.as_str()])
            });

        let shows = ShowRepository::new(self.db);
        let mut hits = Vec::new();
        for venue in venues {
            let num_upcoming_shows = shows.count_upcoming_for_venue(venue.id, now).await?;
            hits.push(SearchHit {
                row: venue,
                num_upcoming_shows,
            });
        }

        Ok(hits)
    }
}
