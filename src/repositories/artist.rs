//! Artist repository for database operations
//!
//! This module provides the ArtistRepository struct which encapsulates SeaORM
//! operations for the artists table. It works on any connection, so use cases
//! can run it inside a transaction.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use super::{RepositoryResult, SearchHit, ShowRepository, matches_folded, substring_match};
use crate::error::RepositoryError;
use crate::models::artist::{self, Entity as Artist, ArtistFields};

/// Repository for artist database operations
#[derive(Debug, Clone, Copy)]
pub struct ArtistRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ArtistRepository<'a, C> {
    /// Creates a new ArtistRepository over a pool or an open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an artist and returns the stored row with its generated id
    pub async fn create(&self, fields: ArtistFields) -> RepositoryResult<artist::Model> {
        let mut model = artist::ActiveModel {
            ..Default::default()
        };
        fields.write_to(&mut model);
        Ok(model.insert(self.db).await?)
    }

    /// Finds an artist by id; `None` when there is no such row
    pub async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<artist::Model>> {
        Ok(Artist::find_by_id(id).one(self.db).await?)
    }

    /// Replaces every field of an existing artist
    ///
    /// # Returns
    ///
    /// The updated row, or [`RepositoryError::NotFound`] if the artist is gone
    pub async fn update(&self, id: i32, fields: ArtistFields) -> RepositoryResult<artist::Model> {
        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("artist {id}")))?;

        let mut model: artist::ActiveModel = existing.into();
        fields.write_to(&mut model);
        Ok(model.update(self.db).await?)
    }

    /// Deletes an artist and returns the row as it was before deletion.
    ///
    /// Shows pointing at the artist are left untouched.
    pub async fn delete(&self, id: i32) -> RepositoryResult<artist::Model> {
        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("artist {id}")))?;

        let result = Artist::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(format!("artist {id}")));
        }

        Ok(existing)
    }

    /// Every artist, ordered by id
    pub async fn list_all(&self) -> RepositoryResult<Vec<artist::Model>> {
        Ok(Artist::find()
            .order_by_asc(artist::Column::Id)
            .all(self.db)
            .await?)
    }

    /// The `limit` most recently created artists, newest first
    pub async fn list_recent(&self, limit: u64) -> RepositoryResult<Vec<artist::Model>> {
        Ok(Artist::find()
            .order_by_desc(artist::Column::Id)
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
    ) -> RepositoryResult<Vec<SearchHit<artist::Model>>> {
        let artists = Artist::find()
            .filter(substring_match(
                self.db.get_database_backend(),
                term,
                [
                    artist::Column::Name,
                    artist::Column::City,
                    artist::Column::State,
                ],
            ))
            .order_by_asc(artist::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .filter(|artist| {
                matches_folded(term, &[artist.name.as_str(), artist.city.as_str(), artist.state.as_str()])
            });

        let shows = ShowRepository::new(self.db);
        let mut hits = Vec::new();
        for artist in artists {
            let num_upcoming_shows = shows.count_upcoming_for_artist(artist.id, now).await?;
            hits.push(SearchHit {
                row: artist,
                num_upcoming_shows,
            });
        }

        Ok(hits)
    }
}
