//! Artist entity model
//!
//! This module contains the SeaORM entity for the artists table together with
//! the draft/fields pair used to validate artist input, including the
//! optional availability window.

use chrono::{DateTime, Utc};
use sea_orm::ActiveModelBehavior;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::fields::{optional_url, required_genres, required_text};
use super::genres::{Genres, GenresError};
use crate::availability::is_availability_window_valid;
use crate::error::ValidationFailure;

/// Artist entity: a performer that can be booked into shows
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    pub city: String,

    pub state: String,

    pub phone: String,

    /// Comma-joined genre list, see [`Genres`]
    #[sea_orm(column_type = "Text")]
    pub genres: String,

    pub facebook_link: Option<String>,

    pub image_link: Option<String>,

    pub website_link: Option<String>,

    pub seeking_venue: bool,

    #[sea_orm(column_type = "Text")]
    pub seeking_description: String,

    /// Earliest bookable time (inclusive)
    pub available_start_time: Option<DateTimeWithTimeZone>,

    /// Latest bookable time (inclusive)
    pub available_end_time: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show::Entity")]
    Show,
}

impl Related<super::show::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Show.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decoded genre list.
    pub fn genre_list(&self) -> Result<Genres, GenresError> {
        Genres::from_column(&self.genres)
    }

    pub fn available_start_utc(&self) -> Option<DateTime<Utc>> {
        self.available_start_time.map(|t| t.with_timezone(&Utc))
    }

    pub fn available_end_utc(&self) -> Option<DateTime<Utc>> {
        self.available_end_time.map(|t| t.with_timezone(&Utc))
    }
}

/// Raw artist input as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ArtistDraft {
    #[schema(example = "Guns N Petals")]
    pub name: Option<String>,
    #[schema(example = "San Francisco")]
    pub city: Option<String>,
    #[schema(example = "CA")]
    pub state: Option<String>,
    #[schema(example = "326-123-5000")]
    pub phone: Option<String>,
    #[schema(example = json!(["Rock n Roll"]))]
    pub genres: Option<Vec<String>>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    /// Defaults to `false`
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
    /// Start of the availability window (RFC 3339)
    pub available_start_time: Option<DateTime<Utc>>,
    /// End of the availability window (RFC 3339); requires a start
    pub available_end_time: Option<DateTime<Utc>>,
}

/// Validated artist fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Genres,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub available_start_time: Option<DateTime<Utc>>,
    pub available_end_time: Option<DateTime<Utc>>,
}

impl ArtistDraft {
    /// Validates required fields first, then the availability window.
    pub fn into_fields(self) -> Result<ArtistFields, ValidationFailure> {
        let fields = ArtistFields {
            name: required_text("name", self.name)?,
            city: required_text("city", self.city)?,
            state: required_text("state", self.state)?,
            phone: required_text("phone", self.phone)?,
            genres: required_genres(self.genres)?,
            facebook_link: optional_url("facebook_link", self.facebook_link)?,
            image_link: optional_url("image_link", self.image_link)?,
            website_link: optional_url("website_link", self.website_link)?,
            seeking_venue: self.seeking_venue.unwrap_or(false),
            seeking_description: required_text("seeking_description", self.seeking_description)?,
            available_start_time: self.available_start_time,
            available_end_time: self.available_end_time,
        };

        if !is_availability_window_valid(fields.available_start_time, fields.available_end_time) {
            return Err(ValidationFailure::BadAvailabilityFormat);
        }

        Ok(fields)
    }
}

impl ArtistFields {
    /// Copies every field onto `model`, leaving the primary key untouched.
    pub fn write_to(self, model: &mut ActiveModel) {
        model.name = Set(self.name);
        model.city = Set(self.city);
        model.state = Set(self.state);
        model.phone = Set(self.phone);
        model.genres = Set(self.genres.to_column());
        model.facebook_link = Set(self.facebook_link);
        model.image_link = Set(self.image_link);
        model.website_link = Set(self.website_link);
        model.seeking_venue = Set(self.seeking_venue);
        model.seeking_description = Set(self.seeking_description);
        model.available_start_time = Set(self.available_start_time.map(Into::into));
        model.available_end_time = Set(self.available_end_time.map(Into::into));
    }
}
