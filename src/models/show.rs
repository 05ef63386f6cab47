//! Show entity model
//!
//! A show links one artist to one venue at a start time. The references are
//! ORM-level relations only; the table has no foreign key constraints.

use chrono::{DateTime, Utc};
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationFailure;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub artist_id: i32,

    pub venue_id: i32,

    pub start_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::artist::Entity",
        from = "Column::ArtistId",
        to = "super::artist::Column::Id"
    )]
    Artist,
    #[sea_orm(
        belongs_to = "super::venue::Entity",
        from = "Column::VenueId",
        to = "super::venue::Column::Id"
    )]
    Venue,
}

impl Related<super::artist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl Related<super::venue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Venue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Raw show booking request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ShowDraft {
    #[schema(example = 4)]
    pub artist_id: Option<i32>,
    #[schema(example = 1)]
    pub venue_id: Option<i32>,
    /// RFC 3339 start time
    #[schema(example = "2035-04-01T20:00:00Z")]
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowFields {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

impl ShowDraft {
    pub fn into_fields(self) -> Result<ShowFields, ValidationFailure> {
        Ok(ShowFields {
            artist_id: self
                .artist_id
                .ok_or(ValidationFailure::MissingField { field: "artist_id" })?,
            venue_id: self
                .venue_id
                .ok_or(ValidationFailure::MissingField { field: "venue_id" })?,
            start_time: self
                .start_time
                .ok_or(ValidationFailure::MissingField { field: "start_time" })?,
        })
    }
}
