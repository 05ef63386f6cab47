//! Venue entity model
//!
//! This module contains the SeaORM entity for the venues table together with
//! the draft/fields pair used to validate venue input.

use sea_orm::ActiveModelBehavior;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::fields::{optional_text, optional_url, required_genres, required_text};
use super::genres::{Genres, GenresError};
use crate::error::ValidationFailure;

/// Venue entity: a location that can host shows
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "venues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    pub city: String,

    pub state: String,

    pub address: String,

    pub phone: Option<String>,

    /// Comma-joined genre list, see [`Genres`]
    #[sea_orm(column_type = "Text")]
    pub genres: String,

    pub facebook_link: Option<String>,

    pub image_link: Option<String>,

    pub website_link: Option<String>,

    pub seeking_talent: bool,

    #[sea_orm(column_type = "Text")]
    pub seeking_description: String,
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
}

/// Raw venue input as submitted by a client. Every field is optional here;
/// [`VenueDraft::into_fields`] decides what is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VenueDraft {
    #[schema(example = "The Musical Hop")]
    pub name: Option<String>,
    #[schema(example = "San Francisco")]
    pub city: Option<String>,
    #[schema(example = "CA")]
    pub state: Option<String>,
    #[schema(example = "1015 Folsom Street")]
    pub address: Option<String>,
    #[schema(example = "123-123-1234")]
    pub phone: Option<String>,
    #[schema(example = json!(["Jazz", "Reggae", "Swing"]))]
    pub genres: Option<Vec<String>>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    /// Defaults to `false`
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

/// Validated venue fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Genres,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueDraft {
    pub fn into_fields(self) -> Result<VenueFields, ValidationFailure> {
        Ok(VenueFields {
            name: required_text("name", self.name)?,
            city: required_text("city", self.city)?,
            state: required_text("state", self.state)?,
            address: required_text("address", self.address)?,
            phone: optional_text(self.phone),
            genres: required_genres(self.genres)?,
            facebook_link: optional_url("facebook_link", self.facebook_link)?,
            image_link: optional_url("image_link", self.image_link)?,
            website_link: optional_url("website_link", self.website_link)?,
            seeking_talent: self.seeking_talent.unwrap_or(false),
            seeking_description: required_text("seeking_description", self.seeking_description)?,
        })
    }
}

impl VenueFields {
    /// Copies every field onto `model`, leaving the primary key untouched.
    pub fn write_to(self, model: &mut ActiveModel) {
        model.name = Set(self.name);
        model.city = Set(self.city);
        model.state = Set(self.state);
        model.address = Set(self.address);
        model.phone = Set(self.phone);
        model.genres = Set(self.genres.to_column());
        model.facebook_link = Set(self.facebook_link);
        model.image_link = Set(self.image_link);
        model.website_link = Set(self.website_link);
        model.seeking_talent = Set(self.seeking_talent);
        model.seeking_description = Set(self.seeking_description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> VenueDraft {
        VenueDraft {
            name: Some("The Musical Hop".to_string()),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            address: Some("1015 Folsom Street".to_string()),
            phone: Some("123-123-1234".to_string()),
            genres: Some(vec!["Jazz".to_string(), "Reggae".to_string()]),
            facebook_link: None,
            image_link: None,
            website_link: Some("https://www.themusicalhop.com".to_string()),
            seeking_talent: Some(true),
            seeking_description: Some("We are on the lookout for a local artist".to_string()),
        }
    }

    #[test]
    fn complete_draft_validates() {
        let fields = draft().into_fields().unwrap();
        assert_eq!(fields.name, "The Musical Hop");
        assert_eq!(fields.genres.as_slice(), ["Jazz", "Reggae"]);
        assert!(fields.seeking_talent);
    }

    #[test]
    fn missing_address_is_rejected() {
        let mut incomplete = draft();
        incomplete.address = None;
        assert_eq!(
            incomplete.into_fields(),
            Err(ValidationFailure::MissingField { field: "address" })
        );
    }

    #[test]
    fn phone_is_optional_and_seeking_talent_defaults_to_false() {
        let mut minimal = draft();
        minimal.phone = Some("  ".to_string());
        minimal.seeking_talent = None;

        let fields = minimal.into_fields().unwrap();
        assert_eq!(fields.phone, None);
        assert!(!fields.seeking_talent);
    }

    #[test]
    fn write_to_encodes_genres() {
        let mut model = ActiveModel {
            ..Default::default()
        };
        draft().into_fields().unwrap().write_to(&mut model);
        assert_eq!(model.genres, Set("Jazz,Reggae".to_string()));
        assert!(model.id.is_not_set());
    }
}
