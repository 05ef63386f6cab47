//! Genre list value type.
//!
//! Venues and artists store their genres in a single text column. This module
//! is the only place that joins or splits that column.

use thiserror::Error;

/// Separator used in the stored `genres` column.
pub const GENRE_DELIMITER: &str = ",";

/// Errors produced while building a [`Genres`] list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenresError {
    #[error("at least one genre is required")]
    Empty,
    #[error("genre '{0}' must not contain a comma")]
    ContainsDelimiter(String),
}

/// Non-empty, ordered list of distinct, non-blank genre names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genres(Vec<String>);

impl Genres {
    /// Builds a genre list, trimming entries, skipping blank ones and dropping
    /// repeats (first occurrence wins).
    pub fn new<I, S>(genres: I) -> Result<Self, GenresError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collected: Vec<String> = Vec::new();

        for genre in genres {
            let genre = genre.as_ref().trim();
            if genre.is_empty() {
                continue;
            }
            if genre.contains(GENRE_DELIMITER) {
                return Err(GenresError::ContainsDelimiter(genre.to_string()));
            }
            if !collected.iter().any(|existing| existing == genre) {
                collected.push(genre.to_string());
            }
        }

        if collected.is_empty() {
            return Err(GenresError::Empty);
        }

        Ok(Self(collected))
    }

    /// Decodes the stored column value.
    pub fn from_column(raw: &str) -> Result<Self, GenresError> {
        Self::new(raw.split(GENRE_DELIMITER))
    }

    /// Encodes the list for storage.
    pub fn to_column(&self) -> String {
        self.0.join(GENRE_DELIMITER)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
