//! Shared checks used when turning raw drafts into validated field bundles.

use url::Url;

use super::genres::Genres;
use crate::error::ValidationFailure;

/// Trimmed value of a required text field.
pub(crate) fn required_text(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationFailure> {
    optional_text(value).ok_or(ValidationFailure::MissingField { field })
}

/// Trimmed value of an optional text field; blank input becomes `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Optional link that must be an absolute http(s) URL when present.
pub(crate) fn optional_url(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, ValidationFailure> {
    let Some(link) = optional_text(value) else {
        return Ok(None);
    };

    let parsed = Url::parse(&link).map_err(|err| ValidationFailure::InvalidField {
        field,
        message: err.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationFailure::InvalidField {
            field,
            message: format!("unsupported URL scheme '{}'", parsed.scheme()),
        });
    }

    Ok(Some(link))
}

pub(crate) fn required_genres(value: Option<Vec<String>>) -> Result<Genres, ValidationFailure> {
    let raw = value.ok_or(ValidationFailure::MissingField { field: "genres" })?;
    Genres::new(raw).map_err(|err| match err {
        super::genres::GenresError::Empty => ValidationFailure::MissingField { field: "genres" },
        other => ValidationFailure::InvalidField {
            field: "genres",
            message: other.to_string(),
        },
    })
}
