//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM operations
//! for the venue, artist and show tables. Every repository borrows a connection that
//! implements [`ConnectionTrait`](sea_orm::ConnectionTrait), so the same code runs
//! against the pool or inside an open transaction.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition, DbBackend, IntoSimpleExpr};

use crate::error::RepositoryError;

pub mod artist;
pub mod show;
pub mod venue;

pub use artist::ArtistRepository;
pub use show::{ArtistShowEntry, ShowListing, ShowRepository, VenueShowEntry};
pub use venue::VenueRepository;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// A search match together with its count of upcoming shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<M> {
    pub row: M,
    pub num_upcoming_shows: u64,
}

/// Anything with a show start time.
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

/// Shows partitioned around a reference time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowSplit<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> ShowSplit<T> {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

/// Splits shows into past (`start_time < reference`) and upcoming
/// (`start_time >= reference`), keeping their relative order.
pub fn split_past_and_upcoming<T, I>(shows: I, reference: DateTime<Utc>) -> ShowSplit<T>
where
    T: Scheduled,
    I: IntoIterator<Item = T>,
{
    let (past, upcoming) = shows
        .into_iter()
        .partition(|show| show.start_time() < reference);
    ShowSplit { past, upcoming }
}

/// SQL pre-filter for a case-insensitive substring search over `columns`.
///
/// SQLite's `LOWER()` only folds ASCII, so on SQLite no condition is added
/// and [`matches_folded`] alone decides. Elsewhere this is an OR of
/// `LOWER(col) LIKE %term%` with LIKE wildcards in `term` matched literally.
pub(crate) fn substring_match<C, I>(backend: DbBackend, term: &str, columns: I) -> Condition
where
    C: ColumnTrait,
    I: IntoIterator<Item = C>,
{
    if backend == DbBackend::Sqlite {
        return Condition::all();
    }

    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    columns.into_iter().fold(Condition::any(), |condition, column| {
        condition.add(
            Expr::expr(Func::lower(column.into_simple_expr()))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
    })
}

/// Whether any of `fields` contains `term`, compared with Unicode lowercase.
pub(crate) fn matches_folded(term: &str, fields: &[&str]) -> bool {
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
