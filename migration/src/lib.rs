//! Database migrations for the booking directory.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2024_06_01_000001_create_venues;
mod m2024_06_01_000002_create_artists;
mod m2024_06_01_000003_create_shows;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2024_06_01_000001_create_venues::Migration),
            Box::new(m2024_06_01_000002_create_artists::Migration),
            Box::new(m2024_06_01_000003_create_shows::Migration),
        ]
    }
}
