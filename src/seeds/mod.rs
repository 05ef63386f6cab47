//! Database seeding functionality
//!
//! This module fills an empty store with a demo directory of venues,
//! artists and shows.

pub mod directory;

pub use directory::{SeedSummary, seed_directory};
