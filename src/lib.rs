//! # Booking Directory Library
//!
//! Venues, artists and the shows that link them: entity models, availability
//! rules, repositories, booking use cases and the JSON API around them.

pub mod availability;
pub mod booking;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod seeds;
pub mod server;
pub mod telemetry;
pub use migration;
