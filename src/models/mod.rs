//! # Data Models
//!
//! SeaORM entities for venues, artists and shows, the validated input types
//! built from client drafts, and shared response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod artist;
mod fields;
pub mod genres;
pub mod show;
pub mod venue;

pub use artist::Entity as Artist;
pub use show::Entity as Show;
pub use venue::Entity as Venue;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "booking-directory".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
