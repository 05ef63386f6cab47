//! Demo directory seeding
//!
//! Inserts a small directory of venues, artists and shows so a fresh
//! install has something to browse. Everything goes through the booking use
//! cases, so the demo rows obey the same validation as user input.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::booking::BookingService;
use crate::models::artist::ArtistDraft;
use crate::models::show::ShowDraft;
use crate::models::venue::VenueDraft;
use crate::repositories::VenueRepository;

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
}

impl SeedSummary {
    pub fn is_empty(&self) -> bool {
        self.venues == 0 && self.artists == 0 && self.shows == 0
    }
}

/// Seeds the demo directory when the store holds no venues yet.
///
/// Returns an empty summary when seeding was skipped.
pub async fn seed_directory<C>(db: &C) -> Result<SeedSummary>
where
    C: ConnectionTrait + TransactionTrait,
{
    let existing = VenueRepository::new(db)
        .list_recent(1)
        .await
        .context("failed to check for existing venues")?;
    if !existing.is_empty() {
        log::info!("Directory already has venues, skipping demo seed");
        return Ok(SeedSummary::default());
    }

    let service = BookingService::new(db);
    let mut summary = SeedSummary::default();

    let mut venue_ids = Vec::new();
    for draft in demo_venues() {
        let name = draft.name.clone().unwrap_or_default();
        let saved = service
            .create_venue(draft)
            .await
            .with_context(|| format!("failed to seed venue '{name}'"))?;
        log::info!("Seeded venue {} ({})", saved.name, saved.id);
        venue_ids.push(saved.id);
        summary.venues += 1;
    }

    let mut artist_ids = Vec::new();
    for draft in demo_artists() {
        let name = draft.name.clone().unwrap_or_default();
        let saved = service
            .create_artist(draft)
            .await
            .with_context(|| format!("failed to seed artist '{name}'"))?;
        log::info!("Seeded artist {} ({})", saved.name, saved.id);
        artist_ids.push(saved.id);
        summary.artists += 1;
    }

    for (venue, artist, start_time) in demo_show_slots() {
        let draft = ShowDraft {
            artist_id: artist_ids.get(artist).copied(),
            venue_id: venue_ids.get(venue).copied(),
            start_time: Some(start_time),
        };
        let booked = service
            .create_show(draft)
            .await
            .context("failed to seed show")?;
        log::info!("{}", booked.description);
        summary.shows += 1;
    }

    log::info!(
        "Demo directory seeded: {} venues, {} artists, {} shows",
        summary.venues,
        summary.artists,
        summary.shows
    );
    Ok(summary)
}

fn demo_venues() -> Vec<VenueDraft> {
    vec![
        VenueDraft {
            name: Some("The Musical Hop".to_string()),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            address: Some("1015 Folsom Street".to_string()),
            phone: Some("123-123-1234".to_string()),
            genres: Some(strings(&["Jazz", "Reggae", "Swing", "Classical", "Folk"])),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1543900694-133f37abaaa5".to_string()),
            website_link: Some("https://www.themusicalhop.com".to_string()),
            seeking_talent: Some(true),
            seeking_description: Some(
                "We are on the lookout for a local artist to play every two weeks. Please call us."
                    .to_string(),
            ),
        },
        VenueDraft {
            name: Some("The Dueling Pianos Bar".to_string()),
            city: Some("New York".to_string()),
            state: Some("NY".to_string()),
            address: Some("335 Delancey Street".to_string()),
            phone: Some("914-003-1132".to_string()),
            genres: Some(strings(&["Classical", "R&B", "Hip-Hop"])),
            facebook_link: Some("https://www.facebook.com/theduelingpianos".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1497032205916-ac775f0649ae".to_string()),
            website_link: Some("https://www.theduelingpianos.com".to_string()),
            seeking_talent: Some(false),
            seeking_description: Some("Not booking new acts at the moment.".to_string()),
        },
        VenueDraft {
            name: Some("Park Square Live Music & Coffee".to_string()),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            address: Some("34 Whiskey Moore Ave".to_string()),
            phone: Some("415-000-1234".to_string()),
            genres: Some(strings(&["Rock n Roll", "Jazz", "Classical", "Folk"])),
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1485686531765-ba63b07845a7".to_string()),
            website_link: Some("https://www.parksquarelivemusicandcoffee.com".to_string()),
            seeking_talent: Some(false),
            seeking_description: Some("Fully booked for the season.".to_string()),
        },
    ]
}

fn demo_artists() -> Vec<ArtistDraft> {
    vec![
        ArtistDraft {
            name: Some("Guns N Petals".to_string()),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            phone: Some("326-123-5000".to_string()),
            genres: Some(strings(&["Rock n Roll"])),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1549213783-8284d0336c4f".to_string()),
            website_link: Some("https://www.gunsnpetalsband.com".to_string()),
            seeking_venue: Some(true),
            seeking_description: Some(
                "Looking for shows to perform at in the San Francisco Bay Area!".to_string(),
            ),
            available_start_time: None,
            available_end_time: None,
        },
        ArtistDraft {
            name: Some("Matt Quevedo".to_string()),
            city: Some("New York".to_string()),
            state: Some("NY".to_string()),
            phone: Some("300-400-5000".to_string()),
            genres: Some(strings(&["Jazz"])),
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1495223153807-b916f75de8c5".to_string()),
            website_link: None,
            seeking_venue: Some(false),
            seeking_description: Some("Not looking for venues right now.".to_string()),
            available_start_time: None,
            available_end_time: None,
        },
        ArtistDraft {
            name: Some("The Wild Sax Band".to_string()),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            phone: Some("432-325-5432".to_string()),
            genres: Some(strings(&["Jazz", "Classical"])),
            facebook_link: None,
            image_link: Some("https://images.unsplash.com/photo-1558369981-f9ca78462e61".to_string()),
            website_link: None,
            seeking_venue: Some(false),
            seeking_description: Some("Touring through April 2035.".to_string()),
            available_start_time: Some(utc(2035, 1, 1, 0, 0)),
            available_end_time: Some(utc(2035, 12, 31, 23, 59)),
        },
    ]
}

/// `(venue index, artist index, start time)` into the demo lists above.
fn demo_show_slots() -> Vec<(usize, usize, DateTime<Utc>)> {
    vec![
        (0, 0, utc(2019, 5, 21, 21, 30)),
        (2, 1, utc(2019, 6, 15, 23, 0)),
        (2, 2, utc(2035, 4, 1, 20, 0)),
        (2, 2, utc(2035, 4, 8, 20, 0)),
        (2, 2, utc(2035, 4, 15, 20, 0)),
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}
