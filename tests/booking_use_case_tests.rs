//! Integration tests for the booking use cases against a migrated in-memory
//! SQLite database.

mod test_utils;

use booking::booking::BookingService;
use booking::error::{BookingError, OutcomeKind, PersistenceFailure, ValidationFailure};
use booking::models::show::ShowDraft;
use booking::repositories::{ArtistRepository, ShowRepository};
use test_utils::{artist_draft, execute_raw, setup_test_db, utc, venue_draft};

#[tokio::test]
async fn end_before_start_is_rejected_and_nothing_is_stored() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    let mut draft = artist_draft("Guns N Petals");
    draft.available_start_time = Some(utc(2035, 2, 1, 0, 0));
    draft.available_end_time = Some(utc(2035, 1, 1, 0, 0));

    let err = service.create_artist(draft).await.unwrap_err();

    assert_eq!(
        err,
        BookingError::Validation(ValidationFailure::BadAvailabilityFormat)
    );
    assert_eq!(err.kind(), OutcomeKind::ValidationFailed);
    assert!(ArtistRepository::new(&db).list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn end_without_start_is_rejected() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    let mut draft = artist_draft("Matt Quevedo");
    draft.available_end_time = Some(utc(2035, 1, 1, 0, 0));

    let err = service.create_artist(draft).await.unwrap_err();
    assert_eq!(
        err,
        BookingError::Validation(ValidationFailure::BadAvailabilityFormat)
    );
}

#[tokio::test]
async fn missing_required_field_is_reported_by_name() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    let mut draft = venue_draft("The Musical Hop", "San Francisco", "CA");
    draft.city = Some("   ".to_string());

    let err = service.create_venue(draft).await.unwrap_err();
    assert_eq!(
        err,
        BookingError::Validation(ValidationFailure::MissingField { field: "city" })
    );
}

#[tokio::test]
async fn venue_search_is_case_insensitive_substring() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    for (name, city, state) in [
        ("The Musical Hop", "San Francisco", "CA"),
        ("Park Square Live Music & Coffee", "San Francisco", "CA"),
        ("The Dueling Pianos Bar", "New York", "NY"),
    ] {
        service
            .create_venue(venue_draft(name, city, state))
            .await
            .unwrap();
    }

    let hop = service.search_venues("Hop").await.unwrap();
    assert_eq!(hop.count, 1);
    assert_eq!(hop.data[0].name, "The Musical Hop");

    let music = service.search_venues("Music").await.unwrap();
    let mut names: Vec<_> = music.data.iter().map(|item| item.name.as_str()).collect();
    names.sort();
    assert_eq!(music.count, 2);
    assert_eq!(
        names,
        vec!["Park Square Live Music & Coffee", "The Musical Hop"]
    );

    let by_state = service.search_venues("ny").await.unwrap();
    assert_eq!(by_state.count, 1);
    assert_eq!(by_state.data[0].name, "The Dueling Pianos Bar");
}

#[tokio::test]
async fn search_folds_case_of_non_ascii_names() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    service
        .create_venue(venue_draft("ÉCOLE DE MUSIQUE", "Montréal", "QC"))
        .await
        .unwrap();
    service
        .create_venue(venue_draft("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let mut draft = artist_draft("ÅSA");
    draft.city = Some("Oslo".to_string());
    service.create_artist(draft).await.unwrap();

    for term in ["ÉCOLE", "école", "École de", "MONTRÉAL"] {
        let results = service.search_venues(term).await.unwrap();
        assert_eq!(results.count, 1, "venue search for {term:?}");
        assert_eq!(results.data[0].name, "ÉCOLE DE MUSIQUE");
    }

    for term in ["ÅSA", "åsa", "Ås"] {
        let results = service.search_artists(term).await.unwrap();
        assert_eq!(results.count, 1, "artist search for {term:?}");
        assert_eq!(results.data[0].name, "ÅSA");
    }
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);
    service
        .create_venue(venue_draft("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();

    let results = service.search_venues("%").await.unwrap();
    assert_eq!(results.count, 0);
    assert!(results.data.is_empty());
}

#[tokio::test]
async fn listing_counts_all_shows_but_search_counts_upcoming_only() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    let venue = service
        .create_venue(venue_draft("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist = service
        .create_artist(artist_draft("Guns N Petals"))
        .await
        .unwrap();

    for start_time in [utc(2019, 5, 21, 21, 30), utc(2035, 4, 1, 20, 0)] {
        service
            .create_show(ShowDraft {
                artist_id: Some(artist.id),
                venue_id: Some(venue.id),
                start_time: Some(start_time),
            })
            .await
            .unwrap();
    }

    let areas = service.list_venues_grouped().await.unwrap();
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].venues[0].num_upcoming_shows, 2);

    let search = service.search_venues("hop").await.unwrap();
    assert_eq!(search.data[0].num_upcoming_shows, 1);

    let artist_search = service.search_artists("petals").await.unwrap();
    assert_eq!(artist_search.data[0].num_upcoming_shows, 1);
}

#[tokio::test]
async fn venues_are_grouped_by_area_in_first_seen_order() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    service
        .create_venue(venue_draft("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    service
        .create_venue(venue_draft("The Dueling Pianos Bar", "New York", "NY"))
        .await
        .unwrap();
    service
        .create_venue(venue_draft("Park Square", "San Francisco", "CA"))
        .await
        .unwrap();

    let areas = service.list_venues_grouped().await.unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0].city, "San Francisco");
    assert_eq!(areas[0].venues.len(), 2);
    assert_eq!(areas[1].state, "NY");
    assert_eq!(areas[1].venues[0].num_upcoming_shows, 0);
}

#[tokio::test]
async fn venue_detail_round_trips_fields_and_splits_shows() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    let venue = service
        .create_venue(venue_draft("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist = service
        .create_artist(artist_draft("Guns N Petals"))
        .await
        .unwrap();
    service
        .create_show(ShowDraft {
            artist_id: Some(artist.id),
            venue_id: Some(venue.id),
            start_time: Some(utc(2019, 5, 21, 21, 30)),
        })
        .await
        .unwrap();

    let detail = service.get_venue_detail(venue.id).await.unwrap();
    assert_eq!(detail.id, venue.id);
    assert_eq!(detail.name, "The Musical Hop");
    assert_eq!(detail.genres, vec!["Jazz", "Folk"]);
    assert_eq!(detail.address, "1015 Folsom Street");
    assert_eq!(detail.city, "San Francisco");
    assert_eq!(detail.state, "CA");
    assert_eq!(detail.phone.as_deref(), Some("123-123-1234"));
    assert_eq!(
        detail.website_link.as_deref(),
        Some("https://www.example.com/venue")
    );
    assert_eq!(
        detail.facebook_link.as_deref(),
        Some("https://www.facebook.com/venue")
    );
    assert!(detail.seeking_talent);
    assert_eq!(detail.seeking_description, "Looking for local acts");
    assert_eq!(
        detail.image_link.as_deref(),
        Some("https://example.com/venue.png")
    );
    assert_eq!(detail.past_shows_count, 1);
    assert_eq!(detail.upcoming_shows_count, 0);
    assert_eq!(detail.past_shows.len(), 1);
    assert_eq!(detail.past_shows[0].artist_id, artist.id);
    assert_eq!(detail.past_shows[0].artist_name.as_deref(), Some("Guns N Petals"));
    assert_eq!(
        detail.past_shows[0].artist_image_link.as_deref(),
        Some("https://example.com/artist.png")
    );
    assert_eq!(detail.past_shows[0].start_time, utc(2019, 5, 21, 21, 30));
    assert!(detail.upcoming_shows.is_empty());
}

#[tokio::test]
async fn update_replaces_every_field() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    let artist = service
        .create_artist(artist_draft("Guns N Petals"))
        .await
        .unwrap();

    let mut replacement = artist_draft("Guns N Roses");
    replacement.genres = Some(vec!["Hard Rock".to_string()]);
    replacement.image_link = None;
    replacement.available_start_time = Some(utc(2035, 1, 1, 0, 0));

    let saved = service.update_artist(artist.id, replacement).await.unwrap();
    assert_eq!(saved.id, artist.id);
    assert_eq!(saved.name, "Guns N Roses");

    let detail = service.get_artist_detail(artist.id).await.unwrap();
    assert_eq!(detail.genres, vec!["Hard Rock"]);
    assert!(detail.image_link.is_none());
    assert_eq!(detail.available_start_time, Some(utc(2035, 1, 1, 0, 0)));
    assert!(detail.available_end_time.is_none());
}

#[tokio::test]
async fn update_or_delete_of_missing_rows_is_not_found() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    let err = service
        .update_venue(42, venue_draft("Ghost", "Nowhere", "NA"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        BookingError::Persistence(PersistenceFailure::not_found("venue", 42))
    );
    assert_eq!(err.kind(), OutcomeKind::PersistenceFailed);

    let err = service.delete_venue(42).await.unwrap_err();
    assert_eq!(
        err,
        BookingError::Persistence(PersistenceFailure::not_found("venue", 42))
    );
    assert_eq!(err.kind(), OutcomeKind::PersistenceFailed);

    let err = service.delete_artist(7).await.unwrap_err();
    assert_eq!(
        err,
        BookingError::Persistence(PersistenceFailure::not_found("artist", 7))
    );

    let err = service.get_artist_detail(7).await.unwrap_err();
    assert_eq!(err.kind(), OutcomeKind::PersistenceFailed);
}

#[tokio::test]
async fn deleting_a_venue_keeps_its_shows() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    let venue = service
        .create_venue(venue_draft("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist = service
        .create_artist(artist_draft("Guns N Petals"))
        .await
        .unwrap();
    service
        .create_show(ShowDraft {
            artist_id: Some(artist.id),
            venue_id: Some(venue.id),
            start_time: Some(utc(2035, 4, 1, 20, 0)),
        })
        .await
        .unwrap();

    let deleted = service.delete_venue(venue.id).await.unwrap();
    assert_eq!(deleted.name, "The Musical Hop");

    assert_eq!(ShowRepository::new(&db).list_all().await.unwrap().len(), 1);

    let shows = service.list_shows().await.unwrap();
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0].venue_id, venue.id);
    assert!(shows[0].venue_name.is_none());
    assert_eq!(shows[0].artist_name.as_deref(), Some("Guns N Petals"));

    let detail = service.get_artist_detail(artist.id).await.unwrap();
    assert_eq!(detail.upcoming_shows_count, 1);
    assert!(detail.upcoming_shows[0].venue_name.is_none());
}

#[tokio::test]
async fn show_without_artist_window_is_booked() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    let venue = service
        .create_venue(venue_draft("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist = service
        .create_artist(artist_draft("Guns N Petals"))
        .await
        .unwrap();

    let booked = service
        .create_show(ShowDraft {
            artist_id: Some(artist.id),
            venue_id: Some(venue.id),
            start_time: Some(utc(2019, 5, 21, 21, 30)),
        })
        .await
        .unwrap();

    assert_eq!(
        booked.description,
        "Show for artist Guns N Petals at venue The Musical Hop on 2019-05-21 21:30:00"
    );
}

#[tokio::test]
async fn show_outside_artist_window_is_rejected() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    let venue = service
        .create_venue(venue_draft("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let mut draft = artist_draft("The Wild Sax Band");
    draft.available_start_time = Some(utc(2035, 1, 1, 0, 0));
    draft.available_end_time = Some(utc(2035, 1, 31, 0, 0));
    let artist = service.create_artist(draft).await.unwrap();

    let err = service
        .create_show(ShowDraft {
            artist_id: Some(artist.id),
            venue_id: Some(venue.id),
            start_time: Some(utc(2035, 2, 1, 0, 0)),
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        BookingError::Validation(ValidationFailure::ShowOutsideAvailability)
    );

    // Bounds are inclusive.
    service
        .create_show(ShowDraft {
            artist_id: Some(artist.id),
            venue_id: Some(venue.id),
            start_time: Some(utc(2035, 1, 31, 0, 0)),
        })
        .await
        .unwrap();

    assert_eq!(ShowRepository::new(&db).list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn show_for_unknown_venue_is_not_found() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);
    let artist = service
        .create_artist(artist_draft("Guns N Petals"))
        .await
        .unwrap();

    let err = service
        .create_show(ShowDraft {
            artist_id: Some(artist.id),
            venue_id: Some(99),
            start_time: Some(utc(2035, 1, 1, 0, 0)),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BookingError::Persistence(PersistenceFailure::not_found("venue", 99))
    );
}

#[tokio::test]
async fn storage_failure_is_reported_as_persistence_failed() {
    let db = setup_test_db().await.unwrap();
    execute_raw(&db, "DROP TABLE venues").await.unwrap();
    let service = BookingService::new(&db);

    let err = service
        .create_venue(venue_draft("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), OutcomeKind::PersistenceFailed);
    assert!(matches!(
        err,
        BookingError::Persistence(PersistenceFailure::Storage { .. })
    ));
}

#[tokio::test]
async fn recent_listings_are_newest_first() {
    let db = setup_test_db().await.unwrap();
    let service = BookingService::new(&db);

    for index in 0..12 {
        service
            .create_artist(artist_draft(&format!("Artist {index}")))
            .await
            .unwrap();
    }
    service
        .create_venue(venue_draft("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();

    let recent = service.recent_listings().await.unwrap();
    assert_eq!(recent.artists.len(), 10);
    assert_eq!(recent.artists[0].name, "Artist 11");
    assert_eq!(recent.venues.len(), 1);
}
