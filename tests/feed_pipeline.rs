//! End-to-end pipeline over a realistic feed document:
//! normalize → select/sort → facet → playback URL.

use chrono_tz::Asia::Kolkata;
use serde_json::json;

use fancast_lib::config::CategoryScope;
use fancast_lib::parser::{normalize_feed, MatchStatus};
use fancast_lib::preprocessing::{category_facet, select_matches};
use fancast_lib::session::{resolve_stream_url, PlaybackSession};

fn sample_feed() -> serde_json::Value {
    json!({
        "matches": [
            {
                "match_id": 67132,
                "title": "India vs Australia",
                "status": "LIVE",
                "startTime": "07:30:00 PM 21-10-2025",
                "src": "https://images.fancode.com/67132.jpg",
                "event_category": "Cricket",
                "event_name": "Border-Gavaskar Trophy",
                "team_1": "India",
                "team_2": "Australia",
                "dai_url": "https://dai.google.com/linear/hls/event/abc/master.m3u8",
                "adfree_url": "https://in-mc-fdlive.fancode.com/mumbai/67132/index.m3u8"
            },
            {
                "id": "67140",
                "title": "Jaipur Pink Panthers vs Patna Pirates",
                "status": "UPCOMING",
                "startTime": "09:00:00 PM 21-10-2025",
                "event_name": "Pro Kabaddi League",
                "team_1": "Jaipur Pink Panthers",
                "team_2": "Patna Pirates"
            },
            {
                "match_id": 67099,
                "title": "Finished Final",
                "status": "COMPLETED",
                "startTime": "03:00:00 PM 20-10-2025",
                "event_category": "Football"
            },
            {
                "match_id": 67150,
                "title": "TBA Fixture",
                "status": "UPCOMING",
                "event_category": "Cricket"
            }
        ],
        "meta": { "last_updated_at": "2025-10-21T12:00:00+00:00" }
    })
}

#[test]
fn test_pipeline_selects_and_orders() {
    let snapshot = normalize_feed(&sample_feed(), Kolkata).unwrap();
    assert_eq!(snapshot.matches.len(), 4);

    let selected = select_matches(&snapshot.matches);

    // COMPLETED is gone; LIVE leads; unknown-time UPCOMING precedes the
    // dated one inside its status group
    let titles: Vec<&str> = selected.iter().map(|m| m.display_title()).collect();
    assert_eq!(
        titles,
        vec![
            "India vs Australia",
            "TBA Fixture",
            "Jaipur Pink Panthers vs Patna Pirates"
        ]
    );
    assert!(selected.iter().all(|m| m.status.is_actionable()));
}

#[test]
fn test_pipeline_facet_scope() {
    let snapshot = normalize_feed(&sample_feed(), Kolkata).unwrap();

    // Full set sees the completed Football match's category too
    let full = category_facet(&snapshot.matches, CategoryScope::FullSet);
    assert_eq!(full, vec!["Cricket", "Football", "Pro Kabaddi League"]);

    // Displayed-only drops it
    let displayed = category_facet(&snapshot.matches, CategoryScope::Displayed);
    assert_eq!(displayed, vec!["Cricket", "Pro Kabaddi League"]);
}

#[test]
fn test_pipeline_playback_url() {
    let snapshot = normalize_feed(&sample_feed(), Kolkata).unwrap();
    let selected = select_matches(&snapshot.matches);

    let mut session = PlaybackSession::new();
    session.select(selected[0].clone());

    // Ad-free URL wins and gets the regional host rewrite
    assert_eq!(
        session.current_stream_url(),
        "https://bd-mc-fdlive.fancode.com/mumbai/67132/index.m3u8"
    );

    // The upcoming matches carry no stream at all
    assert_eq!(resolve_stream_url(&selected[1]), "");
}

#[test]
fn test_pipeline_meta_and_times() {
    let snapshot = normalize_feed(&sample_feed(), Kolkata).unwrap();
    assert_eq!(
        snapshot.last_updated_at.to_rfc3339(),
        "2025-10-21T12:00:00+00:00"
    );

    let live = &snapshot.matches[0];
    assert_eq!(live.status, MatchStatus::Live);
    assert_eq!(
        live.start_time.format_in(Kolkata).unwrap(),
        "October 21, 2025, 7:30 PM"
    );

    // Unknown start time never masquerades as an instant
    let tba = &snapshot.matches[3];
    assert!(!tba.start_time.is_known());
    assert_eq!(tba.start_time.epoch_ms(), 0);
}
