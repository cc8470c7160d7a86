//! App-level view behavior: status/category filters, cursor clamping, and
//! snapshot replacement.

use chrono_tz::Asia::Kolkata;
use serde_json::json;

use fancast_lib::app::{App, StatusFilter};
use fancast_lib::config::AppConfig;
use fancast_lib::parser::{normalize_feed, FeedSnapshot, MatchStatus};

fn snapshot_from(doc: serde_json::Value) -> FeedSnapshot {
    normalize_feed(&doc, Kolkata).unwrap()
}

fn app_with_feed(doc: serde_json::Value) -> App {
    let mut app = App::new(AppConfig::default(), true);
    app.apply_snapshot(snapshot_from(doc));
    app
}

#[test]
fn test_status_filter_narrows_visible() {
    let mut app = app_with_feed(json!({ "matches": [
        { "match_id": 1, "title": "L", "status": "LIVE" },
        { "match_id": 2, "title": "U", "status": "UPCOMING" },
        { "match_id": 3, "title": "C", "status": "COMPLETED" }
    ]}));

    assert_eq!(app.visible.len(), 2); // completed never displayed

    app.status_filter = StatusFilter::Live;
    app.rebuild_view();
    assert_eq!(app.visible.len(), 1);
    assert_eq!(app.visible[0].status, MatchStatus::Live);

    app.status_filter = StatusFilter::Upcoming;
    app.rebuild_view();
    assert_eq!(app.visible.len(), 1);
    assert_eq!(app.visible[0].status, MatchStatus::Upcoming);
}

#[test]
fn test_category_filter_narrows_visible() {
    let mut app = app_with_feed(json!({ "matches": [
        { "match_id": 1, "status": "LIVE", "event_category": "Cricket" },
        { "match_id": 2, "status": "UPCOMING", "event_category": "Football" }
    ]}));

    assert_eq!(app.categories, vec!["Cricket", "Football"]);
    assert!(app.active_category().is_none());

    app.next_category(); // "Cricket"
    assert_eq!(app.active_category(), Some("Cricket"));
    assert_eq!(app.visible.len(), 1);
    assert_eq!(app.visible[0].category.as_deref(), Some("Cricket"));

    app.previous_category(); // back to All
    assert!(app.active_category().is_none());
    assert_eq!(app.visible.len(), 2);
}

#[test]
fn test_cursor_clamps_when_view_shrinks() {
    let mut app = app_with_feed(json!({ "matches": [
        { "match_id": 1, "status": "UPCOMING" },
        { "match_id": 2, "status": "UPCOMING" },
        { "match_id": 3, "status": "LIVE" }
    ]}));

    app.next_match();
    app.next_match();
    assert_eq!(app.selected_match_index, 2);

    app.status_filter = StatusFilter::Live;
    app.rebuild_view();
    assert_eq!(app.visible.len(), 1);
    assert_eq!(app.selected_match_index, 0);
    assert!(app.selected_match().is_some());
}

#[test]
fn test_new_snapshot_replaces_previous_wholesale() {
    let mut app = app_with_feed(json!({ "matches": [
        { "match_id": 1, "status": "LIVE", "event_category": "Cricket" },
        { "match_id": 2, "status": "LIVE", "event_category": "Kabaddi" }
    ]}));
    assert_eq!(app.visible.len(), 2);

    app.apply_snapshot(snapshot_from(json!({ "matches": [
        { "match_id": 9, "status": "UPCOMING", "event_category": "Football" }
    ]})));

    assert_eq!(app.visible.len(), 1);
    assert_eq!(app.categories, vec!["Football"]);
    assert_eq!(app.selected_match_index, 0);
}

#[test]
fn test_navigation_on_empty_view_is_safe() {
    let mut app = app_with_feed(json!({ "matches": [
        { "match_id": 1, "status": "COMPLETED" }
    ]}));
    assert!(app.visible.is_empty());

    app.next_match();
    app.previous_match();
    assert!(app.selected_match().is_none());
}
