//! Feed normalization: turns whichever raw shape the upstream sent into one
//! canonical, immutable `Match` set. A bad record is skipped or defaulted,
//! never fatal for the batch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::warn;
use serde_json::Value;

use crate::api::RawMatch;
use crate::errors::FeedError;
use crate::flex_id::FlexId;
use crate::start_time::{parse_start_time, StartTime};

/// Shown when the feed omits a thumbnail.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=Match";

/// Match status as a closed set plus an escape hatch. Unrecognized upstream
/// tags are carried through `Other` so they can be displayed/debugged, but
/// they are never actionable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStatus {
    Live,
    Upcoming,
    Completed,
    Other(String),
}

impl MatchStatus {
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "LIVE" => MatchStatus::Live,
            "UPCOMING" => MatchStatus::Upcoming,
            "COMPLETED" => MatchStatus::Completed,
            other => MatchStatus::Other(other.to_string()),
        }
    }

    /// Live and upcoming matches are the displayed set; completed and
    /// unknown tags are dropped from it.
    pub fn is_actionable(&self) -> bool {
        matches!(self, MatchStatus::Live | MatchStatus::Upcoming)
    }

    pub fn as_str(&self) -> &str {
        match self {
            MatchStatus::Live => "LIVE",
            MatchStatus::Upcoming => "UPCOMING",
            MatchStatus::Completed => "COMPLETED",
            MatchStatus::Other(s) => s,
        }
    }
}

/// Canonical match record. Never mutated after normalization; every fetch
/// builds a fresh snapshot and the old one is dropped wholesale.
#[derive(Debug, Clone)]
pub struct Match {
    pub id: FlexId,
    pub title: String,
    pub match_name: String,
    pub event_name: String,
    pub status: MatchStatus,
    /// Original upstream time string, kept for display fallbacks
    pub start_time_raw: String,
    pub start_time: StartTime,
    /// Grouping label for the category facet; `None` when the feed had
    /// neither an explicit category nor an event name
    pub category: Option<String>,
    pub image_url: String,
    pub team_a: String,
    pub team_b: String,
    pub dai_url: Option<String>,
    pub adfree_url: Option<String>,
}

impl Match {
    /// First non-empty of title / match name / event name. The feed
    /// guarantees none of them individually.
    pub fn display_title(&self) -> &str {
        if !self.title.is_empty() {
            &self.title
        } else if !self.match_name.is_empty() {
            &self.match_name
        } else if !self.event_name.is_empty() {
            &self.event_name
        } else {
            "Untitled match"
        }
    }

    pub fn has_teams(&self) -> bool {
        !self.team_a.is_empty() && !self.team_b.is_empty()
    }
}

/// One normalized fetch result.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub matches: Vec<Arc<Match>>,
    pub last_updated_at: DateTime<Utc>,
}

/// Detects which raw shape the feed sent and returns its match array.
/// Supported variants: `{ "matches": [...], "meta": {...} }` and a bare
/// `[...]` at the top level.
fn match_array(value: &Value) -> Option<&Vec<Value>> {
    if let Some(arr) = value.get("matches").and_then(Value::as_array) {
        return Some(arr);
    }
    value.as_array()
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

/// Normalizes a raw feed document into a `FeedSnapshot`.
///
/// Per-record policy: a record that is not a JSON object is skipped with a
/// warning; a record missing fields gets safe defaults (empty teams,
/// placeholder image, synthesized id from its position). Missing
/// `meta.last_updated_at` synthesizes "now" instead of failing.
pub fn normalize_feed(value: &Value, feed_tz: Tz) -> Result<FeedSnapshot, FeedError> {
    let arr = match_array(value).ok_or(FeedError::UnrecognizedShape)?;

    let mut matches = Vec::with_capacity(arr.len());
    for (index, item) in arr.iter().enumerate() {
        let raw: RawMatch = match serde_json::from_value(item.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping unreadable feed record #{}: {}", index, e);
                continue;
            }
        };
        matches.push(Arc::new(normalize_match(raw, index, feed_tz)));
    }

    let last_updated_at = value
        .get("meta")
        .and_then(|m| m.get("last_updated_at"))
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Ok(FeedSnapshot {
        matches,
        last_updated_at,
    })
}

fn normalize_match(raw: RawMatch, index: usize, feed_tz: Tz) -> Match {
    let id = if raw.match_id.is_null() {
        FlexId::fallback(index)
    } else {
        raw.match_id
    };

    let event_name = raw.event_name.unwrap_or_default();

    // Explicit grouping field when present, otherwise synthesize the tour
    // label from the event name.
    let category = non_empty(raw.event_category).or_else(|| non_empty(Some(event_name.clone())));

    let start_time = parse_start_time(&raw.start_time, feed_tz);

    Match {
        id,
        title: raw.title,
        match_name: raw.match_name.unwrap_or_default(),
        event_name,
        status: MatchStatus::from_raw(&raw.status),
        start_time_raw: raw.start_time,
        start_time,
        category,
        image_url: non_empty(raw.src).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        team_a: raw.team_1.unwrap_or_default(),
        team_b: raw.team_2.unwrap_or_default(),
        dai_url: non_empty(raw.dai_url),
        adfree_url: non_empty(raw.adfree_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Kolkata;
    use serde_json::json;

    #[test]
    fn test_keyed_shape() {
        let doc = json!({
            "matches": [
                { "match_id": 1, "title": "A vs B", "status": "LIVE" }
            ],
            "meta": { "last_updated_at": "2025-10-21T17:30:00+00:00" }
        });
        let snap = normalize_feed(&doc, Kolkata).unwrap();
        assert_eq!(snap.matches.len(), 1);
        assert_eq!(snap.matches[0].status, MatchStatus::Live);
        assert_eq!(snap.last_updated_at.to_rfc3339(), "2025-10-21T17:30:00+00:00");
    }

    #[test]
    fn test_bare_array_shape() {
        let doc = json!([
            { "id": "99", "title": "C vs D", "status": "UPCOMING" }
        ]);
        let snap = normalize_feed(&doc, Kolkata).unwrap();
        assert_eq!(snap.matches.len(), 1);
        assert_eq!(snap.matches[0].id, FlexId::Number(99));
    }

    #[test]
    fn test_unrecognized_shape() {
        let doc = json!({ "events": [] });
        assert!(matches!(
            normalize_feed(&doc, Kolkata),
            Err(FeedError::UnrecognizedShape)
        ));
    }

    #[test]
    fn test_missing_meta_synthesizes_now() {
        let before = Utc::now();
        let snap = normalize_feed(&json!({ "matches": [] }), Kolkata).unwrap();
        assert!(snap.last_updated_at >= before);
        assert!(snap.last_updated_at <= Utc::now());
    }

    #[test]
    fn test_record_defaults() {
        let doc = json!({ "matches": [ {} ] });
        let snap = normalize_feed(&doc, Kolkata).unwrap();
        let m = &snap.matches[0];
        assert_eq!(m.id, FlexId::fallback(0));
        assert_eq!(m.status, MatchStatus::Other(String::new()));
        assert_eq!(m.start_time, crate::start_time::StartTime::Unknown);
        assert_eq!(m.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(m.team_a, "");
        assert!(m.category.is_none());
        assert_eq!(m.display_title(), "Untitled match");
    }

    #[test]
    fn test_bad_record_does_not_abort_batch() {
        let doc = json!({ "matches": [
            "not-an-object",
            { "match_id": 2, "title": "Kept", "status": "LIVE" }
        ]});
        let snap = normalize_feed(&doc, Kolkata).unwrap();
        assert_eq!(snap.matches.len(), 1);
        assert_eq!(snap.matches[0].title, "Kept");
    }

    #[test]
    fn test_category_synthesized_from_event_name() {
        let doc = json!({ "matches": [
            { "match_id": 1, "status": "LIVE", "event_name": "Pro Kabaddi League" },
            { "match_id": 2, "status": "LIVE", "event_category": "Cricket", "event_name": "Asia Cup" }
        ]});
        let snap = normalize_feed(&doc, Kolkata).unwrap();
        assert_eq!(snap.matches[0].category.as_deref(), Some("Pro Kabaddi League"));
        assert_eq!(snap.matches[1].category.as_deref(), Some("Cricket"));
    }

    #[test]
    fn test_empty_urls_become_none() {
        let doc = json!({ "matches": [
            { "match_id": 1, "status": "LIVE", "dai_url": "", "adfree_url": "  " }
        ]});
        let snap = normalize_feed(&doc, Kolkata).unwrap();
        assert!(snap.matches[0].dai_url.is_none());
        assert!(snap.matches[0].adfree_url.is_none());
    }

    #[test]
    fn test_unknown_status_carried_but_not_actionable() {
        let status = MatchStatus::from_raw("POSTPONED");
        assert_eq!(status, MatchStatus::Other("POSTPONED".to_string()));
        assert!(!status.is_actionable());
        assert_eq!(status.as_str(), "POSTPONED");
    }
}
