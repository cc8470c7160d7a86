use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Wire format of the feed's start-time strings, e.g. "11:00:00 PM 21-10-2025".
/// 12-hour clock with seconds, AM/PM marker, then day-month-year.
pub const FEED_TIME_FORMAT: &str = "%I:%M:%S %p %d-%m-%Y";

/// A match start time. The feed frequently omits the field or ships strings
/// that don't parse; those become `Unknown` rather than a magic epoch value,
/// so "time TBA" can never be confused with a real instant.
///
/// Ordering: `Unknown` sorts before any known time, then known times sort
/// chronologically. Canonical unit is milliseconds since the Unix epoch,
/// converted here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StartTime {
    Unknown,
    At(i64),
}

impl Default for StartTime {
    fn default() -> Self {
        StartTime::Unknown
    }
}

impl StartTime {
    pub fn is_known(&self) -> bool {
        matches!(self, StartTime::At(_))
    }

    /// Epoch milliseconds, with `0` standing in for `Unknown` at edges that
    /// need a plain number. Callers must not treat that `0` as an instant.
    pub fn epoch_ms(&self) -> i64 {
        match self {
            StartTime::At(ms) => *ms,
            StartTime::Unknown => 0,
        }
    }

    /// Renders the time in the given zone, e.g. "October 21, 2025, 11:00 PM".
    /// `None` for `Unknown`.
    pub fn format_in(&self, tz: Tz) -> Option<String> {
        match self {
            StartTime::At(ms) => {
                let dt = Utc.timestamp_millis_opt(*ms).single()?;
                Some(
                    dt.with_timezone(&tz)
                        .format("%B %-d, %Y, %-I:%M %p")
                        .to_string(),
                )
            }
            StartTime::Unknown => None,
        }
    }
}

/// Parses a feed start-time string, interpreting the naive wall-clock value
/// in `tz` (the feed publishes local times with no offset).
///
/// Deliberately lossy: empty input, garbage, wrong field order, or an
/// impossible date all yield `Unknown`. This function never fails.
pub fn parse_start_time(raw: &str, tz: Tz) -> StartTime {
    let raw = raw.trim();
    if raw.is_empty() {
        return StartTime::Unknown;
    }

    let naive = match NaiveDateTime::parse_from_str(raw, FEED_TIME_FORMAT) {
        Ok(dt) => dt,
        Err(_) => return StartTime::Unknown,
    };

    // Ambiguous or skipped local times (DST folds) resolve to the earlier
    // instant; a nonexistent local time yields Unknown.
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => StartTime::At(dt.timestamp_millis()),
        None => StartTime::Unknown,
    }
}
