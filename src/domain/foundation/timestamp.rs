//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the later of this timestamp and `floor`.
    ///
    /// Used to keep a timeline non-decreasing when the wall clock steps back.
    pub fn not_before(self, floor: Timestamp) -> Self {
        self.max(floor)
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of milliseconds.
    pub fn plus_millis(&self, millis: i64) -> Self {
        Self(self.0 + Duration::milliseconds(millis))
    }

    /// Formats the time of day the way the chat surface shows it (`HH:MM:SS`).
    pub fn time_of_day(&self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn fixed(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn not_before_keeps_later_value() {
        let earlier = fixed("2024-01-15T10:30:00Z");
        let later = fixed("2024-01-15T10:30:05Z");

        assert_eq!(earlier.not_before(later), later);
        assert_eq!(later.not_before(earlier), later);
    }

    #[test]
    fn plus_millis_moves_forward() {
        let ts = fixed("2024-01-15T10:30:00Z");
        let moved = ts.plus_millis(1500);

        assert!(ts.is_before(&moved));
        assert_eq!(moved.duration_since(&ts), Duration::milliseconds(1500));
    }

    #[test]
    fn time_of_day_formats_clock_time() {
        let ts = fixed("2024-01-15T09:05:07Z");
        assert_eq!(ts.time_of_day(), "09:05:07");
    }

    #[test]
    fn timestamp_round_trips_through_json() {
        let ts = fixed("2024-01-15T10:30:00Z");
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));

        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_datetime().year(), 2024);
        assert_eq!(parsed, ts);
    }
}
