//! Block timestamp type.
//!
//! Explorer feeds report block times as Unix epoch seconds (UTC). Analysis
//! output renders them as local wall-clock strings.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wall-clock layout used in analysis output, e.g. `2024-03-01 17:05:09`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Render in the given time zone. `None` if the value is outside the
    /// range chrono can represent.
    pub fn format_in<Tz>(&self, tz: &Tz) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let secs = i64::try_from(self.0).ok()?;
        let utc: DateTime<Utc> = DateTime::from_timestamp(secs, 0)?;
        Some(utc.with_timezone(tz).format(DATETIME_FORMAT).to_string())
    }

    /// Render as local wall-clock time.
    pub fn to_local_string(&self) -> Option<String> {
        self.format_in(&Local)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
