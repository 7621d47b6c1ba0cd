//! Time zone in which due dates are typed and shown.
//!
//! Due dates are stored in UTC. Converting through the zone itself, rather
//! than through today's offset, keeps dates on the far side of a
//! daylight-saving change correct.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

/// Zone used to interpret and display due dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueZone {
    /// The system zone, with its daylight-saving rules
    #[default]
    Local,
    /// An IANA zone such as `America/New_York`
    Named(Tz),
    /// A constant offset from UTC
    Fixed(FixedOffset),
}

impl DueZone {
    /// UTC instant of a wall-clock time in this zone
    ///
    /// Returns `None` when the wall-clock time is skipped (spring forward) or
    /// occurs twice (fall back).
    #[must_use]
    pub fn to_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Local => resolve(&Local, local),
            Self::Named(tz) => resolve(tz, local),
            Self::Fixed(offset) => resolve(offset, local),
        }
    }

    /// Formats a UTC instant as wall-clock time in this zone
    #[must_use]
    pub fn format(&self, at: DateTime<Utc>, pattern: &str) -> String {
        match self {
            Self::Local => at.with_timezone(&Local).format(pattern).to_string(),
            Self::Named(tz) => at.with_timezone(tz).format(pattern).to_string(),
            Self::Fixed(offset) => at.with_timezone(offset).format(pattern).to_string(),
        }
    }
}

impl fmt::Display for DueZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Named(tz) => f.write_str(tz.name()),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

fn resolve<Z: TimeZone>(zone: &Z, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
    zone.from_local_datetime(local)
        .single()
        .map(|at| at.with_timezone(&Utc))
}
