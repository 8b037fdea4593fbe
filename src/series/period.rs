//! Calendar periods and their canonical keys
//!
//! A `Period` is one bucket on the calendar: a single date, a calendar
//! month, or a calendar year. Periods know how to derive themselves from an
//! instant under a fixed calendar basis, how to render and parse their
//! canonical key, and how to step to their calendar successor. All the
//! rollover arithmetic (month/year boundaries, leap days) lives here.
//!
//! Keys are zero-padded, most-significant-first (`YYYY-MM-DD`, `YYYY-MM`,
//! `YYYY`), so lexicographic order equals chronological order. That
//! guarantee only holds for years 0000-9999; instants outside that range are
//! rejected rather than keyed incorrectly.

use super::error::{SeriesError, SeriesResult};
use super::granularity::Granularity;
use chrono::{Datelike, FixedOffset, LocalResult, NaiveDate, TimeZone, Utc};

/// Smallest year representable by a zero-padded key
const MIN_YEAR: i32 = 0;
/// Largest year representable by a zero-padded key
const MAX_YEAR: i32 = 9999;

/// One calendar period at a fixed granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Period {
    /// A single calendar date
    Day(NaiveDate),
    /// A calendar month
    Month { year: i32, month: u32 },
    /// A calendar year
    Year(i32),
}

impl Period {
    /// Bucket an instant into its calendar period
    ///
    /// The timestamp (Unix milliseconds) is shifted into the `calendar`
    /// offset and the wall-clock date components are read there, so the same
    /// instant can land in different periods under different bases. Fails
    /// with `TimestampOutOfRange` when the instant has no representable
    /// date or its local year falls outside 0000-9999.
    pub fn from_timestamp(
        timestamp: i64,
        granularity: Granularity,
        calendar: FixedOffset,
    ) -> SeriesResult<Self> {
        let instant = match Utc.timestamp_millis_opt(timestamp) {
            LocalResult::Single(dt) => dt,
            _ => return Err(SeriesError::TimestampOutOfRange(timestamp)),
        };

        let date = instant.with_timezone(&calendar).date_naive();
        if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            return Err(SeriesError::TimestampOutOfRange(timestamp));
        }

        Ok(match granularity {
            Granularity::Day => Period::Day(date),
            Granularity::Month => Period::Month {
                year: date.year(),
                month: date.month(),
            },
            Granularity::Year => Period::Year(date.year()),
        })
    }

    /// The granularity this period belongs to
    pub fn granularity(&self) -> Granularity {
        match self {
            Period::Day(_) => Granularity::Day,
            Period::Month { .. } => Granularity::Month,
            Period::Year(_) => Granularity::Year,
        }
    }

    /// The calendar year of this period
    pub fn year(&self) -> i32 {
        match self {
            Period::Day(date) => date.year(),
            Period::Month { year, .. } => *year,
            Period::Year(year) => *year,
        }
    }

    /// Canonical key for this period
    ///
    /// `YYYY-MM-DD` for days, `YYYY-MM` for months, `YYYY` for years.
    pub fn key(&self) -> String {
        match self {
            Period::Day(date) => date.format("%Y-%m-%d").to_string(),
            Period::Month { year, month } => format!("{:04}-{:02}", year, month),
            Period::Year(year) => format!("{:04}", year),
        }
    }

    /// Parse a canonical key back into a period
    ///
    /// Only the exact canonical form is accepted: the parsed period must
    /// re-format to the input byte for byte, and its year must fall in
    /// 0000-9999. Anything else is `InvalidKey`.
    pub fn parse_key(key: &str, granularity: Granularity) -> SeriesResult<Self> {
        let invalid = || SeriesError::InvalidKey {
            key: key.to_string(),
            granularity,
        };

        let period = match granularity {
            Granularity::Day => NaiveDate::parse_from_str(key, "%Y-%m-%d")
                .ok()
                .map(Period::Day),
            Granularity::Month => key.split_once('-').and_then(|(y, m)| {
                let year = y.parse::<i32>().ok()?;
                let month = m.parse::<u32>().ok()?;
                if (1..=12).contains(&month) {
                    Some(Period::Month { year, month })
                } else {
                    None
                }
            }),
            Granularity::Year => key.parse::<i32>().ok().map(Period::Year),
        };

        let period = period.ok_or_else(invalid)?;
        if period.key() != key || !(MIN_YEAR..=MAX_YEAR).contains(&period.year()) {
            return Err(invalid());
        }
        Ok(period)
    }

    /// The next period on the calendar
    ///
    /// Days roll over month and year boundaries (including Feb 29 in leap
    /// years); month 12 rolls into January of the next year; years advance
    /// by one. Fails with `PeriodOverflow` past year 9999.
    pub fn successor(&self) -> SeriesResult<Self> {
        let next = match *self {
            Period::Day(date) => date.succ_opt().map(Period::Day),
            Period::Month { year, month } => Some(if month == 12 {
                Period::Month {
                    year: year + 1,
                    month: 1,
                }
            } else {
                Period::Month {
                    year,
                    month: month + 1,
                }
            }),
            Period::Year(year) => Some(Period::Year(year + 1)),
        };

        match next {
            Some(period) if period.year() <= MAX_YEAR => Ok(period),
            _ => Err(SeriesError::PeriodOverflow(self.key())),
        }
    }

    /// UTC instant range covered by this period, as `[start, end)` in
    /// Unix milliseconds
    ///
    /// The bounds are the period's local midnights in the `calendar` offset,
    /// converted back to UTC. Used for window queries like "events today".
    pub fn utc_range(&self, calendar: FixedOffset) -> SeriesResult<(i64, i64)> {
        let start = midnight_millis(self.start_date()?, calendar)?;
        let end = midnight_millis(self.successor()?.start_date()?, calendar)?;
        Ok((start, end))
    }

    /// First calendar date inside this period
    fn start_date(&self) -> SeriesResult<NaiveDate> {
        let date = match *self {
            Period::Day(date) => Some(date),
            Period::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1),
            Period::Year(year) => NaiveDate::from_ymd_opt(year, 1, 1),
        };
        date.ok_or_else(|| SeriesError::PeriodOverflow(self.key()))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Convert a local midnight in the given offset to Unix milliseconds
fn midnight_millis(date: NaiveDate, calendar: FixedOffset) -> SeriesResult<i64> {
    let naive = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| SeriesError::PeriodOverflow(date.to_string()))?;
    match calendar.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.timestamp_millis()),
        _ => Err(SeriesError::PeriodOverflow(date.to_string())),
    }
}
