use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use super::ScalarError;

/// Unix timestamp of 2001-01-01T00:00:00Z, the zero point of Spotlight dates
pub const REFERENCE_EPOCH_UNIX: i64 = 978_307_200;

/// Seconds between the reference epoch and `instant`
#[must_use]
pub fn seconds_since_reference<Tz: TimeZone>(instant: &DateTime<Tz>) -> i64 {
    instant.timestamp() - REFERENCE_EPOCH_UNIX
}

/// Unit letter of a relative time such as `10d` (case-sensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    #[must_use]
    pub const fn from_suffix(suffix: char) -> Option<Self> {
        match suffix {
            'S' => Some(Self::Second),
            'M' => Some(Self::Minute),
            'H' => Some(Self::Hour),
            'd' => Some(Self::Day),
            'm' => Some(Self::Month),
            'Y' => Some(Self::Year),
            _ => None,
        }
    }

    /// Length of one unit in seconds. A month is 30 days and a year is 365
    /// such months.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
            Self::Month => 2_592_000,
            Self::Year => 946_080_000,
        }
    }
}

/// Calendar components split out of an absolute timestamp.
///
/// Omitted trailing components default to January, the 1st and midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarStamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarStamp {
    /// Split on every run of non-digit characters into at most six numbers
    /// (year, month, day, hour, minute, second).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let parts: Vec<&str> = input
            .split(|c: char| !c.is_ascii_digit())
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() || parts.len() > 6 {
            return None;
        }

        let year = parts[0].parse::<i32>().ok()?;
        let mut rest = [1_u32, 1, 0, 0, 0];
        for (slot, part) in rest.iter_mut().zip(&parts[1..]) {
            *slot = part.parse::<u32>().ok()?;
        }
        let [month, day, hour, minute, second] = rest;

        Some(Self { year, month, day, hour, minute, second })
    }

    /// Interpret the components as wall-clock time in `tz`.
    ///
    /// Returns `None` for impossible dates (month 13, February 30th) and for
    /// wall-clock times skipped by a DST transition. Ambiguous times resolve
    /// to the earlier instant.
    #[must_use]
    pub fn in_timezone<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        let naive = NaiveDate::from_ymd_opt(self.year, self.month, self.day)?
            .and_hms_opt(self.hour, self.minute, self.second)?;
        tz.from_local_datetime(&naive).earliest()
    }
}

/// A parsed time criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSpec {
    /// `magnitude` units before the current instant
    Relative { magnitude: i64, unit: TimeUnit },
    /// A calendar timestamp in the caller's timezone
    Absolute(CalendarStamp),
}

impl TryFrom<&str> for TimeSpec {
    type Error = ScalarError;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        if let Some(relative) = parse_relative(input) {
            return Ok(relative);
        }

        CalendarStamp::parse(input)
            .map(Self::Absolute)
            .ok_or_else(|| ScalarError::MalformedTimeSpec(input.to_string()))
    }
}

fn parse_relative(input: &str) -> Option<TimeSpec> {
    let (idx, suffix) = input.char_indices().next_back()?;
    let unit = TimeUnit::from_suffix(suffix)?;
    let digits = &input[..idx];

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = digits.parse::<i64>().ok()?;
    Some(TimeSpec::Relative { magnitude, unit })
}

impl TimeSpec {
    /// Resolve to seconds since the reference epoch.
    ///
    /// `now` anchors relative specs; `tz` interprets absolute ones.
    ///
    /// # Errors
    /// Returns `ScalarError::MalformedTimeSpec` (carrying `input`) when the
    /// calendar components do not name a real instant or the offset overflows.
    pub fn seconds_since_reference<Tz: TimeZone>(
        &self,
        input: &str,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<i64, ScalarError> {
        let malformed = || ScalarError::MalformedTimeSpec(input.to_string());

        match self {
            Self::Relative { magnitude, unit } => magnitude
                .checked_mul(unit.seconds())
                .and_then(|offset| seconds_since_reference(&now).checked_sub(offset))
                .ok_or_else(malformed),
            Self::Absolute(stamp) => stamp
                .in_timezone(tz)
                .map(|instant| seconds_since_reference(&instant))
                .ok_or_else(malformed),
        }
    }
}

/// Normalize a time criterion in the local timezone.
///
/// # Errors
/// Returns `ScalarError::MalformedTimeSpec` if the input matches neither grammar.
pub fn normalize_time(input: &str, now: DateTime<Utc>) -> Result<i64, ScalarError> {
    normalize_time_in(input, now, &Local)
}

/// Normalize a time criterion, interpreting absolute timestamps in `tz`.
///
/// # Errors
/// Returns `ScalarError::MalformedTimeSpec` if the input matches neither grammar.
pub fn normalize_time_in<Tz: TimeZone>(
    input: &str,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<i64, ScalarError> {
    let spec = TimeSpec::try_from(input)?;
    let seconds = spec.seconds_since_reference(input, now, tz)?;
    tracing::debug!(input, seconds, ?spec, "normalized time");
    Ok(seconds)
}
