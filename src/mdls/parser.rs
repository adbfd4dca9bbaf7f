//! Parsing of `mdls` output
//!
//! `mdls` prints one attribute per line as `key = value`. Only three value
//! shapes can feed a predicate clause:
//!
//! ```text
//! kMDItemContentType         = "public.plain-text"
//! kMDItemFSSize              = 4096
//! kMDItemFSContentChangeDate = 2013-01-01 06:30:24 +0000
//! ```
//!
//! Anything else (arrays, `(null)`, floats) is `RawValue::Unrecognized` and the
//! line is skipped.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

use crate::scalar::{CalendarStamp, seconds_since_reference};

static ATTRIBUTE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?<key>[^\s=]+)\s*=\s*(?<value>.*?)\s*$").expect("attribute line regex")
});

/// Suffix `mdls` appends to dates, which it always prints in UTC
const UTC_SUFFIX: &str = " +0000";

/// A property value read from a reference file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Double-quoted string, quotes removed
    Text(String),
    /// Bare non-negative integer
    Integer(i64),
    /// UTC date, as seconds since the reference epoch
    Date(i64),
}

/// Shape of the right-hand side of one attribute line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue<'a> {
    Quoted(&'a str),
    Integer(i64),
    UtcDate(&'a str),
    Unrecognized,
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(raw: &'a str) -> Self {
        if let Some(inner) = raw
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .filter(|inner| !inner.contains('"'))
        {
            return Self::Quoted(inner);
        }

        if !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && let Ok(n) = raw.parse::<i64>()
        {
            return Self::Integer(n);
        }

        if let Some(date) = raw.strip_suffix(UTC_SUFFIX) {
            return Self::UtcDate(date);
        }

        Self::Unrecognized
    }
}

impl RawValue<'_> {
    /// Convert into a usable value; `None` means the line should be skipped
    #[must_use]
    pub fn into_value(self) -> Option<PropertyValue> {
        match self {
            Self::Quoted(text) => Some(PropertyValue::Text(text.to_string())),
            Self::Integer(n) => Some(PropertyValue::Integer(n)),
            Self::UtcDate(date) => CalendarStamp::parse(date)
                .and_then(|stamp| stamp.in_timezone(&Utc))
                .map(|instant| PropertyValue::Date(seconds_since_reference(&instant))),
            Self::Unrecognized => None,
        }
    }
}

/// Split an attribute line into `(key, raw value)`
#[must_use]
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    let caps = ATTRIBUTE_LINE.captures(line)?;
    Some((caps.name("key")?.as_str(), caps.name("value")?.as_str()))
}

/// Find the first line for `key` whose value has a recognized shape
pub fn scan<'a, I>(lines: I, key: &str) -> Option<PropertyValue>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter_map(split_line)
        .filter(|(line_key, _)| *line_key == key)
        .find_map(|(_, raw)| RawValue::from(raw).into_value())
}
