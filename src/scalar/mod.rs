//! Scalar normalization for search criteria
//!
//! Spotlight compares sizes as raw byte counts and dates as seconds relative to
//! its reference epoch (2001-01-01T00:00:00Z). This module turns the shorthand
//! users type on the command line into those scalars:
//!
//! - **Sizes**: `4096`, `10k`, `1M`, `2g`, `1T` (1024-based multipliers)
//! - **Relative times**: `30S`, `15M`, `2H`, `10d`, `3m`, `1Y`
//! - **Absolute times**: `2013/1/1`, `2013-01-01 14:30:24`, any non-digit separator
//!
//! Every grammar is an explicit tagged type (`SizeSpec`, `TimeSpec`) so a
//! malformed input is a distinct, reportable error rather than a zero value.

mod size;
mod time;

pub use size::{SizeSpec, SizeUnit, normalize_size};
pub use time::{
    CalendarStamp, REFERENCE_EPOCH_UNIX, TimeSpec, TimeUnit, normalize_time, normalize_time_in,
    seconds_since_reference,
};

use thiserror::Error;

/// Errors produced while normalizing size and time shorthand
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScalarError {
    /// Input is not `<digits>` optionally followed by one of k, m, g, t
    #[error("Malformed size '{0}': expected digits with an optional k, m, g or t suffix (e.g. 10m)")]
    MalformedSizeSpec(String),

    /// Input is neither `<digits><S|M|H|d|m|Y>` nor a calendar timestamp
    #[error(
        "Malformed time '{0}': expected <n><S|M|H|d|m|Y> (e.g. 10d) or \"YYYY-mm-dd HH:MM:SS\""
    )]
    MalformedTimeSpec(String),
}
