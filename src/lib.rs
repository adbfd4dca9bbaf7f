//! mfd - a friendlier front end for Spotlight's `mdfind`
//!
//! This library turns simple search criteria (time and size ranges, content
//! type, kind, text, name, download URL, property comparisons) into a single
//! Spotlight query predicate, optionally reading criterion values from a
//! reference file's metadata.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod kinds;
pub mod mdls;
pub mod output;
pub mod predicate;
pub mod scalar;
pub mod search;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum MfdError {
    /// A criterion could not be turned into a clause
    #[error(transparent)]
    Predicate(#[from] predicate::PredicateError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// The search program could not be started
    #[error("Failed to launch '{program}': {source}")]
    SearchLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MfdError {
    /// Process exit status for this error: 2 for misuse, 1 otherwise
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Predicate(err) if err.is_usage() => 2,
            _ => 1,
        }
    }
}
