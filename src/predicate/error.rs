//! Predicate-construction error types
//!
//! Every variant is fatal: a predicate is either built completely or not at
//! all, so no partial query ever reaches the search engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::mdls::ResolveError;
use crate::scalar::ScalarError;

/// Errors raised while turning criteria into clauses
#[derive(Debug, Error)]
pub enum PredicateError {
    /// Size or time literal did not match its grammar
    #[error(transparent)]
    Scalar(#[from] ScalarError),

    /// The metadata-inspection command could not be run
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// `--type` was given a mnemonic the kind table does not know
    #[error("Not supported file ext name: {0} (use `mfd --list-types` to see all supported names)")]
    UnknownContentKindMnemonic(String),

    /// The reference file has no usable value for the property
    #[error("Property {key} not found for {}", .path.display())]
    PropertyNotFound { key: String, path: PathBuf },

    /// The reference file's value cannot be compared the way the criterion needs
    #[error("Property {key} of {} is {found}, expected {expected}", .path.display())]
    PropertyTypeMismatch {
        key: String,
        path: PathBuf,
        expected: &'static str,
        found: &'static str,
    },

    /// A `--prop-*` argument was not of the form `KEY@FILE`
    #[error("Malformed property argument '{0}': expected KEY@FILE (e.g. FSSize@diary.txt)")]
    MalformedPropertyArgument(String),

    /// An `@FILE` argument named no file
    #[error("Missing reference file in '{0}': expected @FILE (e.g. @diary.txt)")]
    MissingReferenceFile(String),
}

impl PredicateError {
    /// Errors caused by how the tool was invoked rather than by the data
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::UnknownContentKindMnemonic(_)
                | Self::MalformedPropertyArgument(_)
                | Self::MissingReferenceFile(_)
        )
    }
}
