//! Reading metadata properties off reference files
//!
//! Criteria written as `@file` take their value from a property of `file`
//! instead of from the command line. The property is read by running the
//! metadata-inspection command (`mdls` on macOS) and scanning its output.

pub mod parser;

pub use parser::{PropertyValue, RawValue};

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Errors raised while resolving a property from a reference file
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The inspection command could not be started (missing binary, permissions)
    #[error("Failed to run '{program}' on {}: {source}", .path.display())]
    PropertyResolutionFailed {
        program: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Source of property values for `@file` criteria
pub trait PropertyResolver {
    /// Read `key` from `path`.
    ///
    /// `Ok(None)` means the inspection ran but never printed a usable value
    /// for `key`.
    ///
    /// # Errors
    /// Returns `ResolveError` if the underlying inspection cannot be performed.
    fn resolve(&self, path: &Path, key: &str) -> Result<Option<PropertyValue>, ResolveError>;
}

/// Resolver backed by an external `mdls`-compatible command
#[derive(Debug, Clone)]
pub struct MdlsResolver {
    program: OsString,
}

impl MdlsResolver {
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self { program: program.into() }
    }

    #[must_use]
    pub fn program(&self) -> &OsString {
        &self.program
    }

    fn launch_error(&self, path: &Path, source: io::Error) -> ResolveError {
        ResolveError::PropertyResolutionFailed {
            program: self.program.to_string_lossy().into_owned(),
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Default for MdlsResolver {
    fn default() -> Self {
        Self::new("mdls")
    }
}

impl PropertyResolver for MdlsResolver {
    /// Runs the command once and waits for it to close its output.
    fn resolve(&self, path: &Path, key: &str) -> Result<Option<PropertyValue>, ResolveError> {
        let target = std::path::absolute(path).map_err(|e| self.launch_error(path, e))?;

        let output = Command::new(&self.program)
            .arg(&target)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| self.launch_error(&target, e))?;

        tracing::debug!(
            program = %self.program.to_string_lossy(),
            path = %target.display(),
            key,
            status = %output.status,
            "inspected reference file"
        );

        let stdout = String::from_utf8_lossy(&output.stdout);
        let value = parser::scan(stdout.lines(), key);
        if value.is_none() {
            tracing::debug!(key, path = %target.display(), "property not present");
        }

        Ok(value)
    }
}
