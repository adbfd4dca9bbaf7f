//! Testing utilities for mfd
//!
//! Provides a `StaticResolver` that serves property values from memory and
//! helpers for writing fake `mdls` scripts, so the resolver and builder can be
//! exercised without Spotlight.
//!
//! Only available when compiled with `cfg(test)`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::mdls::{PropertyResolver, PropertyValue, ResolveError};
use crate::scalar::REFERENCE_EPOCH_UNIX;

/// A fixed "current instant": one billion seconds after the reference epoch
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(REFERENCE_EPOCH_UNIX + 1_000_000_000, 0)
        .expect("fixed instant is in range")
}

/// In-memory resolver that records every lookup
#[derive(Debug, Default)]
pub struct StaticResolver {
    values: HashMap<(PathBuf, String), PropertyValue>,
    calls: RefCell<Vec<(PathBuf, String)>>,
}

impl StaticResolver {
    #[must_use]
    pub fn with(mut self, path: impl Into<PathBuf>, key: &str, value: PropertyValue) -> Self {
        self.values.insert((path.into(), key.to_string()), value);
        self
    }

    /// Every `(path, key)` asked for, in order
    #[must_use]
    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.borrow().clone()
    }
}

impl PropertyResolver for StaticResolver {
    fn resolve(&self, path: &Path, key: &str) -> Result<Option<PropertyValue>, ResolveError> {
        let lookup = (path.to_path_buf(), key.to_string());
        let value = self.values.get(&lookup).cloned();
        self.calls.borrow_mut().push(lookup);
        Ok(value)
    }
}

/// Write an executable shell script to `path`
///
/// # Panics
/// Panics if the file cannot be written or made executable.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, body).expect("Failed to write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make script executable");
}

/// Create a fake `mdls` in `dir` that prints `output` for any file
///
/// # Panics
/// Panics if the script cannot be created.
#[cfg(unix)]
#[must_use]
pub fn fake_mdls(dir: &Path, output: &str) -> PathBuf {
    let path = dir.join("mdls");
    let newline = if output.ends_with('\n') { "" } else { "\n" };
    write_script(&path, &format!("#!/bin/sh\ncat <<'MDLS_EOF'\n{output}{newline}MDLS_EOF\n"));
    path
}
