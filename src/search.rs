//! Running the Spotlight search
//!
//! Builds the `mdfind` command line for an assembled predicate plus the
//! output modifiers (`-onlyin`, `-0`, `-live`, `-count`) and runs it with the
//! current process's stdio, so results stream straight to the terminal.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::predicate::{Predicate, expand_path};

/// One `mdfind` invocation
#[derive(Debug, Clone)]
pub struct SearchInvocation {
    predicate: Predicate,
    scope: Option<PathBuf>,
    null_separated: bool,
    live: bool,
    count: bool,
}

impl SearchInvocation {
    #[must_use]
    pub const fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            scope: None,
            null_separated: false,
            live: false,
            count: false,
        }
    }

    /// Restrict the search to `dir` (`~` expanded, made absolute)
    ///
    /// # Errors
    /// Returns an I/O error if the current directory cannot be determined.
    pub fn scope(mut self, dir: Option<&Path>) -> io::Result<Self> {
        self.scope = match dir {
            Some(dir) => Some(std::path::absolute(expand_path(&dir.to_string_lossy()))?),
            None => None,
        };
        Ok(self)
    }

    #[must_use]
    pub const fn null_separated(mut self, yes: bool) -> Self {
        self.null_separated = yes;
        self
    }

    #[must_use]
    pub const fn live(mut self, yes: bool) -> Self {
        self.live = yes;
        self
    }

    #[must_use]
    pub const fn count(mut self, yes: bool) -> Self {
        self.count = yes;
        self
    }

    #[must_use]
    pub const fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Arguments after the program name, predicate last
    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if let Some(scope) = &self.scope {
            args.push(OsString::from("-onlyin"));
            args.push(scope.clone().into_os_string());
        }
        if self.null_separated {
            args.push(OsString::from("-0"));
        }
        if self.live {
            args.push(OsString::from("-live"));
        }
        if self.count {
            args.push(OsString::from("-count"));
        }
        args.push(OsString::from(self.predicate.as_str()));
        args
    }

    #[must_use]
    pub fn command(&self, program: &str) -> Command {
        let mut command = Command::new(program);
        command.args(self.args());
        command
    }

    /// The command as a copy-pasteable shell line
    #[must_use]
    pub fn display_command(&self, program: &str) -> String {
        std::iter::once(shell_quote(program))
            .chain(self.args().iter().map(|arg| shell_quote(&arg.to_string_lossy())))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the search and wait for it to finish
    ///
    /// # Errors
    /// Returns an I/O error if `program` cannot be launched.
    pub fn run(&self, program: &str) -> io::Result<ExitStatus> {
        tracing::debug!(program, predicate = %self.predicate, "launching search");
        self.command(program).status()
    }
}

/// Single-quote `arg` for a POSIX shell unless it is plainly safe
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | ','));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
