//! Output formatting for CLI display
//!
//! This module formats the `--list-types` table, the `--debug` command echo
//! and error reports.

use colored::Colorize;

use crate::kinds::KindTable;

/// Format the mnemonic table, one `ext : kind` row per line, sorted
#[must_use]
pub fn kind_table(kinds: &KindTable) -> String {
    let mut out = String::from("\n");
    for (ext, kind) in kinds.iter() {
        out.push_str(&format!("\t{} : {kind}\n", format!("{ext:<10}").bold()));
    }
    out.push('\n');
    out
}

/// Format the command about to be run
#[must_use]
pub fn command_echo(command_line: &str) -> String {
    command_line.dimmed().to_string()
}

/// Format an error for stderr
#[must_use]
pub fn error_report(error: &dyn std::error::Error) -> String {
    format!("{} {error}", "error:".red().bold())
}
