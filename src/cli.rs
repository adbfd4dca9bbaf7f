//! Command-line interface definitions and parsing
//!
//! This module defines the CLI for mfd using the `clap` crate. Every search
//! flag becomes one `Criterion`; criteria are combined with logical AND.
//!
//! # Design Features
//!
//! - Every criterion flag is repeatable (`-b 1k -s 1m`)
//! - Criteria keep their command-line order, even across different flags
//! - Time, size, content type and kind flags accept `@FILE` to copy the
//!   value from a reference file's metadata
//! - Optional trailing `DIR` restricts the search scope
//!
//! # Examples
//!
//! ```
//! use clap::CommandFactory;
//! use mfd::cli::{Cli, criteria_from_matches};
//! use mfd::predicate::CriterionKind;
//!
//! let matches = Cli::command()
//!     .try_get_matches_from(["mfd", "-e", "mp3", "-b10M"])
//!     .unwrap();
//! let criteria = criteria_from_matches(&matches);
//! assert_eq!(criteria[0].kind, CriterionKind::Extension);
//! assert_eq!(criteria[1].raw, "10M");
//! ```

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;

use crate::predicate::{Comparison, Criterion, CriterionKind};

const ABOUT: &str = "A friendlier front end for Spotlight's mdfind";

const LONG_ABOUT: &str = "\
Search files indexed by Spotlight. Every option adds one condition and all
conditions must hold. By default the whole index is searched; pass a
directory as the last argument to search only inside it.

The options --from, --to, --from-create, --to-create, --content-type,
--kind, --bigger-than and --smaller-than also accept '@FILE': the value is
then read from FILE's own metadata.

Examples:
  mfd --content-type com.omnigroup.omnigraffle.graffle --from 2011/11/1 -t '2013-01-01 14:30:24'
  mfd --query '关键字' --content-type com.adobe.pdf
  mfd -e mp3 -b10M
  mfd -f 10d ~/Documents
  mfd --prop-eq FSSize@./a.txt";

const TIME_HELP: &str = "\
Time format: 'YYYY-mm-dd HH:MM:SS' with any non-digit separators (the time
part may be omitted), or <n><unit> for n units ago where unit is one of
S, M, H, d, m, Y (seconds, minutes, hours, days, 30-day months, years),
e.g. -f 10d";

const SIZE_HELP: &str = "\
Size in bytes, optionally with a k, m, g or t suffix (1024-based),
e.g. -b 1m";

const PROP_HELP: &str = "\
KEY@FILE: compare property KEY against FILE's value of it. The 'kMDItem'
prefix may be omitted (inspect available keys with `mdls FILE`), e.g.
--prop-eq FSSize@diary.txt";

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "mfd")]
#[command(about = ABOUT, long_about = LONG_ABOUT)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Content modified at or after TIME
    #[arg(short = 'f', long = "from", value_name = "TIME", long_help = TIME_HELP)]
    pub from: Vec<String>,

    /// Content modified at or before TIME
    #[arg(short = 't', long = "to", value_name = "TIME", long_help = TIME_HELP)]
    pub to: Vec<String>,

    /// Created at or after TIME
    #[arg(short = 'F', long = "from-create", value_name = "TIME", long_help = TIME_HELP)]
    pub from_create: Vec<String>,

    /// Created at or before TIME
    #[arg(short = 'T', long = "to-create", value_name = "TIME", long_help = TIME_HELP)]
    pub to_create: Vec<String>,

    /// Full-text content match, e.g. --query "关键字"
    #[arg(short = 'q', long = "query", value_name = "TEXT")]
    pub query: Vec<String>,

    /// Content type (UTI), case-insensitive exact match, e.g. -c public.ruby-script
    #[arg(short = 'c', long = "content-type", value_name = "TYPE")]
    pub content_type: Vec<String>,

    /// File extension mnemonic mapped to a kind (see --list-types), e.g. -e mp3
    #[arg(short = 'e', long = "type", value_name = "EXT")]
    pub file_type: Vec<String>,

    /// Kind description contains KIND, e.g. --kind "HTML Document"
    #[arg(short = 'k', long = "kind", value_name = "KIND")]
    pub kind: Vec<String>,

    /// Size at least SIZE
    #[arg(short = 'b', long = "bigger-than", value_name = "SIZE", long_help = SIZE_HELP)]
    pub bigger_than: Vec<String>,

    /// Size at most SIZE
    #[arg(short = 's', long = "smaller-than", value_name = "SIZE", long_help = SIZE_HELP)]
    pub smaller_than: Vec<String>,

    /// Property equal to the reference file's
    #[arg(long = "prop-eq", value_name = "KEY@FILE", long_help = PROP_HELP)]
    pub prop_eq: Vec<String>,

    /// Property different from the reference file's
    #[arg(long = "prop-ne", value_name = "KEY@FILE", long_help = PROP_HELP)]
    pub prop_ne: Vec<String>,

    /// Property at most the reference file's
    #[arg(long = "prop-le", value_name = "KEY@FILE", long_help = PROP_HELP)]
    pub prop_le: Vec<String>,

    /// Property at least the reference file's
    #[arg(long = "prop-ge", value_name = "KEY@FILE", long_help = PROP_HELP)]
    pub prop_ge: Vec<String>,

    /// Downloaded from a URL containing URL
    #[arg(short = 'd', long = "download-from", visible_alias = "downloadfrom", value_name = "URL")]
    pub download_from: Vec<String>,

    /// File name match (case and diacritic insensitive)
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Vec<String>,

    /// Print an ASCII NUL after each result path (for xargs -0)
    #[arg(short = '0', long = "null")]
    pub null: bool,

    /// Keep running and update the number of matches as files change
    #[arg(long = "live")]
    pub live: bool,

    /// Print the number of matches instead of the paths
    #[arg(long = "count")]
    pub count: bool,

    /// Print the mdfind command line before running it
    #[arg(long = "debug")]
    pub debug: bool,

    /// List the extension mnemonics accepted by --type and exit
    #[arg(short = 'l', long = "list-types")]
    pub list_types: bool,

    /// Only search inside this directory
    #[arg(value_name = "DIR")]
    pub scope: Option<PathBuf>,
}

/// Argument id (clap derives it from the field name) for every criterion flag
const CRITERION_ARGS: &[(&str, CriterionKind)] = &[
    ("from", CriterionKind::ModifiedFrom),
    ("to", CriterionKind::ModifiedTo),
    ("from_create", CriterionKind::CreatedFrom),
    ("to_create", CriterionKind::CreatedTo),
    ("query", CriterionKind::TextContent),
    ("content_type", CriterionKind::ContentType),
    ("file_type", CriterionKind::Extension),
    ("kind", CriterionKind::Kind),
    ("bigger_than", CriterionKind::BiggerThan),
    ("smaller_than", CriterionKind::SmallerThan),
    ("prop_eq", CriterionKind::Property(Comparison::Eq)),
    ("prop_ne", CriterionKind::Property(Comparison::Ne)),
    ("prop_le", CriterionKind::Property(Comparison::Le)),
    ("prop_ge", CriterionKind::Property(Comparison::Ge)),
    ("download_from", CriterionKind::WhereFrom),
    ("name", CriterionKind::Name),
];

impl Cli {
    /// Parse the process arguments, keeping the raw matches for ordering.
    ///
    /// Exits with clap's usage message on invalid arguments.
    #[must_use]
    pub fn parse_with_matches() -> (Self, ArgMatches) {
        let matches = Self::command().get_matches();
        let cli = Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
        (cli, matches)
    }
}

/// Collect every criterion flag occurrence in command-line order
#[must_use]
pub fn criteria_from_matches(matches: &ArgMatches) -> Vec<Criterion> {
    let mut indexed: Vec<(usize, Criterion)> = Vec::new();

    for (id, kind) in CRITERION_ARGS {
        let (Some(values), Some(indices)) =
            (matches.get_many::<String>(id), matches.indices_of(id))
        else {
            continue;
        };
        indexed.extend(
            indices
                .zip(values)
                .map(|(index, raw)| (index, Criterion::new(*kind, raw.clone()))),
        );
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, criterion)| criterion).collect()
}
