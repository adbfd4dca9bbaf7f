//! mfd CLI application entry point
//!
//! Spotlight is a great desktop search engine and `mdfind` is its command-line
//! front end, but composing its queries by hand is tedious. mfd builds the
//! query from a few simple options and runs `mdfind` with it.
//!
//! # Usage
//!
//! ```bash
//! # Files modified in the last 10 days that are at least 1 GiB
//! mfd -f 10d -b 1G
//!
//! # MP3s over 10 MiB
//! mfd -e mp3 -b10M
//!
//! # PDFs mentioning a keyword, only under ~/Documents
//! mfd --query '关键字' --content-type com.adobe.pdf ~/Documents
//!
//! # Files the same size as a.txt
//! mfd --prop-eq FSSize@./a.txt
//!
//! # Show the mdfind command being run
//! mfd --debug -n report
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/mfd/config.toml` on Linux) and created with defaults on
//! first run.

use std::process::ExitCode;

use chrono::Utc;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use mfd::{
    MfdError,
    cli::{Cli, criteria_from_matches},
    config::MfdConfig,
    kinds::KindTable,
    mdls::MdlsResolver,
    output,
    predicate::{self, ClauseBuilder},
    search::SearchInvocation,
};

type Result<T> = std::result::Result<T, MfdError>;

/// Install the stderr subscriber; `RUST_LOG` wins over `--debug`
fn init_tracing(debug: bool) {
    let builder = tracing_subscriber::fmt().with_writer(std::io::stderr);
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        builder.with_env_filter(filter).init();
    } else if debug {
        builder.with_max_level(LevelFilter::DEBUG).init();
    } else {
        builder.with_max_level(LevelFilter::WARN).init();
    }
}

/// Build the predicate and run the search, returning mdfind's exit status
fn run(cli: &Cli, matches: &clap::ArgMatches, config: &MfdConfig) -> Result<ExitCode> {
    let kinds = KindTable::builtin().with_overrides(&config.kinds);

    if cli.list_types {
        print!("{}", output::kind_table(&kinds));
        return Ok(ExitCode::SUCCESS);
    }

    let criteria = criteria_from_matches(matches);
    let now = Utc::now();
    let resolver = MdlsResolver::new(&config.mdls);
    let builder = ClauseBuilder::new(&kinds, &resolver, now);
    let predicate = predicate::assemble(&criteria, &builder, config.seed)?;

    let invocation = SearchInvocation::new(predicate)
        .scope(cli.scope.as_deref())?
        .null_separated(cli.null)
        .live(cli.live)
        .count(cli.count);

    if cli.debug || config.debug {
        println!("{}", output::command_echo(&invocation.display_command(&config.mdfind)));
    }

    let status = invocation
        .run(&config.mdfind)
        .map_err(|source| MfdError::SearchLaunch {
            program: config.mdfind.clone(),
            source,
        })?;

    Ok(match status.code() {
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        None => ExitCode::FAILURE,
    })
}

fn main() -> ExitCode {
    let (cli, matches) = Cli::parse_with_matches();

    let config = match MfdConfig::load() {
        Ok(config) => config,
        Err(e) => {
            let err = MfdError::from(e);
            eprintln!("{}", output::error_report(&err));
            return ExitCode::from(err.exit_code());
        }
    };

    init_tracing(cli.debug || config.debug);

    match run(&cli, &matches, &config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", output::error_report(&err));
            ExitCode::from(err.exit_code())
        }
    }
}
