//! Integration tests for mfd
//!
//! These tests build complete predicates through the public API, using a fake
//! `mdls` script in a temporary directory for `@file` criteria.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::CommandFactory;
use mfd::cli::{Cli, criteria_from_matches};
use mfd::kinds::KindTable;
use mfd::mdls::MdlsResolver;
use mfd::predicate::{ClauseBuilder, Criterion, CriterionKind, PredicateError, SeedPolicy, assemble};
use mfd::scalar::REFERENCE_EPOCH_UNIX;
use mfd::search::SearchInvocation;

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(REFERENCE_EPOCH_UNIX + 500_000_000, 0).unwrap()
}

/// Helper function to create an executable fake mdls printing `output`
#[cfg(unix)]
fn fake_mdls(dir: &Path, output: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("mdls");
    let newline = if output.ends_with('\n') { "" } else { "\n" };
    fs::write(&path, format!("#!/bin/sh\ncat <<'MDLS_EOF'\n{output}{newline}MDLS_EOF\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn predicate_for(args: &[&str], resolver: &MdlsResolver, seed: SeedPolicy) -> Result<String, PredicateError> {
    let matches = Cli::command()
        .try_get_matches_from(std::iter::once("mfd").chain(args.iter().copied()))
        .unwrap();
    let criteria = criteria_from_matches(&matches);
    let kinds = KindTable::builtin();
    let builder = ClauseBuilder::new(&kinds, resolver, now());
    assemble(&criteria, &builder, seed).map(|p| p.into_string())
}

#[test]
fn test_cli_to_predicate() {
    let resolver = MdlsResolver::default();
    let predicate = predicate_for(
        &["-f", "10d", "-b", "1G", "-q", "关键字"],
        &resolver,
        SeedPolicy::Always,
    )
    .unwrap();

    assert_eq!(
        predicate,
        format!(
            "(true) && kMDItemFSContentChangeDate >= {} && kMDItemFSSize >= 1073741824 && kMDItemTextContent == \"关键字\"cdw",
            500_000_000 - 864_000
        )
    );
}

#[test]
fn test_mnemonic_and_kind() {
    let resolver = MdlsResolver::default();
    let predicate = predicate_for(&["-e", "mp3", "-k", "Safari"], &resolver, SeedPolicy::WhenEmpty).unwrap();
    assert_eq!(
        predicate,
        "kMDItemKind == \"*MP3*\"cdw && kMDItemKind == \"*Safari*\"cdw"
    );
}

#[test]
fn test_unknown_mnemonic_aborts() {
    let resolver = MdlsResolver::default();
    let result = predicate_for(&["-b", "1k", "-e", "nope"], &resolver, SeedPolicy::Always);
    assert!(matches!(result, Err(PredicateError::UnknownContentKindMnemonic(_))));
}

#[test]
fn test_malformed_size_aborts() {
    let resolver = MdlsResolver::default();
    let result = predicate_for(&["-s", "ten"], &resolver, SeedPolicy::Always);
    assert!(matches!(result, Err(PredicateError::Scalar(_))));
}

#[cfg(unix)]
#[test]
fn test_indirect_size_matches_literal() {
    let dir = tempfile::tempdir().unwrap();
    let program = fake_mdls(dir.path(), "kMDItemDisplayName = \"ref.file\"\nkMDItemFSSize = 4096");
    let resolver = MdlsResolver::new(&program);

    let indirect = predicate_for(&["-b", "@ref.file"], &resolver, SeedPolicy::Always).unwrap();
    let literal = predicate_for(&["-b", "4096"], &resolver, SeedPolicy::Always).unwrap();

    assert_eq!(indirect, literal);
    assert_eq!(indirect, "(true) && kMDItemFSSize >= 4096");
}

#[cfg(unix)]
#[test]
fn test_indirect_date_and_content_type() {
    let dir = tempfile::tempdir().unwrap();
    let program = fake_mdls(
        dir.path(),
        "kMDItemContentType = \"com.adobe.pdf\"\nkMDItemFSContentChangeDate = 2001-01-02 00:00:00 +0000",
    );
    let resolver = MdlsResolver::new(&program);

    let predicate = predicate_for(&["-t", "@a.pdf", "-c", "@a.pdf"], &resolver, SeedPolicy::WhenEmpty).unwrap();
    assert_eq!(
        predicate,
        "kMDItemFSContentChangeDate <= 86400 && kMDItemContentType == \"com.adobe.pdf\"cdw"
    );
}

#[cfg(unix)]
#[test]
fn test_property_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let program = fake_mdls(dir.path(), "kMDItemPixelHeight = 1080\nkMDItemAuthors = (\n    Ann\n)");
    let resolver = MdlsResolver::new(&program);

    let predicate = predicate_for(&["--prop-ge", "PixelHeight@photo.jpg"], &resolver, SeedPolicy::WhenEmpty).unwrap();
    assert_eq!(predicate, "kMDItemPixelHeight >= 1080");

    let missing = predicate_for(&["--prop-eq", "Authors@photo.jpg"], &resolver, SeedPolicy::WhenEmpty);
    assert!(matches!(missing, Err(PredicateError::PropertyNotFound { .. })));
}

#[test]
fn test_missing_inspector_aborts() {
    let resolver = MdlsResolver::new("/nonexistent/mdls");
    let result = predicate_for(&["-k", "@a.txt"], &resolver, SeedPolicy::Always);
    assert!(matches!(result, Err(PredicateError::Resolve(_))));
}

#[test]
fn test_bare_sentinel_is_usage_error() {
    let resolver = MdlsResolver::new("/nonexistent/mdls");
    let err = predicate_for(&["-b", "@"], &resolver, SeedPolicy::Always).unwrap_err();
    assert!(matches!(err, PredicateError::MissingReferenceFile(_)));
    assert_eq!(mfd::MfdError::from(err).exit_code(), 2);
}

#[test]
fn test_search_command_line() {
    let resolver = MdlsResolver::default();
    let matches = Cli::command()
        .try_get_matches_from(["mfd", "-n", "it's", "--count", "/tmp"])
        .unwrap();
    let kinds = KindTable::builtin();
    let builder = ClauseBuilder::new(&kinds, &resolver, now());
    let predicate = assemble(&criteria_from_matches(&matches), &builder, SeedPolicy::Always).unwrap();

    let invocation = SearchInvocation::new(predicate)
        .scope(Some(Path::new("/tmp")))
        .unwrap()
        .count(true);

    assert_eq!(
        invocation.display_command("mdfind"),
        r#"mdfind -onlyin /tmp -count '(true) && kMDItemFSName == "it'\''s"cdw'"#
    );
}

#[test]
fn test_criterion_constructor_round_trip() {
    let criterion = Criterion::new(CriterionKind::Name, "notes");
    assert_eq!(criterion.raw, "notes");
    assert_eq!(criterion.kind, CriterionKind::Name);
}
