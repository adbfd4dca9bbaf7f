use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use super::error::PredicateError;

/// Namespace prefix shared by Spotlight metadata attribute names
pub const KEY_PREFIX: &str = "kMDItem";

/// Prefix marking an argument as "read the value from this file"
pub const INDIRECT_SENTINEL: char = '@';

pub const CONTENT_CHANGE_DATE: &str = "kMDItemFSContentChangeDate";
pub const CREATION_DATE: &str = "kMDItemFSCreationDate";
pub const TEXT_CONTENT: &str = "kMDItemTextContent";
pub const CONTENT_TYPE: &str = "kMDItemContentType";
pub const KIND: &str = "kMDItemKind";
pub const FS_SIZE: &str = "kMDItemFSSize";
pub const WHERE_FROMS: &str = "kMDItemWhereFroms";
pub const FS_NAME: &str = "kMDItemFSName";

/// Comparison operator of a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Ne,
    Le,
    Ge,
}

impl Comparison {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Le => "<=",
            Self::Ge => ">=",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kinds of comparison a criterion can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionKind {
    /// Content modified at or after the given time
    ModifiedFrom,
    /// Content modified at or before the given time
    ModifiedTo,
    /// Created at or after the given time
    CreatedFrom,
    /// Created at or before the given time
    CreatedTo,
    /// Full-text content match
    TextContent,
    /// Uniform type identifier match
    ContentType,
    /// Kind description contains the value
    Kind,
    /// Kind description contains the string a file-extension mnemonic maps to
    Extension,
    /// Size at least the given amount
    BiggerThan,
    /// Size at most the given amount
    SmallerThan,
    /// Download source URL contains the value
    WhereFrom,
    /// File name match
    Name,
    /// Compare an arbitrary property against a reference file's value
    Property(Comparison),
}

impl CriterionKind {
    /// Attribute compared by this kind; `None` for `Property`, whose key is
    /// part of the argument.
    #[must_use]
    pub const fn default_key(self) -> Option<&'static str> {
        match self {
            Self::ModifiedFrom | Self::ModifiedTo => Some(CONTENT_CHANGE_DATE),
            Self::CreatedFrom | Self::CreatedTo => Some(CREATION_DATE),
            Self::TextContent => Some(TEXT_CONTENT),
            Self::ContentType => Some(CONTENT_TYPE),
            Self::Kind | Self::Extension => Some(KIND),
            Self::BiggerThan | Self::SmallerThan => Some(FS_SIZE),
            Self::WhereFrom => Some(WHERE_FROMS),
            Self::Name => Some(FS_NAME),
            Self::Property(_) => None,
        }
    }

    #[must_use]
    pub const fn comparison(self) -> Comparison {
        match self {
            Self::ModifiedFrom | Self::CreatedFrom | Self::BiggerThan => Comparison::Ge,
            Self::ModifiedTo | Self::CreatedTo | Self::SmallerThan => Comparison::Le,
            Self::TextContent
            | Self::ContentType
            | Self::Kind
            | Self::Extension
            | Self::WhereFrom
            | Self::Name => Comparison::Eq,
            Self::Property(op) => op,
        }
    }

    /// Whether an `@file` argument is read from the file. Free text, names
    /// and URLs routinely contain `@`, so those kinds always take the
    /// argument literally.
    #[must_use]
    pub const fn accepts_indirect(self) -> bool {
        match self {
            Self::ModifiedFrom
            | Self::ModifiedTo
            | Self::CreatedFrom
            | Self::CreatedTo
            | Self::ContentType
            | Self::Kind
            | Self::BiggerThan
            | Self::SmallerThan
            | Self::Property(_) => true,
            Self::TextContent | Self::Extension | Self::WhereFrom | Self::Name => false,
        }
    }
}

/// One recognized flag occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub kind: CriterionKind,
    pub raw: String,
}

/// Where a criterion's value comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource<'a> {
    /// The argument itself
    Literal(&'a str),
    /// Property `key` of the file at `path`
    Indirect { path: PathBuf, key: Cow<'static, str> },
}

impl Criterion {
    #[must_use]
    pub fn new(kind: CriterionKind, raw: impl Into<String>) -> Self {
        Self { kind, raw: raw.into() }
    }

    /// Decide whether the value is literal or read from a file.
    ///
    /// `Property` arguments are always `KEY@FILE`; the key is namespaced with
    /// `kMDItem` unless it already carries the prefix.
    ///
    /// # Errors
    /// Returns `PredicateError::MalformedPropertyArgument` if a `Property`
    /// argument lacks the `@` separator, the key, or the file, and
    /// `PredicateError::MissingReferenceFile` for a bare `@`.
    pub fn value_source(&self) -> Result<ValueSource<'_>, PredicateError> {
        if let CriterionKind::Property(_) = self.kind {
            let (key, file) = self
                .raw
                .split_once(INDIRECT_SENTINEL)
                .filter(|(key, file)| !key.is_empty() && !file.is_empty())
                .ok_or_else(|| PredicateError::MalformedPropertyArgument(self.raw.clone()))?;
            return Ok(ValueSource::Indirect {
                path: expand_path(file),
                key: Cow::Owned(namespaced_key(key)),
            });
        }

        match (self.kind.default_key(), self.raw.strip_prefix(INDIRECT_SENTINEL)) {
            (Some(_), Some("")) if self.kind.accepts_indirect() => {
                Err(PredicateError::MissingReferenceFile(self.raw.clone()))
            }
            (Some(key), Some(file)) if self.kind.accepts_indirect() => Ok(ValueSource::Indirect {
                path: expand_path(file),
                key: Cow::Borrowed(key),
            }),
            _ => Ok(ValueSource::Literal(&self.raw)),
        }
    }
}

/// Prefix `key` with `kMDItem` unless it already starts with it
#[must_use]
pub fn namespaced_key(key: &str) -> String {
    if key.starts_with(KEY_PREFIX) {
        key.to_string()
    } else {
        format!("{KEY_PREFIX}{key}")
    }
}

/// Expand a leading `~` to the home directory
#[must_use]
pub fn expand_path(raw: &str) -> PathBuf {
    let home_relative = match raw {
        "~" => Some(""),
        _ => raw.strip_prefix("~/"),
    };

    match (home_relative, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Backslash-escape every double quote; nothing else changes
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Value side of a clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseValue {
    /// Rendered bare: sizes, dates, numeric properties
    Integer(i64),
    /// Rendered as a quoted, escaped string
    Text {
        text: String,
        /// Surround with `*` for substring matching
        wildcard: bool,
        /// Append `cdw` (case, diacritic and word insensitive)
        insensitive: bool,
    },
}

impl ClauseValue {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into(), wildcard: false, insensitive: false }
    }

    #[must_use]
    pub fn insensitive(text: impl Into<String>) -> Self {
        Self::Text { text: text.into(), wildcard: false, insensitive: true }
    }

    #[must_use]
    pub fn contains(text: impl Into<String>, insensitive: bool) -> Self {
        Self::Text { text: text.into(), wildcard: true, insensitive }
    }
}

impl fmt::Display for ClauseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text { text, wildcard, insensitive } => {
                let star = if *wildcard { "*" } else { "" };
                let flags = if *insensitive { "cdw" } else { "" };
                write!(f, "\"{star}{}{star}\"{flags}", escape(text))
            }
        }
    }
}

/// A single rendered comparison, e.g. `kMDItemFSSize >= 1048576`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub key: String,
    pub op: Comparison,
    pub value: ClauseValue,
}

impl Clause {
    #[must_use]
    pub fn new(key: impl Into<String>, op: Comparison, value: ClauseValue) -> Self {
        Self { key: key.into(), op, value }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.op, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_source() {
        let c = Criterion::new(CriterionKind::BiggerThan, "1m");
        assert_eq!(c.value_source().unwrap(), ValueSource::Literal("1m"));
    }

    #[test]
    fn test_indirect_source_uses_default_key() {
        let c = Criterion::new(CriterionKind::ModifiedFrom, "@ref.file");
        assert_eq!(
            c.value_source().unwrap(),
            ValueSource::Indirect {
                path: PathBuf::from("ref.file"),
                key: Cow::Borrowed(CONTENT_CHANGE_DATE),
            }
        );
    }

    #[test]
    fn test_literal_only_kinds_keep_sentinel() {
        for kind in [CriterionKind::Name, CriterionKind::WhereFrom, CriterionKind::TextContent] {
            let c = Criterion::new(kind, "@home");
            assert_eq!(c.value_source().unwrap(), ValueSource::Literal("@home"));
        }
    }

    #[test]
    fn test_property_source_namespaces_key() {
        let c = Criterion::new(CriterionKind::Property(Comparison::Eq), "FSSize@diary.txt");
        assert_eq!(
            c.value_source().unwrap(),
            ValueSource::Indirect {
                path: PathBuf::from("diary.txt"),
                key: Cow::Owned("kMDItemFSSize".to_string()),
            }
        );

        let c = Criterion::new(CriterionKind::Property(Comparison::Ne), "kMDItemKind@a@b");
        assert_eq!(
            c.value_source().unwrap(),
            ValueSource::Indirect {
                path: PathBuf::from("a@b"),
                key: Cow::Owned("kMDItemKind".to_string()),
            }
        );
    }

    #[test]
    fn test_property_source_requires_file() {
        for raw in ["FSSize", "FSSize@", "@diary.txt"] {
            let c = Criterion::new(CriterionKind::Property(Comparison::Ge), raw);
            assert!(matches!(
                c.value_source(),
                Err(PredicateError::MalformedPropertyArgument(_))
            ));
        }
    }

    #[test]
    fn test_indirect_source_requires_file() {
        for kind in [
            CriterionKind::BiggerThan,
            CriterionKind::ModifiedFrom,
            CriterionKind::ContentType,
            CriterionKind::Kind,
        ] {
            let c = Criterion::new(kind, "@");
            assert!(matches!(
                c.value_source(),
                Err(PredicateError::MissingReferenceFile(ref raw)) if raw == "@"
            ));
        }
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("ref.file"), PathBuf::from("ref.file"));
        assert_eq!(expand_path("/tmp/x"), PathBuf::from("/tmp/x"));
        assert_eq!(expand_path("dir/~/x"), PathBuf::from("dir/~/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/notes.txt"), home.join("notes.txt"));
            assert_eq!(expand_path("~"), home.join(""));
        }
    }

    #[test]
    fn test_escape_round_trip() {
        let original = r#"say "hi" to "them""#;
        let escaped = escape(original);
        assert_eq!(escaped, r#"say \"hi\" to \"them\""#);
        assert_eq!(escaped.replace("\\\"", "\""), original);
    }

    #[test]
    fn test_escape_leaves_other_characters() {
        assert_eq!(escape(r"a\b*c'd"), r"a\b*c'd");
    }

    #[test]
    fn test_clause_rendering() {
        let size = Clause::new(FS_SIZE, Comparison::Ge, ClauseValue::Integer(1_048_576));
        assert_eq!(size.to_string(), "kMDItemFSSize >= 1048576");

        let text = Clause::new(TEXT_CONTENT, Comparison::Eq, ClauseValue::insensitive("关键字"));
        assert_eq!(text.to_string(), "kMDItemTextContent == \"关键字\"cdw");

        let kind = Clause::new(KIND, Comparison::Eq, ClauseValue::contains("PDF", true));
        assert_eq!(kind.to_string(), "kMDItemKind == \"*PDF*\"cdw");

        let from = Clause::new(WHERE_FROMS, Comparison::Eq, ClauseValue::contains("github.com", false));
        assert_eq!(from.to_string(), "kMDItemWhereFroms == \"*github.com*\"");

        let plain = Clause::new("kMDItemAuthors", Comparison::Ne, ClauseValue::text("Ann"));
        assert_eq!(plain.to_string(), "kMDItemAuthors != \"Ann\"");
    }

    #[test]
    fn test_clause_escapes_quotes() {
        let clause = Clause::new(FS_NAME, Comparison::Eq, ClauseValue::insensitive("a\"b"));
        assert_eq!(clause.to_string(), "kMDItemFSName == \"a\\\"b\"cdw");
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(CriterionKind::ModifiedFrom.comparison(), Comparison::Ge);
        assert_eq!(CriterionKind::SmallerThan.comparison(), Comparison::Le);
        assert_eq!(CriterionKind::Property(Comparison::Ne).comparison(), Comparison::Ne);
        assert_eq!(Comparison::Le.to_string(), "<=");
    }
}
