use std::path::Path;

use chrono::{DateTime, Utc};

use crate::kinds::KindTable;
use crate::mdls::{PropertyResolver, PropertyValue};
use crate::scalar::{ScalarError, normalize_size, normalize_time};

use super::error::PredicateError;
use super::types::{Clause, ClauseValue, Criterion, CriterionKind, ValueSource};

/// Renders one clause per criterion.
///
/// `now` is captured once by the caller so every relative time within one
/// run resolves against the same instant.
pub struct ClauseBuilder<'a, R: PropertyResolver + ?Sized> {
    kinds: &'a KindTable,
    resolver: &'a R,
    now: DateTime<Utc>,
}

impl<'a, R: PropertyResolver + ?Sized> ClauseBuilder<'a, R> {
    #[must_use]
    pub const fn new(kinds: &'a KindTable, resolver: &'a R, now: DateTime<Utc>) -> Self {
        Self { kinds, resolver, now }
    }

    #[must_use]
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Build the clause for `criterion`, running the resolver for `@file` values.
    ///
    /// # Errors
    /// Returns `PredicateError` for malformed literals, unknown mnemonics,
    /// resolver launch failures and missing or mistyped reference properties.
    pub fn build(&self, criterion: &Criterion) -> Result<Clause, PredicateError> {
        tracing::debug!(kind = ?criterion.kind, raw = %criterion.raw, "building clause");

        let kind = criterion.kind;
        let source = criterion.value_source()?;
        let key = match &source {
            ValueSource::Indirect { key, .. } => key.to_string(),
            ValueSource::Literal(_) => kind.default_key().unwrap_or_default().to_string(),
        };

        let value = match kind {
            CriterionKind::ModifiedFrom
            | CriterionKind::ModifiedTo
            | CriterionKind::CreatedFrom
            | CriterionKind::CreatedTo => self.time_value(&source)?,
            CriterionKind::BiggerThan | CriterionKind::SmallerThan => self.size_value(&source)?,
            CriterionKind::TextContent | CriterionKind::Name | CriterionKind::ContentType => {
                ClauseValue::insensitive(self.text_value(&source)?)
            }
            CriterionKind::Kind => ClauseValue::contains(self.text_value(&source)?, true),
            CriterionKind::Extension => {
                let kind_text = self.kinds.lookup(&criterion.raw).ok_or_else(|| {
                    PredicateError::UnknownContentKindMnemonic(criterion.raw.clone())
                })?;
                ClauseValue::contains(kind_text, true)
            }
            CriterionKind::WhereFrom => ClauseValue::contains(self.text_value(&source)?, false),
            CriterionKind::Property(_) => self.property_value(&source)?,
        };

        Ok(Clause::new(key, kind.comparison(), value))
    }

    fn time_value(&self, source: &ValueSource<'_>) -> Result<ClauseValue, PredicateError> {
        let seconds = match source {
            ValueSource::Literal(raw) => normalize_time(raw, self.now)?,
            ValueSource::Indirect { path, key } => match self.require(path, key)? {
                PropertyValue::Date(n) | PropertyValue::Integer(n) => n,
                PropertyValue::Text(_) => return Err(mismatch(path, key, "a date", "text")),
            },
        };
        Ok(ClauseValue::Integer(seconds))
    }

    fn size_value(&self, source: &ValueSource<'_>) -> Result<ClauseValue, PredicateError> {
        let bytes = match source {
            ValueSource::Literal(raw) => {
                let bytes = normalize_size(raw)?;
                i64::try_from(bytes).map_err(|_| ScalarError::MalformedSizeSpec((*raw).to_string()))?
            }
            ValueSource::Indirect { path, key } => match self.require(path, key)? {
                PropertyValue::Integer(n) => n,
                PropertyValue::Date(_) => return Err(mismatch(path, key, "an integer", "a date")),
                PropertyValue::Text(_) => return Err(mismatch(path, key, "an integer", "text")),
            },
        };
        Ok(ClauseValue::Integer(bytes))
    }

    fn text_value(&self, source: &ValueSource<'_>) -> Result<String, PredicateError> {
        match source {
            ValueSource::Literal(raw) => Ok((*raw).to_string()),
            ValueSource::Indirect { path, key } => Ok(match self.require(path, key)? {
                PropertyValue::Text(text) => text,
                PropertyValue::Integer(n) | PropertyValue::Date(n) => n.to_string(),
            }),
        }
    }

    /// Numbers compare bare, strings compare as exact quoted text
    fn property_value(&self, source: &ValueSource<'_>) -> Result<ClauseValue, PredicateError> {
        let ValueSource::Indirect { path, key } = source else {
            return Ok(ClauseValue::text(self.text_value(source)?));
        };
        Ok(match self.require(path, key)? {
            PropertyValue::Integer(n) | PropertyValue::Date(n) => ClauseValue::Integer(n),
            PropertyValue::Text(text) => ClauseValue::text(text),
        })
    }

    /// Resolve a property, treating an absent value as fatal
    fn require(&self, path: &Path, key: &str) -> Result<PropertyValue, PredicateError> {
        self.resolver
            .resolve(path, key)?
            .ok_or_else(|| PredicateError::PropertyNotFound {
                key: key.to_string(),
                path: path.to_path_buf(),
            })
    }
}

fn mismatch(path: &Path, key: &str, expected: &'static str, found: &'static str) -> PredicateError {
    PredicateError::PropertyTypeMismatch {
        key: key.to_string(),
        path: path.to_path_buf(),
        expected,
        found,
    }
}
