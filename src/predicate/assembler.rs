use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::Clause;

/// Tautology that keeps an empty query valid ("match everything")
pub const SEED_CLAUSE: &str = "(true)";

/// Conjunction operator between clauses
pub const CONJUNCTION: &str = " && ";

/// When the seed clause appears in the rendered predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedPolicy {
    /// Always lead with `(true)`
    #[default]
    Always,
    /// Only emit `(true)` when there are no other clauses
    WhenEmpty,
}

/// The final query string handed to the search engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate(String);

impl Predicate {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<std::ffi::OsStr> for Predicate {
    fn as_ref(&self) -> &std::ffi::OsStr {
        self.0.as_ref()
    }
}

/// Collects clauses in arrival order and joins them with `&&`
#[derive(Debug, Clone, Default)]
pub struct PredicateAssembler {
    seed: SeedPolicy,
    clauses: Vec<Clause>,
}

impl PredicateAssembler {
    #[must_use]
    pub const fn new(seed: SeedPolicy) -> Self {
        Self { seed, clauses: Vec::new() }
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Join every clause, seed first, without reordering or deduplicating
    #[must_use]
    pub fn render(&self) -> Predicate {
        let seeded = match self.seed {
            SeedPolicy::Always => true,
            SeedPolicy::WhenEmpty => self.clauses.is_empty(),
        };

        let parts: Vec<String> = seeded
            .then(|| SEED_CLAUSE.to_string())
            .into_iter()
            .chain(self.clauses.iter().map(ToString::to_string))
            .collect();

        Predicate(parts.join(CONJUNCTION))
    }
}

impl Extend<Clause> for PredicateAssembler {
    fn extend<I: IntoIterator<Item = Clause>>(&mut self, iter: I) {
        self.clauses.extend(iter);
    }
}
