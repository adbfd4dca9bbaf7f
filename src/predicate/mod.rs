//! Predicate construction for Spotlight queries
//!
//! Criteria arrive in command-line order. Each one becomes a single clause
//! (`ClauseBuilder`), and the clauses are joined with `&&` into the query
//! string passed to `mdfind` (`PredicateAssembler`).
//!
//! # Examples
//!
//! ```no_run
//! use chrono::Utc;
//! use mfd::kinds::KindTable;
//! use mfd::mdls::MdlsResolver;
//! use mfd::predicate::{ClauseBuilder, Criterion, CriterionKind, SeedPolicy, assemble};
//!
//! let kinds = KindTable::builtin();
//! let resolver = MdlsResolver::default();
//! let builder = ClauseBuilder::new(&kinds, &resolver, Utc::now());
//!
//! let criteria = vec![
//!     Criterion::new(CriterionKind::ModifiedFrom, "10d"),
//!     Criterion::new(CriterionKind::BiggerThan, "1G"),
//! ];
//! let predicate = assemble(&criteria, &builder, SeedPolicy::Always).unwrap();
//! println!("{predicate}");
//! ```

pub mod assembler;
pub mod builder;
pub mod error;
pub mod types;

pub use assembler::{Predicate, PredicateAssembler, SEED_CLAUSE, SeedPolicy};
pub use builder::ClauseBuilder;
pub use error::PredicateError;
pub use types::{
    Clause, ClauseValue, Comparison, Criterion, CriterionKind, ValueSource, escape, expand_path,
    namespaced_key,
};

use crate::mdls::PropertyResolver;

/// Build every criterion in order and join the clauses.
///
/// Stops at the first failure; nothing partial is returned.
///
/// # Errors
/// Returns the first `PredicateError` raised by any criterion.
pub fn assemble<R: PropertyResolver + ?Sized>(
    criteria: &[Criterion],
    builder: &ClauseBuilder<'_, R>,
    seed: SeedPolicy,
) -> Result<Predicate, PredicateError> {
    let mut assembler = PredicateAssembler::new(seed);
    for criterion in criteria {
        assembler.push(builder.build(criterion)?);
    }

    let predicate = assembler.render();
    tracing::debug!(clauses = assembler.len(), %predicate, "assembled predicate");
    Ok(predicate)
}
