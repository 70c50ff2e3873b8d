//! In-memory query over row identifiers.

use std::collections::BTreeSet;

use crate::query::{ClauseSet, ScopeClause, VisibilityQuery};

/// A query whose filters are identifier sets, evaluated against rows held
/// in memory.
///
/// ```rust
/// use modkit_visibility::{InMemoryQuery, VisibilityQuery};
/// use std::collections::BTreeSet;
///
/// let mut query = InMemoryQuery::new();
/// query.exclude("imported", BTreeSet::from([1, 2]));
/// assert_eq!(query.evaluate(1..=4), vec![3, 4]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InMemoryQuery<Id: Ord> {
    clauses: ClauseSet<BTreeSet<Id>>,
}

impl<Id: Ord> Default for InMemoryQuery<Id> {
    fn default() -> Self {
        Self {
            clauses: ClauseSet::new(),
        }
    }
}

impl<Id: Ord> InMemoryQuery<Id> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn clauses(&self) -> &ClauseSet<BTreeSet<Id>> {
        &self.clauses
    }

    /// Whether `id` passes every clause.
    #[must_use]
    pub fn matches(&self, id: &Id) -> bool {
        self.clauses.iter().all(|(_, clause)| match clause {
            ScopeClause::Include(ids) => ids.contains(id),
            ScopeClause::Exclude(ids) => !ids.contains(id),
            ScopeClause::Disabled => true,
        })
    }

    /// Rows that pass every clause, in input order.
    pub fn evaluate<I>(&self, rows: I) -> Vec<Id>
    where
        I: IntoIterator<Item = Id>,
    {
        rows.into_iter().filter(|id| self.matches(id)).collect()
    }
}

impl<Id: Ord> VisibilityQuery for InMemoryQuery<Id> {
    type Filter = BTreeSet<Id>;

    fn include(&mut self, scope: &str, filter: Self::Filter) {
        self.clauses.include(scope, filter);
    }

    fn exclude(&mut self, scope: &str, filter: Self::Filter) {
        self.clauses.exclude(scope, filter);
    }

    fn disable_default(&mut self, scope: &str) {
        self.clauses.disable_default(scope);
    }
}
