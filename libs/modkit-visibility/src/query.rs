use std::collections::BTreeMap;

/// The hooks a query exposes to the scope applier.
///
/// Each call is keyed by scope name and replaces whatever the query already
/// holds for that scope, so applying the same flags twice never stacks
/// filters.
pub trait VisibilityQuery {
    /// Filter produced by a scope's predicate supplier.
    type Filter;

    /// Keep only rows matched by `filter`.
    fn include(&mut self, scope: &str, filter: Self::Filter);

    /// Drop rows matched by `filter`.
    fn exclude(&mut self, scope: &str, filter: Self::Filter);

    /// Remove the scope's default filter without adding another one.
    fn disable_default(&mut self, scope: &str);
}

/// What a query holds for one scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeClause<F> {
    Include(F),
    Exclude(F),
    Disabled,
}

impl<F> ScopeClause<F> {
    #[must_use]
    pub fn filter(&self) -> Option<&F> {
        match self {
            ScopeClause::Include(f) | ScopeClause::Exclude(f) => Some(f),
            ScopeClause::Disabled => None,
        }
    }
}

/// At most one clause per scope, in scope-name order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClauseSet<F> {
    clauses: BTreeMap<String, ScopeClause<F>>,
}

impl<F> Default for ClauseSet<F> {
    fn default() -> Self {
        Self {
            clauses: BTreeMap::new(),
        }
    }
}

impl<F> ClauseSet<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, scope: &str) -> Option<&ScopeClause<F>> {
        self.clauses.get(scope)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScopeClause<F>)> {
        self.clauses.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    fn put(&mut self, scope: &str, clause: ScopeClause<F>) {
        self.clauses.insert(scope.to_owned(), clause);
    }
}

impl<F> IntoIterator for ClauseSet<F> {
    type Item = (String, ScopeClause<F>);
    type IntoIter = std::collections::btree_map::IntoIter<String, ScopeClause<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl<F> VisibilityQuery for ClauseSet<F> {
    type Filter = F;

    fn include(&mut self, scope: &str, filter: F) {
        self.put(scope, ScopeClause::Include(filter));
    }

    fn exclude(&mut self, scope: &str, filter: F) {
        self.put(scope, ScopeClause::Exclude(filter));
    }

    fn disable_default(&mut self, scope: &str) {
        self.put(scope, ScopeClause::Disabled);
    }
}
