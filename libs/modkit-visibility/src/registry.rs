use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Lazily produces a scope's filter (an id set, a subquery, ...).
pub type PredicateSupplier<F> = Arc<dyn Fn() -> F + Send + Sync>;

/// What a scope does to a query nobody overrode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefaultFilter {
    /// Rows matched by the scope are hidden (`id NOT IN ...`).
    #[default]
    Hide,
    /// Only rows matched by the scope are visible (`id IN ...`).
    Restrict,
}

/// A named filter declared by an entity.
pub struct ScopeDefinition<F> {
    name: String,
    supplier: PredicateSupplier<F>,
    default_filter: DefaultFilter,
}

impl<F> ScopeDefinition<F> {
    pub fn new<S>(name: impl Into<String>, supplier: S) -> Self
    where
        S: Fn() -> F + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            supplier: Arc::new(supplier),
            default_filter: DefaultFilter::default(),
        }
    }

    #[must_use]
    pub fn with_default(mut self, default_filter: DefaultFilter) -> Self {
        self.default_filter = default_filter;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn default_filter(&self) -> DefaultFilter {
        self.default_filter
    }

    /// Evaluate the supplier.
    #[must_use]
    pub fn predicate(&self) -> F {
        (self.supplier)()
    }
}

impl<F> Clone for ScopeDefinition<F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            supplier: Arc::clone(&self.supplier),
            default_filter: self.default_filter,
        }
    }
}

impl<F> fmt::Debug for ScopeDefinition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeDefinition")
            .field("name", &self.name)
            .field("default_filter", &self.default_filter)
            .finish_non_exhaustive()
    }
}

/// The scopes an entity declares, keyed by name.
///
/// Registering a name twice keeps the last definition.
///
/// ```rust
/// use modkit_visibility::{DefaultFilter, ScopeRegistry};
/// use std::collections::BTreeSet;
///
/// let registry = ScopeRegistry::new()
///     .scope("imported", || BTreeSet::from([1, 2]))
///     .scope_with_default("published", DefaultFilter::Restrict, || BTreeSet::from([7]));
///
/// assert!(registry.contains("imported"));
/// assert_eq!(registry.names().collect::<Vec<_>>(), ["imported", "published"]);
/// ```
pub struct ScopeRegistry<F> {
    scopes: BTreeMap<String, ScopeDefinition<F>>,
}

impl<F> ScopeRegistry<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: BTreeMap::new(),
        }
    }

    /// Register a scope hidden by default.
    #[must_use]
    pub fn scope<S>(self, name: impl Into<String>, supplier: S) -> Self
    where
        S: Fn() -> F + Send + Sync + 'static,
    {
        self.define(ScopeDefinition::new(name, supplier))
    }

    #[must_use]
    pub fn scope_with_default<S>(
        self,
        name: impl Into<String>,
        default_filter: DefaultFilter,
        supplier: S,
    ) -> Self
    where
        S: Fn() -> F + Send + Sync + 'static,
    {
        self.define(ScopeDefinition::new(name, supplier).with_default(default_filter))
    }

    #[must_use]
    pub fn define(mut self, definition: ScopeDefinition<F>) -> Self {
        self.scopes.insert(definition.name.clone(), definition);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ScopeDefinition<F>> {
        self.scopes.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScopeDefinition<F>> {
        self.scopes.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl<F> Default for ScopeRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Clone for ScopeRegistry<F> {
    fn clone(&self) -> Self {
        Self {
            scopes: self.scopes.clone(),
        }
    }
}

impl<F> fmt::Debug for ScopeRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.scopes.values()).finish()
    }
}

/// Set of scope names a normalizer validates flags against.
pub trait ScopeNames {
    fn has_scope(&self, name: &str) -> bool;

    fn scope_names(&self) -> Vec<&str>;
}

impl<F> ScopeNames for ScopeRegistry<F> {
    fn has_scope(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn scope_names(&self) -> Vec<&str> {
        self.names().collect()
    }
}

impl ScopeNames for [&str] {
    fn has_scope(&self, name: &str) -> bool {
        self.contains(&name)
    }

    fn scope_names(&self) -> Vec<&str> {
        self.to_vec()
    }
}

impl<const N: usize> ScopeNames for [&str; N] {
    fn has_scope(&self, name: &str) -> bool {
        self.as_slice().has_scope(name)
    }

    fn scope_names(&self) -> Vec<&str> {
        self.to_vec()
    }
}

impl ScopeNames for std::collections::BTreeSet<String> {
    fn has_scope(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn scope_names(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }
}
