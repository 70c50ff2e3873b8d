use crate::apply::{apply, apply_defaults};
use crate::config::VisibilityConfig;
use crate::error::Rejection;
use crate::input::VisibilityInput;
use crate::mode::Mode;
use crate::normalize::Normalizer;
use crate::query::VisibilityQuery;
use crate::registry::{ScopeNames, ScopeRegistry};
use crate::request::{OverrideState, VisibilityRequest};

/// Capability implemented by entities that declare visibility scopes.
///
/// # Example
/// ```rust
/// use modkit_visibility::{HasScopedVisibility, ScopeRegistry};
/// use std::collections::BTreeSet;
///
/// struct Article;
///
/// impl HasScopedVisibility for Article {
///     type Filter = BTreeSet<i64>;
///
///     fn scoped_flags() -> ScopeRegistry<Self::Filter> {
///         ScopeRegistry::new()
///             .scope("imported", || BTreeSet::from([1, 2]))
///             .scope("test_data", || BTreeSet::from([3]))
///     }
/// }
/// ```
pub trait HasScopedVisibility {
    type Filter;

    fn scoped_flags() -> ScopeRegistry<Self::Filter>;
}

/// Visibility decisions carried into query construction.
///
/// Building a query with a policy applies the explicit modes, then the
/// default filter of every scope the policy left alone. An empty policy
/// therefore still hides what each scope hides by default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityPolicy {
    request: VisibilityRequest,
}

impl VisibilityPolicy {
    /// Policy with no overrides: every scope keeps its default filter.
    #[must_use]
    pub fn defaults() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_request(request: VisibilityRequest) -> Self {
        Self { request }
    }

    /// Normalize raw input against the scopes in `available`.
    #[must_use]
    pub fn from_input<N>(input: &VisibilityInput, available: &N, config: &VisibilityConfig) -> Self
    where
        N: ScopeNames + ?Sized,
    {
        Self {
            request: Normalizer::new(config).normalize(input, available),
        }
    }

    /// [`VisibilityPolicy::from_input`] against the scopes declared by `E`.
    #[must_use]
    pub fn for_entity<E>(input: &VisibilityInput, config: &VisibilityConfig) -> Self
    where
        E: HasScopedVisibility,
    {
        Self::from_input(input, &E::scoped_flags(), config)
    }

    /// `with` for every scope: no visibility filtering at all.
    #[must_use]
    pub fn show_all<N>(available: &N) -> Self
    where
        N: ScopeNames + ?Sized,
    {
        Self {
            request: available
                .scope_names()
                .into_iter()
                .map(|name| (name, Mode::With))
                .collect(),
        }
    }

    #[must_use]
    pub fn set(mut self, scope: impl Into<String>, mode: Mode) -> Self {
        self.request.set(scope, mode);
        self
    }

    #[must_use]
    pub fn request(&self) -> &VisibilityRequest {
        &self.request
    }

    /// Apply this policy to `query` using `registry`.
    ///
    /// Returns the overrides recorded for this build.
    pub fn apply_to<Q>(&self, query: &mut Q, registry: &ScopeRegistry<Q::Filter>) -> OverrideState
    where
        Q: VisibilityQuery + ?Sized,
    {
        let mut overrides = OverrideState::new();
        apply(query, &self.request, registry, &mut overrides);
        apply_defaults(query, registry, &overrides);
        overrides
    }

    #[must_use]
    pub fn build<Q>(&self, mut query: Q, registry: &ScopeRegistry<Q::Filter>) -> Q
    where
        Q: VisibilityQuery,
    {
        self.apply_to(&mut query, registry);
        query
    }

    /// [`VisibilityPolicy::build`] with the scopes declared by `E`.
    #[must_use]
    pub fn build_for<E, Q>(&self, query: Q) -> Q
    where
        E: HasScopedVisibility,
        Q: VisibilityQuery<Filter = E::Filter>,
    {
        self.build(query, &E::scoped_flags())
    }

    /// Build a query over entity `E`, which may not declare scopes.
    ///
    /// Without a registry the query is returned untouched.
    #[must_use]
    pub fn build_optional<E, Q>(&self, query: Q, registry: Option<&ScopeRegistry<Q::Filter>>) -> Q
    where
        E: ?Sized,
        Q: VisibilityQuery,
    {
        match registry {
            Some(registry) => self.build(query, registry),
            None => {
                if !self.request.is_empty() {
                    tracing::debug!(
                        reason = %Rejection::MissingCapability(std::any::type_name::<E>()),
                        "Ignoring visibility flags"
                    );
                }
                query
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::memory::InMemoryQuery;
    use std::collections::BTreeSet;
    use tracing_test::traced_test;

    struct Article;

    impl HasScopedVisibility for Article {
        type Filter = BTreeSet<i64>;

        fn scoped_flags() -> ScopeRegistry<Self::Filter> {
            ScopeRegistry::new()
                .scope("imported", || BTreeSet::from([1, 2]))
                .scope("test_data", || BTreeSet::from([3]))
        }
    }

    const ROWS: std::ops::RangeInclusive<i64> = 1..=5;

    fn visible(policy: &VisibilityPolicy) -> Vec<i64> {
        policy
            .build_for::<Article, _>(InMemoryQuery::new())
            .evaluate(ROWS)
    }

    #[test]
    fn defaults_hide_every_scope() {
        assert_eq!(visible(&VisibilityPolicy::defaults()), vec![4, 5]);
    }

    #[test]
    fn with_reveals_one_scope() {
        let policy = VisibilityPolicy::defaults().set("imported", Mode::With);
        assert_eq!(visible(&policy), vec![1, 2, 4, 5]);
    }

    #[test]
    fn only_restricts_to_scope() {
        let policy = VisibilityPolicy::defaults().set("imported", Mode::Only);
        assert_eq!(visible(&policy), vec![1, 2]);
    }

    #[test]
    fn without_matches_default_hiding() {
        let policy = VisibilityPolicy::defaults().set("test_data", Mode::Without);
        assert_eq!(visible(&policy), visible(&VisibilityPolicy::defaults()));
    }

    #[test]
    fn show_all_disables_every_scope() {
        let policy = VisibilityPolicy::show_all(&Article::scoped_flags());
        assert_eq!(visible(&policy), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn from_input_drops_unknown_flags() {
        let input = VisibilityInput::named([("imported", "only"), ("bogus", "with")]);
        let policy = VisibilityPolicy::for_entity::<Article>(&input, &VisibilityConfig::default());
        assert_eq!(policy.request().len(), 1);
        assert_eq!(policy.request().get("imported"), Some(Mode::Only));
    }

    struct Comment;

    #[test]
    #[traced_test]
    fn missing_capability_passes_query_through() {
        let policy = VisibilityPolicy::defaults().set("imported", Mode::Only);
        let query: InMemoryQuery<i64> =
            policy.build_optional::<Comment, _>(InMemoryQuery::new(), None);
        assert!(query.clauses().is_empty());
        assert_eq!(query.evaluate(ROWS), vec![1, 2, 3, 4, 5]);

        assert!(logs_contain("Ignoring visibility flags"));
        assert!(logs_contain("policy::tests::Comment' does not support scoped visibility"));
        assert!(!logs_contain("InMemoryQuery"));
    }

    #[test]
    fn optional_registry_builds_like_build_for() {
        let policy = VisibilityPolicy::defaults().set("imported", Mode::With);
        let registry = Article::scoped_flags();
        let query = policy.build_optional::<Article, _>(InMemoryQuery::new(), Some(&registry));
        assert_eq!(query.evaluate(ROWS), vec![1, 2, 4, 5]);
    }

    #[test]
    fn building_twice_yields_same_rows() {
        let policy = VisibilityPolicy::defaults()
            .set("imported", Mode::Only)
            .set("test_data", Mode::With);
        let registry = Article::scoped_flags();

        let once = policy.build(InMemoryQuery::new(), &registry);
        let twice = policy.build(once.clone(), &registry);

        assert_eq!(once.evaluate(ROWS), twice.evaluate(ROWS));
        assert_eq!(once, twice);
    }

    #[test]
    fn overrides_are_reported() {
        let policy = VisibilityPolicy::defaults().set("test_data", Mode::With);
        let mut query = InMemoryQuery::new();
        let overrides = policy.apply_to(&mut query, &Article::scoped_flags());
        assert!(overrides.is_overridden("test_data"));
        assert!(!overrides.is_overridden("imported"));
    }
}
