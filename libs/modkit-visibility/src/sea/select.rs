use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

use crate::policy::VisibilityPolicy;
use crate::query::{ClauseSet, VisibilityQuery};
use crate::sea::cond::build_visibility_condition;
use crate::sea::{IdSet, VisibleEntity};

/// A `SeaORM` `Select` collecting visibility clauses.
///
/// Clauses are kept per scope until [`ScopedSelect::into_select`], so
/// applying a policy twice replaces rather than stacks conditions.
///
/// # Example
/// ```rust,ignore
/// use modkit_visibility::sea::VisibleSelectExt;
///
/// let rows = article::Entity::find()
///     .scoped()
///     .with_policy(&policy)
///     .all(conn)
///     .await?;
/// ```
#[must_use]
#[derive(Clone, Debug)]
pub struct ScopedSelect<E: EntityTrait> {
    inner: sea_orm::Select<E>,
    clauses: ClauseSet<IdSet>,
}

/// Extension trait to attach visibility to a `SeaORM` `Select`.
pub trait VisibleSelectExt<E: EntityTrait>: Sized {
    /// Wrap this select without applying anything yet.
    fn scoped(self) -> ScopedSelect<E>;

    /// Apply `policy` (explicit modes, then defaults) and return the plain select.
    fn visible(self, policy: &VisibilityPolicy) -> sea_orm::Select<E>
    where
        E: VisibleEntity;
}

impl<E> VisibleSelectExt<E> for sea_orm::Select<E>
where
    E: EntityTrait,
{
    fn scoped(self) -> ScopedSelect<E> {
        ScopedSelect {
            inner: self,
            clauses: ClauseSet::new(),
        }
    }

    fn visible(self, policy: &VisibilityPolicy) -> sea_orm::Select<E>
    where
        E: VisibleEntity,
    {
        self.scoped().with_policy(policy).into_select()
    }
}

impl<E: EntityTrait> VisibilityQuery for ScopedSelect<E> {
    type Filter = IdSet;

    fn include(&mut self, scope: &str, filter: IdSet) {
        self.clauses.include(scope, filter);
    }

    fn exclude(&mut self, scope: &str, filter: IdSet) {
        self.clauses.exclude(scope, filter);
    }

    fn disable_default(&mut self, scope: &str) {
        self.clauses.disable_default(scope);
    }
}

impl<E> ScopedSelect<E>
where
    E: VisibleEntity,
{
    /// Apply `policy` against the scopes declared by `E`.
    pub fn with_policy(mut self, policy: &VisibilityPolicy) -> Self {
        policy.apply_to(&mut self, &E::scoped_flags());
        self
    }

    #[must_use]
    pub fn clauses(&self) -> &ClauseSet<IdSet> {
        &self.clauses
    }

    /// Add an arbitrary filter next to the visibility clauses.
    pub fn filter(mut self, filter: sea_orm::Condition) -> Self {
        self.inner = QueryFilter::filter(self.inner, filter);
        self
    }

    /// Render the clauses into the underlying select.
    #[must_use]
    pub fn into_select(self) -> sea_orm::Select<E> {
        match build_visibility_condition::<E>(self.clauses) {
            Some(cond) => QueryFilter::filter(self.inner, cond),
            None => self.inner,
        }
    }

    /// Execute the query and return all visible rows.
    ///
    /// # Errors
    /// Returns `DbErr` if the database query fails.
    pub async fn all<C>(self, conn: &C) -> Result<Vec<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.into_select().all(conn).await
    }

    /// Execute the query and return at most one visible row.
    ///
    /// # Errors
    /// Returns `DbErr` if the database query fails.
    pub async fn one<C>(self, conn: &C) -> Result<Option<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.into_select().one(conn).await
    }

    /// Count visible rows.
    ///
    /// # Errors
    /// Returns `DbErr` if the database query fails.
    pub async fn count<C>(self, conn: &C) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
        E::Model: Send + Sync,
    {
        self.into_select().count(conn).await
    }
}

