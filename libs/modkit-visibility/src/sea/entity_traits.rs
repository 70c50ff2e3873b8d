use sea_orm::sea_query::SelectStatement;
use sea_orm::{EntityTrait, Value};

use crate::policy::HasScopedVisibility;

/// Identifiers matched by a scope.
#[derive(Clone, Debug, PartialEq)]
pub enum IdSet {
    Values(Vec<Value>),
    /// A `SELECT` returning a single identifier column.
    Subquery(SelectStatement),
}

impl IdSet {
    pub fn values<I, V>(ids: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Values(ids.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn subquery(statement: SelectStatement) -> Self {
        Self::Subquery(statement)
    }
}

/// An entity whose queries honour its visibility scopes.
///
/// `visibility_col()` is the column the scope identifiers are matched
/// against, usually the primary key.
///
/// # Example
/// ```rust,ignore
/// impl VisibleEntity for article::Entity {
///     fn visibility_col() -> Self::Column {
///         article::Column::Id
///     }
/// }
/// ```
pub trait VisibleEntity: EntityTrait + HasScopedVisibility<Filter = IdSet> {
    fn visibility_col() -> Self::Column;
}
