use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

use crate::query::{ClauseSet, ScopeClause};
use crate::sea::{IdSet, VisibleEntity};

/// Builds the `SeaORM` condition for a set of visibility clauses.
///
/// # Rules
/// 1. `Include` → `col IN (ids)` or `col IN (subquery)`
/// 2. `Exclude` → `col NOT IN (ids)` or `col NOT IN (subquery)`
/// 3. `Disabled` → nothing
///
/// All parts are ANDed. Returns `None` when nothing is left to filter.
pub fn build_visibility_condition<E>(clauses: ClauseSet<IdSet>) -> Option<Condition>
where
    E: VisibleEntity,
    E::Column: ColumnTrait,
{
    let parts: Vec<SimpleExpr> = clauses
        .into_iter()
        .filter_map(|(_, clause)| clause_expr::<E>(clause))
        .collect();

    if parts.is_empty() {
        return None;
    }

    Some(
        parts
            .into_iter()
            .fold(Condition::all(), |cond, part| cond.add(part)),
    )
}

fn clause_expr<E>(clause: ScopeClause<IdSet>) -> Option<SimpleExpr>
where
    E: VisibleEntity,
    E::Column: ColumnTrait,
{
    let col = || Expr::col((E::default(), E::visibility_col()));

    let expr = match clause {
        ScopeClause::Include(IdSet::Values(ids)) => col().is_in(ids),
        ScopeClause::Include(IdSet::Subquery(sub)) => col().in_subquery(sub),
        ScopeClause::Exclude(IdSet::Values(ids)) => col().is_not_in(ids),
        ScopeClause::Exclude(IdSet::Subquery(sub)) => col().not_in_subquery(sub),
        ScopeClause::Disabled => return None,
    };
    Some(expr)
}
