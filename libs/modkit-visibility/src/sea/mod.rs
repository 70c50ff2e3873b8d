//! `SeaORM` binding for scoped visibility.
//!
//! Scopes produce an [`IdSet`]: either literal identifiers or a subquery
//! selecting them. The policy becomes `col IN (...)` / `col NOT IN (...)`
//! conditions on the entity's visibility column.
//!
//! ```rust,ignore
//! use modkit_visibility::sea::{IdSet, VisibleEntity, VisibleSelectExt};
//! use modkit_visibility::{HasScopedVisibility, ScopeRegistry, VisibilityPolicy};
//!
//! impl HasScopedVisibility for article::Entity {
//!     type Filter = IdSet;
//!
//!     fn scoped_flags() -> ScopeRegistry<IdSet> {
//!         ScopeRegistry::new().scope("imported", || {
//!             IdSet::subquery(
//!                 metadata::Entity::find()
//!                     .select_only()
//!                     .column(metadata::Column::ArticleId)
//!                     .filter(metadata::Column::Key.eq("imported"))
//!                     .into_query(),
//!             )
//!         })
//!     }
//! }
//!
//! impl VisibleEntity for article::Entity {
//!     fn visibility_col() -> Self::Column {
//!         article::Column::Id
//!     }
//! }
//!
//! let articles = article::Entity::find()
//!     .visible(&policy)
//!     .all(conn)
//!     .await?;
//! ```

mod cond;
mod entity_traits;
mod select;

pub use cond::build_visibility_condition;
pub use entity_traits::{IdSet, VisibleEntity};
pub use select::{ScopedSelect, VisibleSelectExt};
