#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `ModKit` scoped visibility.
//!
//! Entities declare named scopes ("imported", "`test_data`"). Every query
//! over such an entity hides the rows matched by its scopes unless the
//! caller overrides a scope for that query with a [`Mode`]:
//!
//! | Mode | Effect |
//! |------|--------|
//! | `with` | show matched rows too |
//! | `only` | show matched rows only |
//! | `without` | hide matched rows |
//!
//! Flags come from request parameters such as
//! `?visibility[imported]=only&visibility[test_data]=with` or
//! `?visibility=imported|only`, are normalized against the entity's
//! [`ScopeRegistry`], and are carried into query construction by a
//! [`VisibilityPolicy`]. Malformed or unknown flags are dropped, never
//! rejected.
//!
//! # Features
//! - `sea-orm`: [`sea`] module rendering the policy as `IN` / `NOT IN` conditions
//! - `sqlite`: `SQLx` sqlite driver for `SeaORM`
//!
//! # Example
//! ```rust
//! use modkit_visibility::{
//!     HasScopedVisibility, InMemoryQuery, ScopeRegistry, VisibilityConfig, VisibilityPolicy,
//!     params,
//! };
//! use std::collections::BTreeSet;
//!
//! struct Article;
//!
//! impl HasScopedVisibility for Article {
//!     type Filter = BTreeSet<i64>;
//!
//!     fn scoped_flags() -> ScopeRegistry<Self::Filter> {
//!         ScopeRegistry::new()
//!             .scope("imported", || BTreeSet::from([1, 2]))
//!             .scope("test_data", || BTreeSet::from([3]))
//!     }
//! }
//!
//! let config = VisibilityConfig::default();
//! let input = params::parse_query("visibility[imported]=with", &config);
//! let policy = VisibilityPolicy::for_entity::<Article>(&input, &config);
//!
//! let rows = policy
//!     .build_for::<Article, _>(InMemoryQuery::new())
//!     .evaluate(1..=5);
//! assert_eq!(rows, vec![1, 2, 4, 5]);
//! ```

pub mod apply;
pub mod config;
pub mod error;
pub mod input;
pub mod memory;
pub mod mode;
pub mod normalize;
pub mod params;
pub mod policy;
pub mod query;
pub mod registry;
pub mod request;
#[cfg(feature = "sea-orm")]
pub mod sea;

pub use apply::{apply, apply_defaults};
pub use config::VisibilityConfig;
pub use error::{Rejection, VisibilityError};
pub use input::{FlagKey, VisibilityInput};
pub use memory::InMemoryQuery;
pub use mode::{Mode, ParseModeError};
pub use normalize::{Normalized, Normalizer, normalize, normalize_report};
pub use policy::{HasScopedVisibility, VisibilityPolicy};
pub use query::{ClauseSet, ScopeClause, VisibilityQuery};
pub use registry::{DefaultFilter, PredicateSupplier, ScopeDefinition, ScopeNames, ScopeRegistry};
pub use request::{OverrideState, VisibilityRequest};
