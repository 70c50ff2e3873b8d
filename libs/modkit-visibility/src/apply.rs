use crate::mode::Mode;
use crate::query::VisibilityQuery;
use crate::registry::{DefaultFilter, ScopeRegistry};
use crate::request::{OverrideState, VisibilityRequest};

/// Apply explicit modes to `query`, recording every applied scope in `overrides`.
///
/// | Mode | Effect |
/// |------|--------|
/// | `with` | default filter removed, nothing added |
/// | `only` | default filter removed, `IN` scope |
/// | `without` | `NOT IN` scope |
///
/// Scopes missing from `registry` are skipped.
pub fn apply<Q>(
    query: &mut Q,
    flags: &VisibilityRequest,
    registry: &ScopeRegistry<Q::Filter>,
    overrides: &mut OverrideState,
) where
    Q: VisibilityQuery + ?Sized,
{
    for (name, mode) in flags.iter() {
        let Some(definition) = registry.get(name) else {
            tracing::debug!(scope = name, "Skipping flag for unregistered scope");
            continue;
        };

        overrides.mark(name);

        match mode {
            Mode::With => query.disable_default(name),
            Mode::Only => {
                query.disable_default(name);
                query.include(name, definition.predicate());
            }
            Mode::Without => query.exclude(name, definition.predicate()),
        }
    }
}

/// Install the default filter of every scope not present in `overrides`.
pub fn apply_defaults<Q>(query: &mut Q, registry: &ScopeRegistry<Q::Filter>, overrides: &OverrideState)
where
    Q: VisibilityQuery + ?Sized,
{
    for definition in registry.iter() {
        if overrides.is_overridden(definition.name()) {
            continue;
        }
        match definition.default_filter() {
            DefaultFilter::Hide => query.exclude(definition.name(), definition.predicate()),
            DefaultFilter::Restrict => query.include(definition.name(), definition.predicate()),
        }
    }
}
