use std::collections::{BTreeMap, BTreeSet};

use crate::mode::Mode;

/// Canonical `scope -> mode` mapping for one query execution.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VisibilityRequest {
    flags: BTreeMap<String, Mode>,
}

impl VisibilityRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mode for `scope`, replacing any earlier one.
    pub fn set(&mut self, scope: impl Into<String>, mode: Mode) {
        self.flags.insert(scope.into(), mode);
    }

    #[must_use]
    pub fn with(mut self, scope: impl Into<String>, mode: Mode) -> Self {
        self.set(scope, mode);
        self
    }

    #[must_use]
    pub fn get(&self, scope: &str) -> Option<Mode> {
        self.flags.get(scope).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Mode)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Mode)> for VisibilityRequest {
    fn from_iter<T: IntoIterator<Item = (S, Mode)>>(iter: T) -> Self {
        let mut request = Self::new();
        for (scope, mode) in iter {
            request.set(scope, mode);
        }
        request
    }
}

/// Scopes that received an explicit mode during one query build.
///
/// The default pass skips every scope recorded here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverrideState {
    overridden: BTreeSet<String>,
}

impl OverrideState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, scope: &str) {
        if !self.overridden.contains(scope) {
            self.overridden.insert(scope.to_owned());
        }
    }

    #[must_use]
    pub fn is_overridden(&self, scope: &str) -> bool {
        self.overridden.contains(scope)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.overridden.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overridden.is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let request: VisibilityRequest = [("imported", Mode::Only), ("imported", Mode::With)]
            .into_iter()
            .collect();
        assert_eq!(request.len(), 1);
        assert_eq!(request.get("imported"), Some(Mode::With));
    }

    #[test]
    fn overrides_track_names_once() {
        let mut state = OverrideState::new();
        assert!(!state.is_overridden("imported"));
        state.mark("imported");
        state.mark("imported");
        assert!(state.is_overridden("imported"));
        assert_eq!(state.iter().collect::<Vec<_>>(), ["imported"]);
    }
}
