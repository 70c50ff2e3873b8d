use crate::config::VisibilityConfig;
use crate::error::Rejection;
use crate::input::{FlagKey, VisibilityInput};
use crate::mode::Mode;
use crate::registry::ScopeNames;
use crate::request::VisibilityRequest;

/// Outcome of normalization: the accepted flags and what was dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Normalized {
    pub request: VisibilityRequest,
    pub rejected: Vec<Rejection>,
}

/// Turns raw caller input into a [`VisibilityRequest`].
///
/// Accepted shapes:
/// - `"only"`: a bare mode applies to every available scope;
/// - `"imported|only"`: one flag/mode pair;
/// - `{"imported": "only"}`: named pairs, each validated on its own;
/// - `["imported|only"]` / `{"0": "imported|only"}`: positional pairs split on the delimiter.
///
/// A numeric key whose value has no delimiter is taken as a scope name when
/// such a scope exists (`{"2024": "only"}`).
///
/// Modes are trimmed and lower-cased. Flags must name an available scope.
/// Anything else is dropped without failing the input.
#[derive(Clone, Debug)]
pub struct Normalizer {
    delimiter: String,
    max_entries: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&VisibilityConfig::default())
    }
}

impl Normalizer {
    #[must_use]
    pub fn new(config: &VisibilityConfig) -> Self {
        Self {
            delimiter: config.delimiter.clone(),
            max_entries: config.max_entries,
        }
    }

    #[must_use]
    pub fn normalize<N>(&self, input: &VisibilityInput, available: &N) -> VisibilityRequest
    where
        N: ScopeNames + ?Sized,
    {
        let normalized = self.normalize_report(input, available);
        for rejection in &normalized.rejected {
            tracing::debug!(reason = %rejection, "Dropped visibility flag");
        }
        normalized.request
    }

    #[must_use]
    pub fn normalize_report<N>(&self, input: &VisibilityInput, available: &N) -> Normalized
    where
        N: ScopeNames + ?Sized,
    {
        let mut out = Normalized::default();

        match input {
            VisibilityInput::Empty => {}
            VisibilityInput::Single(raw) => {
                if let Some(mode) = Mode::parse_lenient(raw) {
                    for name in available.scope_names() {
                        out.request.set(name, mode);
                    }
                } else {
                    self.accept_delimited(raw, available, &mut out);
                }
            }
            VisibilityInput::Pairs(pairs) => {
                for (index, (key, value)) in pairs.iter().enumerate() {
                    if index >= self.max_entries {
                        out.rejected.push(Rejection::TooManyEntries {
                            limit: self.max_entries,
                        });
                        break;
                    }
                    match key {
                        FlagKey::Named(flag) => accept(flag, value, available, &mut out),
                        FlagKey::Positional(_) => {
                            self.accept_delimited(value, available, &mut out);
                        }
                        FlagKey::Indexed(raw) => {
                            if !value.contains(self.delimiter.as_str()) && available.has_scope(raw)
                            {
                                accept(raw, value, available, &mut out);
                            } else {
                                self.accept_delimited(value, available, &mut out);
                            }
                        }
                    }
                }
            }
        }

        out
    }

    fn accept_delimited<N>(&self, raw: &str, available: &N, out: &mut Normalized)
    where
        N: ScopeNames + ?Sized,
    {
        match raw.split_once(self.delimiter.as_str()) {
            Some((flag, mode)) => accept(flag, mode, available, out),
            None => out.rejected.push(Rejection::Malformed(raw.to_owned())),
        }
    }
}

fn accept<N>(flag: &str, raw_mode: &str, available: &N, out: &mut Normalized)
where
    N: ScopeNames + ?Sized,
{
    let flag = flag.trim();

    let Some(mode) = Mode::parse_lenient(raw_mode) else {
        out.rejected.push(Rejection::InvalidMode {
            scope: flag.to_owned(),
            mode: raw_mode.to_owned(),
        });
        return;
    };

    if flag.is_empty() || !available.has_scope(flag) {
        out.rejected.push(Rejection::UnknownScope(flag.to_owned()));
        return;
    }

    out.request.set(flag, mode);
}

/// Normalize with the default delimiter and entry limit.
#[must_use]
pub fn normalize<N>(input: &VisibilityInput, available: &N) -> VisibilityRequest
where
    N: ScopeNames + ?Sized,
{
    Normalizer::default().normalize(input, available)
}

/// Like [`normalize`], but also returns the dropped entries.
#[must_use]
pub fn normalize_report<N>(input: &VisibilityInput, available: &N) -> Normalized
where
    N: ScopeNames + ?Sized,
{
    Normalizer::default().normalize_report(input, available)
}
