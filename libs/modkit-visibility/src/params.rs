//! Extraction of visibility flags from URL query strings.
//!
//! ```text
//! ?visibility=only                              -> Single("only")
//! ?visibility=imported|only                     -> Single("imported|only")
//! ?visibility[imported]=only&visibility[test_data]=with
//!                                               -> Named pairs
//! ?visibility[]=imported|only&visibility[]=test_data|with
//!                                               -> Positional pairs
//! ?visibility[0]=imported|only                  -> Indexed pair
//! ```

use crate::config::VisibilityConfig;
use crate::input::{FlagKey, VisibilityInput};

/// Parse the visibility parameter out of a raw query string, with or without the leading `?`.
///
/// Bracketed entries win over a bare `visibility=` value. A query string that
/// cannot be decoded yields [`VisibilityInput::Empty`].
#[must_use]
pub fn parse_query(query: &str, config: &VisibilityConfig) -> VisibilityInput {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
        Ok(pairs) => pairs,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to decode query string, ignoring visibility");
            return VisibilityInput::Empty;
        }
    };
    from_pairs(pairs, config)
}

/// Same as [`parse_query`] for already decoded `key=value` pairs.
pub fn from_pairs<I>(pairs: I, config: &VisibilityConfig) -> VisibilityInput
where
    I: IntoIterator<Item = (String, String)>,
{
    let param = config.param.as_str();
    let mut bare: Option<String> = None;
    let mut entries: Vec<(FlagKey, String)> = Vec::new();
    let mut next_index = 0usize;

    for (key, value) in pairs {
        let Some(rest) = key.strip_prefix(param) else {
            continue;
        };

        if rest.is_empty() {
            bare = Some(value);
            continue;
        }

        let Some(inner) = rest.strip_prefix('[').and_then(|r| r.strip_suffix(']')) else {
            continue;
        };

        let flag_key = if inner.is_empty() {
            FlagKey::Positional(next_index)
        } else {
            FlagKey::from_raw(inner)
        };
        next_index += 1;
        entries.push((flag_key, value));
    }

    if !entries.is_empty() {
        return VisibilityInput::Pairs(entries);
    }
    bare.map_or(VisibilityInput::Empty, VisibilityInput::Single)
}
