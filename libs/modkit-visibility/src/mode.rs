use std::fmt;
use std::str::FromStr;

/// How a single scope is applied for one query execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Drop the scope's default filter: normally hidden rows are shown too.
    With,
    /// Keep only the rows matched by the scope.
    Only,
    /// Keep only the rows not matched by the scope.
    Without,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::With, Mode::Only, Mode::Without];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::With => "with",
            Mode::Only => "only",
            Mode::Without => "without",
        }
    }

    /// Lenient parse used for caller input: surrounding whitespace and
    /// letter case are ignored. Anything else yields `None`.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown visibility mode '{0}'")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| ParseModeError(s.to_owned()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parses_case_and_whitespace_insensitively() {
        assert_eq!(Mode::parse_lenient(" Only "), Some(Mode::Only));
        assert_eq!(Mode::parse_lenient("WITH"), Some(Mode::With));
        assert_eq!(Mode::parse_lenient("\twithout\n"), Some(Mode::Without));
    }

    #[test]
    fn rejects_unknown_modes() {
        assert_eq!(Mode::parse_lenient(""), None);
        assert_eq!(Mode::parse_lenient("all"), None);
        assert_eq!(Mode::parse_lenient("with out"), None);
        assert_eq!(
            "except".parse::<Mode>(),
            Err(ParseModeError("except".to_owned()))
        );
    }

    #[test]
    fn display_matches_wire_name() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string(), mode.as_str());
            assert_eq!(mode.as_str().parse::<Mode>(), Ok(mode));
        }
    }
}
