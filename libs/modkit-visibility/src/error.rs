/// A visibility entry that was dropped instead of applied.
///
/// Rejections are never returned as `Err`: malformed caller input degrades to
/// "no effect for that entry". They are logged at `debug` level and exposed
/// through [`crate::normalize_report`] for callers that want to surface them.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The flag names a scope the entity does not declare.
    #[error("unknown scope '{0}'")]
    UnknownScope(String),

    /// The mode is not one of `with`, `only`, `without`.
    #[error("invalid mode '{mode}' for scope '{scope}'")]
    InvalidMode { scope: String, mode: String },

    /// The entry could not be split into a flag and a mode.
    #[error("malformed visibility entry '{0}'")]
    Malformed(String),

    /// The entry exceeded the configured entry limit.
    #[error("visibility entry limit of {limit} exceeded")]
    TooManyEntries { limit: usize },

    /// The queried entity does not opt into scoped visibility.
    #[error("entity '{0}' does not support scoped visibility")]
    MissingCapability(&'static str),
}

/// Errors raised while loading visibility configuration.
#[derive(thiserror::Error, Debug)]
pub enum VisibilityError {
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl From<figment::Error> for VisibilityError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
