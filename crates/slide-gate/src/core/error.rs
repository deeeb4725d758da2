use std::fmt;

/// Why `attach` left the gate detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// A surface is already attached; call `detach` first.
    AlreadyAttached,
    /// Fewer than two slides were registered.
    TooFewSlides(usize),
    /// The container is not mounted.
    MissingContainer,
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachError::AlreadyAttached => write!(f, "gate is already attached"),
            AttachError::TooFewSlides(n) => write!(f, "need at least 2 slides, got {}", n),
            AttachError::MissingContainer => write!(f, "container is not mounted"),
        }
    }
}

impl std::error::Error for AttachError {}

/// Configuration could not be loaded.
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "invalid gate config json: {}", e),
            ConfigError::Invalid(why) => write!(f, "invalid gate config: {}", why),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}
