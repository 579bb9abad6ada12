//! Crate-wide error type.
//!
//! The wizard distinguishes failures it recovers from locally (user
//! cancellation, provider authentication errors, catalog fetch errors) from
//! failures that must reach the caller (configuration I/O, registry
//! invariant violations).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The user aborted an interactive prompt (Esc or Ctrl+C).
    #[error("cancelled by user")]
    Cancelled,

    /// A selection value was not present in the provider registry.
    ///
    /// The menu is built from the registry, so this indicates a broken
    /// prompt implementation rather than bad user input.
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// Provider-specific authentication failed (bad credential, network,
    /// malformed response).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Remote model catalog fetch failed. Always absorbed by the resolver.
    #[error("model fetch failed: {0}")]
    Fetch(String),

    /// Configuration load/save failure.
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for user-initiated cancellation, which ends the wizard silently.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_is_distinguishable() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::auth("nope").is_cancelled());
        assert!(!Error::fetch("timeout").is_cancelled());
        assert!(!Error::config("bad path").is_cancelled());
    }

    #[test]
    fn display_messages_carry_cause() {
        assert_eq!(
            Error::auth("invalid API key").to_string(),
            "authentication failed: invalid API key"
        );
        assert_eq!(
            Error::ProviderNotFound("nope".to_string()).to_string(),
            "provider not found: nope"
        );
    }
}
