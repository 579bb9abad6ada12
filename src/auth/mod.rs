//! Provider authentication strategies.
//!
//! One [`Authenticator`] implementation per provider family. Each is free
//! to prompt, hit the network, or otherwise suspend on the user; on
//! success it returns a normalized [`AuthResult`] whose config carries the
//! provider's own identity and whatever fields later use of that provider
//! needs. User aborts surface as [`crate::error::Error::Cancelled`], every
//! other failure as [`crate::error::Error::Auth`].

pub mod api_key;
pub mod openai_compat;

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::prompt::Interact;

/// Outcome of one authentication flow. Transient: exists only within a
/// single wizard run, before id allocation and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthResult {
    pub provider_config: ProviderConfig,
}

pub trait Authenticator {
    fn authenticate(&self, interact: &mut dyn Interact) -> Result<AuthResult>;
}
