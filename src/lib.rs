//! Interactive provider authentication & configuration wizard for LLM CLIs.
//!
//! The flow: pick a provider from the registry, run that provider's
//! authentication strategy, resolve the model catalog (remote list merged
//! over built-in defaults, fetch failures degrade to defaults), pick a
//! model, allocate a collision-free config id, then either return the new
//! provider to the caller (append mode) or replace-and-save the persisted
//! configuration.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod prompt;
pub mod registry;
pub mod wizard;

pub use config::{CliConfig, ProviderConfig};
pub use error::{Error, Result};
pub use wizard::Wizard;
