//! OpenAI-compatible custom endpoint: prompts for a base URL and an
//! optional API key.

use super::{AuthResult, Authenticator};
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::prompt::Interact;
use tracing::debug;

pub struct OpenAiCompatAuth;

impl OpenAiCompatAuth {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn validate_base_url(raw: &str) -> Result<String> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::auth("base URL must not be empty"));
        }
        let parsed = url::Url::parse(trimmed)
            .map_err(|e| Error::auth(format!("invalid base URL '{trimmed}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::auth(format!(
                "unsupported URL scheme '{}': use http or https",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none() {
            return Err(Error::auth(format!("base URL '{trimmed}' has no host")));
        }
        Ok(trimmed.to_string())
    }
}

impl Default for OpenAiCompatAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl Authenticator for OpenAiCompatAuth {
    fn authenticate(&self, interact: &mut dyn Interact) -> Result<AuthResult> {
        let base_url = Self::validate_base_url(
            &interact.input("Base URL (e.g. https://my-gateway.example/v1):", false)?,
        )?;
        let api_key = interact.input("API key (blank if the endpoint is open):", true)?;

        debug!(base_url = %base_url, "OpenAI-compatible endpoint configured");
        let mut provider_config = ProviderConfig::new("openai-compatible");
        provider_config.set_field("openAiBaseUrl", base_url);
        let api_key = api_key.trim();
        if !api_key.is_empty() {
            provider_config.set_field("openAiApiKey", api_key);
        }
        Ok(AuthResult { provider_config })
    }
}
