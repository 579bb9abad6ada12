//! API-key authentication: one secret prompt, with an environment-variable
//! prefill when the conventional variable is set.

use super::{AuthResult, Authenticator};
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::prompt::Interact;
use crate::registry::ProviderDescriptor;
use tracing::debug;

/// Config field that stores the API key for a given provider. Field names
/// differ per provider for historical config-schema reasons.
fn api_key_field(provider: &str) -> &'static str {
    match provider {
        "openai" => "openAiApiKey",
        "google" => "geminiApiKey",
        "openrouter" => "openRouterApiKey",
        _ => "apiKey",
    }
}

pub struct ApiKeyAuth {
    descriptor: ProviderDescriptor,
}

impl ApiKeyAuth {
    #[must_use]
    pub fn new(descriptor: &ProviderDescriptor) -> Self {
        Self {
            descriptor: *descriptor,
        }
    }

    fn env_value(&self) -> Option<String> {
        self.descriptor
            .env_key
            .and_then(|key| std::env::var(key).ok())
            .filter(|v| !v.trim().is_empty())
    }
}

impl Authenticator for ApiKeyAuth {
    fn authenticate(&self, interact: &mut dyn Interact) -> Result<AuthResult> {
        let env_value = self.env_value();
        let message = match (env_value.is_some(), self.descriptor.env_key) {
            (true, Some(env_key)) => format!(
                "Enter your {} API key (blank to use ${env_key}):",
                self.descriptor.label
            ),
            _ => format!("Enter your {} API key:", self.descriptor.label),
        };

        let entered = interact.input(&message, true)?;
        let key = match entered.trim() {
            "" => env_value.ok_or_else(|| Error::auth("API key must not be empty"))?,
            trimmed => trimmed.to_string(),
        };

        debug!(provider = self.descriptor.key, "API key captured");
        let mut provider_config = ProviderConfig::new(self.descriptor.key);
        provider_config.set_field(api_key_field(self.descriptor.key), key);
        Ok(AuthResult { provider_config })
    }
}
