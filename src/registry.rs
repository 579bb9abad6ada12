//! Provider registry: the static catalog of authentication strategies.

use crate::auth::api_key::ApiKeyAuth;
use crate::auth::openai_compat::OpenAiCompatAuth;
use crate::auth::Authenticator;

/// One selectable provider: a stable key plus the menu label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    /// Conventional API-key environment variable, offered as a prefill.
    pub env_key: Option<&'static str>,
}

/// Providers offered by the wizard, in menu order.
pub const AUTH_PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        key: "anthropic",
        label: "Anthropic (Claude)",
        env_key: Some("ANTHROPIC_API_KEY"),
    },
    ProviderDescriptor {
        key: "openai",
        label: "OpenAI",
        env_key: Some("OPENAI_API_KEY"),
    },
    ProviderDescriptor {
        key: "google",
        label: "Google (Gemini)",
        env_key: Some("GEMINI_API_KEY"),
    },
    ProviderDescriptor {
        key: "openrouter",
        label: "OpenRouter",
        env_key: Some("OPENROUTER_API_KEY"),
    },
    ProviderDescriptor {
        key: "openai-compatible",
        label: "OpenAI Compatible (custom endpoint)",
        env_key: None,
    },
];

#[must_use]
pub fn descriptor(key: &str) -> Option<&'static ProviderDescriptor> {
    AUTH_PROVIDERS.iter().find(|p| p.key == key)
}

/// Resolve a provider key to its authentication strategy.
#[must_use]
pub fn authenticator_for(key: &str) -> Option<Box<dyn Authenticator>> {
    let descriptor = descriptor(key)?;
    let auth: Box<dyn Authenticator> = match descriptor.key {
        "openai-compatible" => Box::new(OpenAiCompatAuth::new()),
        _ => Box::new(ApiKeyAuth::new(descriptor)),
    };
    Some(auth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        for (i, a) in AUTH_PROVIDERS.iter().enumerate() {
            for b in &AUTH_PROVIDERS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn every_descriptor_has_an_authenticator() {
        for provider in AUTH_PROVIDERS {
            assert!(
                authenticator_for(provider.key).is_some(),
                "no authenticator for {}",
                provider.key
            );
        }
    }

    #[test]
    fn unknown_key_has_no_authenticator() {
        assert!(descriptor("acme").is_none());
        assert!(authenticator_for("acme").is_none());
    }
}
