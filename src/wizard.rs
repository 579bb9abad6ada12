//! The authentication wizard: provider selection, authentication, model
//! resolution/selection, id allocation, and merge-or-replace persistence.

use crate::catalog;
use crate::config::{CliConfig, ConfigStore, ProviderConfig};
use crate::error::{Error, Result};
use crate::fetch::{self, ModelFetcher};
use crate::prompt::{terminal_page_size, Choice, Interact, SelectPrompt};
use crate::registry;
use tracing::{debug, info};

/// Page size of the model selection menu (the provider menu scales with
/// terminal height instead).
const MODEL_PAGE_SIZE: usize = 10;

/// Assign a collision-free configuration identifier: the base unchanged if
/// free, otherwise `base-1`, `base-2`, … until unused.
#[must_use]
pub fn allocate_config_id(config: &CliConfig, base: &str) -> String {
    if !config.has_provider_id(base) {
        return base.to_string();
    }
    let mut counter = 1u64;
    loop {
        let candidate = format!("{base}-{counter}");
        if !config.has_provider_id(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// The interactive wizard over its three collaborators.
pub struct Wizard<'a> {
    store: &'a mut dyn ConfigStore,
    fetcher: &'a dyn ModelFetcher,
    interact: &'a mut dyn Interact,
}

impl<'a> Wizard<'a> {
    pub fn new(
        store: &'a mut dyn ConfigStore,
        fetcher: &'a dyn ModelFetcher,
        interact: &'a mut dyn Interact,
    ) -> Self {
        Self {
            store,
            fetcher,
            interact,
        }
    }

    /// Run the wizard.
    ///
    /// With `append_to_existing` the finished [`ProviderConfig`] is returned
    /// to the caller and nothing is saved; otherwise the store's `providers`
    /// collection is replaced with the new entry (all other top-level fields
    /// preserved) and `None` is returned. `None` also covers user
    /// cancellation and reported authentication failures; only storage I/O
    /// and registry invariant violations escape as errors.
    pub fn run(&mut self, append_to_existing: bool) -> Result<Option<ProviderConfig>> {
        match self.run_inner(append_to_existing) {
            Err(e) if e.is_cancelled() => {
                println!("\n\u{26a0}\u{fe0f}  Configuration cancelled by user.\n");
                Ok(None)
            }
            other => other,
        }
    }

    fn run_inner(&mut self, append_to_existing: bool) -> Result<Option<ProviderConfig>> {
        let config = self.store.load()?;

        let provider_choices: Vec<Choice> = registry::AUTH_PROVIDERS
            .iter()
            .map(|p| Choice::new(p.label, p.key))
            .collect();
        let selected = self.interact.select(
            &SelectPrompt::new("Select an AI provider:", provider_choices)
                .with_page_size(terminal_page_size()),
        )?;

        // The menu is built from the registry, so a miss here is a broken
        // prompt implementation, not user input.
        let authenticator = registry::authenticator_for(&selected)
            .ok_or_else(|| Error::ProviderNotFound(selected.clone()))?;
        debug!(provider = %selected, "starting authentication");

        let mut provider_config = match authenticator.authenticate(self.interact) {
            Ok(result) => result.provider_config,
            Err(Error::Auth(message)) => {
                eprintln!("\n\u{274c} Authentication failed: {message}");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        self.select_model(&mut provider_config)?;

        let provider_id = provider_config.provider.clone();
        provider_config.id = allocate_config_id(&config, &provider_id);
        info!(provider = %provider_id, id = %provider_config.id, "provider configured");

        if append_to_existing {
            return Ok(Some(provider_config));
        }

        // Replace mode: keep every other top-level field, but the providers
        // collection becomes just the new entry.
        let new_config = CliConfig {
            providers: vec![provider_config],
            rest: config.rest,
        };
        self.store.save(&new_config)?;
        println!("\n\u{2713} Configuration saved successfully!\n");
        Ok(None)
    }

    fn select_model(&mut self, provider_config: &mut ProviderConfig) -> Result<()> {
        let provider_id = provider_config.provider.clone();

        let router_models = if catalog::supports_model_list(&provider_id) {
            println!("\nFetching available models...");
            fetch::resolve_router_models(self.fetcher, provider_config)
        } else {
            None
        };

        let resolved = catalog::models_by_provider(&provider_id, router_models.as_ref());
        let ranked = catalog::sort_models_by_preference(&resolved.models);
        if ranked.is_empty() {
            debug!(provider = %provider_id, "no models to offer, leaving model field unset");
            return Ok(());
        }

        let model_choices: Vec<Choice> = ranked
            .iter()
            .map(|id| Choice::new(resolved.models[id].label(id), id.clone()))
            .collect();
        let selected_model = self.interact.select(
            &SelectPrompt::new("Select a model to use:", model_choices)
                .with_default(resolved.default_model)
                .with_page_size(MODEL_PAGE_SIZE),
        )?;

        provider_config.set_field(catalog::model_id_key(&provider_id), selected_model);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_ids(ids: &[&str]) -> CliConfig {
        CliConfig {
            providers: ids
                .iter()
                .map(|id| {
                    let mut p = ProviderConfig::new("openai");
                    p.id = (*id).to_string();
                    p
                })
                .collect(),
            rest: serde_json::Map::new(),
        }
    }

    #[test]
    fn allocator_returns_base_when_unused() {
        let config = config_with_ids(&[]);
        assert_eq!(allocate_config_id(&config, "openai"), "openai");
    }

    #[test]
    fn allocator_skips_taken_suffixes() {
        let config = config_with_ids(&["openai", "openai-1"]);
        assert_eq!(allocate_config_id(&config, "openai"), "openai-2");
    }

    #[test]
    fn allocator_fills_gaps_at_the_lowest_free_suffix() {
        let config = config_with_ids(&["openai", "openai-2"]);
        assert_eq!(allocate_config_id(&config, "openai"), "openai-1");
    }

    #[test]
    fn allocator_ignores_other_bases() {
        let config = config_with_ids(&["anthropic", "anthropic-1"]);
        assert_eq!(allocate_config_id(&config, "openai"), "openai");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn allocated_id_never_collides(
                base in "[a-z][a-z0-9-]{0,12}",
                existing in proptest::collection::vec("[a-z][a-z0-9-]{0,16}", 0..24),
            ) {
                let refs: Vec<&str> = existing.iter().map(String::as_str).collect();
                let config = config_with_ids(&refs);
                let id = allocate_config_id(&config, &base);
                prop_assert!(!config.has_provider_id(&id));
                let prefix = format!("{base}-");
                prop_assert!(id == base || id.starts_with(&prefix));
            }

            #[test]
            fn empty_set_returns_base_unchanged(base in "[a-z][a-z0-9-]{0,12}") {
                let config = config_with_ids(&[]);
                prop_assert_eq!(allocate_config_id(&config, &base), base);
            }
        }
    }
}
