//! Model catalog: built-in per-provider defaults, remote-list merging, and
//! the preference ranking used by the model selection menu.
//!
//! This module is intentionally data-first: it centralizes which providers
//! expose a remote model list, which config field receives the selected
//! model id, and the default catalog offered when no remote list is
//! available, so the wizard and the fetcher cannot drift independently.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata for one selectable model, keyed by model id in a [`ModelMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Provider-recommended entry, ranked ahead of everything else.
    #[serde(default)]
    pub recommended: bool,

    /// Provider-local catalog generation tag; larger is newer. Used only
    /// for ordering, never compared across providers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window: Option<u32>,
}

impl ModelInfo {
    /// Menu label: display name when present, raw id otherwise.
    #[must_use]
    pub fn label<'a>(&'a self, id: &'a str) -> &'a str {
        self.display_name.as_deref().unwrap_or(id)
    }
}

/// Mapping from model id to metadata. Ordered map so iteration (and
/// therefore every downstream decision) is deterministic for equal inputs.
pub type ModelMap = BTreeMap<String, ModelInfo>;

/// Output of [`models_by_provider`]: the merged mapping plus the default
/// selection offered by the model menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModels {
    pub models: ModelMap,
    pub default_model: Option<String>,
}

struct ProviderCatalog {
    provider: &'static str,
    /// Whether a remote model list applies to this provider at all.
    supports_model_list: bool,
    /// Config field that receives the selected model id. Providers name
    /// this field differently; the indirection lives here, once.
    model_id_key: &'static str,
    default_model: Option<&'static str>,
    /// (id, display name, recommended, generation)
    defaults: &'static [(&'static str, &'static str, bool, u32)],
}

const CATALOGS: &[ProviderCatalog] = &[
    ProviderCatalog {
        provider: "anthropic",
        supports_model_list: false,
        model_id_key: "apiModelId",
        default_model: Some("claude-sonnet-4-5"),
        defaults: &[
            ("claude-sonnet-4-5", "Claude Sonnet 4.5", true, 4),
            ("claude-opus-4-5", "Claude Opus 4.5", false, 4),
            ("claude-haiku-4-5", "Claude Haiku 4.5", false, 4),
            ("claude-3-5-sonnet-20241022", "Claude Sonnet 3.5", false, 3),
            ("claude-3-5-haiku-20241022", "Claude Haiku 3.5", false, 3),
        ],
    },
    ProviderCatalog {
        provider: "openai",
        supports_model_list: true,
        model_id_key: "openAiModelId",
        default_model: Some("gpt-4o"),
        defaults: &[
            ("gpt-5.1-codex", "GPT-5.1 Codex", false, 5),
            ("gpt-4o", "GPT-4o", true, 4),
            ("gpt-4o-mini", "GPT-4o Mini", false, 4),
        ],
    },
    ProviderCatalog {
        provider: "google",
        supports_model_list: false,
        model_id_key: "geminiModelId",
        default_model: Some("gemini-2.5-pro"),
        defaults: &[
            ("gemini-2.5-pro", "Gemini 2.5 Pro", true, 25),
            ("gemini-2.5-flash", "Gemini 2.5 Flash", false, 25),
            ("gemini-1.5-pro", "Gemini 1.5 Pro", false, 15),
            ("gemini-1.5-flash", "Gemini 1.5 Flash", false, 15),
        ],
    },
    ProviderCatalog {
        provider: "openrouter",
        supports_model_list: true,
        model_id_key: "openRouterModelId",
        default_model: Some("anthropic/claude-sonnet-4.5"),
        defaults: &[
            ("anthropic/claude-sonnet-4.5", "Anthropic: Claude Sonnet 4.5", true, 4),
            ("openai/gpt-4o", "OpenAI: GPT-4o", false, 4),
            ("google/gemini-2.5-pro", "Google: Gemini 2.5 Pro", false, 25),
        ],
    },
    ProviderCatalog {
        provider: "openai-compatible",
        supports_model_list: false,
        model_id_key: "openAiModelId",
        default_model: None,
        defaults: &[],
    },
];

fn catalog_for(provider: &str) -> Option<&'static ProviderCatalog> {
    CATALOGS.iter().find(|c| c.provider == provider)
}

/// Capability flag: does a remote model list apply to this provider?
#[must_use]
pub fn supports_model_list(provider: &str) -> bool {
    catalog_for(provider).is_some_and(|c| c.supports_model_list)
}

/// Config field name that receives the selected model id for a provider.
#[must_use]
pub fn model_id_key(provider: &str) -> &'static str {
    catalog_for(provider).map_or("apiModelId", |c| c.model_id_key)
}

fn default_models(provider: &str) -> ModelMap {
    catalog_for(provider).map_or_else(ModelMap::new, |catalog| {
        catalog
            .defaults
            .iter()
            .map(|&(id, name, recommended, generation)| {
                (
                    id.to_string(),
                    ModelInfo {
                        display_name: Some(name.to_string()),
                        recommended,
                        generation: Some(generation),
                        context_window: None,
                    },
                )
            })
            .collect()
    })
}

/// Merge a fetched-or-absent remote list with the built-in defaults.
///
/// Remote entries take precedence over defaults sharing the same id;
/// defaults fill the gaps. Pure with respect to its inputs: identical
/// `(provider, router_models)` always produces an identical result.
#[must_use]
pub fn models_by_provider(provider: &str, router_models: Option<&ModelMap>) -> ResolvedModels {
    let mut models = default_models(provider);
    if let Some(remote) = router_models {
        for (id, info) in remote {
            models.insert(id.clone(), info.clone());
        }
    }
    ResolvedModels {
        models,
        default_model: catalog_for(provider)
            .and_then(|c| c.default_model)
            .map(ToString::to_string),
    }
}

/// Order model ids by preference: recommended entries first, then newer
/// catalog generation, then case-insensitive id, then raw id.
///
/// Total order over the mapping's keys; deterministic for equal inputs.
#[must_use]
pub fn sort_models_by_preference(models: &ModelMap) -> Vec<String> {
    let mut ids: Vec<&String> = models.keys().collect();
    ids.sort_by(|a, b| {
        let ia = &models[*a];
        let ib = &models[*b];
        ib.recommended
            .cmp(&ia.recommended)
            .then_with(|| ib.generation.unwrap_or(0).cmp(&ia.generation.unwrap_or(0)))
            .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
            .then_with(|| a.cmp(b))
    });
    ids.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn info(name: Option<&str>, recommended: bool, generation: Option<u32>) -> ModelInfo {
        ModelInfo {
            display_name: name.map(ToString::to_string),
            recommended,
            generation,
            context_window: None,
        }
    }

    #[test]
    fn capability_flags_match_catalog() {
        assert!(supports_model_list("openrouter"));
        assert!(supports_model_list("openai"));
        assert!(!supports_model_list("anthropic"));
        assert!(!supports_model_list("openai-compatible"));
        assert!(!supports_model_list("unknown-provider"));
    }

    #[test]
    fn model_id_key_is_provider_specific() {
        assert_eq!(model_id_key("anthropic"), "apiModelId");
        assert_eq!(model_id_key("openrouter"), "openRouterModelId");
        assert_eq!(model_id_key("openai"), "openAiModelId");
        assert_eq!(model_id_key("unknown-provider"), "apiModelId");
    }

    #[test]
    fn remote_entries_override_defaults_and_defaults_fill_gaps() {
        let mut remote = ModelMap::new();
        remote.insert(
            "gpt-4o".to_string(),
            info(Some("GPT-4o (router)"), false, Some(4)),
        );
        remote.insert("o4-preview".to_string(), info(None, false, Some(5)));

        let resolved = models_by_provider("openai", Some(&remote));

        // Overridden: the remote display name wins.
        assert_eq!(
            resolved.models["gpt-4o"].display_name.as_deref(),
            Some("GPT-4o (router)")
        );
        // Remote-only entry present.
        assert!(resolved.models.contains_key("o4-preview"));
        // Default-only entry preserved.
        assert!(resolved.models.contains_key("gpt-4o-mini"));
        assert_eq!(resolved.default_model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn merge_is_deterministic() {
        let mut remote = ModelMap::new();
        remote.insert("b-model".to_string(), info(None, true, None));
        remote.insert("a-model".to_string(), info(None, false, Some(9)));

        let first = models_by_provider("openrouter", Some(&remote));
        let second = models_by_provider("openrouter", Some(&remote));
        assert_eq!(first, second);
    }

    #[test]
    fn absent_remote_list_yields_defaults_only() {
        let resolved = models_by_provider("anthropic", None);
        assert_eq!(resolved.models.len(), 5);
        assert_eq!(resolved.default_model.as_deref(), Some("claude-sonnet-4-5"));
    }

    #[test]
    fn unknown_provider_yields_empty_mapping() {
        let resolved = models_by_provider("acme", None);
        assert!(resolved.models.is_empty());
        assert!(resolved.default_model.is_none());
    }

    #[test]
    fn ranking_prefers_recommended_then_generation_then_id() {
        let mut models = ModelMap::new();
        models.insert("zeta-old".to_string(), info(None, false, Some(1)));
        models.insert("alpha-new".to_string(), info(None, false, Some(2)));
        models.insert("beta-new".to_string(), info(None, false, Some(2)));
        models.insert("pick-me".to_string(), info(None, true, Some(1)));

        let ranked = sort_models_by_preference(&models);
        assert_eq!(ranked, vec!["pick-me", "alpha-new", "beta-new", "zeta-old"]);
    }

    #[test]
    fn ranking_of_empty_mapping_is_empty() {
        assert!(sort_models_by_preference(&ModelMap::new()).is_empty());
    }

    #[test]
    fn label_falls_back_to_raw_id() {
        let named = info(Some("GPT-4o"), false, None);
        let unnamed = info(None, false, None);
        assert_eq!(named.label("gpt-4o"), "GPT-4o");
        assert_eq!(unnamed.label("gpt-4o"), "gpt-4o");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_models() -> impl Strategy<Value = ModelMap> {
            proptest::collection::btree_map(
                "[a-zA-Z0-9./-]{1,24}",
                (
                    proptest::option::of("[a-zA-Z0-9 ]{1,16}"),
                    any::<bool>(),
                    proptest::option::of(0u32..100),
                )
                    .prop_map(|(name, recommended, generation)| ModelInfo {
                        display_name: name,
                        recommended,
                        generation,
                        context_window: None,
                    }),
                0..32,
            )
        }

        proptest! {
            #[test]
            fn ranking_is_a_total_order(models in arb_models()) {
                let ranked = sort_models_by_preference(&models);
                prop_assert_eq!(ranked.len(), models.len());
                let mut seen = std::collections::BTreeSet::new();
                for id in &ranked {
                    prop_assert!(models.contains_key(id));
                    prop_assert!(seen.insert(id.clone()), "duplicate id {}", id);
                }
            }

            #[test]
            fn ranking_is_deterministic(models in arb_models()) {
                prop_assert_eq!(
                    sort_models_by_preference(&models),
                    sort_models_by_preference(&models)
                );
            }

            #[test]
            fn merge_is_pure(remote in arb_models()) {
                let first = models_by_provider("openai", Some(&remote));
                let second = models_by_provider("openai", Some(&remote));
                prop_assert_eq!(first, second);
            }
        }
    }
}
