//! Remote model catalog fetch.
//!
//! The fetch collaborator is fallible by contract; [`resolve_router_models`]
//! is the only caller and absorbs every failure into "no remote list" with
//! a logged warning, so a dead or slow catalog service never blocks the
//! wizard.

use crate::catalog::{ModelInfo, ModelMap};
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Model catalog fetch collaborator.
pub trait ModelFetcher {
    fn fetch(&self, config: &ProviderConfig) -> Result<ModelMap>;
}

/// Wire shape shared by the supported list endpoints: `{"data": [..]}` with
/// at least an `id` per entry.
#[derive(Debug, Deserialize)]
struct ModelListResponse {
    data: Vec<RemoteModel>,
}

#[derive(Debug, Deserialize)]
struct RemoteModel {
    id: String,
    #[serde(default, alias = "displayName")]
    name: Option<String>,
    #[serde(default, alias = "contextWindow")]
    context_length: Option<u32>,
}

pub(crate) fn parse_model_list(body: &str) -> Result<ModelMap> {
    let response: ModelListResponse =
        serde_json::from_str(body).map_err(|e| Error::fetch(format!("malformed model list: {e}")))?;
    Ok(response
        .data
        .into_iter()
        .map(|m| {
            (
                m.id,
                ModelInfo {
                    display_name: m.name,
                    recommended: false,
                    generation: None,
                    context_window: m.context_length,
                },
            )
        })
        .collect())
}

fn bearer_token(config: &ProviderConfig) -> Option<String> {
    let field = match config.provider.as_str() {
        "openrouter" => "openRouterApiKey",
        _ => "openAiApiKey",
    };
    config.field_str(field).map(ToString::to_string)
}

fn catalog_endpoint(config: &ProviderConfig) -> Result<String> {
    // Explicit override first, so gateways and tests can point elsewhere.
    if let Some(url) = config.field_str("modelListUrl") {
        return Ok(url.to_string());
    }
    match config.provider.as_str() {
        "openrouter" => Ok("https://openrouter.ai/api/v1/models".to_string()),
        "openai" => Ok("https://api.openai.com/v1/models".to_string()),
        other => Err(Error::fetch(format!(
            "no remote model list endpoint for provider '{other}'"
        ))),
    }
}

/// Blocking HTTP fetcher with a fixed request timeout.
pub struct HttpModelFetcher {
    client: reqwest::blocking::Client,
}

impl HttpModelFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::fetch(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl ModelFetcher for HttpModelFetcher {
    fn fetch(&self, config: &ProviderConfig) -> Result<ModelMap> {
        let url = catalog_endpoint(config)?;
        debug!(provider = %config.provider, url = %url, "fetching model list");

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(token) = bearer_token(config) {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| Error::fetch(format!("request to {url} failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(format!("{url} returned {status}")));
        }
        let body = response
            .text()
            .map_err(|e| Error::fetch(format!("failed to read body from {url}: {e}")))?;
        parse_model_list(&body)
    }
}

/// Fetch the remote model list, converting any failure into `None`.
#[must_use]
pub fn resolve_router_models(
    fetcher: &dyn ModelFetcher,
    config: &ProviderConfig,
) -> Option<ModelMap> {
    match fetcher.fetch(config) {
        Ok(models) => {
            debug!(provider = %config.provider, count = models.len(), "model list fetched");
            Some(models)
        }
        Err(e) => {
            warn!(provider = %config.provider, error = %e, "failed to fetch models, using defaults if available");
            None
        }
    }
}
