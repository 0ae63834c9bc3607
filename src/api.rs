//! PokeAPI client: catalog listing plus fan-out detail enrichment

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use futures_util::future::try_join_all;
use serde::Deserialize;
use tracing::debug;

use crate::state::{EnrichedItem, Summary};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected response from {url}: {message}")]
    Parse { url: String, message: String },
    #[error("detail task failed: {0}")]
    Task(String),
}

/// Anything that can GET a URL and hand back the body.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// `CatalogSource` over a shared reqwest client.
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl Default for HttpSource {
    fn default() -> Self {
        Self {
            client: http_client().clone(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Request {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await.map_err(|err| FetchError::Request {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct CatalogResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct DetailResponse {
    name: String,
    sprites: serde_json::Value,
    types: Vec<TypeSlot>,
    stats: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_info: TypeName,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeName {
    name: String,
}

#[derive(Clone)]
pub struct PokeApi {
    source: Arc<dyn CatalogSource>,
    base_url: String,
}

impl PokeApi {
    pub fn new(source: Arc<dyn CatalogSource>, base_url: impl Into<String>) -> Self {
        Self {
            source,
            base_url: base_url.into(),
        }
    }

    pub fn http(base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpSource::default()), base_url)
    }

    pub fn catalog_url(&self, limit: usize) -> String {
        format!("{}/pokemon?limit={limit}", self.base_url)
    }

    pub async fn fetch_catalog(&self, limit: usize) -> Result<Vec<Summary>, FetchError> {
        let url = self.catalog_url(limit);
        let response: CatalogResponse = fetch_json(self.source.as_ref(), &url).await?;
        Ok(response
            .results
            .into_iter()
            .map(|entry| Summary {
                name: entry.name,
                detail_url: entry.url,
            })
            .collect())
    }

    /// Fetch every detail URL at once and keep catalog order.
    ///
    /// The first failure fails the whole batch. Remaining requests keep
    /// running detached and their results are dropped.
    pub async fn enrich(&self, summaries: &[Summary]) -> Result<Vec<EnrichedItem>, FetchError> {
        let handles: Vec<_> = summaries
            .iter()
            .map(|summary| {
                let source = Arc::clone(&self.source);
                let url = summary.detail_url.clone();
                tokio::spawn(async move { fetch_detail(source.as_ref(), &url).await })
            })
            .collect();

        try_join_all(handles.into_iter().map(|handle| async move {
            handle
                .await
                .map_err(|err| FetchError::Task(err.to_string()))?
        }))
        .await
    }

    pub async fn load_catalog(&self, limit: usize) -> Result<Vec<EnrichedItem>, FetchError> {
        let summaries = self.fetch_catalog(limit).await?;
        debug!(count = summaries.len(), "catalog listed");
        self.enrich(&summaries).await
    }
}

async fn fetch_detail(source: &dyn CatalogSource, url: &str) -> Result<EnrichedItem, FetchError> {
    let response: DetailResponse = fetch_json(source, url).await?;
    Ok(enriched_from_detail(response))
}

fn enriched_from_detail(response: DetailResponse) -> EnrichedItem {
    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect::<Vec<_>>()
        .join(", ");
    EnrichedItem {
        name: response.name,
        image_url: pointer_string(&response.sprites, "/front_default"),
        types,
        stats: response.stats,
        sprites: response.sprites,
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    source: &dyn CatalogSource,
    url: &str,
) -> Result<T, FetchError> {
    let bytes = source.get_bytes(url).await?;
    parse_json(url, &bytes)
}

fn parse_json<T: serde::de::DeserializeOwned>(url: &str, bytes: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(bytes).map_err(|err| FetchError::Parse {
        url: url.to_string(),
        message: err.to_string(),
    })
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
