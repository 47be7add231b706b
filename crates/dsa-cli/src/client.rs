//! HTTP client for the proposals API
//!
//! Implements the editor's category source and proposal store over REST.

use dsa_core::{CategorySource, ProposalStore, SavedEntity, StoreError};
use dsa_model::ProposalDraft;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::Config;

/// API client for proposal endpoints
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

/// Body shapes the API answers with
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryList {
    Named { categories: Vec<String> },
    Plain(Vec<String>),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    /// Creates a new API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.editor.submit_timeout())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T, StoreError> {
        let response = self
            .authorized(req)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| StoreError::Unavailable(format!("Failed to parse response: {e}")))
        } else {
            Err(rejection(response, what).await)
        }
    }
}

fn data_structure_path(slug: &str) -> String {
    format!("/api/data-structures/{slug}")
}

async fn rejection(response: Response, what: &str) -> StoreError {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return StoreError::NotFound(what.to_string());
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%status, body = %body, "API error");
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message.or(b.error));
    if status.is_server_error() && message.is_none() {
        return StoreError::Unavailable(format!("API error ({status})"));
    }
    StoreError::Rejected { message }
}

#[async_trait::async_trait]
impl CategorySource for ApiClient {
    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        let req = self.client.get(self.url("/api/categories"));
        let list: Envelope<CategoryList> = self.send(req, "categories").await?;
        Ok(match list.into_inner() {
            CategoryList::Named { categories } | CategoryList::Plain(categories) => categories,
        })
    }
}

#[async_trait::async_trait]
impl ProposalStore for ApiClient {
    async fn fetch(&self, slug: &str) -> Result<SavedEntity, StoreError> {
        let req = self.client.get(self.url(&format!("/api/proposals/{slug}")));
        let entity: Envelope<SavedEntity> = self.send(req, &format!("proposal '{slug}'")).await?;
        Ok(entity.into_inner())
    }

    async fn fetch_data_structure(&self, slug: &str) -> Result<SavedEntity, StoreError> {
        let req = self.client.get(self.url(&data_structure_path(slug)));
        let entity: Envelope<SavedEntity> =
            self.send(req, &format!("data structure '{slug}'")).await?;
        Ok(entity.into_inner())
    }

    async fn create(&self, draft: &ProposalDraft) -> Result<SavedEntity, StoreError> {
        let req = self.client.post(self.url("/api/proposals")).json(draft);
        let entity: Envelope<SavedEntity> = self.send(req, "proposals").await?;
        Ok(entity.into_inner())
    }

    async fn update(&self, slug: &str, draft: &ProposalDraft) -> Result<SavedEntity, StoreError> {
        let req = self
            .client
            .put(self.url(&format!("/api/proposals/{slug}")))
            .json(draft);
        let entity: Envelope<SavedEntity> = self.send(req, &format!("proposal '{slug}'")).await?;
        Ok(entity.into_inner())
    }
}
