//! REST document collection client.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::remote::location_range;
use super::{RemoteCollection, RemoteDocument, StoreError};

/// Remote collection reached over HTTP.
///
/// Talks to a document service exposing
/// `{base}/collections/{name}/documents[/{id}]`. Range reads pass the
/// bounds as `field`, `gte` and `lte` query parameters; merges use `PATCH`,
/// full writes `PUT`.
#[derive(Debug)]
pub struct HttpCollection {
    client: reqwest::Client,
    base_url: Url,
    collection: String,
    api_token: Option<String>,
}

/// Response from the documents listing endpoint.
#[derive(Debug, Deserialize)]
struct DocumentsResponse {
    #[serde(default)]
    documents: Vec<RemoteDocument>,
}

impl HttpCollection {
    pub fn new(base_url: Url, collection: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            collection: collection.into(),
            api_token,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/collections/{}/documents",
            self.base_url.as_str().trim_end_matches('/'),
            urlencoding::encode(&self.collection)
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url(), urlencoding::encode(id))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<reqwest::Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Remote {
                reason: format!("{action} request to '{}' failed: {e}", self.collection),
            })?;

        if !response.status().is_success() {
            return Err(StoreError::Remote {
                reason: format!("{action} on '{}' returned HTTP {}", self.collection, response.status()),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl RemoteCollection for HttpCollection {
    fn name(&self) -> &str {
        &self.collection
    }

    async fn query(&self, location_prefix: Option<&str>) -> Result<Vec<RemoteDocument>, StoreError> {
        let mut request = self.client.get(self.documents_url());
        if let Some(prefix) = location_prefix {
            let (lower, upper) = location_range(prefix);
            request = request.query(&[
                ("field", "location"),
                ("gte", lower.as_str()),
                ("lte", upper.as_str()),
            ]);
        }

        let response = self.send(request, "query").await?;
        let body: DocumentsResponse = response.json().await.map_err(|e| StoreError::Remote {
            reason: format!("query response from '{}' unreadable: {e}", self.collection),
        })?;

        debug!(
            collection = %self.collection,
            documents = body.documents.len(),
            "Remote query completed"
        );
        Ok(body.documents)
    }

    async fn merge(&self, id: &str, data: serde_json::Value) -> Result<(), StoreError> {
        let request = self.client.patch(self.document_url(id)).json(&data);
        self.send(request, "merge").await?;
        Ok(())
    }

    async fn put(&self, id: &str, data: serde_json::Value) -> Result<(), StoreError> {
        let request = self.client.put(self.document_url(id)).json(&data);
        self.send(request, "put").await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .authorize(self.client.delete(self.document_url(id)))
            .send()
            .await
            .map_err(|e| StoreError::Remote {
                reason: format!("delete request to '{}' failed: {e}", self.collection),
            })?;

        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(StoreError::Remote {
                reason: format!("delete on '{}' returned HTTP {status}", self.collection),
            })
        }
    }
}
