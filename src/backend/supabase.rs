//! Hosted data service client
//!
//! HTTP client for the Supabase REST (PostgREST) endpoint that stores
//! entries, comments and reactions.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;

use super::error::{BackendError, BackendResult};
use super::query::{Insert, Query};
use super::Backend;
use crate::config::SiteConfig;

/// REST client for the hosted data service
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a client from the two site configuration strings
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    /// REST endpoint for a table
    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Attach the key headers every request needs
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    /// Turn a non-success response into an API error
    async fn check(response: Response) -> BackendResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status.to_string()
                } else {
                    text
                }
            });

        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait(?Send)]
impl Backend for SupabaseClient {
    async fn select(&self, query: &Query) -> BackendResult<Vec<Value>> {
        let url = format!(
            "{}?{}",
            self.table_url(query.table.name()),
            query.to_query_string()
        );
        tracing::debug!(table = %query.table, url = %url, "select");

        let response = self.authorize(self.client.get(&url)).send().await?;
        let response = Self::check(response).await?;

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn insert(&self, insert: &Insert) -> BackendResult<Vec<Value>> {
        let url = self.table_url(insert.table.name());
        tracing::debug!(table = %insert.table, rows = insert.rows.len(), "insert");

        let prefer = if insert.returning {
            "return=representation"
        } else {
            "return=minimal"
        };

        let response = self
            .authorize(self.client.post(&url))
            .header("Prefer", prefer)
            .json(&insert.rows)
            .send()
            .await?;
        let response = Self::check(response).await?;

        if !insert.returning {
            return Ok(Vec::new());
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// PostgREST error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}
