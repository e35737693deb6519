//! Thin clients for the Google Cloud Observability REST APIs.
//!
//! Every tool call maps to a single HTTP request; the response body is
//! relayed to the agent as pretty-printed JSON rather than deserialized
//! into typed structs. Endpoints and the token source are injected at
//! construction so tests can point the clients at a local mock server.

mod error_reporting;
mod logging;
mod monitoring;
mod trace;

use serde_json::Value;

use crate::error::ApiError;
use crate::gcloud;

/// Base URLs for each service, one field per API surface.
#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    pub logging: String,
    pub monitoring: String,
    pub trace: String,
    pub error_reporting: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            logging: "https://logging.googleapis.com".into(),
            monitoring: "https://monitoring.googleapis.com".into(),
            trace: "https://cloudtrace.googleapis.com".into(),
            error_reporting: "https://clouderrorreporting.googleapis.com".into(),
        }
    }
}

/// Where bearer tokens come from.
#[derive(Debug, Clone)]
pub enum TokenSource {
    /// Shell out to `gcloud auth print-access-token` per request.
    GcloudCli,
    /// A fixed token, for tests.
    Fixed(String),
}

impl TokenSource {
    async fn token(&self) -> anyhow::Result<String> {
        match self {
            TokenSource::GcloudCli => gcloud::print_access_token().await,
            TokenSource::Fixed(token) => Ok(token.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClients {
    http: reqwest::Client,
    endpoints: ApiEndpoints,
    token: TokenSource,
}

impl ApiClients {
    pub fn new() -> Self {
        Self::with(ApiEndpoints::default(), TokenSource::GcloudCli)
    }

    pub fn with(endpoints: ApiEndpoints, token: TokenSource) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
            token,
        }
    }

    async fn get_json(
        &self,
        operation: &'static str,
        url: String,
        query: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        let token = self
            .token
            .token()
            .await
            .map_err(|source| ApiError::Auth { operation, source })?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|source| ApiError::Request { operation, source })?;
        Self::into_value(operation, response).await
    }

    async fn post_json(
        &self,
        operation: &'static str,
        url: String,
        body: Value,
    ) -> Result<Value, ApiError> {
        let token = self
            .token
            .token()
            .await
            .map_err(|source| ApiError::Auth { operation, source })?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|source| ApiError::Request { operation, source })?;
        Self::into_value(operation, response).await
    }

    async fn into_value(
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<Value, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                operation,
                status,
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|source| ApiError::Request { operation, source })
    }
}

impl Default for ApiClients {
    fn default() -> Self {
        Self::new()
    }
}

/// Pretty-print one list field of a response, defaulting to `[]` when the
/// service omits it (empty result pages carry no field at all).
fn pretty_list(value: &Value, field: &str) -> String {
    let list = value.get(field).cloned().unwrap_or(Value::Array(Vec::new()));
    serde_json::to_string_pretty(&list).unwrap_or_default()
}

/// Pretty-print a whole response object, defaulting to `{}`.
fn pretty_object(value: Value) -> String {
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}

/// Append `(key, value)` to the query when the value is present.
fn push_opt(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(value) = value {
        query.push((key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_list_defaults_missing_field_to_empty_array() {
        assert_eq!(pretty_list(&json!({}), "entries"), "[]");
    }

    #[test]
    fn pretty_list_extracts_the_named_field() {
        let value = json!({"entries": [{"a": 1}], "nextPageToken": "t"});
        let text = pretty_list(&value, "entries");
        assert!(text.contains("\"a\": 1"));
        assert!(!text.contains("nextPageToken"));
    }

    #[test]
    fn push_opt_skips_absent_values() {
        let mut query = Vec::new();
        push_opt(&mut query, "filter", None);
        push_opt(&mut query, "orderBy", Some("timestamp desc".into()));
        assert_eq!(query, vec![("orderBy", "timestamp desc".to_string())]);
    }
}
