//! Cloud Logging API (v2).

use serde_json::json;

use super::{ApiClients, pretty_list, push_opt};
use crate::error::ApiError;

impl ApiClients {
    /// POST `v2/entries:list`. The only Logging call that takes a body.
    pub async fn list_log_entries(
        &self,
        resource_names: Vec<String>,
        filter: Option<String>,
        order_by: Option<String>,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<String, ApiError> {
        let body = json!({
            "resourceNames": resource_names,
            "filter": filter,
            "orderBy": order_by.unwrap_or_else(|| "timestamp asc".to_string()),
            "pageSize": page_size.unwrap_or(50),
            "pageToken": page_token,
        });
        let url = format!("{}/v2/entries:list", self.endpoints.logging);
        let value = self.post_json("list log entries", url, body).await?;
        Ok(pretty_list(&value, "entries"))
    }

    pub async fn list_log_names(
        &self,
        parent: String,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<String, ApiError> {
        self.logging_collection("list log names", &parent, "logs", "logNames", page_size, page_token)
            .await
    }

    pub async fn list_buckets(
        &self,
        parent: String,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<String, ApiError> {
        self.logging_collection("list log buckets", &parent, "buckets", "buckets", page_size, page_token)
            .await
    }

    pub async fn list_views(
        &self,
        parent: String,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<String, ApiError> {
        self.logging_collection("list log views", &parent, "views", "views", page_size, page_token)
            .await
    }

    pub async fn list_sinks(
        &self,
        parent: String,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<String, ApiError> {
        self.logging_collection("list log sinks", &parent, "sinks", "sinks", page_size, page_token)
            .await
    }

    pub async fn list_log_scopes(
        &self,
        parent: String,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<String, ApiError> {
        self.logging_collection(
            "list log scopes",
            &parent,
            "logScopes",
            "logScopes",
            page_size,
            page_token,
        )
        .await
    }

    /// GET `v2/{parent}/{collection}` with pagination, returning one field.
    async fn logging_collection(
        &self,
        operation: &'static str,
        parent: &str,
        collection: &str,
        field: &str,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<String, ApiError> {
        // pageSize defaults to 50, as the published tool schemas do
        let mut query = vec![("pageSize", page_size.unwrap_or(50).to_string())];
        push_opt(&mut query, "pageToken", page_token);
        let url = format!("{}/v2/{parent}/{collection}", self.endpoints.logging);
        let value = self.get_json(operation, url, &query).await?;
        Ok(pretty_list(&value, field))
    }
}
