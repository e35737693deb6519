//! The Cloud Observability MCP server: read-only tools over the Logging,
//! Monitoring, Trace and Error Reporting APIs.

use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::relay;
use crate::api::ApiClients;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListLogEntriesParams {
    /// Required. Names of one or more parent resources from which to retrieve
    /// log entries, e.g. `projects/[PROJECT_ID]` or a specific LogView. A
    /// maximum of 100 resources may be specified in a single request.
    pub resource_names: Vec<String>,
    /// Optional. A Logging query language filter, e.g. `severity="ERROR"`.
    /// An empty filter matches all entries in the listed resources.
    pub filter: Option<String>,
    /// Optional. "timestamp asc" (default) or "timestamp desc". Prefer
    /// "timestamp desc" when listing recently ingested entries.
    pub order_by: Option<String>,
    /// Optional. Maximum number of results to return. Default is 50.
    pub page_size: Option<u32>,
    /// Optional. nextPageToken from the previous response.
    pub page_token: Option<String>,
}

/// Shared shape of the parent-scoped Logging list calls.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoggingParentParams {
    /// Required. The parent resource to list from, e.g. `projects/[PROJECT_ID]`
    /// (buckets, views and log scopes additionally take a
    /// `/locations/[LOCATION_ID]` segment; `-` matches all locations).
    pub parent: String,
    /// Optional. Maximum number of results to return. Default is 50.
    pub page_size: Option<u32>,
    /// Optional. nextPageToken from the previous response.
    pub page_token: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMetricDescriptorsParams {
    /// Required. The project on which to execute the request, formatted as
    /// `projects/[PROJECT_ID_OR_NUMBER]`.
    pub name: String,
    /// Optional. A monitoring filter selecting which descriptors to return,
    /// e.g. `metric.type : "cpu"`. Empty returns all descriptors.
    pub filter: Option<String>,
    /// Optional. Maximum number of results to return.
    pub page_size: Option<u32>,
    /// Optional. nextPageToken from the previous response.
    pub page_token: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    /// Optional. Start of the interval (inclusive), RFC 3339.
    pub start_time: Option<String>,
    /// Required. End of the interval (inclusive), RFC 3339.
    pub end_time: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    /// Period in seconds used to align data points. Minimum 60.
    pub alignment_period: Option<String>,
    /// How points within an alignment period are combined, e.g. ALIGN_RATE,
    /// ALIGN_MEAN, ALIGN_PERCENTILE_99.
    pub per_series_aligner: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTimeSeriesParams {
    /// Required. The project, organization or folder on which to execute the
    /// request, e.g. `projects/[PROJECT_ID_OR_NUMBER]`.
    pub name: String,
    /// Required. A monitoring filter specifying which time series to return,
    /// e.g. `metric.type = "compute.googleapis.com/instance/cpu/usage_time"`.
    pub filter: String,
    /// Required. The time interval for which results should be returned.
    pub interval: TimeInterval,
    /// Optional. Alignment of data points; raw series are returned when
    /// omitted.
    pub aggregation: Option<Aggregation>,
    /// Optional. Maximum number of results to return.
    pub page_size: Option<u32>,
    /// Optional. nextPageToken from the previous response.
    pub page_token: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListAlertPoliciesParams {
    /// Required. The project whose alert policies are to be listed, formatted
    /// as `projects/[PROJECT_ID_OR_NUMBER]`.
    pub name: String,
    /// Optional. Criteria alert policies must meet to be included.
    pub filter: Option<String>,
    /// Optional. Comma-separated sort fields; prefix with `-` for descending.
    pub order_by: Option<String>,
    /// Optional. Maximum number of results to return.
    pub page_size: Option<u32>,
    /// Optional. nextPageToken from the previous response.
    pub page_token: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTracesParams {
    /// Required. The Google Cloud project ID.
    pub project_id: String,
    /// Optional. A trace filter, e.g. `latency:1s` or `root:main.api.HTTP`.
    pub filter: Option<String>,
    /// Optional. Sort field: trace_id, name, duration or start; append
    /// ` desc` for descending order.
    pub order_by: Option<String>,
    /// Optional. Maximum number of traces to return.
    pub page_size: Option<u32>,
    /// Optional. Token identifying the page of results to return.
    pub page_token: Option<String>,
    /// Optional. Start of the collection interval (inclusive), RFC 3339.
    pub start_time: Option<String>,
    /// Optional. End of the collection interval (inclusive), RFC 3339.
    pub end_time: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTraceParams {
    /// Required. The Google Cloud project ID.
    pub project_id: String,
    /// Required. The ID of the trace to retrieve.
    pub trace_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListGroupStatsParams {
    /// Required. The project resource name, written as
    /// `projects/{projectID}` or `projects/{projectNumber}`.
    pub project_name: String,
    /// Optional. The time range to query: PERIOD_1_HOUR, PERIOD_6_HOURS
    /// (default), PERIOD_1_DAY, PERIOD_1_WEEK or PERIOD_30_DAYS.
    pub time_range_period: Option<String>,
    /// Optional. Sort order: COUNT_DESC (default), LAST_SEEN_DESC,
    /// CREATED_DESC or AFFECTED_USERS_DESC.
    pub order: Option<String>,
    /// Optional. Maximum number of results to return per response.
    pub page_size: Option<u32>,
    /// Optional. A next_page_token from a previous response.
    pub page_token: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryRangeParams {
    /// Required. The project on which to execute the request, formatted as
    /// `projects/[PROJECT_ID_OR_NUMBER]`.
    pub name: String,
    /// Required. The Prometheus query string.
    pub query: String,
    /// Optional. Start of the query range, RFC 3339 or a Unix timestamp.
    pub start: Option<String>,
    /// Optional. End of the query range, RFC 3339 or a Unix timestamp.
    pub end: Option<String>,
    /// Optional. Step size for the query, a duration string such as "1m".
    pub step: Option<String>,
}

#[derive(Clone)]
pub struct ObservabilityService {
    clients: ApiClients,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ObservabilityService {
    pub fn new(clients: ApiClients) -> Self {
        Self {
            clients,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Use this as the primary tool to search and retrieve log entries from Google Cloud Logging. It's essential for debugging application behavior, finding specific error messages, or auditing events. The 'filter' is powerful and can be used to select logs by severity, resource type, text content, and more."
    )]
    async fn list_log_entries(
        &self,
        Parameters(p): Parameters<ListLogEntriesParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(
            self.clients
                .list_log_entries(p.resource_names, p.filter, p.order_by, p.page_size, p.page_token)
                .await,
        )
    }

    #[tool(
        description = "Use this as the primary tool to list the log names in a Google Cloud project. This is useful for discovering what logs are available for a project. Only logs which have log entries will be listed."
    )]
    async fn list_log_names(
        &self,
        Parameters(p): Parameters<LoggingParentParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(
            self.clients
                .list_log_names(p.parent, p.page_size, p.page_token)
                .await,
        )
    }

    #[tool(
        description = "Use this as the primary tool to list the log buckets in a Google Cloud project. Log buckets are containers that store and organize your log data. This tool is useful for understanding how your logs are stored and for managing your logging configurations."
    )]
    async fn list_buckets(
        &self,
        Parameters(p): Parameters<LoggingParentParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(
            self.clients
                .list_buckets(p.parent, p.page_size, p.page_token)
                .await,
        )
    }

    #[tool(
        description = "Use this as the primary tool to list the log views in a given log bucket. Log views provide fine-grained access control to the logs in your buckets. This is useful for managing who has access to which logs."
    )]
    async fn list_views(
        &self,
        Parameters(p): Parameters<LoggingParentParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(
            self.clients
                .list_views(p.parent, p.page_size, p.page_token)
                .await,
        )
    }

    #[tool(
        description = "Use this as the primary tool to list the log sinks in a Google Cloud project. Log sinks control how Cloud Logging routes your logs to supported destinations, such as Cloud Storage buckets, BigQuery datasets, or Pub/Sub topics. This is useful for understanding your logging export configurations."
    )]
    async fn list_sinks(
        &self,
        Parameters(p): Parameters<LoggingParentParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(
            self.clients
                .list_sinks(p.parent, p.page_size, p.page_token)
                .await,
        )
    }

    #[tool(
        description = "Use this as the primary tool to list the log scopes in a Google Cloud project. Log scopes allow you to query logs from multiple projects in a single view. This is useful for centralized logging across a large organization."
    )]
    async fn list_log_scopes(
        &self,
        Parameters(p): Parameters<LoggingParentParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(
            self.clients
                .list_log_scopes(p.parent, p.page_size, p.page_token)
                .await,
        )
    }

    #[tool(
        description = "Use this as the primary tool to discover the types of metrics available in a Google Cloud project. This is a good first step to understanding what data is available for monitoring and building dashboards or alerts."
    )]
    async fn list_metric_descriptors(
        &self,
        Parameters(p): Parameters<ListMetricDescriptorsParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(
            self.clients
                .list_metric_descriptors(p.name, p.filter, p.page_size, p.page_token)
                .await,
        )
    }

    #[tool(
        description = "Use this as the primary tool to retrieve metric data over a specific time period. This is the core tool for monitoring and observability, allowing you to get the actual data points for a given metric."
    )]
    async fn list_time_series(
        &self,
        Parameters(p): Parameters<ListTimeSeriesParams>,
    ) -> Result<CallToolResult, McpError> {
        let (alignment_period, per_series_aligner) = aggregation_params(p.aggregation);
        relay(
            self.clients
                .list_time_series(
                    p.name,
                    p.filter,
                    p.interval.start_time,
                    p.interval.end_time,
                    alignment_period,
                    per_series_aligner,
                    p.page_size,
                    p.page_token,
                )
                .await,
        )
    }

    #[tool(
        description = "Use this as the primary tool to list the alerting policies in a Google Cloud project. Alerting policies define the conditions under which you want to be notified about issues with your services. This is useful for understanding what alerts are currently configured."
    )]
    async fn list_alert_policies(
        &self,
        Parameters(p): Parameters<ListAlertPoliciesParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(
            self.clients
                .list_alert_policies(p.name, p.filter, p.order_by, p.page_size, p.page_token)
                .await,
        )
    }

    #[tool(
        description = "Use this as the primary tool to retrieve and examine distributed traces from Google Cloud Trace. Traces provide a detailed view of the path of a request as it travels through your application's services. This is essential for understanding latency issues and debugging complex, multi-service workflows. This will only return the root trace span, to gather full information call get_trace with that id."
    )]
    async fn list_traces(
        &self,
        Parameters(p): Parameters<ListTracesParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(
            self.clients
                .list_traces(
                    p.project_id,
                    p.filter,
                    p.order_by,
                    p.page_size,
                    p.page_token,
                    p.start_time,
                    p.end_time,
                )
                .await,
        )
    }

    #[tool(
        description = "Use this as the primary tool to retrieve a single distributed trace from Google Cloud Trace. This is often used as a follow on to list_traces to get full details on a specific trace."
    )]
    async fn get_trace(
        &self,
        Parameters(p): Parameters<GetTraceParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(self.clients.get_trace(p.project_id, p.trace_id).await)
    }

    #[tool(
        description = "Use this tool ONLY to find and analyze recurring stack traces in your application. It aggregates similar stack traces, providing statistics like the number of occurrences and the number of affected users. DO NOT use this tool for general error searches or to view individual error logs. For queries asking to \"find errors\", or \"show me errors\", you MUST use list_log_entries tool. CRITICAL: Default to other tooling for generic questions about errors."
    )]
    async fn list_group_stats(
        &self,
        Parameters(p): Parameters<ListGroupStatsParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(
            self.clients
                .list_group_stats(p.project_name, p.time_range_period, p.order, p.page_size, p.page_token)
                .await,
        )
    }

    #[tool(
        description = "Use this tool to query Prometheus metrics over a time range from Google Cloud Monitoring."
    )]
    async fn query_range(
        &self,
        Parameters(p): Parameters<QueryRangeParams>,
    ) -> Result<CallToolResult, McpError> {
        relay(
            self.clients
                .query_range(p.name, p.query, p.start, p.end, p.step)
                .await,
        )
    }
}

/// Flatten the optional aggregation object into its two query parameters.
/// An aggregation without an explicit alignment period gets the schema
/// default of 60 seconds; no aggregation at all sends neither parameter.
fn aggregation_params(aggregation: Option<Aggregation>) -> (Option<String>, Option<String>) {
    match aggregation {
        Some(agg) => (
            agg.alignment_period.or_else(|| Some("60".to_string())),
            agg.per_series_aligner,
        ),
        None => (None, None),
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for ObservabilityService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "cloud-observability-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Read-only access to Google Cloud Observability: Logging, Monitoring, \
                 Trace and Error Reporting. Start with list_log_entries for logs and \
                 list_time_series for metric data."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

/// Serve the observability service over stdio until the client disconnects.
pub async fn serve_stdio(clients: ApiClients) -> anyhow::Result<()> {
    let service = ObservabilityService::new(clients)
        .serve((tokio::io::stdin(), tokio::io::stdout()))
        .await?;
    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertises_all_thirteen_tools() {
        let service = ObservabilityService::new(ApiClients::new());
        let tools = service.tool_router.list_all();
        assert_eq!(tools.len(), 13);
        for name in [
            "list_log_entries",
            "list_log_names",
            "list_buckets",
            "list_views",
            "list_sinks",
            "list_log_scopes",
            "list_metric_descriptors",
            "list_time_series",
            "list_alert_policies",
            "list_traces",
            "get_trace",
            "list_group_stats",
            "query_range",
        ] {
            assert!(
                tools.iter().any(|t| t.name == name),
                "missing tool: {name}"
            );
        }
    }

    #[test]
    fn aggregation_alignment_period_defaults_to_sixty_seconds() {
        let (period, aligner) = aggregation_params(Some(Aggregation {
            alignment_period: None,
            per_series_aligner: Some("ALIGN_RATE".into()),
        }));
        assert_eq!(period.as_deref(), Some("60"));
        assert_eq!(aligner.as_deref(), Some("ALIGN_RATE"));

        let (period, aligner) = aggregation_params(None);
        assert!(period.is_none());
        assert!(aligner.is_none());
    }

    #[test]
    fn get_info_names_the_observability_server() {
        let info = ObservabilityService::new(ApiClients::new()).get_info();
        assert_eq!(info.server_info.name, "cloud-observability-mcp");
        assert!(info.capabilities.tools.is_some());
    }
}
