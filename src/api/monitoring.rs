//! Cloud Monitoring API (v3) and the managed Prometheus query endpoint.

use serde_json::json;

use super::{ApiClients, pretty_list, pretty_object, push_opt};
use crate::error::ApiError;

impl ApiClients {
    pub async fn list_metric_descriptors(
        &self,
        name: String,
        filter: Option<String>,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<String, ApiError> {
        let mut query = vec![("pageSize", page_size.unwrap_or(50).to_string())];
        push_opt(&mut query, "filter", filter);
        push_opt(&mut query, "pageToken", page_token);
        let url = format!("{}/v3/{name}/metricDescriptors", self.endpoints.monitoring);
        let value = self.get_json("list metric descriptors", url, &query).await?;
        Ok(pretty_list(&value, "metricDescriptors"))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn list_time_series(
        &self,
        name: String,
        filter: String,
        interval_start_time: Option<String>,
        interval_end_time: String,
        aggregation_alignment_period: Option<String>,
        aggregation_per_series_aligner: Option<String>,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<String, ApiError> {
        let mut query = vec![
            ("filter", filter),
            ("interval.endTime", interval_end_time),
        ];
        push_opt(&mut query, "interval.startTime", interval_start_time);
        push_opt(
            &mut query,
            "aggregation.alignmentPeriod",
            aggregation_alignment_period,
        );
        push_opt(
            &mut query,
            "aggregation.perSeriesAligner",
            aggregation_per_series_aligner,
        );
        query.push(("pageSize", page_size.unwrap_or(50).to_string()));
        push_opt(&mut query, "pageToken", page_token);
        let url = format!("{}/v3/{name}/timeSeries", self.endpoints.monitoring);
        let value = self.get_json("list time series", url, &query).await?;
        Ok(pretty_list(&value, "timeSeries"))
    }

    pub async fn list_alert_policies(
        &self,
        name: String,
        filter: Option<String>,
        order_by: Option<String>,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<String, ApiError> {
        let mut query = vec![("pageSize", page_size.unwrap_or(50).to_string())];
        push_opt(&mut query, "filter", filter);
        push_opt(&mut query, "orderBy", order_by);
        push_opt(&mut query, "pageToken", page_token);
        let url = format!("{}/v3/{name}/alertPolicies", self.endpoints.monitoring);
        let value = self.get_json("list alert policies", url, &query).await?;
        Ok(pretty_list(&value, "alertPolicies"))
    }

    /// PromQL range query. The managed service only exposes the `global`
    /// location, so it is fixed in the path.
    pub async fn query_range(
        &self,
        name: String,
        query: String,
        start: Option<String>,
        end: Option<String>,
        step: Option<String>,
    ) -> Result<String, ApiError> {
        let body = json!({
            "query": query,
            "start": start,
            "end": end,
            "step": step,
        });
        let url = format!(
            "{}/v1/{name}/location/global/prometheus/api/v1/query_range",
            self.endpoints.monitoring
        );
        let value = self.post_json("query range", url, body).await?;
        Ok(pretty_object(value))
    }
}
