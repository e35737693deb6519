//! Cloud Error Reporting API (v1beta1).

use super::{ApiClients, pretty_list, push_opt};
use crate::error::ApiError;

impl ApiClients {
    pub async fn list_group_stats(
        &self,
        project_name: String,
        time_range_period: Option<String>,
        order: Option<String>,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<String, ApiError> {
        // schema defaults: a six-hour window, most frequent groups first,
        // twenty results per page
        let mut query = vec![
            (
                "timeRange.period",
                time_range_period.unwrap_or_else(|| "PERIOD_6_HOURS".to_string()),
            ),
            (
                "order",
                order.unwrap_or_else(|| "COUNT_DESC".to_string()),
            ),
            ("pageSize", page_size.unwrap_or(20).to_string()),
        ];
        push_opt(&mut query, "pageToken", page_token);
        let url = format!(
            "{}/v1beta1/{project_name}/groupStats",
            self.endpoints.error_reporting
        );
        let value = self.get_json("list group stats", url, &query).await?;
        Ok(pretty_list(&value, "errorGroupStats"))
    }
}
