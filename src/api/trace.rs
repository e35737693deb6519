//! Cloud Trace API (v1).

use super::{ApiClients, pretty_list, pretty_object, push_opt};
use crate::error::ApiError;

impl ApiClients {
    /// Always requests the ROOTSPAN view: MINIMAL carries too little to be
    /// useful and COMPLETE can overwhelm an agent's context.
    #[allow(clippy::too_many_arguments)]
    pub async fn list_traces(
        &self,
        project_id: String,
        filter: Option<String>,
        order_by: Option<String>,
        page_size: Option<u32>,
        page_token: Option<String>,
        start_time: Option<String>,
        end_time: Option<String>,
    ) -> Result<String, ApiError> {
        let mut query = vec![
            ("view", "ROOTSPAN".to_string()),
            ("pageSize", page_size.unwrap_or(50).to_string()),
        ];
        push_opt(&mut query, "filter", filter);
        push_opt(&mut query, "orderBy", order_by);
        push_opt(&mut query, "pageToken", page_token);
        push_opt(&mut query, "startTime", start_time);
        push_opt(&mut query, "endTime", end_time);
        let url = format!("{}/v1/projects/{project_id}/traces", self.endpoints.trace);
        let value = self.get_json("list traces", url, &query).await?;
        Ok(pretty_list(&value, "traces"))
    }

    pub async fn get_trace(
        &self,
        project_id: String,
        trace_id: String,
    ) -> Result<String, ApiError> {
        let url = format!(
            "{}/v1/projects/{project_id}/traces/{trace_id}",
            self.endpoints.trace
        );
        let value = self.get_json("get trace", url, &[]).await?;
        Ok(pretty_object(value))
    }
}
