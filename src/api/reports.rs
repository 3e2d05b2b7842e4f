use serde_json::Value;

use crate::api::client::{Access, ApiClient};
use crate::api::response::Payload;
use crate::error::ApiResult;
use crate::models::{MonthlyReport, ReportMonth};

pub struct ReportApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReportApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// AI-generated summary for one month, returned as plain text/markdown
    pub async fn monthly(&self, month: ReportMonth) -> ApiResult<MonthlyReport> {
        let payload = self
            .client
            .get_with_query(
                "/admin/reports/llm-monthly",
                Access::Authenticated,
                &[("month", month.to_string())],
            )
            .await?;

        Ok(MonthlyReport {
            month,
            body: report_body(payload),
        })
    }

    /// Validates `YYYY-MM` locally; malformed input never reaches the network
    pub async fn monthly_str(&self, month: &str) -> ApiResult<MonthlyReport> {
        let month: ReportMonth = month.parse()?;
        self.monthly(month).await
    }
}

fn report_body(payload: Payload) -> String {
    match payload {
        Payload::Text(text) => text,
        Payload::Json(Value::String(text)) => text,
        // Some deployments wrap the report as {"report": "..."}
        Payload::Json(value) => match value.get("report").and_then(Value::as_str) {
            Some(report) => report.to_string(),
            None => value.to_string(),
        },
    }
}
