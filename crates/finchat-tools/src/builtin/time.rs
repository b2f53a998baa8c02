//! Current-time tool (Asia/Shanghai)
//!
//! Market analysis is time-sensitive: the model must know "today" to reason
//! about "latest earnings" or "recent policy". Agents both expose this as a
//! callable tool and interpolate the report into their instructions.

use crate::Tool;
use async_trait::async_trait;
use chrono::{FixedOffset, Utc};
use finchat_core::Result;
use serde_json::{Value, json};

/// Shanghai is UTC+8 year-round (no DST)
const SHANGHAI_OFFSET_SECS: i32 = 8 * 3600;

/// Render the current Shanghai time as a Chinese-language report
///
/// Shape matches what the prompts expect, e.g.
/// `当前时间是 2025年08月06日 15:04:05 (上海时间)`.
pub fn current_time_report() -> String {
    let offset = FixedOffset::east_opt(SHANGHAI_OFFSET_SECS).expect("UTC+8 is a valid offset");
    let now = Utc::now().with_timezone(&offset);
    format!("当前时间是 {} (上海时间)", now.format("%Y年%m月%d日 %H:%M:%S"))
}

/// Tool reporting the current time in the Shanghai timezone
#[derive(Debug, Default)]
pub struct CurrentTimeTool;

impl CurrentTimeTool {
    /// Create a new current-time tool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for CurrentTimeTool {
    async fn execute(&self, _params: Value) -> Result<Value> {
        Ok(json!({
            "status": "success",
            "report": current_time_report(),
        }))
    }

    fn name(&self) -> &str {
        "get_current_time"
    }

    fn description(&self) -> &str {
        "获取当前时间（上海时区）。Get the current date and time in the Asia/Shanghai timezone."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format() {
        let report = current_time_report();
        assert!(report.starts_with("当前时间是 "));
        assert!(report.ends_with("(上海时间)"));
        assert!(report.contains('年'));
        assert!(report.contains('月'));
        assert!(report.contains('日'));
    }

    #[tokio::test]
    async fn test_tool_execution() {
        let tool = CurrentTimeTool::new();
        let result = tool.execute(json!({})).await.unwrap();

        assert_eq!(result["status"], "success");
        assert!(result["report"].as_str().unwrap().contains("上海时间"));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = CurrentTimeTool::new();
        assert_eq!(tool.name(), "get_current_time");
        assert_eq!(tool.input_schema()["type"], "object");
    }
}
