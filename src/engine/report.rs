use crate::engine::condition::AttributeMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Invocation contract: one order, its attribute snapshot, tenant scoping
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    pub order_id: String,
    /// Flat attribute map read by condition evaluation for the whole run
    pub order_data: AttributeMap,
    pub user_id: String,
    #[serde(default)]
    pub dry_run: bool,
}

/// A rule whose conditions matched the attribute snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchedRule {
    pub id: String,
    pub name: String,
    pub priority: i64,
}

/// Outcome of one executed action, as surfaced in the run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutedAction {
    pub rule_id: String,
    pub action_type: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Full report of one evaluation run.
///
/// `executed_actions` is empty for dry runs; `matched_rules` is populated in
/// both modes so dry run can preview which rules would fire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub order_id: String,
    pub dry_run: bool,
    pub matched_rules: Vec<MatchedRule>,
    pub executed_actions: Vec<ExecutedAction>,
    pub total_rules_checked: usize,
}

/// Response envelope: either a full report or a single systemic error.
/// There is no partial state - a run that started executing either finishes
/// and reports everything (including per-action failures), or the failure
/// happened before any rule ran.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RunResponse {
    Success {
        success: bool,
        #[serde(flatten)]
        report: RunReport,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl RunResponse {
    pub fn success(report: RunReport) -> Self {
        RunResponse::Success {
            success: true,
            report,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        RunResponse::Failure {
            success: false,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunResponse::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_run_request_dry_run_defaults_false() {
        let request: RunRequest = serde_json::from_value(json!({
            "order_id": "ord_1",
            "order_data": {"country": "FR", "total_amount": 120},
            "user_id": "tenant_1"
        }))
        .unwrap();

        assert!(!request.dry_run);
        assert_eq!(request.order_data["country"], json!("FR"));
    }

    #[test]
    fn test_success_response_shape() {
        let response = RunResponse::success(RunReport {
            order_id: "ord_1".to_string(),
            dry_run: false,
            matched_rules: vec![MatchedRule {
                id: "r1".to_string(),
                name: "Rule one".to_string(),
                priority: 10,
            }],
            executed_actions: vec![],
            total_rules_checked: 3,
        });

        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["success"], json!(true));
        assert_eq!(serialized["order_id"], json!("ord_1"));
        assert_eq!(serialized["total_rules_checked"], json!(3));
        assert_eq!(serialized["matched_rules"][0]["priority"], json!(10));
    }

    #[test]
    fn test_failure_response_shape() {
        let response = RunResponse::failure("Store error: rule fetch failed");
        assert!(!response.is_success());

        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["success"], json!(false));
        assert_eq!(serialized["error"], json!("Store error: rule fetch failed"));
        assert!(serialized.get("matched_rules").is_none());
    }
}
