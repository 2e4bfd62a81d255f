use crate::engine::executor::ActionOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Append-only audit record for one action attempt.
///
/// One entry is written per action execution regardless of outcome, and
/// entries are never mutated or re-read by the engine - they exist purely
/// for audit and observability.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EventLogEntry {
    pub id: String,
    pub order_id: Arc<str>,
    pub rule_id: Arc<str>,
    pub action_type: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl EventLogEntry {
    /// Build an entry from an action outcome, stamped with the current time
    pub fn record(
        order_id: &str,
        rule_id: &str,
        action_type: &str,
        outcome: &ActionOutcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            order_id: Arc::from(order_id),
            rule_id: Arc::from(rule_id),
            action_type: action_type.to_string(),
            success: outcome.success,
            result: outcome.result.clone(),
            error: outcome.error.clone(),
            timestamp: Utc::now(),
        }
    }
}
