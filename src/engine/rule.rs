use crate::engine::action::Action;
use crate::engine::condition::{AttributeMap, Condition, ConditionLogic, evaluate_all};
use crate::engine::error::{EngineError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A named, prioritized fulfillment policy: conditions gate actions.
///
/// Rules are authored through external configuration tooling and stored as
/// JSON; the engine only reads them and writes back execution bookkeeping.
#[derive(Deserialize, Clone, Debug)]
pub struct Rule {
    pub id: String,
    pub name: String,
    /// Category tag for grouping in configuration UIs; not consulted during
    /// evaluation.
    #[serde(default)]
    pub rule_type: Option<String>,
    #[serde(default = "default_logic")]
    pub condition_logic: ConditionLogic,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Higher priority evaluates (and mutates order state) first
    #[serde(default)]
    pub priority: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub execution_count: u64,
    #[serde(default)]
    pub last_executed_at: Option<DateTime<Utc>>,
}

fn default_logic() -> ConditionLogic {
    ConditionLogic::And
}

fn default_active() -> bool {
    true
}

impl Rule {
    /// Load a rule from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str).map_err(EngineError::from_serde)
    }

    /// Load a rule from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json_str = fs::read_to_string(path).map_err(EngineError::from_io)?;
        Self::from_json(&json_str)
    }

    /// Check structural validity before a rule enters the store
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(EngineError::Validation("Rule id is required".to_string()));
        }
        if self.name.is_empty() {
            return Err(EngineError::Validation(format!(
                "Rule {} has no name",
                self.id
            )));
        }
        Ok(())
    }

    /// Evaluate this rule's conditions against an attribute snapshot.
    /// A rule with no conditions is a catch-all and always matches.
    pub fn matches(&self, attributes: &AttributeMap) -> bool {
        evaluate_all(&self.conditions, self.condition_logic, attributes)
    }
}
