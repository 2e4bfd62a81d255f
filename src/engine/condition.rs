use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Flat snapshot of order fields supplied by the caller for one run.
///
/// Values are strings or numbers per the invocation contract. The snapshot is
/// read-only for the whole run: actions mutate the persisted order record,
/// never this map, so later rules do not observe fields earlier rules wrote.
pub type AttributeMap = HashMap<String, Value>;

/// How a rule combines its conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConditionLogic {
    And,
    Or,
}

/// Comparison operator for a single condition.
///
/// Unknown operator strings deserialize into `Other` rather than failing the
/// whole rule set; they evaluate to false with a diagnostic. One malformed
/// condition must never abort evaluation of sibling rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    StartsWith,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    #[serde(untagged)]
    Other(String),
}

/// One field/operator/value comparison against the order attribute map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

impl Condition {
    pub fn new(
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Evaluate this condition against an attribute snapshot.
    ///
    /// A missing or null field is false, never an error. String comparisons
    /// are case-insensitive; numeric comparisons coerce both sides to f64 and
    /// are false when either side does not parse.
    pub fn evaluate(&self, attributes: &AttributeMap) -> bool {
        let field_value = match attributes.get(&self.field) {
            Some(v) if !v.is_null() => v,
            _ => return false,
        };

        match &self.operator {
            Operator::Equals => lowered(field_value) == self.value.to_lowercase(),
            Operator::NotEquals => lowered(field_value) != self.value.to_lowercase(),
            Operator::Contains => lowered(field_value).contains(&self.value.to_lowercase()),
            Operator::StartsWith => {
                lowered(field_value).starts_with(&self.value.to_lowercase())
            }
            Operator::GreaterThan => self.compare_numeric(field_value, |a, b| a > b),
            Operator::LessThan => self.compare_numeric(field_value, |a, b| a < b),
            Operator::GreaterOrEqual => self.compare_numeric(field_value, |a, b| a >= b),
            Operator::LessOrEqual => self.compare_numeric(field_value, |a, b| a <= b),
            Operator::Other(op) => {
                warn!(
                    "Unknown condition operator '{}' on field '{}' - treating as no match",
                    op, self.field
                );
                false
            }
        }
    }

    fn compare_numeric(&self, field_value: &Value, cmp: fn(f64, f64) -> bool) -> bool {
        match (as_number(field_value), self.value.trim().parse::<f64>().ok()) {
            // NaN literals parse; the comparison itself rejects them
            (Some(lhs), Some(rhs)) => cmp(lhs, rhs),
            _ => false,
        }
    }
}

fn lowered(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_lowercase(),
        other => other.to_string().to_lowercase(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Combine a rule's conditions under its logic operator.
///
/// An empty condition list is always true regardless of the operator: a rule
/// with no conditions is a catch-all. Both AND and OR short-circuit.
pub fn evaluate_all(
    conditions: &[Condition],
    logic: ConditionLogic,
    attributes: &AttributeMap,
) -> bool {
    if conditions.is_empty() {
        return true;
    }

    match logic {
        ConditionLogic::And => conditions.iter().all(|c| c.evaluate(attributes)),
        ConditionLogic::Or => conditions.iter().any(|c| c.evaluate(attributes)),
    }
}
