//! # Store Seam
//!
//! Trait interfaces for the three external collaborators the engine touches:
//! the rule store, the order store, and the append-only event log. Production
//! deployments adapt these to the hosted backend; the in-memory
//! implementations here back the test suite and serve as reference semantics.

use crate::engine::audit::EventLogEntry;
use crate::engine::error::{EngineError, Result};
use crate::engine::order::{Order, OrderPatch};
use crate::engine::rule::Rule;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Read side of the tenant rule sets plus execution bookkeeping writes
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Active rules for a tenant, ordered by priority descending.
    /// Inactive rules are excluded at the store, never filtered downstream.
    async fn active_rules(&self, tenant_id: &str) -> Result<Vec<Rule>>;

    /// Bump `execution_count` and stamp `last_executed_at` for one rule.
    ///
    /// The increment must happen store-side in a single operation (the SQL
    /// shape is `SET execution_count = execution_count + 1`), not as an
    /// application-level read-modify-write, so concurrent runs cannot lose
    /// increments.
    async fn record_execution(
        &self,
        tenant_id: &str,
        rule_id: &str,
        at: DateTime<Utc>,
    ) -> Result<()>;
}

/// Field-level read/write access to order records
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get(&self, order_id: &str) -> Result<Order>;

    /// Apply a partial update; unset patch fields leave the record untouched
    async fn apply(&self, order_id: &str, patch: OrderPatch) -> Result<()>;
}

/// Append-only sink for action execution audit records
#[async_trait]
pub trait EventLog: Send + Sync {
    async fn append(&self, entry: EventLogEntry) -> Result<()>;
}

/// In-memory rule store keyed by tenant
#[derive(Default)]
pub struct MemoryRuleStore {
    rules: Mutex<HashMap<String, Vec<Rule>>>,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a rule for a tenant. Structurally invalid rules are rejected at
    /// save time rather than surfacing mid-run.
    pub fn add_rule(&self, tenant_id: &str, rule: Rule) {
        if let Err(e) = rule.validate() {
            log::error!("Rejecting invalid rule {}: {}", rule.id, e);
            return;
        }
        let mut rules = self.rules.lock().unwrap();
        rules.entry(tenant_id.to_string()).or_default().push(rule);
    }

    /// Look up one rule by id, for bookkeeping assertions in tests
    pub fn rule(&self, tenant_id: &str, rule_id: &str) -> Option<Rule> {
        let rules = self.rules.lock().unwrap();
        rules
            .get(tenant_id)?
            .iter()
            .find(|r| r.id == rule_id)
            .cloned()
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn active_rules(&self, tenant_id: &str) -> Result<Vec<Rule>> {
        let rules = self.rules.lock().unwrap();
        let mut active: Vec<Rule> = rules
            .get(tenant_id)
            .map(|tenant_rules| {
                tenant_rules
                    .iter()
                    .filter(|r| r.is_active)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // Stable sort: equal priorities keep their configured order
        active.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(active)
    }

    async fn record_execution(
        &self,
        tenant_id: &str,
        rule_id: &str,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let mut rules = self.rules.lock().unwrap();
        let rule = rules
            .get_mut(tenant_id)
            .and_then(|tenant_rules| tenant_rules.iter_mut().find(|r| r.id == rule_id))
            .ok_or_else(|| EngineError::Rule(format!("Rule not found: {}", rule_id)))?;

        // Increment under the same lock as the lookup
        rule.execution_count += 1;
        rule.last_executed_at = Some(at);
        Ok(())
    }
}

/// In-memory order store keyed by order id
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: Mutex<HashMap<String, Order>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, order: Order) {
        let mut orders = self.orders.lock().unwrap();
        orders.insert(order.id.clone(), order);
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn get(&self, order_id: &str) -> Result<Order> {
        let orders = self.orders.lock().unwrap();
        orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| EngineError::OrderNotFound(order_id.to_string()))
    }

    async fn apply(&self, order_id: &str, patch: OrderPatch) -> Result<()> {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| EngineError::OrderNotFound(order_id.to_string()))?;
        patch.apply_to(order);
        Ok(())
    }
}

/// In-memory append-only event log
#[derive(Default)]
pub struct MemoryEventLog {
    entries: Mutex<Vec<EventLogEntry>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<EventLogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventLog for MemoryEventLog {
    async fn append(&self, entry: EventLogEntry) -> Result<()> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::order::OrderStatus;

    fn rule_json(id: &str, priority: i64, active: bool) -> Rule {
        Rule::from_json(&format!(
            r#"{{"id": "{}", "name": "{}", "priority": {}, "is_active": {}}}"#,
            id, id, priority, active
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_active_rules_filtered_and_sorted() {
        let store = MemoryRuleStore::new();
        store.add_rule("tenant_1", rule_json("low", 1, true));
        store.add_rule("tenant_1", rule_json("inactive", 99, false));
        store.add_rule("tenant_1", rule_json("high", 10, true));
        store.add_rule("tenant_2", rule_json("other_tenant", 50, true));

        let rules = store.active_rules("tenant_1").await.unwrap();
        let ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "low"]);
    }

    #[tokio::test]
    async fn test_record_execution_increments() {
        let store = MemoryRuleStore::new();
        store.add_rule("tenant_1", rule_json("r1", 1, true));

        let now = Utc::now();
        store.record_execution("tenant_1", "r1", now).await.unwrap();
        store.record_execution("tenant_1", "r1", now).await.unwrap();

        let rule = store.rule("tenant_1", "r1").unwrap();
        assert_eq!(rule.execution_count, 2);
        assert_eq!(rule.last_executed_at, Some(now));

        let missing = store.record_execution("tenant_1", "nope", now).await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn test_order_store_patch_roundtrip() {
        let store = MemoryOrderStore::new();
        store.insert(Order::new("ord_1").with_cost_price(12.5));

        store
            .apply("ord_1", OrderPatch::new().status(OrderStatus::PendingReview))
            .await
            .unwrap();

        let order = store.get("ord_1").await.unwrap();
        assert_eq!(order.status, OrderStatus::PendingReview);
        assert_eq!(order.cost_price, Some(12.5));

        assert!(store.get("ord_missing").await.is_err());
    }
}
