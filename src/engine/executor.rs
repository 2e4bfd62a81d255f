//! # Action Execution Module
//!
//! Executes a single action against the order store. Failures never escape as
//! `Err`: every path collapses into a structured [`ActionOutcome`] so the
//! orchestrator can log it and continue with sibling actions and later rules.

use crate::engine::action::Action;
use crate::engine::order::{OrderPatch, OrderStatus};
use crate::engine::store::OrderStore;
use log::debug;
use serde_json::{Value, json};
use std::sync::Arc;

/// Structured result of one action attempt
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub success: bool,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl ActionOutcome {
    pub fn ok(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Executes actions against the order record store.
///
/// Holds the order store; the rule and event-log stores stay with the
/// orchestrator, which owns logging and bookkeeping around each call.
pub struct ActionExecutor {
    orders: Arc<dyn OrderStore>,
}

impl ActionExecutor {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Execute exactly one action for an order.
    ///
    /// Store failures are folded into the outcome alongside config and
    /// prerequisite failures; no mutation happens on any failure path.
    pub async fn execute(&self, action: &Action, order_id: &str) -> ActionOutcome {
        debug!("Executing action {} for order {}", action.kind(), order_id);

        match action {
            Action::AssignSupplier { config, .. } => {
                let Some(supplier_id) = &config.supplier_id else {
                    return ActionOutcome::fail("No supplier_id provided in action config");
                };
                match self
                    .orders
                    .apply(order_id, OrderPatch::new().supplier_id(supplier_id))
                    .await
                {
                    Ok(()) => ActionOutcome::ok(json!({ "supplier_id": supplier_id })),
                    Err(e) => ActionOutcome::fail(e.to_string()),
                }
            }

            Action::ApplyMargin { config, .. } => {
                let Some(margin_percent) = config.margin_percent else {
                    return ActionOutcome::fail("No margin_percent provided in action config");
                };
                let order = match self.orders.get(order_id).await {
                    Ok(order) => order,
                    Err(e) => return ActionOutcome::fail(e.to_string()),
                };
                let Some(cost_price) = order.cost_price else {
                    return ActionOutcome::fail("No cost_price found");
                };

                // The margin percentage is what gets persisted; the computed
                // price is reported for audit but pricing stays derived.
                let new_price = cost_price * (1.0 + margin_percent / 100.0);
                match self
                    .orders
                    .apply(order_id, OrderPatch::new().profit_margin(margin_percent))
                    .await
                {
                    Ok(()) => ActionOutcome::ok(json!({
                        "margin_percent": margin_percent,
                        "new_price": new_price,
                    })),
                    Err(e) => ActionOutcome::fail(e.to_string()),
                }
            }

            Action::SetPrice { config, .. } => {
                let Some(price) = config.price else {
                    return ActionOutcome::fail("No price provided in action config");
                };
                match self
                    .orders
                    .apply(order_id, OrderPatch::new().total_amount(price))
                    .await
                {
                    Ok(()) => ActionOutcome::ok(json!({ "total_amount": price })),
                    Err(e) => ActionOutcome::fail(e.to_string()),
                }
            }

            // Extension point: the external stock system is out of scope, so
            // this placeholder reports success without touching the order.
            Action::UpdateStock { .. } => {
                ActionOutcome::ok(json!({ "status": "stock update acknowledged" }))
            }

            // Delivery belongs to the notification service; the engine only
            // records what would be sent.
            Action::SendNotification { config, .. } => {
                ActionOutcome::ok(json!({ "message": config.message }))
            }

            Action::SkipOrder { config, .. } => {
                let reason = config
                    .reason
                    .clone()
                    .unwrap_or_else(|| "Order skipped by fulfillment rule".to_string());
                match self
                    .orders
                    .apply(
                        order_id,
                        OrderPatch::new()
                            .status(OrderStatus::Skipped)
                            .error_message(&reason),
                    )
                    .await
                {
                    Ok(()) => ActionOutcome::ok(json!({ "status": "skipped", "reason": reason })),
                    Err(e) => ActionOutcome::fail(e.to_string()),
                }
            }

            Action::FlagForReview { .. } => {
                match self
                    .orders
                    .apply(order_id, OrderPatch::new().status(OrderStatus::PendingReview))
                    .await
                {
                    Ok(()) => ActionOutcome::ok(json!({ "status": "pending_review" })),
                    Err(e) => ActionOutcome::fail(e.to_string()),
                }
            }

            Action::Unknown { kind, .. } => {
                ActionOutcome::fail(format!("Unknown action type: {}", kind))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::order::Order;
    use crate::engine::store::MemoryOrderStore;
    use serde_json::json;

    fn action(value: Value) -> Action {
        serde_json::from_value(value).unwrap()
    }

    fn executor_with(order: Order) -> (ActionExecutor, Arc<MemoryOrderStore>) {
        let store = Arc::new(MemoryOrderStore::new());
        store.insert(order);
        (ActionExecutor::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_assign_supplier() {
        let (executor, store) = executor_with(Order::new("ord_1"));

        let outcome = executor
            .execute(
                &action(json!({"type": "assign_supplier", "config": {"supplier_id": "sup_1"}})),
                "ord_1",
            )
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.result, Some(json!({"supplier_id": "sup_1"})));
        let order = store.get("ord_1").await.unwrap();
        assert_eq!(order.supplier_id.as_deref(), Some("sup_1"));
    }

    #[tokio::test]
    async fn test_assign_supplier_without_id_fails_without_mutation() {
        let (executor, store) = executor_with(Order::new("ord_1"));

        let outcome = executor
            .execute(&action(json!({"type": "assign_supplier"})), "ord_1")
            .await;

        assert!(!outcome.success);
        assert_eq!(
            outcome.error.as_deref(),
            Some("No supplier_id provided in action config")
        );
        assert!(store.get("ord_1").await.unwrap().supplier_id.is_none());
    }

    #[tokio::test]
    async fn test_apply_margin_persists_percentage_not_price() {
        let (executor, store) = executor_with(Order::new("ord_1").with_cost_price(40.0));

        let outcome = executor
            .execute(
                &action(json!({"type": "apply_margin", "config": {"margin_percent": 25.0}})),
                "ord_1",
            )
            .await;

        assert!(outcome.success);
        let result = outcome.result.unwrap();
        assert_eq!(result["margin_percent"], json!(25.0));
        assert_eq!(result["new_price"], json!(50.0));

        let order = store.get("ord_1").await.unwrap();
        assert_eq!(order.profit_margin, Some(25.0));
        // total_amount stays derived, never written by apply_margin
        assert!(order.total_amount.is_none());
    }

    #[tokio::test]
    async fn test_apply_margin_without_cost_price() {
        let (executor, _) = executor_with(Order::new("ord_1"));

        let outcome = executor
            .execute(
                &action(json!({"type": "apply_margin", "config": {"margin_percent": 25.0}})),
                "ord_1",
            )
            .await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("No cost_price found"));
    }

    #[tokio::test]
    async fn test_set_price_overwrites_total() {
        let (executor, store) = executor_with(Order::new("ord_1").with_total_amount(10.0));

        let outcome = executor
            .execute(
                &action(json!({"type": "set_price", "config": {"price": 79.9}})),
                "ord_1",
            )
            .await;

        assert!(outcome.success);
        assert_eq!(store.get("ord_1").await.unwrap().total_amount, Some(79.9));
    }

    #[tokio::test]
    async fn test_skip_and_flag_set_status() {
        let (executor, store) = executor_with(Order::new("ord_1"));

        let outcome = executor
            .execute(
                &action(json!({"type": "skip_order", "config": {"reason": "out of stock"}})),
                "ord_1",
            )
            .await;
        assert!(outcome.success);
        let order = store.get("ord_1").await.unwrap();
        assert_eq!(order.status, OrderStatus::Skipped);
        assert_eq!(order.error_message.as_deref(), Some("out of stock"));

        let outcome = executor
            .execute(&action(json!({"type": "flag_for_review"})), "ord_1")
            .await;
        assert!(outcome.success);
        assert_eq!(
            store.get("ord_1").await.unwrap().status,
            OrderStatus::PendingReview
        );
    }

    #[tokio::test]
    async fn test_update_stock_and_notification_always_succeed() {
        let (executor, _) = executor_with(Order::new("ord_1"));

        let outcome = executor
            .execute(&action(json!({"type": "update_stock"})), "ord_1")
            .await;
        assert!(outcome.success);

        let outcome = executor
            .execute(
                &action(json!({"type": "send_notification", "config": {"message": "hi"}})),
                "ord_1",
            )
            .await;
        assert!(outcome.success);
        assert_eq!(outcome.result, Some(json!({"message": "hi"})));
    }

    #[tokio::test]
    async fn test_unknown_action_type() {
        let (executor, _) = executor_with(Order::new("ord_1"));

        let outcome = executor
            .execute(&action(json!({"type": "bogus"})), "ord_1")
            .await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Unknown action type: bogus"));
    }

    #[tokio::test]
    async fn test_missing_order_is_local_failure() {
        let executor = ActionExecutor::new(Arc::new(MemoryOrderStore::new()));

        let outcome = executor
            .execute(
                &action(json!({"type": "set_price", "config": {"price": 5.0}})),
                "ord_missing",
            )
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("ord_missing"));
    }
}
