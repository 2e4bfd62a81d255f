/*!
# Orderflow-rs

A lightweight fulfillment rules engine for e-commerce order routing in Rust.

## Overview

Orderflow-rs decides, per incoming order, which supplier to assign, what
margin to apply, whether to flag for review, or skip entirely - driven by
user-configured rules with priority ordering and AND/OR condition logic.
The engine evaluates a flat attribute snapshot of the order against each
active rule and executes matching rules' actions against an order store,
writing one audit record per action attempt.

## Key Components

* **Engine**: Orchestrates one run - loads the tenant's active rules, matches
  them priority-first, executes actions, and assembles the run report
* **Rule**: A named, prioritized policy combining conditions (AND/OR) with a
  sequence of actions
* **Condition**: One field/operator/value comparison against the order
  attribute map; case-insensitive strings, coercing numerics
* **Action**: A typed effect applied to the order record (assign supplier,
  apply margin, set price, skip, flag for review, ...)
* **Stores**: `RuleStore`, `OrderStore`, and `EventLog` traits decouple the
  engine from the hosted backend; in-memory implementations ship for tests

## Usage Example

```rust,no_run
use orderflow_rs::{Engine, Order, Rule};
use orderflow_rs::engine::store::{MemoryEventLog, MemoryOrderStore, MemoryRuleStore};
use serde_json::json;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rules = Arc::new(MemoryRuleStore::new());
    let orders = Arc::new(MemoryOrderStore::new());
    let event_log = Arc::new(MemoryEventLog::new());

    // Define a rule in JSON
    rules.add_rule(
        "tenant_1",
        Rule::from_json(
            r#"{
                "id": "route_eu",
                "name": "Route EU orders to EU supplier",
                "condition_logic": "AND",
                "conditions": [
                    {"field": "country", "operator": "equals", "value": "FR"}
                ],
                "actions": [
                    {"type": "assign_supplier", "config": {"supplier_id": "sup_eu_01"}}
                ],
                "priority": 10
            }"#,
        )?,
    );

    orders.insert(Order::new("ord_1").with_cost_price(12.0));

    let engine = Engine::new(rules, orders, event_log);

    let attributes = [("country".to_string(), json!("fr"))].into_iter().collect();
    let report = engine.run("ord_1", &attributes, "tenant_1", false).await?;

    println!("matched {} rules", report.matched_rules.len());
    Ok(())
}
```

## Error Handling

Per-action and per-condition failures are values, never panics or errors: a
malformed rule yields a structured failure entry in the report and the event
log while sibling actions and later rules keep running. Only systemic
failures (rule-set fetch) abort a run, and `Engine::handle` folds even those
into a `{ success: false, error }` response envelope.

## Dry Run

Pass `dry_run = true` (or set it on the request) to preview which rules would
fire: the report carries `matched_rules` but no actions execute, no event-log
entries are written, and no rule bookkeeping changes. This is the only path
that is always safe to retry.
*/

pub mod engine;

// Re-export all public APIs for easier access
pub use engine::error::{EngineError, Result};
pub use engine::report::{ExecutedAction, MatchedRule, RunReport, RunRequest, RunResponse};
pub use engine::store::{EventLog, OrderStore, RuleStore};
pub use engine::{
    Action, ActionExecutor, ActionOutcome, AttributeMap, Condition, ConditionLogic, Engine,
    EventLogEntry, Operator, Order, OrderPatch, OrderStatus, Rule,
};
