pub mod action;
pub mod audit;
pub mod condition;
pub mod error;
pub mod executor;
pub mod order;
pub mod report;
pub mod rule;
pub mod store;

// Re-export key types for easier access
pub use action::Action;
pub use audit::EventLogEntry;
pub use condition::{AttributeMap, Condition, ConditionLogic, Operator};
pub use error::{EngineError, Result};
pub use executor::{ActionExecutor, ActionOutcome};
pub use order::{Order, OrderPatch, OrderStatus};
pub use report::{ExecutedAction, MatchedRule, RunReport, RunRequest, RunResponse};
pub use rule::Rule;
pub use store::{EventLog, OrderStore, RuleStore};

use chrono::Utc;
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Main engine that evaluates an order against a tenant's rule set.
///
/// One invocation processes one order synchronously against the full active
/// rule set: rules run strictly in priority-descending order, each matched
/// rule's actions run to completion (in declaration order) before the next
/// rule is considered, and every action attempt lands in the event log.
///
/// Condition evaluation reads only the attribute snapshot supplied by the
/// caller; it never re-reads the order store. A higher-priority rule's writes
/// are therefore visible to later rules' *actions* (via the store) but never
/// to their *conditions*.
pub struct Engine {
    rules: Arc<dyn RuleStore>,
    event_log: Arc<dyn EventLog>,
    executor: ActionExecutor,
}

impl Engine {
    pub fn new(
        rules: Arc<dyn RuleStore>,
        orders: Arc<dyn OrderStore>,
        event_log: Arc<dyn EventLog>,
    ) -> Self {
        Self {
            rules,
            event_log,
            executor: ActionExecutor::new(orders),
        }
    }

    /// Evaluate and execute the active rule set for one order.
    ///
    /// Returns `Err` only for systemic failures (rule-set fetch); per-action
    /// failures are captured in the report and the event log. With `dry_run`
    /// set, matched rules are reported but nothing is executed, logged, or
    /// counted.
    pub async fn run(
        &self,
        order_id: &str,
        attributes: &AttributeMap,
        tenant_id: &str,
        dry_run: bool,
    ) -> Result<RunReport> {
        let mut rules = self.rules.active_rules(tenant_id).await.map_err(|e| {
            error!("Failed to fetch rules for tenant {}: {}", tenant_id, e);
            e
        })?;
        // Priority ordering is policy, not a store courtesy: higher-priority
        // rules mutate order state first. Stable sort keeps store order for
        // equal priorities.
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        let total_rules_checked = rules.len();
        debug!(
            "Evaluating {} active rules for order {} (tenant {}, dry_run={})",
            total_rules_checked, order_id, tenant_id, dry_run
        );

        let mut matched_rules = Vec::new();
        let mut executed_actions = Vec::new();

        for rule in &rules {
            if !rule.matches(attributes) {
                debug!("Skipping rule {} - conditions not met", rule.id);
                continue;
            }

            info!(
                "Rule {} ({}) matched for order {}",
                rule.id, rule.name, order_id
            );
            matched_rules.push(MatchedRule {
                id: rule.id.clone(),
                name: rule.name.clone(),
                priority: rule.priority,
            });

            if dry_run {
                continue;
            }

            for action in &rule.actions {
                let outcome = self.executor.execute(action, order_id).await;
                if !outcome.success {
                    warn!(
                        "Action {} of rule {} failed for order {}: {}",
                        action.kind(),
                        rule.id,
                        order_id,
                        outcome.error.as_deref().unwrap_or("unknown")
                    );
                }

                // Exactly one log write per action attempt, success or not.
                // A log append failure must not fail a run that already
                // mutated order state, so it degrades to a warning.
                let entry = EventLogEntry::record(order_id, &rule.id, action.kind(), &outcome);
                if let Err(e) = self.event_log.append(entry).await {
                    warn!("Failed to append event log entry for rule {}: {}", rule.id, e);
                }

                executed_actions.push(ExecutedAction {
                    rule_id: rule.id.clone(),
                    action_type: action.kind().to_string(),
                    success: outcome.success,
                    result: outcome.result,
                    error: outcome.error,
                });
            }

            if let Err(e) = self
                .rules
                .record_execution(tenant_id, &rule.id, Utc::now())
                .await
            {
                warn!("Failed to record execution for rule {}: {}", rule.id, e);
            }
        }

        Ok(RunReport {
            order_id: order_id.to_string(),
            dry_run,
            matched_rules,
            executed_actions,
            total_rules_checked,
        })
    }

    /// Handle a full invocation request, folding systemic errors into the
    /// response envelope instead of propagating them.
    pub async fn handle(&self, request: RunRequest) -> RunResponse {
        match self
            .run(
                &request.order_id,
                &request.order_data,
                &request.user_id,
                request.dry_run,
            )
            .await
        {
            Ok(report) => RunResponse::success(report),
            Err(e) => {
                error!("Rule run failed for order {}: {}", request.order_id, e);
                RunResponse::failure(e.to_string())
            }
        }
    }
}
