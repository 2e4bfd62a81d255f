use serde::Deserialize;
use serde_json::Value;

/// Closed set of fulfillment actions with typed per-kind configuration.
///
/// Uses untagged deserialization with kind-marker enums so each variant owns
/// its config shape, while anything unrecognized lands in `Unknown` carrying
/// the raw type string. Unknown actions still load - they fail at execution
/// with a structured error instead of poisoning the rule set.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Action {
    AssignSupplier {
        #[serde(rename = "type")]
        kind: AssignSupplierKind,
        #[serde(default)]
        config: AssignSupplierConfig,
    },
    ApplyMargin {
        #[serde(rename = "type")]
        kind: ApplyMarginKind,
        #[serde(default)]
        config: ApplyMarginConfig,
    },
    SetPrice {
        #[serde(rename = "type")]
        kind: SetPriceKind,
        #[serde(default)]
        config: SetPriceConfig,
    },
    UpdateStock {
        #[serde(rename = "type")]
        kind: UpdateStockKind,
    },
    SendNotification {
        #[serde(rename = "type")]
        kind: SendNotificationKind,
        #[serde(default)]
        config: SendNotificationConfig,
    },
    SkipOrder {
        #[serde(rename = "type")]
        kind: SkipOrderKind,
        #[serde(default)]
        config: SkipOrderConfig,
    },
    FlagForReview {
        #[serde(rename = "type")]
        kind: FlagForReviewKind,
    },
    /// For unrecognized action types, store the raw config
    Unknown {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        config: Value,
    },
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AssignSupplierKind {
    AssignSupplier,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ApplyMarginKind {
    ApplyMargin,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SetPriceKind {
    SetPrice,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStockKind {
    UpdateStock,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SendNotificationKind {
    SendNotification,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SkipOrderKind {
    SkipOrder,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FlagForReviewKind {
    FlagForReview,
}

/// Config for `assign_supplier`. `supplier_id` is validated at execution so
/// a rule saved without it still loads and reports a descriptive failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignSupplierConfig {
    pub supplier_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplyMarginConfig {
    pub margin_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetPriceConfig {
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendNotificationConfig {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkipOrderConfig {
    pub reason: Option<String>,
}

impl Action {
    /// Get the action type string for this configuration
    pub fn kind(&self) -> &str {
        match self {
            Action::AssignSupplier { .. } => "assign_supplier",
            Action::ApplyMargin { .. } => "apply_margin",
            Action::SetPrice { .. } => "set_price",
            Action::UpdateStock { .. } => "update_stock",
            Action::SendNotification { .. } => "send_notification",
            Action::SkipOrder { .. } => "skip_order",
            Action::FlagForReview { .. } => "flag_for_review",
            Action::Unknown { kind, .. } => kind,
        }
    }
}
