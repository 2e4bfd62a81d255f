use serde::{Deserialize, Serialize};

/// Order processing status as persisted on the order record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Skipped,
    PendingReview,
    Fulfilled,
}

/// The shared, mutable order record actions apply partial updates to.
///
/// The engine does not own this record's lifecycle: it pre-exists in the
/// order store and adapters keep it in sync with the marketplace. Only the
/// fields the rule actions touch are modeled here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub supplier_id: Option<String>,
    pub profit_margin: Option<f64>,
    pub total_amount: Option<f64>,
    pub status: OrderStatus,
    pub error_message: Option<String>,
    pub cost_price: Option<f64>,
}

impl Order {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            supplier_id: None,
            profit_margin: None,
            total_amount: None,
            status: OrderStatus::Pending,
            error_message: None,
            cost_price: None,
        }
    }

    /// Builder-style setter for seeding test and fixture orders
    pub fn with_cost_price(mut self, cost_price: f64) -> Self {
        self.cost_price = Some(cost_price);
        self
    }

    pub fn with_total_amount(mut self, total_amount: f64) -> Self {
        self.total_amount = Some(total_amount);
        self
    }
}

/// Partial update against an order record: only set fields are applied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderPatch {
    pub supplier_id: Option<String>,
    pub profit_margin: Option<f64>,
    pub total_amount: Option<f64>,
    pub status: Option<OrderStatus>,
    pub error_message: Option<String>,
}

impl OrderPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn supplier_id(mut self, id: impl Into<String>) -> Self {
        self.supplier_id = Some(id.into());
        self
    }

    pub fn profit_margin(mut self, margin: f64) -> Self {
        self.profit_margin = Some(margin);
        self
    }

    pub fn total_amount(mut self, amount: f64) -> Self {
        self.total_amount = Some(amount);
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Apply the set fields onto an order record, leaving the rest untouched
    pub fn apply_to(&self, order: &mut Order) {
        if let Some(supplier_id) = &self.supplier_id {
            order.supplier_id = Some(supplier_id.clone());
        }
        if let Some(profit_margin) = self.profit_margin {
            order.profit_margin = Some(profit_margin);
        }
        if let Some(total_amount) = self.total_amount {
            order.total_amount = Some(total_amount);
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(error_message) = &self.error_message {
            order.error_message = Some(error_message.clone());
        }
    }
}
