use thiserror::Error;

use common::{OrderId, OrderItemId};

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The order id is already occupied by a persisted or staged order.
    #[error("Order id {0} has already been used")]
    DuplicateOrderId(OrderId),

    /// The order item id is already occupied.
    #[error("Order item id {0} has already been used")]
    DuplicateOrderItemId(OrderItemId),

    /// An operation targeted an order that does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The commit itself failed; no staged write was applied.
    #[error("Commit failed: {reason}")]
    Commit { reason: String },
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
