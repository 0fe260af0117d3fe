//! Fulfillment error types.

use std::time::Duration;

use thiserror::Error;

use common::OrderId;
use domain::DomainError;
use order_store::StoreError;

/// Failure reported by one of the external collaborators.
///
/// Collaborators fail loudly; a partial success never comes back as an
/// `Ok` value.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// Payment gateway error.
    #[error("Payment gateway error: {0}")]
    Payment(String),

    /// Inventory service error.
    #[error("Inventory service error: {0}")]
    Inventory(String),

    /// Logistics service error.
    #[error("Logistics service error: {0}")]
    Logistics(String),
}

/// Errors that can occur during order placement and status updates.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// Input validation failed; no write was attempted.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The allocated order id is already occupied. The caller may retry;
    /// a retry allocates a fresh id.
    #[error("Order id {0} has already been used")]
    DuplicateOrderId(OrderId),

    /// An update targeted an order that does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// A flow step failed; the surrounding placement rolled back.
    #[error("Order flow step '{step}' failed: {source}")]
    Flow {
        step: &'static str,
        #[source]
        source: CollaboratorError,
    },

    /// The flow did not finish within the configured deadline; the
    /// surrounding placement rolled back.
    #[error("Order flow did not finish within {0:?}")]
    FlowTimeout(Duration),

    /// The order store failed.
    #[error("Order store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for fulfillment results.
pub type Result<T> = std::result::Result<T, FulfillmentError>;
