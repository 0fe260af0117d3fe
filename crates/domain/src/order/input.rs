//! Validated projections of untrusted request payloads.
//!
//! Public service operations take raw JSON from the transport layer.
//! These types are the shape checks: a payload either deserializes
//! cleanly into one of them or the whole call fails with a validation
//! error before any transaction work happens. They live only for the
//! duration of a single call and are never persisted.

use serde::Deserialize;
use serde_json::Value;

use common::UserId;

use crate::error::DomainError;

use super::status::PaymentMethod;
use super::value_objects::{Money, ProductId};

/// Placement request body.
///
/// Unknown fields are rejected: the placement payload is a strict shape,
/// matching the keyword-for-keyword construction of the order record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderData {
    /// Owner of the order, resolved from the session by the transport.
    pub user_id: UserId,
    pub contact_phone: String,
    pub email: String,
    pub shipping_method: String,
    pub shipping_address: String,
    /// Integer payment-method code; unknown codes fail deserialization.
    pub payment_method: PaymentMethod,
    pub order_items: Vec<OrderItemData>,
}

impl OrderData {
    /// Shape-checks a raw payload into placement data.
    ///
    /// Fails if any field is missing or mistyped, if an unknown field is
    /// present, or if the item list is empty.
    pub fn parse(input: Value) -> Result<Self, DomainError> {
        let data: OrderData =
            serde_json::from_value(input).map_err(|e| DomainError::Validation(e.to_string()))?;
        if data.order_items.is_empty() {
            return Err(DomainError::Validation(
                "order_items must not be empty".to_string(),
            ));
        }
        Ok(data)
    }
}

/// One line of a placement request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderItemData {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price in cents.
    pub unit_price: Money,
}

/// Payment-status update request: `{order_id, payment_status}`.
///
/// The status stays a raw integer here; conversion to [`super::PaymentStatus`]
/// happens at the service so an unknown code is reported as a validation
/// failure without touching the order.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaymentStatusUpdate {
    pub order_id: i64,
    pub payment_status: i32,
}

impl PaymentStatusUpdate {
    /// Shape-checks a raw payload into an update request.
    pub fn parse(input: Value) -> Result<Self, DomainError> {
        serde_json::from_value(input).map_err(|e| DomainError::Validation(e.to_string()))
    }
}

/// Shipping-status update request: `{order_id, shipping_status}`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ShippingStatusUpdate {
    pub order_id: i64,
    pub shipping_status: i32,
}

impl ShippingStatusUpdate {
    /// Shape-checks a raw payload into an update request.
    pub fn parse(input: Value) -> Result<Self, DomainError> {
        serde_json::from_value(input).map_err(|e| DomainError::Validation(e.to_string()))
    }
}

/// Order-status update request: `{order_id, order_status}`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OrderStatusUpdate {
    pub order_id: i64,
    pub order_status: i32,
}

impl OrderStatusUpdate {
    /// Shape-checks a raw payload into an update request.
    pub fn parse(input: Value) -> Result<Self, DomainError> {
        serde_json::from_value(input).map_err(|e| DomainError::Validation(e.to_string()))
    }
}
