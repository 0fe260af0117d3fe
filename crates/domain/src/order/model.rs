//! Order and OrderItem entities.
//!
//! Timestamps serialize as ISO-8601 (chrono's RFC 3339 serde mapping) and
//! statuses as their integer codes, so a serialized `Order` is the record
//! the outer transport hands back to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::{OrderId, OrderItemId, UserId};

use crate::error::DomainError;

use super::input::{OrderData, OrderItemData};
use super::status::{OrderStatus, PaymentMethod, PaymentStatus, ShippingStatus};
use super::value_objects::{Money, ProductId};

/// A customer order and its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Store-allocated identity, immutable once assigned.
    pub order_id: OrderId,
    pub user_id: UserId,
    pub order_status: OrderStatus,
    /// Set at creation, never updated.
    pub order_date: DateTime<Utc>,
    /// Zero at creation; written exactly once after items are attached.
    pub total_amount: Money,
    pub contact_phone: String,
    pub email: String,
    pub shipping_method: String,
    pub shipping_address: String,
    pub shipping_status: ShippingStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<DateTime<Utc>>,
    pub order_items: Vec<OrderItem>,
}

impl Order {
    /// Builds a fresh order from validated input data.
    ///
    /// Every status starts Pending, the total starts at zero, and the item
    /// list starts empty; items are attached after the store allocates
    /// their ids.
    pub fn create(order_id: OrderId, data: &OrderData, order_date: DateTime<Utc>) -> Self {
        Self {
            order_id,
            user_id: data.user_id.clone(),
            order_status: OrderStatus::Pending,
            order_date,
            total_amount: Money::zero(),
            contact_phone: data.contact_phone.clone(),
            email: data.email.clone(),
            shipping_method: data.shipping_method.clone(),
            shipping_address: data.shipping_address.clone(),
            shipping_status: ShippingStatus::Pending,
            payment_method: data.payment_method,
            payment_status: PaymentStatus::Pending,
            payment_date: None,
            order_items: Vec::new(),
        }
    }

    /// Replaces the attached item list.
    pub fn set_order_items(&mut self, items: Vec<OrderItem>) {
        self.order_items = items;
    }

    /// Recomputes `total_amount` from the attached items and returns it.
    ///
    /// Prices and quantities come from the placement payload, so the sum
    /// is checked; an overflowing total is a validation failure, never a
    /// wrapped amount.
    pub fn calculate_total_amount(&mut self) -> Result<Money, DomainError> {
        let mut total = Money::zero();
        for item in &self.order_items {
            total = total
                .checked_add(item.total_price()?)
                .ok_or_else(|| DomainError::Validation("order total overflows".to_string()))?;
        }
        self.total_amount = total;
        Ok(total)
    }

    /// Applies a new payment status to the in-memory entity.
    pub fn update_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
    }

    /// Applies a new shipping status to the in-memory entity.
    pub fn update_shipping_status(&mut self, status: ShippingStatus) {
        self.shipping_status = status;
    }

    /// Applies a new order status to the in-memory entity.
    pub fn update_order_status(&mut self, status: OrderStatus) {
        self.order_status = status;
    }
}

/// A single line of an order.
///
/// Carries a back-reference to its parent order and owner; the
/// product fields come verbatim from the placement request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: OrderItemId,
    pub user_id: UserId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderItem {
    /// Builds an item from validated input data, bound to its parent order.
    pub fn from_data(
        order_item_id: OrderItemId,
        user_id: UserId,
        order_id: OrderId,
        data: &OrderItemData,
    ) -> Self {
        Self {
            order_item_id,
            user_id,
            order_id,
            product_id: data.product_id.clone(),
            product_name: data.product_name.clone(),
            quantity: data.quantity,
            unit_price: data.unit_price,
        }
    }

    /// Returns the total price for this line (quantity times unit price),
    /// or a validation error if the product overflows.
    pub fn total_price(&self) -> Result<Money, DomainError> {
        self.unit_price.checked_mul(self.quantity).ok_or_else(|| {
            DomainError::Validation(format!(
                "line total for product {} overflows",
                self.product_id
            ))
        })
    }
}
