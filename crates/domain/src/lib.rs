//! Domain layer for the order placement system.
//!
//! This crate provides the core domain model:
//! - Order and OrderItem entities with their serialization mapping
//! - Status enums with integer wire codes and fallible conversion
//! - Validated input projections for untrusted request payloads

pub mod error;
pub mod order;

pub use error::DomainError;
pub use order::{
    Money, Order, OrderData, OrderItem, OrderItemData, OrderStatus, OrderStatusUpdate,
    PaymentMethod, PaymentStatus, PaymentStatusUpdate, ProductId, ShippingStatus,
    ShippingStatusUpdate,
};
