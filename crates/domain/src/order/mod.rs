//! The order domain: entities, statuses, value objects, and input projections.

pub mod input;
pub mod model;
pub mod status;
pub mod value_objects;

pub use input::{
    OrderData, OrderItemData, OrderStatusUpdate, PaymentStatusUpdate, ShippingStatusUpdate,
};
pub use model::{Order, OrderItem};
pub use status::{OrderStatus, PaymentMethod, PaymentStatus, ShippingStatus};
pub use value_objects::{Money, ProductId};
