//! Repository and unit-of-work traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use common::{OrderId, OrderItemId, UserId};
use domain::{Money, Order, OrderItem, OrderStatus, PaymentStatus, ShippingStatus};

use crate::error::Result;

/// A single-field update to a persisted order.
///
/// The placement and status-update workflows only ever patch one field
/// at a time; a closed enum keeps those patches typed instead of passing
/// a field name and an untyped value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderPatch {
    TotalAmount(Money),
    OrderStatus(OrderStatus),
    PaymentStatus(PaymentStatus),
    ShippingStatus(ShippingStatus),
    PaymentDate(Option<DateTime<Utc>>),
}

impl OrderPatch {
    /// Name of the patched column, for logging.
    pub fn field(&self) -> &'static str {
        match self {
            OrderPatch::TotalAmount(_) => "total_amount",
            OrderPatch::OrderStatus(_) => "order_status",
            OrderPatch::PaymentStatus(_) => "payment_status",
            OrderPatch::ShippingStatus(_) => "shipping_status",
            OrderPatch::PaymentDate(_) => "payment_date",
        }
    }

    /// Applies the patch to an order record.
    pub fn apply(&self, order: &mut Order) {
        match *self {
            OrderPatch::TotalAmount(amount) => order.total_amount = amount,
            OrderPatch::OrderStatus(status) => order.order_status = status,
            OrderPatch::PaymentStatus(status) => order.payment_status = status,
            OrderPatch::ShippingStatus(status) => order.shipping_status = status,
            OrderPatch::PaymentDate(date) => order.payment_date = date,
        }
    }
}

/// Handle to an order store; each call to [`begin`](OrderStore::begin)
/// opens an independent transactional scope.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// The unit-of-work type this store hands out.
    type Uow: OrderUnitOfWork;

    /// Opens a new unit of work over this store.
    async fn begin(&self) -> Result<Self::Uow>;
}

/// One transactional scope over the order repository.
///
/// Writes performed through a unit of work stay private to the scope
/// until [`commit`](OrderUnitOfWork::commit) applies them as one atomic
/// batch. Dropping the value without committing rolls everything back;
/// commit consumes the handle, so a scope can never be reused.
///
/// Id allocation is the exception: `next_order_id` and
/// `next_order_item_id` draw from a shared allocator that never issues
/// the same id twice, even across scopes that later roll back.
#[async_trait]
pub trait OrderUnitOfWork: Send {
    /// Allocates and reserves the next order id.
    async fn next_order_id(&mut self) -> Result<OrderId>;

    /// Allocates and reserves the next order item id.
    async fn next_order_item_id(&mut self) -> Result<OrderItemId>;

    /// Fetches an order record by id, with staged writes layered in.
    ///
    /// Item lists are stored separately; use
    /// [`items_by_order`](OrderUnitOfWork::items_by_order) to rehydrate them.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Stages a new order record.
    async fn add_order(&mut self, order: Order) -> Result<()>;

    /// Stages a new order item record.
    async fn add_order_item(&mut self, item: OrderItem) -> Result<()>;

    /// Stages a single-field update to an existing order.
    async fn update_order(&mut self, id: OrderId, patch: OrderPatch) -> Result<()>;

    /// Lists all orders belonging to a user, staged writes included.
    async fn orders_by_user(&self, user_id: &UserId) -> Result<Vec<Order>>;

    /// Lists all items belonging to an order, staged writes included.
    async fn items_by_order(&self, id: OrderId) -> Result<Vec<OrderItem>>;

    /// Applies every staged write atomically and closes the scope.
    ///
    /// If commit fails, no staged write is applied.
    async fn commit(self) -> Result<()>;
}
