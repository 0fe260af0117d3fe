//! The order service: the public entry point of the placement workflow.

use chrono::Utc;
use serde_json::Value;

use common::{OrderId, UserId};
use domain::{
    Order, OrderData, OrderItem, OrderStatus, OrderStatusUpdate, PaymentStatus,
    PaymentStatusUpdate, ShippingStatus, ShippingStatusUpdate,
};
use order_store::{OrderPatch, OrderStore, OrderUnitOfWork};

use crate::config::ServiceConfig;
use crate::error::{FulfillmentError, Result};
use crate::flow::FlowEngine;
use crate::services::{InventoryService, LogisticsService, PaymentGateway};

/// Orchestrates order placement, listing, and status updates.
///
/// Every public operation runs inside its own unit-of-work scope over
/// the injected store; the three collaborator handles are injected at
/// construction and only reached through the flow engine.
pub struct OrderService<S, P, I, L> {
    store: S,
    flows: FlowEngine<P, I, L>,
    config: ServiceConfig,
}

impl<S, P, I, L> OrderService<S, P, I, L>
where
    S: OrderStore,
    P: PaymentGateway,
    I: InventoryService,
    L: LogisticsService,
{
    /// Creates a new order service with default configuration.
    pub fn new(store: S, payment: P, inventory: I, logistics: L) -> Self {
        Self::with_config(store, payment, inventory, logistics, ServiceConfig::default())
    }

    /// Creates a new order service with explicit configuration.
    pub fn with_config(
        store: S,
        payment: P,
        inventory: I,
        logistics: L,
        config: ServiceConfig,
    ) -> Self {
        Self {
            store,
            flows: FlowEngine::new(payment, inventory, logistics),
            config,
        }
    }

    /// Places a new order.
    ///
    /// Validates the raw payload, then within one unit-of-work scope:
    /// allocates an id, persists the order and its items, computes the
    /// total, runs the payment-method flow under the configured deadline,
    /// and commits. Any failure drops the scope without commit, so an
    /// aborted placement leaves no trace.
    #[tracing::instrument(skip(self, input))]
    pub async fn place_order(&self, input: Value) -> Result<Order> {
        metrics::counter!("order_placements_total").increment(1);
        let started = std::time::Instant::now();

        let data = OrderData::parse(input)?;

        let mut uow = self.store.begin().await?;
        let order_id = Self::allocate_order_id(&mut uow).await?;

        let mut order = Order::create(order_id, &data, Utc::now());
        uow.add_order(order.clone()).await?;

        let mut items = Vec::with_capacity(data.order_items.len());
        for item_data in &data.order_items {
            let item_id = uow.next_order_item_id().await?;
            let item = OrderItem::from_data(item_id, order.user_id.clone(), order_id, item_data);
            uow.add_order_item(item.clone()).await?;
            items.push(item);
        }
        order.set_order_items(items);

        let total = order.calculate_total_amount()?;
        uow.update_order(order_id, OrderPatch::TotalAmount(total))
            .await?;

        let outcome = match tokio::time::timeout(
            self.config.flow_deadline,
            self.flows.process(&order),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                metrics::counter!("order_flow_timeouts_total").increment(1);
                return Err(FulfillmentError::FlowTimeout(self.config.flow_deadline));
            }
        };

        if let Some(status) = outcome.payment_status {
            order.update_payment_status(status);
            uow.update_order(order_id, OrderPatch::PaymentStatus(status))
                .await?;
        }
        if outcome.payment_date.is_some() {
            order.payment_date = outcome.payment_date;
            uow.update_order(order_id, OrderPatch::PaymentDate(outcome.payment_date))
                .await?;
        }
        if let Some(status) = outcome.shipping_status {
            order.update_shipping_status(status);
            uow.update_order(order_id, OrderPatch::ShippingStatus(status))
                .await?;
        }

        uow.commit().await?;

        metrics::histogram!("order_placement_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        tracing::info!(order_id = %order_id, total = %order.total_amount, "order placed");
        Ok(order)
    }

    /// Allocates a fresh order id and re-checks it is unoccupied.
    ///
    /// The allocator never reissues an id; the existence check stays as a
    /// safety net against a misbehaving store and surfaces the same
    /// duplicate-id error callers are told to retry on.
    async fn allocate_order_id(uow: &mut S::Uow) -> Result<OrderId> {
        let order_id = uow.next_order_id().await?;
        if uow.get_order(order_id).await?.is_some() {
            return Err(FulfillmentError::DuplicateOrderId(order_id));
        }
        Ok(order_id)
    }

    /// Lists a user's orders with their items attached.
    #[tracing::instrument(skip(self))]
    pub async fn get_user_orders(&self, user_id: &UserId) -> Result<Vec<Order>> {
        let uow = self.store.begin().await?;
        let mut orders = uow.orders_by_user(user_id).await?;
        for order in &mut orders {
            let items = uow.items_by_order(order.order_id).await?;
            order.set_order_items(items);
        }
        // Read-only scopes still commit so the transaction closes cleanly.
        uow.commit().await?;
        Ok(orders)
    }

    /// Updates an order's payment status from a raw request payload.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_payment_status(&self, input: Value) -> Result<Order> {
        let request = PaymentStatusUpdate::parse(input)?;
        let status = PaymentStatus::try_from(request.payment_status)?;
        let order_id = OrderId::new(request.order_id);

        let mut uow = self.store.begin().await?;
        let mut order = Self::load_order(&uow, order_id).await?;
        order.update_payment_status(status);
        uow.update_order(order_id, OrderPatch::PaymentStatus(status))
            .await?;
        uow.commit().await?;

        tracing::info!(order_id = %order_id, status = %status, "payment status updated");
        Ok(order)
    }

    /// Updates an order's shipping status from a raw request payload.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_shipping_status(&self, input: Value) -> Result<Order> {
        let request = ShippingStatusUpdate::parse(input)?;
        let status = ShippingStatus::try_from(request.shipping_status)?;
        let order_id = OrderId::new(request.order_id);

        let mut uow = self.store.begin().await?;
        let mut order = Self::load_order(&uow, order_id).await?;
        order.update_shipping_status(status);
        uow.update_order(order_id, OrderPatch::ShippingStatus(status))
            .await?;
        uow.commit().await?;

        tracing::info!(order_id = %order_id, status = %status, "shipping status updated");
        Ok(order)
    }

    /// Updates an order's lifecycle status from a raw request payload.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_order_status(&self, input: Value) -> Result<Order> {
        let request = OrderStatusUpdate::parse(input)?;
        let status = OrderStatus::try_from(request.order_status)?;
        let order_id = OrderId::new(request.order_id);

        let mut uow = self.store.begin().await?;
        let mut order = Self::load_order(&uow, order_id).await?;
        order.update_order_status(status);
        uow.update_order(order_id, OrderPatch::OrderStatus(status))
            .await?;
        uow.commit().await?;

        tracing::info!(order_id = %order_id, status = %status, "order status updated");
        Ok(order)
    }

    /// Loads an order with its items rehydrated, or fails with not-found.
    async fn load_order(uow: &S::Uow, order_id: OrderId) -> Result<Order> {
        let mut order = uow
            .get_order(order_id)
            .await?
            .ok_or(FulfillmentError::OrderNotFound(order_id))?;
        let items = uow.items_by_order(order_id).await?;
        order.set_order_items(items);
        Ok(order)
    }
}
