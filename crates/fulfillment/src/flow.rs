//! The order-flow state machine and its selection rule.
//!
//! Exactly two flows exist, selected by payment method. The domain has
//! no third variant, so selection is a closed two-way branch rather than
//! a registry.

use chrono::{DateTime, Utc};

use domain::{Order, PaymentMethod, PaymentStatus, ShippingStatus};

use crate::error::{CollaboratorError, FulfillmentError};
use crate::services::{
    InventoryService, LogisticsService, PaymentGateway, ReservationItem,
};

/// Step name: charge the payment gateway.
pub const STEP_CHARGE_PAYMENT: &str = "charge_payment";

/// Step name: reserve stock with the inventory service.
pub const STEP_RESERVE_INVENTORY: &str = "reserve_inventory";

/// Step name: schedule a pickup with the logistics service.
pub const STEP_SCHEDULE_LOGISTICS: &str = "schedule_logistics";

/// The two fulfillment flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFlow {
    /// Reserve stock and schedule pickup; payment settles on delivery.
    CashOnDelivery,
    /// Charge up front, then reserve stock and schedule pickup.
    Prepaid,
}

impl OrderFlow {
    /// Selects the flow for a payment method.
    ///
    /// Cash on delivery gets the COD flow; every other recognized method
    /// is prepaid.
    pub fn for_payment_method(method: PaymentMethod) -> Self {
        if method.is_cash_on_delivery() {
            OrderFlow::CashOnDelivery
        } else {
            OrderFlow::Prepaid
        }
    }

    /// Returns the flow name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderFlow::CashOnDelivery => "CashOnDelivery",
            OrderFlow::Prepaid => "Prepaid",
        }
    }
}

impl std::fmt::Display for OrderFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field updates produced by a completed flow.
///
/// The flow never writes to the store itself; the service applies the
/// outcome to the order and persists it inside the surrounding scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowOutcome {
    pub payment_status: Option<PaymentStatus>,
    pub payment_date: Option<DateTime<Utc>>,
    pub shipping_status: Option<ShippingStatus>,
}

/// Runs order flows against the three collaborator handles.
///
/// The handles are injected at construction; nothing is looked up
/// globally.
pub struct FlowEngine<P, I, L> {
    payment: P,
    inventory: I,
    logistics: L,
}

impl<P, I, L> FlowEngine<P, I, L>
where
    P: PaymentGateway,
    I: InventoryService,
    L: LogisticsService,
{
    /// Creates a flow engine over the given collaborators.
    pub fn new(payment: P, inventory: I, logistics: L) -> Self {
        Self {
            payment,
            inventory,
            logistics,
        }
    }

    /// Selects and runs the flow for the given order.
    ///
    /// The first failing step aborts the flow; there are no compensating
    /// actions. The caller must run this inside the placement's
    /// unit-of-work scope so a failure rolls the whole placement back.
    pub async fn process(&self, order: &Order) -> Result<FlowOutcome, FulfillmentError> {
        let flow = OrderFlow::for_payment_method(order.payment_method);
        tracing::info!(order_id = %order.order_id, flow = flow.as_str(), "order flow selected");

        match flow {
            OrderFlow::CashOnDelivery => self.process_cash_on_delivery(order).await,
            OrderFlow::Prepaid => self.process_prepaid(order).await,
        }
    }

    async fn process_cash_on_delivery(
        &self,
        order: &Order,
    ) -> Result<FlowOutcome, FulfillmentError> {
        self.reserve_inventory(order).await?;
        let schedule = self.schedule_logistics(order).await?;

        // Payment is never contacted: it settles when the courier is paid.
        Ok(FlowOutcome {
            payment_status: None,
            payment_date: None,
            shipping_status: Some(schedule.status),
        })
    }

    async fn process_prepaid(&self, order: &Order) -> Result<FlowOutcome, FulfillmentError> {
        tracing::info!(step = STEP_CHARGE_PAYMENT, "flow step started");
        let charge = self
            .payment
            .charge(
                order.order_id,
                &order.user_id,
                order.payment_method,
                order.total_amount,
            )
            .await
            .map_err(|source| step_failed(STEP_CHARGE_PAYMENT, source))?;

        self.reserve_inventory(order).await?;
        let schedule = self.schedule_logistics(order).await?;

        Ok(FlowOutcome {
            payment_status: Some(charge.status),
            payment_date: Some(Utc::now()),
            shipping_status: Some(schedule.status),
        })
    }

    async fn reserve_inventory(&self, order: &Order) -> Result<(), FulfillmentError> {
        tracing::info!(step = STEP_RESERVE_INVENTORY, "flow step started");
        let items: Vec<ReservationItem> = order
            .order_items
            .iter()
            .map(|item| ReservationItem {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            })
            .collect();

        self.inventory
            .reserve(order.order_id, items)
            .await
            .map_err(|source| step_failed(STEP_RESERVE_INVENTORY, source))?;
        Ok(())
    }

    async fn schedule_logistics(
        &self,
        order: &Order,
    ) -> Result<crate::services::ScheduleResult, FulfillmentError> {
        tracing::info!(step = STEP_SCHEDULE_LOGISTICS, "flow step started");
        self.logistics
            .schedule(
                order.order_id,
                &order.shipping_method,
                &order.shipping_address,
            )
            .await
            .map_err(|source| step_failed(STEP_SCHEDULE_LOGISTICS, source))
    }
}

fn step_failed(step: &'static str, source: CollaboratorError) -> FulfillmentError {
    tracing::warn!(step, error = %source, "flow step failed");
    FulfillmentError::Flow { step, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::{OrderId, OrderItemId, UserId};
    use domain::{Money, OrderItem, ProductId};

    use crate::services::{
        InMemoryInventoryService, InMemoryLogisticsService, InMemoryPaymentGateway,
    };

    fn engine() -> (
        FlowEngine<InMemoryPaymentGateway, InMemoryInventoryService, InMemoryLogisticsService>,
        InMemoryPaymentGateway,
        InMemoryInventoryService,
        InMemoryLogisticsService,
    ) {
        let payment = InMemoryPaymentGateway::new();
        let inventory = InMemoryInventoryService::new();
        let logistics = InMemoryLogisticsService::new();
        let engine = FlowEngine::new(payment.clone(), inventory.clone(), logistics.clone());
        (engine, payment, inventory, logistics)
    }

    fn order(method: PaymentMethod) -> Order {
        let mut order = Order {
            order_id: OrderId::new(1),
            user_id: UserId::new("alice"),
            order_status: Default::default(),
            order_date: Utc::now(),
            total_amount: Money::zero(),
            contact_phone: "555-0100".to_string(),
            email: "alice@example.com".to_string(),
            shipping_method: "standard".to_string(),
            shipping_address: "1 Main St".to_string(),
            shipping_status: Default::default(),
            payment_method: method,
            payment_status: Default::default(),
            payment_date: None,
            order_items: vec![OrderItem {
                order_item_id: OrderItemId::new(1),
                user_id: UserId::new("alice"),
                order_id: OrderId::new(1),
                product_id: ProductId::new("SKU-001"),
                product_name: "Widget".to_string(),
                quantity: 2,
                unit_price: Money::from_cents(1000),
            }],
        };
        order.calculate_total_amount().unwrap();
        order
    }

    #[test]
    fn cod_method_selects_cod_flow() {
        assert_eq!(
            OrderFlow::for_payment_method(PaymentMethod::CashOnDelivery),
            OrderFlow::CashOnDelivery
        );
        assert_eq!(
            OrderFlow::for_payment_method(PaymentMethod::CreditCard),
            OrderFlow::Prepaid
        );
        assert_eq!(
            OrderFlow::for_payment_method(PaymentMethod::BankTransfer),
            OrderFlow::Prepaid
        );
    }

    #[tokio::test]
    async fn cod_flow_never_charges() {
        let (engine, payment, inventory, logistics) = engine();

        let outcome = engine
            .process(&order(PaymentMethod::CashOnDelivery))
            .await
            .unwrap();

        assert_eq!(payment.charge_count(), 0);
        assert_eq!(inventory.reservation_count(), 1);
        assert_eq!(logistics.shipment_count(), 1);
        assert!(outcome.payment_status.is_none());
        assert!(outcome.payment_date.is_none());
        assert_eq!(outcome.shipping_status, Some(ShippingStatus::Scheduled));
    }

    #[tokio::test]
    async fn prepaid_flow_charges_then_reserves_then_schedules() {
        let (engine, payment, inventory, logistics) = engine();

        let outcome = engine
            .process(&order(PaymentMethod::CreditCard))
            .await
            .unwrap();

        assert_eq!(payment.charge_count(), 1);
        assert_eq!(inventory.reservation_count(), 1);
        assert_eq!(logistics.shipment_count(), 1);
        assert_eq!(outcome.payment_status, Some(PaymentStatus::Paid));
        assert!(outcome.payment_date.is_some());
        assert_eq!(outcome.shipping_status, Some(ShippingStatus::Scheduled));
    }

    #[tokio::test]
    async fn prepaid_charge_failure_stops_before_inventory() {
        let (engine, payment, inventory, logistics) = engine();
        payment.set_fail_on_charge(true);

        let err = engine
            .process(&order(PaymentMethod::CreditCard))
            .await
            .unwrap_err();

        match err {
            FulfillmentError::Flow { step, .. } => assert_eq!(step, STEP_CHARGE_PAYMENT),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(inventory.reservation_count(), 0);
        assert_eq!(logistics.shipment_count(), 0);
    }

    #[tokio::test]
    async fn cod_inventory_failure_stops_before_logistics() {
        let (engine, _payment, inventory, logistics) = engine();
        inventory.set_fail_on_reserve(true);

        let err = engine
            .process(&order(PaymentMethod::CashOnDelivery))
            .await
            .unwrap_err();

        match err {
            FulfillmentError::Flow { step, .. } => assert_eq!(step, STEP_RESERVE_INVENTORY),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(logistics.shipment_count(), 0);
    }

    #[tokio::test]
    async fn logistics_failure_carries_step_context() {
        let (engine, _payment, _inventory, logistics) = engine();
        logistics.set_fail_on_schedule(true);

        let err = engine
            .process(&order(PaymentMethod::CashOnDelivery))
            .await
            .unwrap_err();

        assert!(err.to_string().contains(STEP_SCHEDULE_LOGISTICS));
    }
}
