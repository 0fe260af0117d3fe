//! Logistics service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use common::OrderId;
use domain::ShippingStatus;

use crate::error::CollaboratorError;

/// Result of a successfully scheduled pickup.
#[derive(Debug, Clone)]
pub struct ScheduleResult {
    /// Tracking number assigned by the carrier.
    pub tracking_number: String,
    /// Shipping status reported by the carrier.
    pub status: ShippingStatus,
}

/// Trait for logistics scheduling operations.
#[async_trait]
pub trait LogisticsService: Send + Sync {
    /// Schedules a pickup for an order.
    async fn schedule(
        &self,
        order_id: OrderId,
        shipping_method: &str,
        shipping_address: &str,
    ) -> Result<ScheduleResult, CollaboratorError>;
}

#[derive(Debug, Default)]
struct InMemoryLogisticsState {
    shipments: HashMap<String, (OrderId, String)>,
    next_id: u32,
    fail_on_schedule: bool,
}

/// In-memory logistics service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogisticsService {
    state: Arc<RwLock<InMemoryLogisticsState>>,
}

impl InMemoryLogisticsService {
    /// Creates a new in-memory logistics service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on the next schedule call.
    pub fn set_fail_on_schedule(&self, fail: bool) {
        self.state.write().unwrap().fail_on_schedule = fail;
    }

    /// Returns the number of scheduled shipments.
    pub fn shipment_count(&self) -> usize {
        self.state.read().unwrap().shipments.len()
    }

    /// Returns true if a shipment exists with the given tracking number.
    pub fn has_shipment(&self, tracking_number: &str) -> bool {
        self.state
            .read()
            .unwrap()
            .shipments
            .contains_key(tracking_number)
    }
}

#[async_trait]
impl LogisticsService for InMemoryLogisticsService {
    async fn schedule(
        &self,
        order_id: OrderId,
        _shipping_method: &str,
        shipping_address: &str,
    ) -> Result<ScheduleResult, CollaboratorError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_schedule {
            return Err(CollaboratorError::Logistics(
                "No carrier available".to_string(),
            ));
        }

        state.next_id += 1;
        let tracking_number = format!("TRK-{:04}", state.next_id);
        state.shipments.insert(
            tracking_number.clone(),
            (order_id, shipping_address.to_string()),
        );

        Ok(ScheduleResult {
            tracking_number,
            status: ShippingStatus::Scheduled,
        })
    }
}
