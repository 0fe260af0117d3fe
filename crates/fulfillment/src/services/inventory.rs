//! Inventory service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use common::OrderId;
use domain::ProductId;

use crate::error::CollaboratorError;

/// Result of a successful inventory reservation.
#[derive(Debug, Clone)]
pub struct ReservationResult {
    /// The reservation ID assigned by the inventory service.
    pub reservation_id: String,
}

/// An item to reserve in inventory.
#[derive(Debug, Clone)]
pub struct ReservationItem {
    /// The product to reserve.
    pub product_id: ProductId,
    /// Quantity to reserve.
    pub quantity: u32,
}

/// Trait for inventory management operations.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Reserves stock for the given order items.
    async fn reserve(
        &self,
        order_id: OrderId,
        items: Vec<ReservationItem>,
    ) -> Result<ReservationResult, CollaboratorError>;
}

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    reservations: HashMap<String, (OrderId, Vec<ReservationItem>)>,
    next_id: u32,
    fail_on_reserve: bool,
}

/// In-memory inventory service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryService {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventoryService {
    /// Creates a new in-memory inventory service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on the next reserve call.
    pub fn set_fail_on_reserve(&self, fail: bool) {
        self.state.write().unwrap().fail_on_reserve = fail;
    }

    /// Returns the number of active reservations.
    pub fn reservation_count(&self) -> usize {
        self.state.read().unwrap().reservations.len()
    }

    /// Returns true if a reservation exists with the given ID.
    pub fn has_reservation(&self, reservation_id: &str) -> bool {
        self.state
            .read()
            .unwrap()
            .reservations
            .contains_key(reservation_id)
    }
}

#[async_trait]
impl InventoryService for InMemoryInventoryService {
    async fn reserve(
        &self,
        order_id: OrderId,
        items: Vec<ReservationItem>,
    ) -> Result<ReservationResult, CollaboratorError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_reserve {
            return Err(CollaboratorError::Inventory(
                "Insufficient stock".to_string(),
            ));
        }

        state.next_id += 1;
        let reservation_id = format!("RES-{:04}", state.next_id);
        state
            .reservations
            .insert(reservation_id.clone(), (order_id, items));

        Ok(ReservationResult { reservation_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reserve_records_items() {
        let service = InMemoryInventoryService::new();
        let items = vec![ReservationItem {
            product_id: ProductId::new("SKU-001"),
            quantity: 2,
        }];

        let result = service.reserve(OrderId::new(1), items).await.unwrap();
        assert!(result.reservation_id.starts_with("RES-"));
        assert_eq!(service.reservation_count(), 1);
        assert!(service.has_reservation(&result.reservation_id));
    }

    #[tokio::test]
    async fn failed_reserve_leaves_nothing() {
        let service = InMemoryInventoryService::new();
        service.set_fail_on_reserve(true);

        let items = vec![ReservationItem {
            product_id: ProductId::new("SKU-001"),
            quantity: 2,
        }];

        let result = service.reserve(OrderId::new(1), items).await;
        assert!(matches!(result, Err(CollaboratorError::Inventory(_))));
        assert_eq!(service.reservation_count(), 0);
    }

    #[tokio::test]
    async fn sequential_reservation_ids() {
        let service = InMemoryInventoryService::new();

        let r1 = service.reserve(OrderId::new(1), vec![]).await.unwrap();
        let r2 = service.reserve(OrderId::new(2), vec![]).await.unwrap();

        assert_eq!(r1.reservation_id, "RES-0001");
        assert_eq!(r2.reservation_id, "RES-0002");
    }
}
