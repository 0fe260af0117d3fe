//! In-memory order store with real transaction semantics.
//!
//! The store keeps committed order and item tables behind a shared lock.
//! Each unit of work carries a private staging overlay: reads inside the
//! scope see staged writes layered over the committed base, other scopes
//! see nothing until `commit` takes the write lock once and applies the
//! whole batch. Dropping the scope discards the overlay.

use std::collections::BTreeMap;
use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{OrderId, OrderItemId, UserId};
use domain::{Order, OrderItem};

use crate::error::{Result, StoreError};
use crate::store::{OrderPatch, OrderStore, OrderUnitOfWork};

#[derive(Debug, Default)]
struct StoreState {
    orders: BTreeMap<i64, Order>,
    items: BTreeMap<i64, OrderItem>,
}

/// In-memory order store.
///
/// Id allocation is an atomic fetch-and-increment on counters shared by
/// every scope: an allocated id is reserved forever, so two concurrent
/// placements can never draw the same id even if one of them rolls back.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<StoreState>>,
    next_order_id: Arc<AtomicI64>,
    next_order_item_id: Arc<AtomicI64>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of committed orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Returns the number of committed order items.
    pub async fn item_count(&self) -> usize {
        self.state.read().await.items.len()
    }

    /// Clears all committed records. Allocated ids stay reserved.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.orders.clear();
        state.items.clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    type Uow = InMemoryUnitOfWork;

    async fn begin(&self) -> Result<InMemoryUnitOfWork> {
        let tx_id = Uuid::new_v4();
        tracing::debug!(%tx_id, "unit of work opened");
        Ok(InMemoryUnitOfWork {
            store: self.clone(),
            tx_id,
            staged_orders: BTreeMap::new(),
            staged_items: BTreeMap::new(),
            patches: Vec::new(),
            finished: false,
        })
    }
}

/// A transactional scope over [`InMemoryOrderStore`].
pub struct InMemoryUnitOfWork {
    store: InMemoryOrderStore,
    tx_id: Uuid,
    staged_orders: BTreeMap<i64, Order>,
    staged_items: BTreeMap<i64, OrderItem>,
    // Patches against committed orders; staged orders are patched in place.
    patches: Vec<(i64, OrderPatch)>,
    finished: bool,
}

impl InMemoryUnitOfWork {
    /// Identifier of this transactional scope.
    pub fn tx_id(&self) -> Uuid {
        self.tx_id
    }

    fn base_order_with_patches(&self, state: &StoreState, id: i64) -> Option<Order> {
        let mut order = state.orders.get(&id).cloned()?;
        for (patched_id, patch) in &self.patches {
            if *patched_id == id {
                patch.apply(&mut order);
            }
        }
        Some(order)
    }
}

#[async_trait]
impl OrderUnitOfWork for InMemoryUnitOfWork {
    async fn next_order_id(&mut self) -> Result<OrderId> {
        let id = self.store.next_order_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(OrderId::new(id))
    }

    async fn next_order_item_id(&mut self) -> Result<OrderItemId> {
        let id = self.store.next_order_item_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(OrderItemId::new(id))
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        if let Some(order) = self.staged_orders.get(&id.value()) {
            return Ok(Some(order.clone()));
        }
        let state = self.store.state.read().await;
        Ok(self.base_order_with_patches(&state, id.value()))
    }

    async fn add_order(&mut self, order: Order) -> Result<()> {
        let id = order.order_id;
        if self.staged_orders.contains_key(&id.value()) {
            return Err(StoreError::DuplicateOrderId(id));
        }
        {
            let state = self.store.state.read().await;
            if state.orders.contains_key(&id.value()) {
                return Err(StoreError::DuplicateOrderId(id));
            }
        }
        // The record's item list is not persisted here; items live in
        // their own table and are staged via add_order_item.
        let mut record = order;
        record.order_items = Vec::new();
        self.staged_orders.insert(id.value(), record);
        Ok(())
    }

    async fn add_order_item(&mut self, item: OrderItem) -> Result<()> {
        let id = item.order_item_id;
        if self.staged_items.contains_key(&id.value()) {
            return Err(StoreError::DuplicateOrderItemId(id));
        }
        {
            let state = self.store.state.read().await;
            if state.items.contains_key(&id.value()) {
                return Err(StoreError::DuplicateOrderItemId(id));
            }
        }
        self.staged_items.insert(id.value(), item);
        Ok(())
    }

    async fn update_order(&mut self, id: OrderId, patch: OrderPatch) -> Result<()> {
        tracing::debug!(tx_id = %self.tx_id, order_id = %id, field = patch.field(), "order patched");
        if let Some(order) = self.staged_orders.get_mut(&id.value()) {
            patch.apply(order);
            return Ok(());
        }
        let state = self.store.state.read().await;
        if !state.orders.contains_key(&id.value()) {
            return Err(StoreError::OrderNotFound(id));
        }
        self.patches.push((id.value(), patch));
        Ok(())
    }

    async fn orders_by_user(&self, user_id: &UserId) -> Result<Vec<Order>> {
        let state = self.store.state.read().await;
        let mut orders: Vec<Order> = state
            .orders
            .keys()
            .filter_map(|id| self.base_order_with_patches(&state, *id))
            .filter(|o| &o.user_id == user_id)
            .collect();
        orders.extend(
            self.staged_orders
                .values()
                .filter(|o| &o.user_id == user_id)
                .cloned(),
        );
        orders.sort_by_key(|o| o.order_id);
        Ok(orders)
    }

    async fn items_by_order(&self, id: OrderId) -> Result<Vec<OrderItem>> {
        let state = self.store.state.read().await;
        let mut items: Vec<OrderItem> = state
            .items
            .values()
            .filter(|i| i.order_id == id)
            .cloned()
            .collect();
        items.extend(
            self.staged_items
                .values()
                .filter(|i| i.order_id == id)
                .cloned(),
        );
        items.sort_by_key(|i| i.order_item_id);
        Ok(items)
    }

    async fn commit(mut self) -> Result<()> {
        let staged_orders = mem::take(&mut self.staged_orders);
        let staged_items = mem::take(&mut self.staged_items);
        let patches = mem::take(&mut self.patches);

        let mut state = self.store.state.write().await;

        // Validate the whole batch before touching the tables, so a failed
        // commit leaves no partial effect.
        for id in staged_orders.keys() {
            if state.orders.contains_key(id) {
                return Err(StoreError::Commit {
                    reason: format!("order id {id} has already been used"),
                });
            }
        }
        for id in staged_items.keys() {
            if state.items.contains_key(id) {
                return Err(StoreError::Commit {
                    reason: format!("order item id {id} has already been used"),
                });
            }
        }
        for (id, _) in &patches {
            if !state.orders.contains_key(id) {
                return Err(StoreError::Commit {
                    reason: format!("patched order {id} no longer exists"),
                });
            }
        }

        // Only a validated batch counts as committed; a failed commit drops
        // through the rollback path like any abandoned scope.
        self.finished = true;

        for (id, patch) in patches {
            if let Some(order) = state.orders.get_mut(&id) {
                patch.apply(order);
            }
        }
        state.orders.extend(staged_orders);
        state.items.extend(staged_items);

        metrics::counter!("order_store_commits_total").increment(1);
        tracing::debug!(tx_id = %self.tx_id, "unit of work committed");
        Ok(())
    }
}

impl Drop for InMemoryUnitOfWork {
    fn drop(&mut self) {
        if !self.finished {
            metrics::counter!("order_store_rollbacks_total").increment(1);
            tracing::debug!(tx_id = %self.tx_id, "unit of work rolled back");
        }
    }
}
