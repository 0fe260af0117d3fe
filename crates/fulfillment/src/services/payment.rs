//! Payment gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use common::{OrderId, UserId};
use domain::{Money, PaymentMethod, PaymentStatus};

use crate::error::CollaboratorError;

/// Result of a successful charge.
#[derive(Debug, Clone)]
pub struct ChargeResult {
    /// The payment ID assigned by the gateway.
    pub payment_id: String,
    /// Settlement status reported by the gateway.
    pub status: PaymentStatus,
}

/// Trait for payment processing operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges the customer for an order.
    async fn charge(
        &self,
        order_id: OrderId,
        user_id: &UserId,
        method: PaymentMethod,
        amount: Money,
    ) -> Result<ChargeResult, CollaboratorError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    charges: HashMap<String, (OrderId, Money)>,
    next_id: u32,
    fail_on_charge: bool,
}

/// In-memory payment gateway for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory payment gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to decline the next charge call.
    pub fn set_fail_on_charge(&self, fail: bool) {
        self.state.write().unwrap().fail_on_charge = fail;
    }

    /// Returns the number of settled charges.
    pub fn charge_count(&self) -> usize {
        self.state.read().unwrap().charges.len()
    }

    /// Returns true if a charge exists with the given ID.
    pub fn has_charge(&self, payment_id: &str) -> bool {
        self.state.read().unwrap().charges.contains_key(payment_id)
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn charge(
        &self,
        order_id: OrderId,
        _user_id: &UserId,
        _method: PaymentMethod,
        amount: Money,
    ) -> Result<ChargeResult, CollaboratorError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_charge {
            return Err(CollaboratorError::Payment("Payment declined".to_string()));
        }

        state.next_id += 1;
        let payment_id = format!("PAY-{:04}", state.next_id);
        state.charges.insert(payment_id.clone(), (order_id, amount));

        Ok(ChargeResult {
            payment_id,
            status: PaymentStatus::Paid,
        })
    }
}
