//! Collaborator interfaces consumed by the order flows.
//!
//! Payment, inventory, and logistics are external subsystems; this core
//! only depends on the operations below. The in-memory implementations
//! are test doubles with failure switches and observation counters.

pub mod inventory;
pub mod logistics;
pub mod payment;

pub use inventory::{
    InMemoryInventoryService, InventoryService, ReservationItem, ReservationResult,
};
pub use logistics::{InMemoryLogisticsService, LogisticsService, ScheduleResult};
pub use payment::{ChargeResult, InMemoryPaymentGateway, PaymentGateway};
