//! Order fulfillment orchestration.
//!
//! This crate drives a freshly placed order through its payment-method
//! specific flow:
//! - Cash on delivery: reserve inventory, schedule logistics; payment
//!   settles at the door.
//! - Prepaid: charge payment, reserve inventory, schedule logistics.
//!
//! The flow runs inside the same unit-of-work scope as the order writes,
//! so a failed step rolls the whole placement back. There are no
//! compensating actions: the first failure aborts the transaction.

pub mod config;
pub mod error;
pub mod flow;
pub mod service;
pub mod services;

pub use config::ServiceConfig;
pub use error::{CollaboratorError, FulfillmentError};
pub use flow::{FlowEngine, FlowOutcome, OrderFlow};
pub use service::OrderService;
pub use services::{
    ChargeResult, InMemoryInventoryService, InMemoryLogisticsService, InMemoryPaymentGateway,
    InventoryService, LogisticsService, PaymentGateway, ReservationItem, ReservationResult,
    ScheduleResult,
};
