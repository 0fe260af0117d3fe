//! Order persistence seam for the placement workflow.
//!
//! This crate defines the repository and unit-of-work contract consumed
//! by the order service, plus an in-memory implementation with real
//! transactional semantics: writes staged inside a scope are invisible
//! to other scopes until `commit`, and dropping a scope without
//! committing discards every staged write.

pub mod error;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::{InMemoryOrderStore, InMemoryUnitOfWork};
pub use store::{OrderPatch, OrderStore, OrderUnitOfWork};
