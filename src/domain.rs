//! Domain models for catalog search and order intake.
//!
//! This module contains the catalog item record, orders in their pending and
//! submitted shapes, recommendation requirements, per-session state and the
//! configuration.

mod config;
pub use config::{Config, ConfigError};

/// Catalog item records and their summaries.
pub mod item;
pub use item::{Category, ItemRecord, ItemSummary};

/// Orders, request types and order status.
pub mod order;
pub use order::{Employee, Order, OrderId, OrderStatus, PendingOrder, RequestType};

/// Structured recommendation constraints.
pub mod requirements;
pub use requirements::{PerformanceNeeds, Requirements};

/// Session keys and per-session state.
pub mod session;
pub use session::{IntakeState, SessionKey, SessionState};
