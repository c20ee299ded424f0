//! Laptop Request Intake
//!
//! The core of a conversational laptop-ordering assistant: keyword search and
//! constraint-driven recommendations over a read-only catalog, plus a
//! per-session state machine that turns a request into a submitted order.

pub mod domain;
pub use domain::{
    Config, ItemRecord, ItemSummary, Order, PerformanceNeeds, RequestType, Requirements,
    SessionKey, SessionState,
};

pub mod engine;

pub mod intake;
pub use intake::{
    IntakeError, IntakeEvent, IntakeMachine, StartRequest, SubmitOrder, ValidationError,
};

pub mod report;

pub mod service;
pub use service::{Action, Assistant, Event, Outcome};

/// Catalog and session storage.
pub mod storage;
pub use storage::{CatalogStore, InMemorySessionStore, SessionStore, StaticCatalog};
