//! Read-only retrieval over the catalog.
//!
//! Both engines are pure functions of a catalog slice and their input. They
//! never touch session state.

pub mod recommend;
pub mod search;

pub use recommend::recommend;
pub use search::{rank, search, tokenize, RankedCandidate};
