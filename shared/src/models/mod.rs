//! Data models
//!
//! Shared between the ledger service and its clients (via API).
//! Row types without enum columns use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All row IDs are `i64`; profile IDs are identity-provider subjects.

pub mod expense;
pub mod fee_event;
pub mod member;
pub mod payment;
pub mod report;
pub mod team;

// Re-exports
pub use expense::*;
pub use fee_event::*;
pub use member::*;
pub use payment::*;
pub use report::*;
pub use team::*;
