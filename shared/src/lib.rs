//! Shared types for the dues ledger
//!
//! Domain models, the unified error system and small utilities used by the
//! service crate and by API clients.

pub mod error;
pub mod models;
pub mod util;
