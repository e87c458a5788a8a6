//! Caller identity and authorization

pub mod gate;
pub mod team_auth;

pub use gate::{Caller, Identity, TeamScope, resolve_caller};
