//! Team ledger operations
//!
//! Each operation takes the store and the resolved [`Caller`], passes the
//! gate first, then only ever touches rows of the caller's team.
//!
//! [`Caller`]: crate::auth::Caller

pub mod expenses;
pub mod fee_events;
pub mod payments;
pub mod reports;
pub mod roster;
pub mod teams;

pub use fee_events::FeeEventCreated;
pub use payments::GenerationOutcome;

#[cfg(test)]
mod tests;
