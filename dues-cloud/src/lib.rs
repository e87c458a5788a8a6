//! dues-cloud: multi-tenant dues and expense ledger for sports teams
//!
//! - `ledger`: team-scoped operations (roster, fee events, payments, expenses, reports)
//! - `db`: storage trait with PostgreSQL and in-memory backends
//! - `auth`: bearer tokens and the role gate
//! - `api`: axum routes over the ledger

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod state;
pub mod validation;
