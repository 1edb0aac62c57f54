//! # reqlens-storage
//!
//! SQLite persistence for reqlens: a serialized writer plus a read pool,
//! `PRAGMA user_version` migrations, one query module per table and the
//! `ReqStorageEngine` facade the server talks to.

pub mod connection;
pub mod engine;
mod errors;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use engine::{ProjectSnapshot, RepairOutcome, ReqStorageEngine};
