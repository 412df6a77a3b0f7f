//! Trading journal ledger: accounts, journal entries (trades, deposits,
//! withdrawals), reusable checklists, and the derivation engine that
//! rebuilds running balances and performance statistics from the entry
//! sequence on every read.

pub mod db;
pub mod error;
pub mod interchange;
pub mod ledger;
pub mod models;
pub mod store;

pub use db::Database;
pub use error::JournalError;
